use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const DEFAULT_COUNT: usize = 20;
pub const MAX_COUNT: usize = 100;

/// Version whose `wall.getComments` answer is a count-prefixed array.
pub const LEGACY_COMMENTS_VERSION: &str = "4.4";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredPost {
    pub id: i64,
    pub owner_id: i64,
    pub from_id: i64,
    pub date: i64,
    pub text: String,
    pub likes: u32,
    pub reposts: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredComment {
    pub id: i64,
    pub owner_id: i64,
    pub post_id: i64,
    pub from_id: i64,
    pub date: i64,
    pub text: String,
    pub likes: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Wall {
    pub posts: Vec<StoredPost>,
    pub comments: Vec<StoredComment>,
}

impl Wall {
    /// Community `-1` with five posts (two by a member) and three comments on
    /// post 3, plus user `93388` with two posts.
    pub fn seeded() -> Self {
        let post = |owner_id: i64, id: i64, from_id: i64, text: &str| StoredPost {
            id,
            owner_id,
            from_id,
            date: 1_383_670_000 + id,
            text: text.to_string(),
            likes: id as u32,
            reposts: 0,
        };
        let comment = |id: i64, from_id: i64, text: &str| StoredComment {
            id,
            owner_id: -1,
            post_id: 3,
            from_id,
            date: 1_383_680_000 + id,
            text: text.to_string(),
            likes: 1,
        };
        Wall {
            posts: vec![
                post(-1, 1, -1, "Welcome to the community"),
                post(-1, 2, -1, "Weekly digest"),
                post(-1, 3, -1, "Ask us anything"),
                post(-1, 4, 100, "Hello from a member"),
                post(-1, 5, 101, "Another member post"),
                post(93388, 20904, 93388, "Older user post"),
                post(93388, 21539, 93388, "Newer user post"),
            ],
            comments: vec![
                comment(1, 100, "First!"),
                comment(2, 101, "How long does shipping usually take to the far north"),
                comment(3, 100, "Thanks"),
            ],
        }
    }

    fn post(&self, owner_id: i64, id: i64) -> Option<&StoredPost> {
        self.posts
            .iter()
            .find(|p| p.owner_id == owner_id && p.id == id)
    }

    fn comment_count(&self, owner_id: i64, post_id: i64) -> usize {
        self.comments
            .iter()
            .filter(|c| c.owner_id == owner_id && c.post_id == post_id)
            .count()
    }
}

pub type Db = Arc<RwLock<Wall>>;

type Args = HashMap<String, String>;

pub fn app() -> Router {
    app_with(Wall::seeded())
}

pub fn app_with(wall: Wall) -> Router {
    let db: Db = Arc::new(RwLock::new(wall));
    Router::new()
        .route("/method/{method}", get(call))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn call(
    State(db): State<Db>,
    Path(method): Path<String>,
    Query(args): Query<Args>,
) -> Json<Value> {
    let wall = db.read().await;
    let result = match method.as_str() {
        "wall.get" => wall_get(&wall, &args),
        "wall.getComments" => wall_get_comments(&wall, &args),
        "wall.getById" => Ok(wall_get_by_id(&wall, &args)),
        _ => Err(ApiFailure::new(3, "Unknown method passed")),
    };
    tracing::info!(%method, ok = result.is_ok(), "handled call");
    Json(match result {
        Ok(response) => json!({ "response": response }),
        Err(failure) => json!({
            "error": { "error_code": failure.code, "error_msg": failure.message }
        }),
    })
}

#[derive(Debug)]
struct ApiFailure {
    code: i64,
    message: String,
}

impl ApiFailure {
    fn new(code: i64, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }

    fn invalid(param: &str) -> Self {
        Self::new(
            100,
            &format!("One of the parameters specified was missing or invalid: {param}"),
        )
    }
}

fn required_i64(args: &Args, key: &str) -> Result<i64, ApiFailure> {
    args.get(key)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| ApiFailure::invalid(key))
}

fn optional_usize(args: &Args, key: &str) -> Result<Option<usize>, ApiFailure> {
    args.get(key)
        .map(|v| v.parse().map_err(|_| ApiFailure::invalid(key)))
        .transpose()
}

fn window<T>(items: Vec<T>, args: &Args) -> Result<Vec<T>, ApiFailure> {
    let count = optional_usize(args, "count")?
        .unwrap_or(DEFAULT_COUNT)
        .min(MAX_COUNT);
    let offset = optional_usize(args, "offset")?.unwrap_or(0);
    Ok(items.into_iter().skip(offset).take(count).collect())
}

fn post_json(wall: &Wall, post: &StoredPost) -> Value {
    json!({
        "id": post.id,
        "to_id": post.owner_id,
        "from_id": post.from_id,
        "date": post.date,
        "text": post.text,
        "comments": { "count": wall.comment_count(post.owner_id, post.id), "can_post": 1 },
        "likes": { "count": post.likes, "user_likes": 0, "can_like": 1, "can_publish": 1 },
        "reposts": { "count": post.reposts, "user_reposted": 0 },
        "post_type": "post",
    })
}

fn wall_get(wall: &Wall, args: &Args) -> Result<Value, ApiFailure> {
    let owner_id = required_i64(args, "owner_id")?;
    let keep: fn(&StoredPost, i64) -> bool =
        match args.get("filter").map(String::as_str).unwrap_or("all") {
            "all" => |_, _| true,
            "owner" => |p, owner| p.from_id == owner,
            "others" => |p, owner| p.from_id != owner,
            // Nothing scheduled or suggested in this store.
            "postponed" | "suggests" => |_, _| false,
            _ => return Err(ApiFailure::invalid("filter")),
        };

    let mut posts: Vec<&StoredPost> = wall
        .posts
        .iter()
        .filter(|p| p.owner_id == owner_id && keep(*p, owner_id))
        .collect();
    posts.sort_by(|a, b| b.id.cmp(&a.id));

    let total = posts.len();
    let mut response = vec![json!(total)];
    response.extend(window(posts, args)?.into_iter().map(|p| post_json(wall, p)));
    Ok(Value::Array(response))
}

fn wall_get_comments(wall: &Wall, args: &Args) -> Result<Value, ApiFailure> {
    let owner_id = required_i64(args, "owner_id")?;
    let post_id = required_i64(args, "post_id")?;
    if wall.post(owner_id, post_id).is_none() {
        return Err(ApiFailure::invalid("post_id"));
    }
    let need_likes = args.get("need_likes").map(String::as_str) == Some("1");
    let preview_length = optional_usize(args, "preview_length")?.unwrap_or(0);
    let legacy = args.get("v").map(String::as_str) == Some(LEGACY_COMMENTS_VERSION);

    let mut comments: Vec<&StoredComment> = wall
        .comments
        .iter()
        .filter(|c| c.owner_id == owner_id && c.post_id == post_id)
        .collect();
    match args.get("sort").map(String::as_str) {
        Some("desc") => comments.sort_by(|a, b| b.date.cmp(&a.date)),
        _ => comments.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    let total = comments.len();

    let items = window(comments, args)?.into_iter().map(|c| {
        let mut item = json!({
            "from_id": c.from_id,
            "date": c.date,
            "text": preview(&c.text, preview_length),
        });
        item[if legacy { "cid" } else { "id" }] = json!(c.id);
        if need_likes {
            item["likes"] = json!({ "count": c.likes, "user_likes": 0, "can_like": 1 });
        }
        item
    });

    Ok(if legacy {
        let mut response = vec![json!(total)];
        response.extend(items);
        Value::Array(response)
    } else {
        json!({ "count": total, "items": items.collect::<Vec<_>>() })
    })
}

fn wall_get_by_id(wall: &Wall, args: &Args) -> Value {
    let ids = args.get("posts").map(String::as_str).unwrap_or("");
    let posts = ids
        .split(',')
        .filter_map(|id| {
            let (owner, post) = id.trim().split_once('_')?;
            wall.post(owner.parse().ok()?, post.parse().ok()?)
        })
        .map(|p| post_json(wall, p))
        .collect();
    Value::Array(posts)
}

/// Cut `text` to at most `limit` chars, backing up to the last word boundary.
/// `0` means no truncation.
pub fn preview(text: &str, limit: usize) -> String {
    if limit == 0 || text.chars().count() <= limit {
        return text.to_string();
    }
    let head: String = text.chars().take(limit).collect();
    if text.chars().nth(limit).is_some_and(char::is_whitespace) {
        return head.trim_end().to_string();
    }
    match head.rfind(char::is_whitespace) {
        Some(cut) if cut > 0 => head[..cut].trim_end().to_string(),
        _ => head,
    }
}
