//! Wall operations over an injected `Dispatcher`.
//!
//! # Design
//! `WallClient` holds only its dispatcher and carries no mutable state between
//! calls. Each read operation is split into a `build_*` method that produces
//! the ordered `Params` bag and a `parse_*` method that consumes the
//! dispatcher's response; the public operation glues the two around exactly
//! one `Dispatcher::call`. Dispatcher errors are returned unchanged.

use serde_json::Value;

use crate::dispatcher::Dispatcher;
use crate::envelope::{decode_counted, decode_list};
use crate::error::ApiError;
use crate::params::Params;
use crate::token::wire_token;
use crate::types::{Comment, CommentsSort, Page, Post, WallFilter};

/// API version pinned on `wall.getComments`. The comment shape decoded by
/// `parse_get_comments` (count-prefixed array, `cid` ids) only exists there.
pub const COMMENTS_API_VERSION: &str = "4.4";

/// Arguments for `WallClient::get_comments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentsRequest {
    pub owner_id: i64,
    pub post_id: i64,
    /// `None` leaves ordering to the server (chronological).
    pub sort: Option<CommentsSort>,
    pub need_likes: bool,
    pub count: Option<u32>,
    pub offset: Option<u32>,
    /// Server-side truncation at a word boundary. `0` means no truncation.
    pub preview_length: u32,
}

impl CommentsRequest {
    pub fn new(owner_id: i64, post_id: i64) -> Self {
        Self {
            owner_id,
            post_id,
            sort: None,
            need_likes: false,
            count: None,
            offset: None,
            preview_length: 0,
        }
    }

    pub fn sort(mut self, sort: CommentsSort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn need_likes(mut self, need_likes: bool) -> Self {
        self.need_likes = need_likes;
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn preview_length(mut self, preview_length: u32) -> Self {
        self.preview_length = preview_length;
        self
    }
}

/// Synchronous client for wall methods.
#[derive(Debug, Clone)]
pub struct WallClient<D> {
    dispatcher: D,
}

impl<D: Dispatcher> WallClient<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    fn dispatch(&self, method: &str, params: &Params) -> Result<Value, ApiError> {
        tracing::debug!(method, params = params.len(), "dispatching wall call");
        self.dispatcher.call(method, params)
    }

    // ── wall.get ─────────────────────────────────────────────────────────

    /// Posts from a user's wall (`owner_id > 0`) or a community's wall
    /// (`owner_id < 0`). The server caps `count` at 100.
    pub fn get(
        &self,
        owner_id: i64,
        count: Option<u32>,
        offset: Option<u32>,
        filter: WallFilter,
    ) -> Result<Page<Post>, ApiError> {
        let params = self.build_get(owner_id, count, offset, filter);
        let response = self.dispatch("wall.get", &params)?;
        self.parse_get(response)
    }

    pub fn build_get(
        &self,
        owner_id: i64,
        count: Option<u32>,
        offset: Option<u32>,
        filter: WallFilter,
    ) -> Params {
        let mut params = Params::new();
        params
            .insert("owner_id", owner_id)
            .insert_opt("count", count)
            .insert_opt("offset", offset)
            .insert("filter", wire_token(filter));
        params
    }

    pub fn parse_get(&self, response: Value) -> Result<Page<Post>, ApiError> {
        decode_counted(response)
    }

    // ── wall.getComments ─────────────────────────────────────────────────

    /// Comments on one post. Always sent with `v` pinned to
    /// [`COMMENTS_API_VERSION`], whatever the dispatcher's default version is.
    pub fn get_comments(&self, request: &CommentsRequest) -> Result<Page<Comment>, ApiError> {
        let params = self.build_get_comments(request);
        let response = self.dispatch("wall.getComments", &params)?;
        self.parse_get_comments(request, response)
    }

    pub fn build_get_comments(&self, request: &CommentsRequest) -> Params {
        let mut params = Params::new();
        params
            .insert("owner_id", request.owner_id)
            .insert("post_id", request.post_id)
            .insert_opt("sort", request.sort.map(wire_token))
            .insert("need_likes", request.need_likes)
            .insert_opt("count", request.count)
            .insert_opt("offset", request.offset)
            .insert("preview_length", request.preview_length)
            .insert("v", COMMENTS_API_VERSION);
        params
    }

    /// Decode the page and stamp each comment with the post it belongs to.
    pub fn parse_get_comments(
        &self,
        request: &CommentsRequest,
        response: Value,
    ) -> Result<Page<Comment>, ApiError> {
        let mut page: Page<Comment> = decode_counted(response)?;
        for comment in &mut page.items {
            comment.owner_id = request.owner_id;
            comment.post_id = request.post_id;
        }
        Ok(page)
    }

    // ── wall.getById ─────────────────────────────────────────────────────

    /// Posts by composite id (`"<owner_id>_<post_id>"`). Ids are passed
    /// through unparsed. `None` is rejected before any call; an empty slice
    /// is still sent.
    pub fn get_by_id<S: AsRef<str>>(&self, posts: Option<&[S]>) -> Result<Vec<Post>, ApiError> {
        let params = self.build_get_by_id(posts)?;
        let response = self.dispatch("wall.getById", &params)?;
        self.parse_get_by_id(response)
    }

    pub fn build_get_by_id<S: AsRef<str>>(&self, posts: Option<&[S]>) -> Result<Params, ApiError> {
        let posts =
            posts.ok_or_else(|| ApiError::InvalidArgument("posts must be provided".to_string()))?;
        let ids: Vec<String> = posts.iter().map(|p| p.as_ref().to_string()).collect();
        let mut params = Params::new();
        params.insert("posts", ids);
        Ok(params)
    }

    pub fn parse_get_by_id(&self, response: Value) -> Result<Vec<Post>, ApiError> {
        decode_list(response)
    }

    // ── Not yet supported ────────────────────────────────────────────────

    /// Publish a post. Returns the new post id.
    pub fn post(&self, _owner_id: i64, _message: &str) -> Result<i64, ApiError> {
        unsupported("wall.post")
    }

    pub fn edit(&self, _owner_id: i64, _post_id: i64, _message: &str) -> Result<(), ApiError> {
        unsupported("wall.edit")
    }

    pub fn delete(&self, _owner_id: i64, _post_id: i64) -> Result<(), ApiError> {
        unsupported("wall.delete")
    }

    pub fn restore(&self, _owner_id: i64, _post_id: i64) -> Result<(), ApiError> {
        unsupported("wall.restore")
    }

    /// Comment on a post. Returns the new comment id.
    pub fn add_comment(&self, _owner_id: i64, _post_id: i64, _text: &str) -> Result<i64, ApiError> {
        unsupported("wall.addComment")
    }

    pub fn delete_comment(&self, _owner_id: i64, _comment_id: i64) -> Result<(), ApiError> {
        unsupported("wall.deleteComment")
    }

    pub fn restore_comment(&self, _owner_id: i64, _comment_id: i64) -> Result<(), ApiError> {
        unsupported("wall.restoreComment")
    }

    /// Like a post. Returns the updated like count.
    pub fn add_like(&self, _owner_id: i64, _post_id: i64) -> Result<u32, ApiError> {
        unsupported("wall.addLike")
    }

    /// Remove a like. Returns the updated like count.
    pub fn delete_like(&self, _owner_id: i64, _post_id: i64) -> Result<u32, ApiError> {
        unsupported("wall.deleteLike")
    }
}

fn unsupported<T>(method: &'static str) -> Result<T, ApiError> {
    Err(ApiError::NotImplemented(method))
}
