//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected outgoing parameters (ordered
//! wire pairs), simulated dispatcher responses, and expected results or error
//! kinds. No vector ever reaches a dispatcher.

use serde_json::Value;
use wall_core::{ApiError, CommentsRequest, Dispatcher, Params, WallClient};

struct NoDispatch;

impl Dispatcher for NoDispatch {
    fn call(&self, method: &str, _params: &Params) -> Result<Value, ApiError> {
        panic!("test vectors never dispatch (got {method})");
    }
}

fn client() -> WallClient<NoDispatch> {
    WallClient::new(NoDispatch)
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn expected_params(case: &Value) -> Vec<(String, String)> {
    case["expected_params"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn opt_u32(input: &Value, key: &str) -> Option<u32> {
    input.get(key).and_then(Value::as_u64).map(|n| n as u32)
}

fn assert_error_kind(name: &str, err: ApiError, expected: &Value) {
    let matched = match expected.as_str().unwrap() {
        "Protocol" => matches!(err, ApiError::Protocol(_)),
        "InvalidArgument" => matches!(err, ApiError::InvalidArgument(_)),
        "Deserialization" => matches!(err, ApiError::Deserialization(_)),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// wall.get
// ---------------------------------------------------------------------------

#[test]
fn wall_get_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/wall_get.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        // Verify build
        let params = c.build_get(
            input["owner_id"].as_i64().unwrap(),
            opt_u32(input, "count"),
            opt_u32(input, "offset"),
            input["filter"].as_str().unwrap().parse().unwrap(),
        );
        assert_eq!(params.to_wire_pairs(), expected_params(&case), "{name}: params");

        // Verify parse
        let result = c.parse_get(case["simulated_response"].clone());
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error);
        } else {
            let page = result.unwrap();
            let expected = &case["expected_result"];
            assert_eq!(
                u64::from(page.total_count),
                expected["total_count"].as_u64().unwrap(),
                "{name}: total_count"
            );
            let ids: Vec<Value> = page.items.iter().map(|p| p.composite_id().into()).collect();
            assert_eq!(&ids, expected["ids"].as_array().unwrap(), "{name}: ids");
        }
    }
}

// ---------------------------------------------------------------------------
// wall.getComments
// ---------------------------------------------------------------------------

#[test]
fn wall_get_comments_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/wall_get_comments.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];

        let request = CommentsRequest {
            owner_id: input["owner_id"].as_i64().unwrap(),
            post_id: input["post_id"].as_i64().unwrap(),
            sort: input
                .get("sort")
                .and_then(Value::as_str)
                .map(|s| s.parse().unwrap()),
            need_likes: input.get("need_likes").and_then(Value::as_bool).unwrap_or(false),
            count: opt_u32(input, "count"),
            offset: opt_u32(input, "offset"),
            preview_length: opt_u32(input, "preview_length").unwrap_or(0),
        };

        // Verify build
        let params = c.build_get_comments(&request);
        assert_eq!(params.to_wire_pairs(), expected_params(&case), "{name}: params");

        // Verify parse
        let result = c.parse_get_comments(&request, case["simulated_response"].clone());
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error);
        } else {
            let page = result.unwrap();
            let expected = &case["expected_result"];
            assert_eq!(
                u64::from(page.total_count),
                expected["total_count"].as_u64().unwrap(),
                "{name}: total_count"
            );
            let ids: Vec<Value> = page.items.iter().map(|c| c.id.into()).collect();
            assert_eq!(&ids, expected["ids"].as_array().unwrap(), "{name}: ids");
            let texts: Vec<Value> = page.items.iter().map(|c| c.text.clone().into()).collect();
            assert_eq!(&texts, expected["texts"].as_array().unwrap(), "{name}: texts");
            assert!(
                page.items
                    .iter()
                    .all(|c| c.owner_id == request.owner_id && c.post_id == request.post_id),
                "{name}: identity"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// wall.getById
// ---------------------------------------------------------------------------

#[test]
fn wall_get_by_id_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/wall_get_by_id.json")) {
        let name = case["name"].as_str().unwrap();
        let posts: Option<Vec<String>> = serde_json::from_value(case["input"]["posts"].clone()).unwrap();

        // Verify build
        let built = c.build_get_by_id(posts.as_deref());
        let params = match (built, case.get("expected_params")) {
            (Ok(params), Some(_)) => params,
            (Err(err), None) => {
                assert_error_kind(name, err, &case["expected_error"]);
                continue;
            }
            (built, _) => panic!("{name}: unexpected build outcome {built:?}"),
        };
        assert_eq!(params.to_wire_pairs(), expected_params(&case), "{name}: params");

        // Verify parse
        let result = c.parse_get_by_id(case["simulated_response"].clone());
        if let Some(expected_error) = case.get("expected_error") {
            assert_error_kind(name, result.unwrap_err(), expected_error);
        } else {
            let ids: Vec<Value> = result
                .unwrap()
                .iter()
                .map(|p| p.composite_id().into())
                .collect();
            assert_eq!(&ids, case["expected_result"]["ids"].as_array().unwrap(), "{name}: ids");
        }
    }
}
