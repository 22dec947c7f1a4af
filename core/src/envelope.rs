//! Decoding of dispatcher responses.
//!
//! Paginated endpoints answer with a count-prefixed array: element 0 is the
//! server-side total, elements 1..N are the payload records. The shape is not
//! self-describing, so every paginated operation decodes through
//! `decode_counted`, which rejects a response too short to carry the count.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::Page;

/// Split a count-prefixed array into its total and decoded records.
pub fn decode_counted<T: DeserializeOwned>(response: Value) -> Result<Page<T>, ApiError> {
    let mut elements = into_array(response)?.into_iter();
    let head = elements
        .next()
        .ok_or_else(|| ApiError::Protocol("empty response where a total count was expected".to_string()))?;
    let total_count = head
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| ApiError::Protocol(format!("element 0 is not a total count: {head}")))?;

    let items = elements.map(decode_element).collect::<Result<Vec<T>, _>>()?;
    Ok(Page { total_count, items })
}

/// Decode a plain array where every element is a record.
pub fn decode_list<T: DeserializeOwned>(response: Value) -> Result<Vec<T>, ApiError> {
    into_array(response)?.into_iter().map(decode_element).collect()
}

fn into_array(response: Value) -> Result<Vec<Value>, ApiError> {
    match response {
        Value::Array(elements) => Ok(elements),
        other => Err(ApiError::Protocol(format!(
            "expected an array response, got {}",
            kind_of(&other)
        ))),
    }
}

fn decode_element<T: DeserializeOwned>(element: Value) -> Result<T, ApiError> {
    serde_json::from_value(element).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
