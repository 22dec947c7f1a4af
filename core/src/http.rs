//! HTTP plain-data helpers for hosts that implement `Dispatcher`.
//!
//! # Design
//! The core crate never touches the network. `Endpoint` turns a method name
//! and a `Params` bag into an `HttpRequest`, and unwraps the remote envelope
//! from an `HttpResponse`; the host executes the round-trip in between with
//! whatever transport and session it owns. Access tokens are the host's
//! business and are not modelled here.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::params::Params;

/// A GET request described as plain data. `query` is in parameter order with
/// values already rendered for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

/// An HTTP response described as plain data, built by the host after
/// executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Deserialize)]
struct Envelope {
    response: Option<Value>,
    error: Option<RemoteError>,
}

#[derive(Deserialize)]
struct RemoteError {
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

/// Base URL plus the session's ambient API version.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base_url: String,
    default_version: Option<String>,
}

impl Endpoint {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_version: None,
        }
    }

    /// Version sent as `v` on calls whose params do not pin one.
    pub fn with_version(mut self, version: &str) -> Self {
        self.default_version = Some(version.to_string());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request(&self, method: &str, params: &Params) -> HttpRequest {
        let mut query = params.to_wire_pairs();
        if let Some(version) = &self.default_version {
            if !params.contains_key("v") {
                query.push(("v".to_string(), version.clone()));
            }
        }
        HttpRequest {
            url: format!("{}/method/{method}", self.base_url),
            query,
        }
    }

    /// Unwrap `{"response": ...}`, mapping `{"error": ...}` to `ApiError::Remote`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        let envelope: Envelope = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if let Some(error) = envelope.error {
            return Err(ApiError::Remote {
                code: error.error_code,
                message: error.error_msg,
            });
        }
        envelope
            .response
            .ok_or_else(|| ApiError::Protocol("envelope has neither response nor error".to_string()))
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
