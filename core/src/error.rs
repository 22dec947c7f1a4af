//! Error types for the wall API client.
//!
//! # Design
//! Variants split into two groups. `InvalidArgument`, `NotImplemented`,
//! `Protocol` and `Deserialization` are raised by `WallClient` itself. The
//! remaining variants belong to dispatchers: `WallClient` returns them to the
//! caller exactly as the dispatcher produced them.

use thiserror::Error;

/// Errors returned by `WallClient` operations and `Dispatcher` implementations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required argument was absent. Raised before any dispatcher call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is part of the public surface but not supported yet.
    /// Carries the remote method name.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The response did not have the shape the endpoint contract requires,
    /// e.g. a count-prefixed array with no count.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// A payload element could not be decoded into the expected record.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The remote API answered with an error envelope.
    #[error("remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// The remote host returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// `true` for operations that exist on the surface but are not supported.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, ApiError::NotImplemented(_))
    }
}
