//! Synchronous client for the social-network wall API.
//!
//! # Overview
//! `WallClient` turns typed arguments into an ordered `Params` bag, hands it
//! to an injected `Dispatcher` together with the remote method name, and
//! decodes the reply into `Post` / `Comment` records. Transport, session and
//! retries belong to the dispatcher.
//!
//! # Design
//! - `WallClient` is stateless; it holds only its dispatcher.
//! - Unset optional parameters are omitted from the bag, never sent as null.
//! - Count-prefixed responses (element 0 = total) are decoded in one place,
//!   `envelope::decode_counted`, which rejects a response with no count.
//! - Enumerated parameters are lowercased through `token::wire_token`.
//! - `http::Endpoint` gives hosts the request/response plain data needed to
//!   implement a `Dispatcher` over their own HTTP stack.

pub mod client;
pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod http;
pub mod params;
pub mod serde_util;
pub mod token;
pub mod types;

pub use client::{CommentsRequest, WallClient, COMMENTS_API_VERSION};
pub use dispatcher::Dispatcher;
pub use error::ApiError;
pub use http::{Endpoint, HttpRequest, HttpResponse};
pub use params::{ParamValue, Params};
pub use token::{wire_token, WireToken};
pub use types::{Attachment, Comment, CommentsInfo, CommentsSort, Likes, Page, Post, Reposts, WallFilter};
