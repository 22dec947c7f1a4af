//! The call seam between `WallClient` and the surrounding API session.
//!
//! A dispatcher owns transport, authentication, rate limiting and retries.
//! `WallClient` only hands it a method name and a parameter bag and returns
//! its errors unchanged.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::params::Params;

/// Performs one remote API call and returns the unwrapped `response` payload.
pub trait Dispatcher {
    fn call(&self, method: &str, params: &Params) -> Result<Value, ApiError>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for &D {
    fn call(&self, method: &str, params: &Params) -> Result<Value, ApiError> {
        (**self).call(method, params)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn call(&self, method: &str, params: &Params) -> Result<Value, ApiError> {
        (**self).call(method, params)
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn call(&self, method: &str, params: &Params) -> Result<Value, ApiError> {
        (**self).call(method, params)
    }
}
