//! Outbound access to the finance API.
//!
//! Every network call goes through [`ApiClient`]; callers get back an
//! [`ApiResult`], never a panic and never a raw transport error.

mod client;
mod token;

pub use client::ApiClient;
pub use token::TokenCell;

use crate::errors::ApiError;

/// Uniform outcome of every API call.
///
/// `Ok(Some(T))` is a success with a decoded body, `Ok(None)` a success
/// without content (HTTP 204), and `Err` carries the user-facing message
/// in its `Display`.
pub type ApiResult<T> = Result<Option<T>, ApiError>;
