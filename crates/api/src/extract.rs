//! Request extractors whose rejections go out as the standard JSON error
//! body instead of axum's plain-text default.
//!
//! Handlers use these in place of `Json`, `Path` and `Query`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body. Syntax errors are `BAD_REQUEST`; well-formed bodies
/// with the wrong shape are `VALIDATION_ERROR`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters, e.g. the `{id}` in `/appointments/{id}`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string parameters.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
