//! Request extractors shared by the handlers.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json<T>` whose rejections (bad syntax, wrong shape, wrong content type)
/// become a 400 [`AppError::BadRequest`] in the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` whose parse failures become a 404 in the standard error
/// envelope. A segment that cannot be an id names no resource.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
