pub mod customer;
pub mod legacy;
pub mod order;
pub mod product;
pub mod token;

use crate::error::AppError;

/// Fallback for paths that match no route.
pub async fn not_found() -> AppError {
    AppError::NotFound("No route matches the requested path".into())
}

/// Fallback for known paths hit with a verb they do not support.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
