//! Route definitions for the deprecated `/legacy/products` endpoint.

use axum::routing::get;
use axum::Router;

use crate::handlers::legacy;
use crate::state::AppState;

/// Mount the legacy product routes (root level, NOT under `/api`).
///
/// Unsupported verbs answer 404 here rather than 405.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/legacy/products",
            get(legacy::list)
                .post(legacy::create)
                .fallback(legacy::unsupported_method),
        )
        .route(
            "/legacy/products/{id}",
            get(legacy::get_by_id).fallback(legacy::unsupported_method),
        )
}
