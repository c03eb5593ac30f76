//! Liveness endpoint, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use orderdesk_db::CatalogCounts;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"unavailable"` when the database cannot be queried.
    pub status: &'static str,
    pub version: &'static str,
    /// Catalogue size; absent when the database is down.
    pub catalog: Option<CatalogCounts>,
}

/// GET /health
///
/// No authentication. Answers 503 when the catalogue cannot be read so a
/// load balancer can take the instance out of rotation.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");
    match orderdesk_db::catalog_counts(&state.pool).await {
        Ok(catalog) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
                catalog: Some(catalog),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read the catalogue");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                    version,
                    catalog: None,
                }),
            )
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
