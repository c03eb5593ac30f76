//! Deprecated unauthenticated product endpoint kept for old clients.
//!
//! Prices are rendered as JSON numbers here, unlike the resource API. Writes
//! still go through the shared validation rules. Any verb other than those
//! routed answers 404.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::types::DbId;
use orderdesk_core::validation::ProductDraft;
use orderdesk_db::models::product::{CreateProduct, Product};
use orderdesk_db::repositories::ProductRepo;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fields a legacy create body must carry (non-null).
const REQUIRED_FIELDS: [&str; 3] = ["name", "price", "available"];

/// Legacy product representation.
#[derive(Debug, Serialize)]
pub struct LegacyProduct {
    pub id: DbId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub available: bool,
}

impl From<Product> for LegacyProduct {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            available: product.available,
        }
    }
}

/// GET /legacy/products
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LegacyProduct>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products.into_iter().map(LegacyProduct::from).collect()))
}

/// GET /legacy/products/{id}
///
/// A non-numeric id is reported the same way as an unknown one.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<LegacyProduct>> {
    let product_not_found = || AppError::NotFound("Product not found".into());

    let id: DbId = raw_id.parse().map_err(|_| product_not_found())?;
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(product_not_found)?;
    Ok(Json(product.into()))
}

/// POST /legacy/products
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<LegacyProduct>)> {
    let draft = parse_draft(&body)?;
    let valid = draft
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid data: {e}")))?;

    let product = ProductRepo::create(&state.pool, &CreateProduct::from(valid)).await?;

    tracing::warn!(product_id = product.id, "Product created through legacy endpoint");
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// Fallback for every other verb on the legacy paths.
pub async fn unsupported_method() -> AppError {
    AppError::NotFound("Unsupported HTTP method".into())
}

/// Decode a legacy create body, reporting failures with the legacy messages.
fn parse_draft(body: &[u8]) -> Result<ProductDraft, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| AppError::BadRequest("Invalid JSON".into()))?;

    let complete = REQUIRED_FIELDS
        .iter()
        .all(|field| value.get(field).is_some_and(|v| !v.is_null()));
    if !complete {
        return Err(AppError::BadRequest("Missing required fields".into()));
    }

    serde_json::from_value(value).map_err(|e| AppError::BadRequest(format!("Invalid data: {e}")))
}
