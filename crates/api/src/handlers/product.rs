//! Handlers for the `/products` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_core::types::DbId;
use orderdesk_core::validation::{ProductDraft, ProductPatch};
use orderdesk_db::models::product::{CreateProduct, Product, UpdateProduct};
use orderdesk_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/products
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<ProductDraft>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let valid = input.validate()?;
    let product = ProductRepo::create(&state.pool, &CreateProduct::from(valid)).await?;

    tracing::info!(product_id = product.id, user_id = admin.user_id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
///
/// Full update: every field must be present and valid.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductDraft>,
) -> AppResult<Json<Product>> {
    let valid = input.validate()?;
    let product = ProductRepo::update(&state.pool, id, &UpdateProduct::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, user_id = admin.user_id, "Product updated");
    Ok(Json(product))
}

/// PATCH /api/products/{id}
///
/// Partial update: the patch is merged onto the stored row and the merged
/// product is validated as a whole.
pub async fn patch(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<ProductPatch>,
) -> AppResult<Json<Product>> {
    let existing = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let valid = input.merged(existing.to_draft())?.validate()?;
    let product = ProductRepo::update(&state.pool, id, &UpdateProduct::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(product_id = id, user_id = admin.user_id, "Product patched");
    Ok(Json(product))
}

/// DELETE /api/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !ProductRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(product_id = id, user_id = admin.user_id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
