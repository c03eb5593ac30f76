//! Handlers for the `/customers` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_core::types::DbId;
use orderdesk_core::validation::{CustomerDraft, CustomerPatch};
use orderdesk_db::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use orderdesk_db::repositories::CustomerRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Customer",
        id,
    })
}

/// GET /api/customers
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = CustomerRepo::list(&state.pool).await?;
    Ok(Json(customers))
}

/// GET /api/customers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Customer>> {
    let customer = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CustomerDraft>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let valid = input.validate()?;
    let customer = CustomerRepo::create(&state.pool, &CreateCustomer::from(valid)).await?;

    tracing::info!(customer_id = customer.id, user_id = admin.user_id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CustomerDraft>,
) -> AppResult<Json<Customer>> {
    let valid = input.validate()?;
    let customer = CustomerRepo::update(&state.pool, id, &UpdateCustomer::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(customer_id = id, user_id = admin.user_id, "Customer updated");
    Ok(Json(customer))
}

/// PATCH /api/customers/{id}
pub async fn patch(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<CustomerPatch>,
) -> AppResult<Json<Customer>> {
    let existing = CustomerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let valid = input.merged(existing.to_draft())?.validate()?;
    let customer = CustomerRepo::update(&state.pool, id, &UpdateCustomer::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(customer_id = id, user_id = admin.user_id, "Customer patched");
    Ok(Json(customer))
}

/// DELETE /api/customers/{id}
///
/// The customer's orders are removed with it.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !CustomerRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(customer_id = id, user_id = admin.user_id, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
