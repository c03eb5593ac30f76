//! Handlers for the `/orders` resource.
//!
//! Orders are rendered with their derived values (`total_price`,
//! `can_be_fulfilled`) computed from the association set read alongside the
//! order.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orderdesk_core::error::CoreError;
use orderdesk_core::order_status::OrderStatus;
use orderdesk_core::types::{DbId, OrderDate};
use orderdesk_core::validation::{OrderDraft, OrderPatch, ValidOrder};
use orderdesk_db::models::order::{CreateOrder, Order};
use orderdesk_db::repositories::{CustomerRepo, OrderRepo, ProductRepo};
use orderdesk_db::DbPool;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// JSON representation of an order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: DbId,
    pub customer: DbId,
    pub products: Vec<DbId>,
    pub date: OrderDate,
    pub status: OrderStatus,
    pub total_price: Decimal,
    pub can_be_fulfilled: bool,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer: order.customer_id,
            products: order.product_ids(),
            date: order.date,
            status: order.status,
            total_price: order.total_price(),
            can_be_fulfilled: order.can_be_fulfilled(),
        }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Order", id })
}

/// Reject orders pointing at a customer or products that do not exist.
async fn check_references(pool: &DbPool, order: &ValidOrder) -> AppResult<()> {
    if !CustomerRepo::exists(pool, order.customer).await? {
        return Err(AppError::Core(CoreError::Integrity(format!(
            "Customer with id {} does not exist",
            order.customer
        ))));
    }

    let missing = ProductRepo::find_missing(pool, &order.products).await?;
    if !missing.is_empty() {
        let ids = missing
            .iter()
            .map(DbId::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(AppError::Core(CoreError::Integrity(format!(
            "Products do not exist: {ids}"
        ))));
    }
    Ok(())
}

/// GET /api/orders
pub async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> AppResult<Json<Vec<OrderResponse>>> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<OrderResponse>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /api/orders
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<OrderDraft>,
) -> AppResult<(StatusCode, Json<OrderResponse>)> {
    let valid = input.validate()?;
    check_references(&state.pool, &valid).await?;

    let order = OrderRepo::create(&state.pool, &CreateOrder::from(valid)).await?;

    tracing::info!(
        order_id = order.id,
        customer_id = order.customer_id,
        product_count = order.products.len(),
        user_id = admin.user_id,
        "Order created"
    );
    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// PUT /api/orders/{id}
///
/// Replaces every field, including the whole association set.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<OrderDraft>,
) -> AppResult<Json<OrderResponse>> {
    let valid = input.validate()?;
    check_references(&state.pool, &valid).await?;

    let order = OrderRepo::replace(&state.pool, id, &CreateOrder::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(order_id = id, user_id = admin.user_id, "Order updated");
    Ok(Json(OrderResponse::from(&order)))
}

/// PATCH /api/orders/{id}
///
/// A `products` list in the patch replaces the association set; omitting it
/// keeps the current one.
pub async fn patch(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<OrderPatch>,
) -> AppResult<Json<OrderResponse>> {
    let existing = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let valid = input.merged(existing.to_draft())?.validate()?;
    check_references(&state.pool, &valid).await?;

    let order = OrderRepo::replace(&state.pool, id, &CreateOrder::from(valid))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(order_id = id, user_id = admin.user_id, "Order patched");
    Ok(Json(OrderResponse::from(&order)))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !OrderRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(order_id = id, user_id = admin.user_id, "Order deleted");
    Ok(StatusCode::NO_CONTENT)
}
