pub mod customer;
pub mod health;
pub mod legacy;
pub mod order;
pub mod product;
pub mod token;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy (trailing slashes are normalised away before routing):
///
/// ```text
/// /token                  obtain token pair (public)
/// /token/refresh          rotate token pair (public)
///
/// /products               list (auth), create (admin)
/// /products/{id}          get (auth), update, patch, delete (admin)
///
/// /customers              list (auth), create (admin)
/// /customers/{id}         get (auth), update, patch, delete (admin)
///
/// /orders                 list (auth), create (admin)
/// /orders/{id}            get (auth), update, patch, delete (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/token", token::router())
        .nest("/products", product::router())
        .nest("/customers", customer::router())
        .nest("/orders", order::router())
}
