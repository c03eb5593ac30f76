#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use http_body_util::BodyExt;
use orderdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use orderdesk_api::auth::password::hash_password;
use orderdesk_api::config::ServerConfig;
use orderdesk_api::router::{build_app_router, App};
use orderdesk_api::state::AppState;
use orderdesk_core::access::Role;
use orderdesk_db::models::user::{CreateUser, User};
use orderdesk_db::repositories::{RoleRepo, UserRepo};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password given to every user created through [`create_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 5,
            refresh_token_expiry_days: 1,
        },
    }
}

/// Build the full application with all middleware layers, using the given
/// database pool. Uses the same builder as `main.rs`.
pub fn build_test_app(pool: PgPool) -> App {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

/// Access token for an admin principal, signed with the test secret.
pub fn admin_token() -> String {
    generate_access_token(1, Role::Admin, &test_config().jwt).expect("token generation")
}

/// Access token for an ordinary (read-only) principal.
pub fn user_token() -> String {
    generate_access_token(2, Role::User, &test_config().jwt).expect("token generation")
}

/// Insert a user with [`TEST_PASSWORD`] directly into the database.
pub async fn create_user(pool: &PgPool, username: &str, admin: bool) -> User {
    let role = if admin { Role::Admin } else { Role::User };
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role_id: RoleRepo::id_of(pool, role).await.expect("role row should exist"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send one request through the app.
pub async fn send(
    app: App,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Send a raw, possibly malformed, JSON body.
pub async fn send_raw(app: App, method: Method, uri: &str, token: Option<&str>, raw: &str) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(raw.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: App, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: App, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: App, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: App, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: App, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: App, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: App, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Read the full response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a product as admin and return its JSON representation.
pub async fn create_product(app: App, name: &str, price: &str, available: bool) -> Value {
    let body = serde_json::json!({ "name": name, "price": price, "available": available });
    let response = post_json_auth(app, "/api/products/", body, &admin_token()).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Create a customer as admin and return its JSON representation.
pub async fn create_customer(app: App, name: &str, address: &str) -> Value {
    let body = serde_json::json!({ "name": name, "address": address });
    let response = post_json_auth(app, "/api/customers/", body, &admin_token()).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
