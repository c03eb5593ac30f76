//! HTTP-level integration tests for the `/api/customers` resource.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, create_customer, create_product, delete_auth, get_auth,
    patch_json_auth, post_json_auth, user_token,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_list_customers(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = create_customer(app.clone(), "Ada", "1 Analytical Way").await;
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["address"], "1 Analytical Way");

    let response = get_auth(app, "/api/customers/", &user_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0], created);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_name_length_boundary(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({ "name": "c".repeat(100), "address": "Somewhere" });
    let response = post_json_auth(app.clone(), "/api/customers/", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json!({ "name": "c".repeat(101), "address": "Somewhere" });
    let response = post_json_auth(app, "/api/customers/", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "name must be at most 100 characters long"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_address_is_required(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/customers/",
        json!({ "name": "Ada" }),
        &admin_token(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_customer_address(pool: PgPool) {
    let app = common::build_test_app(pool);
    let created = create_customer(app.clone(), "Ada", "Old Road").await;
    let uri = format!("/api/customers/{}/", created["id"]);

    let response =
        patch_json_auth(app, &uri, json!({ "address": "New Road" }), &admin_token()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ada");
    assert_eq!(json["address"], "New Road");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_customer_removes_their_orders(pool: PgPool) {
    let app = common::build_test_app(pool);
    let customer = create_customer(app.clone(), "Ada", "Somewhere").await;
    let product = create_product(app.clone(), "Widget", "1.00", true).await;

    let body = json!({
        "customer": customer["id"],
        "products": [product["id"]],
        "date": "2024-05-01",
        "status": "New",
    });
    let response = post_json_auth(app.clone(), "/api/orders/", body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/customers/{}/", customer["id"]),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(
        app.clone(),
        &format!("/api/orders/{}/", order["id"]),
        &user_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The product is untouched.
    let response = get_auth(
        app,
        &format!("/api/products/{}/", product["id"]),
        &user_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}
