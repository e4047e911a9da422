//! Integration tests for product CRUD and status enrichment.

mod common;

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use common::{
    body_json, create_product, create_warranty, get_auth, register_user, send_auth, send_json,
};
use sqlx::PgPool;

fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

// ---------------------------------------------------------------------------
// Create / validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_returns_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "pat@example.com").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        &serde_json::json!({
            "name": "Laptop",
            "brand": "Acme",
            "model": "X-100",
            "category": "electronics",
            "purchase_date": "2024-01-15T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Laptop");
    // No warranties yet: overall status is the unknown sentinel.
    assert_eq!(json["status"], "unknown");
    assert_eq!(json["warranties"].as_array().unwrap().len(), 0);
    assert!(json["next_expiring_warranty_id"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_product_rejects_bad_category_and_price(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "pat@example.com").await;

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/products",
        Some(&token),
        &serde_json::json!({
            "name": "Laptop",
            "brand": "Acme",
            "model": "X-100",
            "category": "gadgets",
            "purchase_date": "2024-01-15T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/products",
        Some(&token),
        &serde_json::json!({
            "name": "Laptop",
            "brand": "Acme",
            "model": "X-100",
            "category": "electronics",
            "purchase_date": "2024-01-15T00:00:00Z",
            "purchase_price": -10.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Ownership isolation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn products_are_isolated_per_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token_a = register_user(&app, "a@example.com").await;
    let token_b = register_user(&app, "b@example.com").await;

    let product_a = create_product(&app, &token_a, "Laptop").await;
    create_product(&app, &token_b, "Camera").await;

    // Each caller sees only their own products.
    let response = get_auth(app.clone(), "/api/v1/products", &token_a).await;
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Laptop"]);

    // Someone else's product behaves exactly like a missing row.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/products/{product_a}"),
        &token_b,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send_auth(
        app,
        Method::DELETE,
        &format!("/api/v1/products/{product_a}"),
        &token_b,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Status enrichment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn mixed_warranties_report_expired_overall(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "pat@example.com").await;
    let product = create_product(&app, &token, "Laptop").await;

    // One live warranty far in the future, one already lapsed.
    create_warranty(&app, &token, product, &days_from_now(400)).await;
    create_warranty(&app, &token, product, &days_from_now(-5)).await;

    let response = get_auth(app, &format!("/api/v1/products/{product}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    // Worst-wins precedence: any expired coverage marks the product expired.
    assert_eq!(json["status"], "expired");

    let warranties = json["warranties"].as_array().unwrap();
    assert_eq!(warranties.len(), 2);
    assert_eq!(warranties[0]["status"], "active");
    assert_eq!(warranties[1]["status"], "expired");
}

#[sqlx::test(migrations = "../../migrations")]
async fn next_expiring_picks_soonest_unexpired_warranty(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "pat@example.com").await;
    let product = create_product(&app, &token, "Laptop").await;

    let soon = create_warranty(&app, &token, product, &days_from_now(10)).await;
    create_warranty(&app, &token, product, &days_from_now(-5)).await;
    create_warranty(&app, &token, product, &days_from_now(400)).await;

    let response = get_auth(app, &format!("/api/v1/products/{product}"), &token).await;
    let json = body_json(response).await;

    assert_eq!(json["next_expiring_warranty_id"].as_i64().unwrap(), soon);
    // 10 days out is inside the 30-day window.
    assert_eq!(json["status"], "expired"); // lapsed warranty still dominates
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn update_applies_only_provided_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_user(&app, "pat@example.com").await;
    let product = create_product(&app, &token, "Laptop").await;

    let response = send_json(
        app,
        Method::PUT,
        &format!("/api/v1/products/{product}"),
        Some(&token),
        &serde_json::json!({ "name": "Work Laptop" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Work Laptop");
    // Untouched fields keep their values.
    assert_eq!(json["brand"], "Acme");
    assert_eq!(json["category"], "electronics");
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_cascades_warranties(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register_user(&app, "pat@example.com").await;
    let product = create_product(&app, &token, "Laptop").await;
    let warranty = create_warranty(&app, &token, product, &days_from_now(100)).await;

    let response = send_auth(
        app.clone(),
        Method::DELETE,
        &format!("/api/v1/products/{product}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &format!("/api/v1/warranties/{warranty}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM warranties")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "warranty rows must cascade with the product");
}
