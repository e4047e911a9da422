//! Integration tests for the chat resource.
//!
//! The completion call itself needs a live service, so these tests cover
//! everything that runs before it: validation, product scoping, and the
//! history read path.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_product, get_auth, register_user, send_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
async fn empty_message_is_rejected_before_anything_is_stored(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register_user(&app, "pat@example.com").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/chat",
        Some(&token),
        &serde_json::json!({ "content": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_messages")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0, "rejected messages must not be persisted");
}

#[sqlx::test(migrations = "../../migrations")]
async fn product_scoped_message_requires_owned_product(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token_a = register_user(&app, "a@example.com").await;
    let token_b = register_user(&app, "b@example.com").await;
    let product_a = create_product(&app, &token_a, "Laptop").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/chat",
        Some(&token_b),
        &serde_json::json!({ "content": "Is my warranty valid?", "product_id": product_a }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn history_is_chronological_and_filterable(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register_user(&app, "pat@example.com").await;
    let product = create_product(&app, &token, "Laptop").await;

    // Seed history directly -- the send path would need the live service.
    let user_id: (i64,) = sqlx::query_as("SELECT id FROM users LIMIT 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    for (i, (role, content)) in [
        ("user", "How long is my coverage?"),
        ("assistant", "Your coverage runs for two years."),
        ("user", "Thanks!"),
    ]
    .into_iter()
    .enumerate()
    {
        sqlx::query(
            "INSERT INTO chat_messages (user_id, product_id, role, content, created_at)
             VALUES ($1, $2, $3, $4, NOW() + make_interval(secs => $5))",
        )
        .bind(user_id.0)
        .bind(product)
        .bind(role)
        .bind(content)
        .bind(i as f64)
        .execute(&pool)
        .await
        .unwrap();
    }
    // One unscoped message that a product filter must exclude.
    sqlx::query(
        "INSERT INTO chat_messages (user_id, role, content) VALUES ($1, 'user', 'hello')",
    )
    .bind(user_id.0)
    .execute(&pool)
    .await
    .unwrap();

    // Scoped history: chronological, product messages only.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/chat?product_id={product}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0]["content"], "How long is my coverage?");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[2]["content"], "Thanks!");

    // Unscoped history includes everything.
    let response = get_auth(app, "/api/v1/chat", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);
}
