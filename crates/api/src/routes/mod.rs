pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod product;
pub mod warranty;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                         register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /products                              list, create
/// /products/{id}                         get, update, delete
/// /products/{id}/image                   upload image (multipart)
/// /products/{product_id}/warranties      list, create
///
/// /warranties/{id}                       get, update, delete
///
/// /dashboard/summary                     account summary
///
/// /chat                                  history (GET), send message (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/products", product::router())
        .nest("/warranties", warranty::router())
        .nest("/dashboard", dashboard::router())
        .nest("/chat", chat::router())
}
