//! Route definitions for the assistant chat.

use axum::routing::get;
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// GET  /    -> history
/// POST /    -> send_message
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(chat::history).post(chat::send_message))
}
