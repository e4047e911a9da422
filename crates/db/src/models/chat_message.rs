//! Chat message model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use protecto_core::types::{DbId, Timestamp};

/// Role of a chat message author.
pub const ROLE_USER: &str = "user";
/// Role of an assistant-generated chat message.
pub const ROLE_ASSISTANT: &str = "assistant";

/// A chat message row from the `chat_messages` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub user_id: DbId,
    /// Product this message was scoped to, if any. Survives product
    /// deletion as NULL so conversation history is never dropped.
    pub product_id: Option<DbId>,
    /// `user` or `assistant`.
    pub role: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for appending a chat message.
pub struct CreateChatMessage {
    pub user_id: DbId,
    pub product_id: Option<DbId>,
    pub role: &'static str,
    pub content: String,
}
