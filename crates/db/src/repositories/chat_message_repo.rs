//! Repository for the `chat_messages` table (append-only).

use sqlx::PgPool;

use protecto_core::types::DbId;

use crate::models::chat_message::{ChatMessage, CreateChatMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, product_id, role, content, created_at";

/// Provides append and read-back operations for chat messages.
pub struct ChatMessageRepo;

impl ChatMessageRepo {
    /// Append a message, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateChatMessage,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (user_id, product_id, role, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(input.user_id)
            .bind(input.product_id)
            .bind(input.role)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// The user's most recent messages, newest first.
    ///
    /// When `product_id` is given, only messages scoped to that product are
    /// returned; otherwise the whole account history is searched. Callers
    /// that need chronological order reverse the result.
    pub async fn list_recent(
        pool: &PgPool,
        user_id: DbId,
        product_id: Option<DbId>,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chat_messages
             WHERE user_id = $1 AND ($2::bigint IS NULL OR product_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(user_id)
            .bind(product_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
