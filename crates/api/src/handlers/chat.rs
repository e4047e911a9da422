//! Handlers for the `/chat` resource.
//!
//! The assistant flow is a pass-through: store the user message, build a
//! short context line from the scoped product (if any), replay recent
//! history, forward everything to the completion service, and store the
//! reply verbatim. Nothing here interprets assistant output.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use protecto_assistant::prompt::{self, ProductContext, WarrantyContext};
use protecto_assistant::ChatMessage as CompletionMessage;
use protecto_core::error::CoreError;
use protecto_core::types::DbId;
use protecto_db::models::chat_message::{
    ChatMessage, CreateChatMessage, ROLE_ASSISTANT, ROLE_USER,
};
use protecto_db::repositories::{ChatMessageRepo, ProductRepo, WarrantyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of history messages replayed to the completion service.
const CONTEXT_WINDOW_MESSAGES: i64 = 10;

/// Number of messages returned by the history endpoint.
const HISTORY_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub product_id: Option<DbId>,
}

/// Query params for `GET /chat`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub product_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/chat
///
/// Send a message to the assistant; returns the stored assistant reply.
pub async fn send_message(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<Json<ChatMessage>> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message cannot be empty".into(),
        )));
    }

    // A product-scoped message must reference a product the caller owns.
    let context = match input.product_id {
        Some(product_id) => Some(product_context(&state, product_id, auth_user.user_id).await?),
        None => None,
    };

    ChatMessageRepo::create(
        &state.pool,
        &CreateChatMessage {
            user_id: auth_user.user_id,
            product_id: input.product_id,
            role: ROLE_USER,
            content: input.content,
        },
    )
    .await?;

    // Recent history, newest first; includes the message stored above, so
    // it arrives last once the prompt assembler reverses the order.
    let recent = ChatMessageRepo::list_recent(
        &state.pool,
        auth_user.user_id,
        input.product_id,
        CONTEXT_WINDOW_MESSAGES,
    )
    .await?;

    let history: Vec<CompletionMessage> = recent
        .iter()
        .map(|message| CompletionMessage {
            role: message.role.clone(),
            content: message.content.clone(),
        })
        .collect();

    let messages = prompt::assemble(context.as_ref(), &history);
    let reply = state.assistant.complete(&messages).await?;

    let stored = ChatMessageRepo::create(
        &state.pool,
        &CreateChatMessage {
            user_id: auth_user.user_id,
            product_id: input.product_id,
            role: ROLE_ASSISTANT,
            content: reply,
        },
    )
    .await?;

    Ok(Json(stored))
}

/// GET /api/v1/chat
///
/// The caller's most recent messages in chronological order, optionally
/// scoped to one product.
pub async fn history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<ChatMessage>>>> {
    let mut messages = ChatMessageRepo::list_recent(
        &state.pool,
        auth_user.user_id,
        query.product_id,
        HISTORY_LIMIT,
    )
    .await?;
    messages.reverse();
    Ok(Json(DataResponse { data: messages }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the completion context from an owned product and its warranties.
async fn product_context(
    state: &AppState,
    product_id: DbId,
    user_id: DbId,
) -> AppResult<ProductContext> {
    let product = ProductRepo::find_for_user(&state.pool, product_id, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }))?;

    let warranties = WarrantyRepo::list_for_product(&state.pool, product_id).await?;

    Ok(ProductContext {
        name: product.name,
        purchase_date: product.purchase_date,
        warranties: warranties
            .into_iter()
            .map(|w| WarrantyContext {
                r#type: w.r#type,
                provider: w.provider,
                start_date: w.start_date,
                end_date: w.end_date,
            })
            .collect(),
    })
}
