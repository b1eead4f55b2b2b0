//! Assistant chat handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use handset_core::{ChatMessage, ConversationId};

use crate::assistant::AssistantReply;
use crate::error::{AppError, Result};
use crate::services::chat::ChatError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// Omit to start a new conversation.
    pub conversation_id: Option<ConversationId>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: ConversationId,
    pub reply: AssistantReply,
    /// `false` if the question was cancelled before the reply arrived; the
    /// reply was then left out of the transcript.
    pub accepted: bool,
    pub messages: Vec<ChatMessage>,
}

/// Ask the assistant a question.
///
/// The assistant call runs on its own task so the transcript is settled
/// even if the client disconnects mid-request.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    let (conversation_id, ticket) = state
        .chats()
        .begin(request.conversation_id, &request.message)
        .await?;

    let task_state = state.clone();
    let question = request.message.trim().to_string();
    let settled = tokio::spawn(async move {
        let catalog = task_state.catalog().products().await;
        let reply = task_state.assistant().recommend(&question, &catalog).await;
        let (messages, accepted) = task_state
            .chats()
            .complete(conversation_id, ticket, reply.text.clone())
            .await?;
        Ok::<_, ChatError>((reply, messages, accepted))
    })
    .await
    .map_err(|e| AppError::Internal(format!("chat task failed: {e}")))?;

    let (reply, messages, accepted) = settled?;
    Ok(Json(ChatResponse {
        conversation_id,
        reply,
        accepted,
        messages,
    }))
}

/// Full transcript of a conversation.
pub async fn transcript(
    State(state): State<AppState>,
    Path(id): Path<ConversationId>,
) -> Result<Json<Vec<ChatMessage>>> {
    state
        .chats()
        .messages(id)
        .await
        .map(Json)
        .ok_or_else(|| ChatError::UnknownConversation.into())
}

/// Abandon the outstanding question so a new one can be asked.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<ConversationId>,
) -> Result<StatusCode> {
    state.chats().cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
