use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use nyai_store::{Conversation, Message};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ListConversationsResponse {
    pub conversations: Vec<ConversationSummary>,
    pub active_conversation: Option<String>,
}

/// List a user's conversations, most recently updated first.
pub async fn list_conversations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ListConversationsResponse>> {
    let history = state.conversations.get_or_create(&user_id);

    let mut conversations: Vec<ConversationSummary> = history
        .conversations
        .iter()
        .map(|(id, conversation)| ConversationSummary {
            id: id.clone(),
            title: conversation.title.clone(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
            message_count: conversation.message_count(),
        })
        .collect();
    conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    Ok(Json(ListConversationsResponse {
        conversations,
        active_conversation: history.active_conversation,
    }))
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub id: String,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full transcript of one conversation.
pub async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path((user_id, conversation_id)): Path<(String, String)>,
) -> ApiResult<Json<TranscriptResponse>> {
    let history = state.conversations.get_or_create(&user_id);
    let conversation = history
        .conversations
        .get(&conversation_id)
        .ok_or(ApiError::ConversationNotFound)?;

    Ok(Json(TranscriptResponse {
        id: conversation_id,
        title: conversation.title.clone(),
        messages: conversation.messages.clone(),
        created_at: conversation.created_at,
        updated_at: conversation.updated_at,
    }))
}

#[derive(Debug, Serialize)]
pub struct NewConversationResponse {
    pub conversation_id: String,
    pub title: String,
}

/// Create an empty conversation and make it the active one.
pub async fn create_conversation(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<NewConversationResponse>> {
    let conversation_id = format!("{}_{}", user_id, Utc::now().timestamp());
    let title = "New Conversation".to_string();

    state.conversations.with_history(&user_id, |history| {
        history.insert_conversation(conversation_id.clone(), Conversation::new(title.clone()));
        history.set_active(&conversation_id);
    });

    Ok(Json(NewConversationResponse {
        conversation_id,
        title,
    }))
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Delete a conversation. Deleting the active one clears the active
/// pointer; deleting any other leaves it untouched.
pub async fn delete_conversation(
    State(state): State<Arc<AppState>>,
    Path((user_id, conversation_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let removed = state
        .conversations
        .with_history(&user_id, |history| {
            history.remove_conversation(&conversation_id)
        });

    if removed.is_none() {
        return Err(ApiError::ConversationNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Conversation deleted successfully".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub conversation_id: String,
}

/// Point the user's active marker at an existing conversation.
pub async fn set_active_conversation(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let updated = state
        .conversations
        .with_history(&user_id, |history| history.set_active(&req.conversation_id));

    if !updated {
        return Err(ApiError::ConversationNotFound);
    }

    Ok(Json(MessageResponse {
        message: "Active conversation updated".to_string(),
    }))
}
