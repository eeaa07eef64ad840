use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use nyai_llm::{GenerateRequest, GenerativeClient};
use nyai_store::{Conversation, Message};

use crate::error::{ApiError, ApiResult};
use crate::prompts;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    pub conversation_title: String,
}

/// Main chat endpoint: append the user's turn, assemble prior context, ask
/// the model, append its reply. The model call happens with no store lock
/// held; a failed call degrades into an apology message rather than a 5xx.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let model = state.model()?;
    let user_id = req.user_id.clone().unwrap_or_else(|| "anonymous".to_string());

    let conversation_id = match &req.conversation_id {
        Some(id) => {
            let exists = state
                .conversations
                .with_history(&user_id, |history| history.conversations.contains_key(id));
            if !exists {
                return Err(ApiError::ConversationNotFound);
            }
            id.clone()
        }
        None => {
            let title = generate_title(
                model.as_ref(),
                &state.config.llm.chat_model,
                &req.message,
            )
            .await;
            let id = format!("{}_{}", user_id, Utc::now().timestamp());
            state.conversations.with_history(&user_id, |history| {
                history.insert_conversation(id.clone(), Conversation::new(title));
                history.set_active(&id);
            });
            id
        }
    };

    // append the user's turn and render prior context under one lock
    let context = state
        .conversations
        .with_history(&user_id, |history| {
            history
                .conversations
                .get_mut(&conversation_id)
                .map(|conversation| {
                    conversation.push_message(Message::user(req.message.clone()));
                    state.context_strategy.render(conversation)
                })
        })
        .ok_or(ApiError::ConversationNotFound)?;

    let request = GenerateRequest::new(
        &state.config.llm.chat_model,
        prompts::chat(&context, &req.message),
    );
    let response_text = match model.generate(request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "chat completion failed, degrading to error text");
            format!("Sorry, an error occurred while processing your request: {e}")
        }
    };

    let conversation_title = state
        .conversations
        .with_history(&user_id, |history| {
            history
                .conversations
                .get_mut(&conversation_id)
                .map(|conversation| {
                    conversation.push_message(Message::assistant(response_text.clone()));
                    conversation.title.clone()
                })
        })
        .ok_or(ApiError::ConversationNotFound)?;

    Ok(Json(ChatResponse {
        response: response_text,
        conversation_id,
        conversation_title,
    }))
}

/// One short title from the model; falls back to a truncated echo of the
/// first message when the call fails or comes back blank.
async fn generate_title(
    model: &dyn GenerativeClient,
    model_name: &str,
    first_user_prompt: &str,
) -> String {
    let request = GenerateRequest::new(model_name, prompts::conversation_title(first_user_prompt));
    match model.generate(request).await {
        Ok(text) => {
            // first line only, in case the model offers alternatives anyway
            let title = text
                .trim()
                .lines()
                .next()
                .unwrap_or_default()
                .replace('"', "");
            if title.is_empty() {
                fallback_title(first_user_prompt)
            } else {
                title
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "title generation failed, using fallback");
            fallback_title(first_user_prompt)
        }
    }
}

fn fallback_title(message: &str) -> String {
    if message.chars().count() > 30 {
        let head: String = message.chars().take(30).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}
