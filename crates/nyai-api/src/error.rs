use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use nyai_extract::ExtractError;
use nyai_llm::LlmError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conversation not found")]
    ConversationNotFound,

    #[error("Document not found")]
    DocumentNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("AI model not configured. Set GOOGLE_API_KEY.")]
    ModelUnconfigured,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Model error: {0}")]
    Model(#[from] LlmError),

    #[error("AI analysis returned invalid format")]
    MalformedModelOutput,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ConversationNotFound | ApiError::DocumentNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Extract(ref e) => match e {
                ExtractError::CapabilityUnavailable(_) => {
                    tracing::error!("Extraction capability missing: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
                }
                _ => (StatusCode::BAD_REQUEST, self.to_string()),
            },
            ApiError::ModelUnconfigured => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Model(ref e) => {
                tracing::error!("Model invocation error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::MalformedModelOutput => {
                tracing::warn!("Model output violated the structured contract");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
