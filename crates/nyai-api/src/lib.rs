//! HTTP surface of the NyAI legal assistant: conversational chat backed by
//! per-user history, document upload/Q&A over extracted text, and one-shot
//! clause analysis endpoints.

pub mod config;
pub mod error;
pub mod middleware;
pub mod prompts;
pub mod routes;
pub mod state;
pub mod web_context;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::routes::{chat, conversations, documents, health, simplify};
use crate::state::AppState;

/// Request bodies carry base64 payloads up to the 15 MiB decoded ceiling,
/// so the transport limit sits comfortably above base64 overhead.
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Chat & conversations
        .route("/chat", post(chat::chat))
        .route(
            "/conversations/:user_id",
            get(conversations::list_conversations),
        )
        .route(
            "/conversations/:user_id/new",
            post(conversations::create_conversation),
        )
        .route(
            "/conversations/:user_id/active",
            put(conversations::set_active_conversation),
        )
        .route(
            "/conversations/:user_id/:conversation_id",
            get(conversations::get_conversation).delete(conversations::delete_conversation),
        )
        // Documents
        .route("/upload", post(documents::upload_document))
        .route("/question", post(documents::ask_question))
        .route("/analyze", post(documents::analyze_document))
        .route("/documents", get(documents::list_documents))
        .route("/documents/:document_id", delete(documents::delete_document))
        // Clause tools
        .route("/simplify", post(simplify::simplify))
        .route("/translate", post(simplify::translate))
        .layer(from_fn(middleware::logging::log_request))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(300)))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);

        if config.cors.origins.iter().any(|o| o == "*") {
            cors.allow_origin(Any)
        } else {
            let parsed_origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|o| o.parse::<axum::http::HeaderValue>().ok())
                .collect();

            cors.allow_origin(parsed_origins)
        }
    } else {
        CorsLayer::permissive()
    }
}
