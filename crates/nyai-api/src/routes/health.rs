use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use nyai_extract::DocumentKind;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub model: bool,
    pub pdf_support: bool,
    pub docx_support: bool,
    pub ocr_support: bool,
    pub timestamp: DateTime<Utc>,
}

/// Liveness plus the capability flags a frontend needs to grey out upload
/// options.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "nyai".to_string(),
        model: state.model_configured(),
        pdf_support: state.extractors.supports(DocumentKind::Pdf),
        docx_support: state.extractors.supports(DocumentKind::WordDocument),
        ocr_support: state.extractors.supports(DocumentKind::Image),
        timestamp: Utc::now(),
    })
}
