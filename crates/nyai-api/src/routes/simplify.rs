use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use nyai_llm::{generate_structured, GenerateRequest};

use crate::error::{ApiError, ApiResult};
use crate::prompts;
use crate::state::AppState;
use crate::web_context;

/// A clause must mention at least one of these to be treated as legal text.
const LEGAL_KEYWORDS: &[&str] = &[
    "agreement",
    "party",
    "parties",
    "clause",
    "section",
    "article",
    "court",
    "shall",
    "hereto",
    "indemnify",
    "liability",
    "contract",
    "witness",
    "behalf",
    "provision",
    "judgement",
    "decree",
    "plaintiff",
    "defendant",
    "covenant",
    "warrant",
    "hereby",
];

const MIN_CLAUSE_TOKENS: usize = 8;

#[derive(Debug, Deserialize)]
pub struct SimplifyRequest {
    /// Legal clause to simplify
    pub text: String,
}

/// Rewrite a legal clause for a general audience, with best-effort web
/// context folded into the prompt.
pub async fn simplify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimplifyRequest>,
) -> ApiResult<Json<Value>> {
    let model = state.model()?;

    let text = req.text.trim().to_string();
    if text.is_empty() {
        return Err(ApiError::InvalidInput("Text is required".to_string()));
    }

    let lower = text.to_lowercase();
    let token_count = text.split_whitespace().count();
    if token_count < MIN_CLAUSE_TOKENS || !LEGAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Err(ApiError::InvalidInput(
            "This does not appear to be a valid legal statement.".to_string(),
        ));
    }

    let context = web_context::gather(&state.http_client, &text)
        .await
        .unwrap_or_default();

    let request = GenerateRequest::new(&state.config.llm.model, prompts::simplify(&context, &text));
    let result: Value = generate_structured(model.as_ref(), request).await?;
    if !result.is_object() {
        return Err(ApiError::MalformedModelOutput);
    }

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    /// JSON result object to translate
    pub result: Value,
    /// Target language name (e.g. Hindi)
    #[serde(default)]
    pub target_language: String,
}

/// Translate all string values of a result object. An unset or English
/// target skips the model entirely; any failure returns the original
/// object untranslated.
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> ApiResult<Json<Value>> {
    let model = state.model()?;

    let target = req.target_language.trim();
    if target.is_empty() || target.eq_ignore_ascii_case("english") {
        return Ok(Json(req.result));
    }

    let json = serde_json::to_string(&req.result)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to serialize result: {e}")))?;
    let request = GenerateRequest::new(&state.config.llm.model, prompts::translate(&json, target));

    match generate_structured::<Value>(model.as_ref(), request).await {
        Ok(translated) => Ok(Json(translated)),
        Err(e) => {
            tracing::warn!(error = %e, "translation failed, returning original object");
            Ok(Json(req.result))
        }
    }
}
