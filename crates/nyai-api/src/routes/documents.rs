use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nyai_llm::{generate_structured, GenerateRequest, LlmError};
use nyai_store::{DocumentAnalysis, DocumentRecord};

use crate::error::{ApiError, ApiResult};
use crate::prompts;
use crate::state::AppState;

/// Characters of extracted text sent to the upload-time analysis prompt.
const ANALYSIS_EXCERPT_CHARS: usize = 3_000;
const MAX_QUESTION_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    /// Base64 encoded document content
    pub content: String,
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub document_id: String,
    pub filename: String,
    pub word_count: usize,
    pub char_count: usize,
    pub analysis: DocumentAnalysis,
}

/// Upload and process a document for Q&A.
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> ApiResult<Json<UploadResponse>> {
    let model = state.model()?;
    tracing::info!(filename = %req.filename, "processing document upload");

    let text_content =
        extract_in_background(&state, req.content, req.filename.clone(), req.content_type.clone())
            .await?;

    let mut record = DocumentRecord::new(req.filename.clone(), req.content_type, text_content);
    let document_id = document_id(&record.filename, record.uploaded_at);

    let excerpt: String = record
        .text_content
        .chars()
        .take(ANALYSIS_EXCERPT_CHARS)
        .collect();
    let request = GenerateRequest::new(
        &state.config.llm.model,
        prompts::document_analysis(&excerpt),
    );
    let analysis = match generate_structured::<DocumentAnalysis>(model.as_ref(), request).await {
        Ok(analysis) => {
            tracing::info!(filename = %record.filename, "document analysis completed");
            analysis
        }
        Err(LlmError::MalformedOutput(e)) => {
            tracing::warn!(error = %e, "analysis output was not valid JSON, using fallback");
            DocumentAnalysis::unparsed_fallback()
        }
        Err(e) => {
            tracing::error!(error = %e, "document analysis failed");
            DocumentAnalysis::invocation_failed_fallback()
        }
    };
    record.analysis = Some(analysis.clone());

    let word_count = record.word_count;
    let char_count = record.char_count;
    state.documents.put(document_id.clone(), record);

    Ok(Json(UploadResponse {
        success: true,
        document_id,
        filename: req.filename,
        word_count,
        char_count,
        analysis,
    }))
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub document_id: String,
    /// Accepted for API compatibility; currently unused.
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub answer: String,
    pub confidence: String,
    #[serde(default)]
    pub relevant_sections: Vec<String>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

impl QuestionAnswer {
    /// Substitute for model output that did not parse as JSON.
    fn unparsed_fallback() -> Self {
        Self {
            answer: "I processed your question but had difficulty formatting the response. \
                     Please try rephrasing your question."
                .to_string(),
            confidence: "low".to_string(),
            relevant_sections: Vec::new(),
            follow_up_questions: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub success: bool,
    pub question: String,
    pub document_id: String,
    pub document_name: String,
    #[serde(flatten)]
    pub answer: QuestionAnswer,
}

/// Ask a question about an uploaded document.
pub async fn ask_question(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionRequest>,
) -> ApiResult<Json<QuestionResponse>> {
    let model = state.model()?;

    let document = state
        .documents
        .get(&req.document_id)
        .ok_or(ApiError::DocumentNotFound)?;

    let question = req.question.trim().to_string();
    if question.is_empty() {
        return Err(ApiError::InvalidInput("Question is required".to_string()));
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(ApiError::InvalidInput(format!(
            "Question too long (max {MAX_QUESTION_CHARS} characters)"
        )));
    }

    tracing::info!(filename = %document.filename, "processing question");

    let request = GenerateRequest::new(
        &state.config.llm.model,
        prompts::document_question(&document.filename, &question, &document.text_content),
    );
    let answer = match generate_structured::<QuestionAnswer>(model.as_ref(), request).await {
        Ok(answer) => answer,
        Err(LlmError::MalformedOutput(e)) => {
            tracing::warn!(error = %e, "answer output was not valid JSON, using fallback");
            QuestionAnswer::unparsed_fallback()
        }
        Err(e) => return Err(ApiError::Model(e)),
    };

    Ok(Json(QuestionResponse {
        success: true,
        question,
        document_id: req.document_id,
        document_name: document.filename,
        answer,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub content: String,
    pub filename: String,
    pub content_type: String,
    #[serde(default = "default_analysis_type")]
    pub analysis_type: String,
}

fn default_analysis_type() -> String {
    "summary".to_string()
}

/// One-shot analysis of a submitted document. The model call is the whole
/// point here, so malformed output is a hard error rather than a fallback.
pub async fn analyze_document(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<Value>> {
    let model = state.model()?;
    tracing::info!(filename = %req.filename, analysis_type = %req.analysis_type, "analyzing document");

    let text_content =
        extract_in_background(&state, req.content, req.filename.clone(), req.content_type).await?;

    let analysis_type = req.analysis_type.to_lowercase();
    let prompt = match analysis_type.as_str() {
        "summary" => prompts::analysis_summary(&text_content),
        "key_points" => prompts::analysis_key_points(&text_content),
        "legal_issues" => prompts::analysis_legal_issues(&text_content),
        _ => {
            return Err(ApiError::InvalidInput(
                "Invalid analysis type. Use: summary, key_points, or legal_issues".to_string(),
            ))
        }
    };

    let request = GenerateRequest::new(&state.config.llm.model, prompt);
    let result: Value = generate_structured(model.as_ref(), request).await?;
    let Value::Object(fields) = result else {
        return Err(ApiError::MalformedModelOutput);
    };

    let mut body = serde_json::Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert("filename".to_string(), Value::String(req.filename));
    body.insert("analysis_type".to_string(), Value::String(analysis_type));
    body.insert(
        "word_count".to_string(),
        Value::from(text_content.split_whitespace().count()),
    );
    body.extend(fields);

    Ok(Json(Value::Object(body)))
}

#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub document_id: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub word_count: usize,
    pub document_type: String,
}

#[derive(Debug, Serialize)]
pub struct ListDocumentsResponse {
    pub success: bool,
    pub documents: Vec<DocumentSummary>,
    pub total: usize,
}

/// List all uploaded documents, newest first.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListDocumentsResponse>> {
    let mut documents: Vec<DocumentSummary> = state
        .documents
        .list()
        .into_iter()
        .map(|(document_id, record)| DocumentSummary {
            document_id,
            filename: record.filename,
            uploaded_at: record.uploaded_at,
            word_count: record.word_count,
            document_type: record
                .analysis
                .map(|analysis| analysis.document_type)
                .unwrap_or_else(|| "unknown".to_string()),
        })
        .collect();
    documents.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));

    let total = documents.len();
    Ok(Json(ListDocumentsResponse {
        success: true,
        documents,
        total,
    }))
}

#[derive(Debug, Serialize)]
pub struct DeleteDocumentResponse {
    pub success: bool,
    pub message: String,
}

/// Remove a document from storage.
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(document_id): Path<String>,
) -> ApiResult<Json<DeleteDocumentResponse>> {
    let removed = state
        .documents
        .delete(&document_id)
        .ok_or(ApiError::DocumentNotFound)?;

    tracing::info!(filename = %removed.filename, "document deleted");

    Ok(Json(DeleteDocumentResponse {
        success: true,
        message: format!("Document '{}' deleted successfully", removed.filename),
    }))
}

/// Run the blocking extraction pipeline off the async runtime.
async fn extract_in_background(
    state: &AppState,
    content: String,
    filename: String,
    content_type: String,
) -> ApiResult<String> {
    let registry = Arc::clone(&state.extractors);
    tokio::task::spawn_blocking(move || {
        registry.extract_document(&content, &filename, &content_type)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("extraction task failed: {e}")))?
    .map_err(ApiError::from)
}

/// `doc_{hash(filename + timestamp) % 100000}`. Collisions are possible
/// and resolved by overwrite; see DESIGN.md.
fn document_id(filename: &str, uploaded_at: DateTime<Utc>) -> String {
    let mut hasher = DefaultHasher::new();
    format!("{}{}", filename, uploaded_at.to_rfc3339()).hash(&mut hasher);
    format!("doc_{}", hasher.finish() % 100_000)
}
