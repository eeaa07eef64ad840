use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extracted-text representation of an uploaded file. The text is immutable
/// after creation; the record is removed only by explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub filename: String,
    pub content_type: String,
    pub text_content: String,
    pub uploaded_at: DateTime<Utc>,
    pub word_count: usize,
    pub char_count: usize,
    pub analysis: Option<DocumentAnalysis>,
}

impl DocumentRecord {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        text_content: impl Into<String>,
    ) -> Self {
        let text_content = text_content.into();
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            word_count: text_content.split_whitespace().count(),
            char_count: text_content.chars().count(),
            text_content,
            uploaded_at: Utc::now(),
            analysis: None,
        }
    }
}

/// Structured analysis produced at upload time. The shape is the model's
/// output contract; the fallback constructors preserve it when the model
/// misbehaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub document_type: String,
    pub summary: String,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    pub language_complexity: String,
}

impl DocumentAnalysis {
    /// Substitute for model output that did not parse as JSON.
    pub fn unparsed_fallback() -> Self {
        Self {
            document_type: "unknown".to_string(),
            summary: "Document uploaded successfully. You can now ask questions about it."
                .to_string(),
            key_topics: Vec::new(),
            entities: Vec::new(),
            language_complexity: "moderate".to_string(),
        }
    }

    /// Substitute for an invocation that failed outright.
    pub fn invocation_failed_fallback() -> Self {
        Self {
            document_type: "unknown".to_string(),
            summary: "Document uploaded but analysis failed. You can still ask questions about it."
                .to_string(),
            key_topics: Vec::new(),
            entities: Vec::new(),
            language_complexity: "moderate".to_string(),
        }
    }
}
