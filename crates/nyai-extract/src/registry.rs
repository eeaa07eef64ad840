use std::collections::HashMap;

use crate::docx::DocxExtractor;
use crate::error::ExtractError;
use crate::extractor::TextExtractor;
use crate::image_ocr::OcrExtractor;
use crate::payload::decode_payload;
use crate::pdf::PdfExtractor;
use crate::text::PlainTextExtractor;
use crate::validate::validate_file_input;

/// Document format classes the extractor multiplexes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Pdf,
    WordDocument,
    Image,
    PlainText,
}

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/pdf" => Some(Self::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::WordDocument)
            }
            "text/plain" => Some(Self::PlainText),
            _ if content_type.starts_with("image/") => Some(Self::Image),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::WordDocument => "DOCX",
            Self::Image => "OCR",
            Self::PlainText => "Text",
        }
    }
}

/// Maps each [`DocumentKind`] to the strategy registered for it. Built once
/// at startup; a kind with no registered strategy is a first-class
/// [`ExtractError::CapabilityUnavailable`] at request time.
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Register every strategy this deployment can provide.
    pub fn probe() -> Self {
        let mut registry = Self::new();
        registry.register(DocumentKind::Pdf, Box::new(PdfExtractor));
        registry.register(DocumentKind::WordDocument, Box::new(DocxExtractor));
        registry.register(DocumentKind::PlainText, Box::new(PlainTextExtractor));
        match OcrExtractor::locate() {
            Some(ocr) => registry.register(DocumentKind::Image, Box::new(ocr)),
            None => tracing::warn!("tesseract binary not found, OCR extraction disabled"),
        }
        registry
    }

    pub fn register(&mut self, kind: DocumentKind, extractor: Box<dyn TextExtractor>) {
        self.extractors.insert(kind, extractor);
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Dispatch decoded bytes to the strategy for `content_type`. The result
    /// is trimmed; an empty trimmed result is [`ExtractError::EmptyDocument`].
    pub fn extract(&self, data: &[u8], content_type: &str) -> Result<String, ExtractError> {
        let kind = DocumentKind::from_content_type(content_type).ok_or_else(|| {
            ExtractError::InvalidInput(format!("Unsupported content type: {content_type}"))
        })?;
        let extractor = self
            .extractors
            .get(&kind)
            .ok_or(ExtractError::CapabilityUnavailable(kind.label()))?;

        let text = extractor.extract(data)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ExtractError::EmptyDocument);
        }
        Ok(text.to_string())
    }

    /// Full pipeline for an upload: validation gate, base64 decode with size
    /// ceiling, then format dispatch. Blocking; callers on an async runtime
    /// should run it on a blocking thread.
    pub fn extract_document(
        &self,
        content: &str,
        filename: &str,
        content_type: &str,
    ) -> Result<String, ExtractError> {
        validate_file_input(filename, content_type)?;
        let data = decode_payload(content)?;
        self.extract(&data, content_type)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::probe()
    }
}
