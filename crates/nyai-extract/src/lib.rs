//! Validation gate and multi-format text extraction.
//!
//! A raw base64 payload plus a declared content type goes in; trimmed plain
//! text (or a typed error) comes out. Extraction strategies are registered
//! in an [`ExtractorRegistry`] probed once at startup, so an optional
//! capability missing from the deployment (e.g. the OCR binary) surfaces as
//! [`ExtractError::CapabilityUnavailable`] instead of a crash.

pub mod docx;
pub mod error;
pub mod extractor;
pub mod image_ocr;
pub mod payload;
pub mod pdf;
pub mod registry;
pub mod text;
pub mod validate;

pub use docx::DocxExtractor;
pub use error::ExtractError;
pub use extractor::TextExtractor;
pub use image_ocr::OcrExtractor;
pub use payload::{decode_payload, MAX_DECODED_BYTES};
pub use pdf::PdfExtractor;
pub use registry::{DocumentKind, ExtractorRegistry};
pub use text::PlainTextExtractor;
pub use validate::validate_file_input;
