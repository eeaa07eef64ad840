use crate::error::ExtractError;
use crate::extractor::TextExtractor;

/// PDF extraction via `pdf-extract`; page texts come out joined with
/// newlines.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ExtractError::ExtractionFailed(format!("Error reading PDF: {e}")))
    }
}
