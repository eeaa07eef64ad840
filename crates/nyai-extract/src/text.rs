use crate::error::ExtractError;
use crate::extractor::TextExtractor;

/// Plain-text passthrough. Undecodable byte sequences are replaced rather
/// than rejected.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(data).into_owned())
    }
}
