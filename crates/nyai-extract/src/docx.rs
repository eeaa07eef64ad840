use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExtractError;
use crate::extractor::TextExtractor;

/// Word-processor extraction: reads `word/document.xml` out of the DOCX
/// archive and concatenates the text runs of each paragraph, one paragraph
/// per line.
pub struct DocxExtractor;

fn text_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("text run pattern is valid")
    })
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

impl TextExtractor for DocxExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractError::ExtractionFailed(format!("Error reading DOCX: {e}")))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractError::ExtractionFailed(format!("Error reading DOCX: {e}")))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::ExtractionFailed(format!("Error reading DOCX: {e}")))?;

        let mut text = String::new();
        for paragraph in xml.split("</w:p>") {
            let mut line = String::new();
            for run in text_run_pattern().captures_iter(paragraph) {
                line.push_str(&unescape_xml(&run[1]));
            }
            if !line.is_empty() {
                text.push_str(&line);
                text.push('\n');
            }
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_xml_entities() {
        assert_eq!(
            unescape_xml("Smith &amp; Sons &lt;Pvt&gt;"),
            "Smith & Sons <Pvt>"
        );
    }

    #[test]
    fn non_archive_bytes_fail_extraction() {
        let result = DocxExtractor.extract(b"plainly not a zip archive");
        assert!(matches!(result, Err(ExtractError::ExtractionFailed(_))));
    }
}
