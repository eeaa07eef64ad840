use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::ExtractError;
use crate::extractor::TextExtractor;

/// Optical character recognition through the `tesseract` executable.
/// The binary is located once at registry-probe time; a deployment without
/// it simply lacks this capability.
pub struct OcrExtractor {
    binary: PathBuf,
}

impl OcrExtractor {
    /// Find the `tesseract` binary on PATH. Returns `None` when it is not
    /// installed.
    pub fn locate() -> Option<Self> {
        which::which("tesseract").ok().map(|binary| Self { binary })
    }
}

impl TextExtractor for OcrExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError> {
        // cheap header sniff so garbage bytes fail here, not inside the tool
        image::guess_format(data)
            .map_err(|e| ExtractError::ExtractionFailed(format!("Error processing image: {e}")))?;

        let mut child = Command::new(&self.binary)
            .args(["stdin", "stdout"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExtractError::ExtractionFailed(format!("Failed to start OCR: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(data)
                .map_err(|e| ExtractError::ExtractionFailed(format!("OCR input failed: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ExtractError::ExtractionFailed(format!("OCR failed: {e}")))?;
        if !output.status.success() {
            return Err(ExtractError::ExtractionFailed(format!(
                "OCR exited with status {}",
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
