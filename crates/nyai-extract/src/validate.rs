use crate::error::ExtractError;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "gif"];

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "text/plain",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
];

/// Reject malformed upload requests before any decoding or extraction runs.
/// Pure checks only; never performs I/O.
pub fn validate_file_input(filename: &str, content_type: &str) -> Result<(), ExtractError> {
    if filename.trim().is_empty() {
        return Err(ExtractError::InvalidInput("Filename is required".to_string()));
    }
    if content_type.trim().is_empty() {
        return Err(ExtractError::InvalidInput(
            "Content type is required".to_string(),
        ));
    }

    let lower = filename.to_lowercase();
    if !ALLOWED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
    {
        return Err(ExtractError::InvalidInput(format!(
            "Unsupported file extension. Allowed: {ALLOWED_EXTENSIONS:?}"
        )));
    }

    if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
        return Err(ExtractError::InvalidInput(format!(
            "Unsupported content type: {content_type}"
        )));
    }

    Ok(())
}
