use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// Bad filename, extension, or content type. Raised before any I/O.
    #[error("{0}")]
    InvalidInput(String),

    /// Payload was not valid base64, or decoded to zero bytes.
    #[error("Invalid base64 content: {0}")]
    Decode(String),

    #[error("File too large: {size} bytes (maximum is {limit} bytes)")]
    PayloadTooLarge { size: usize, limit: usize },

    /// The deployment lacks the strategy needed for this format.
    #[error("{0} processing not available in this deployment")]
    CapabilityUnavailable(&'static str),

    /// Extraction succeeded but yielded no text after trimming.
    #[error("No text content found in document")]
    EmptyDocument,

    /// The strategy ran and failed (corrupt payload, tool error).
    #[error("{0}")]
    ExtractionFailed(String),
}
