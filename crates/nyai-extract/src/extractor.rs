use crate::error::ExtractError;

/// A single extraction strategy: raw bytes of one document format in, plain
/// text out. Implementations are registered per [`crate::DocumentKind`] and
/// may be absent from a deployment.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, ExtractError>;
}
