use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::GenerateRequest;

/// The seam between request handling and the external model. Production
/// uses [`crate::GeminiClient`]; tests script responses through a mock.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Send one prompt and return the model's full response text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, LlmError>;
}
