use serde::de::DeserializeOwned;

use crate::error::LlmError;
use crate::traits::GenerativeClient;
use crate::types::GenerateRequest;

/// Structured-mode invocation: forces JSON output and requires the response
/// to deserialize into `T`. A response that does not parse is an explicit
/// [`LlmError::MalformedOutput`]; fallback construction stays with the
/// caller, which knows the contract shape it promised downstream.
pub async fn generate_structured<T: DeserializeOwned>(
    client: &dyn GenerativeClient,
    request: GenerateRequest,
) -> Result<T, LlmError> {
    let text = client.generate(request.json()).await?;
    Ok(serde_json::from_str(text.trim())?)
}
