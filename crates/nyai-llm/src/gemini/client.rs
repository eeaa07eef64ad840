// Gemini-specific client implementation (HTTP direct, no SDK)

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::LlmError;
use crate::traits::GenerativeClient;
use crate::types::{GenerateRequest, ResponseFormat};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client with an API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut key_value = HeaderValue::from_str(&api_key)
            .map_err(|e| LlmError::ClientBuild(format!("invalid API key: {e}")))?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Override the endpoint base URL (tests point this at a local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_request_body(request: &GenerateRequest) -> Value {
        let mut generation_config = serde_json::Map::new();
        if request.format == ResponseFormat::Json {
            generation_config.insert(
                "responseMimeType".to_string(),
                json!("application/json"),
            );
        }
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
        });
        if !generation_config.is_empty() {
            if let Some(obj) = body.as_object_mut() {
                obj.insert(
                    "generationConfig".to_string(),
                    Value::Object(generation_config),
                );
            }
        }
        body
    }

    fn response_text(response: GenerateContentResponse) -> Option<String> {
        let text: String = response
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<String, LlmError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = Self::build_request_body(&request);
        tracing::debug!(model = %request.model, format = ?request.format, "invoking generateContent");

        let response = self.http_client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Self::response_text(parsed).ok_or(LlmError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_sets_response_mime_type() {
        let request = GenerateRequest::new("gemini-2.5-pro", "analyze this").json();
        let body = GeminiClient::build_request_body(&request);
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
    }

    #[test]
    fn text_mode_omits_generation_config() {
        let request = GenerateRequest::new("gemini-2.0-flash-exp", "hello");
        let body = GeminiClient::build_request_body(&request);
        assert!(body.get("generationConfig").is_none());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] }
            }]
        }))
        .unwrap();
        assert_eq!(
            GeminiClient::response_text(response),
            Some("Hello world".to_string())
        );
    }

    #[test]
    fn empty_candidates_yield_none() {
        let response: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert_eq!(GeminiClient::response_text(response), None);
    }
}
