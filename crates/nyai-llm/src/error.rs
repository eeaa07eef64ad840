use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to model endpoint failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Model endpoint returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Model returned an empty response")]
    EmptyResponse,

    /// The response arrived but violated the structured-output contract.
    #[error("Model output is not valid JSON: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}
