//! Client layer for the external generative model.
//!
//! The model is treated as an opaque text-in/text-out collaborator with
//! latency and failure modes. [`GenerativeClient`] is the seam request
//! handlers depend on; [`GeminiClient`] is the production implementation
//! (HTTP direct, no SDK). Structured-output expectations go through
//! [`generate_structured`], which turns unparseable output into a typed
//! [`LlmError::MalformedOutput`] so call sites can substitute their
//! contract-shaped fallbacks.

pub mod error;
pub mod gemini;
pub mod structured;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use gemini::GeminiClient;
pub use structured::generate_structured;
pub use traits::GenerativeClient;
pub use types::{GenerateRequest, ResponseFormat};
