//! In-memory session state for the NyAI assistant.
//!
//! Two independently-locked keyed containers: [`ConversationStore`] holds
//! per-user conversation histories, [`DocumentStore`] holds extracted
//! documents. All state is process-local and unbounded; nothing survives a
//! restart.

pub mod conversations;
pub mod documents;
pub mod models;
pub mod store;

pub use conversations::ConversationStore;
pub use documents::DocumentStore;
pub use models::{
    Conversation, ConversationHistory, DocumentAnalysis, DocumentRecord, Message, MessageRole,
};
pub use store::KeyedStore;
