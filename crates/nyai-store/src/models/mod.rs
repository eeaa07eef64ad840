pub mod conversation;
pub mod document;
pub mod message;

pub use conversation::{Conversation, ConversationHistory};
pub use document::{DocumentAnalysis, DocumentRecord};
pub use message::{Message, MessageRole};
