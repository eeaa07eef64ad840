use nyai_store::Conversation;

/// Strategy for rendering a conversation's prior turns into a single text
/// block used as model input.
pub trait ContextStrategy: Send + Sync {
    /// Render every message except the newest one (the turn currently being
    /// answered). Returns the empty string when there are no prior messages.
    fn render(&self, conversation: &Conversation) -> String;
}
