use nyai_store::{Conversation, MessageRole};

use crate::strategy::ContextStrategy;

/// Renders the entire prior history verbatim, one `"<Role>: <content>"`
/// block per message, separated by blank lines. No truncation and no
/// windowing: whole-history inclusion is a known scaling limit of this
/// strategy, kept deliberately.
pub struct FullHistoryStrategy;

impl ContextStrategy for FullHistoryStrategy {
    fn render(&self, conversation: &Conversation) -> String {
        let messages = &conversation.messages;
        let prior = &messages[..messages.len().saturating_sub(1)];

        let mut context = String::new();
        for message in prior {
            let role = match message.role {
                MessageRole::User => "User",
                MessageRole::Assistant => "AI",
            };
            context.push_str(&format!("{}: {}\n\n", role, message.content));
        }
        context
    }
}
