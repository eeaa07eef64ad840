use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::message::Message;

/// An ordered thread of user/assistant messages, addressed by its id (the
/// map key in [`ConversationHistory`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a message and refresh `updated_at`.
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

/// All conversations belonging to one user.
///
/// Invariant: `active_conversation`, when set, keys an existing entry in
/// `conversations`. The mutators below maintain it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub conversations: HashMap<String, Conversation>,
    pub active_conversation: Option<String>,
}

impl ConversationHistory {
    pub fn insert_conversation(&mut self, id: impl Into<String>, conversation: Conversation) {
        self.conversations.insert(id.into(), conversation);
    }

    /// Remove a conversation, clearing the active pointer when it pointed at
    /// the removed entry.
    pub fn remove_conversation(&mut self, id: &str) -> Option<Conversation> {
        let removed = self.conversations.remove(id);
        if removed.is_some() && self.active_conversation.as_deref() == Some(id) {
            self.active_conversation = None;
        }
        removed
    }

    /// Point the active marker at an existing conversation. Refuses unknown
    /// ids so the pointer can never dangle.
    pub fn set_active(&mut self, id: &str) -> bool {
        if self.conversations.contains_key(id) {
            self.active_conversation = Some(id.to_string());
            true
        } else {
            false
        }
    }
}
