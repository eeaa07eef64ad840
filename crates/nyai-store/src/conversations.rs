use std::collections::HashMap;

use crate::models::ConversationHistory;
use crate::store::KeyedStore;

/// Per-user conversation state, keyed by user id.
#[derive(Default)]
pub struct ConversationStore {
    inner: KeyedStore<ConversationHistory>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a snapshot of the user's history, creating an empty one on
    /// first access. Idempotent read-through: exactly one history per user.
    pub fn get_or_create(&self, user_id: &str) -> ConversationHistory {
        self.with_history(user_id, |history| history.clone())
    }

    /// Mutate the user's history under the store lock, creating it first
    /// when absent. Callers must not perform blocking work inside `f`.
    pub fn with_history<R>(
        &self,
        user_id: &str,
        f: impl FnOnce(&mut ConversationHistory) -> R,
    ) -> R {
        self.inner.with_entry(user_id, ConversationHistory::default, f)
    }

    pub fn put(&self, user_id: impl Into<String>, history: ConversationHistory) {
        self.inner.put(user_id, history);
    }

    pub fn get(&self, user_id: &str) -> Option<ConversationHistory> {
        self.inner.get(user_id)
    }

    pub fn delete(&self, user_id: &str) -> Option<ConversationHistory> {
        self.inner.delete(user_id)
    }

    pub fn list(&self) -> HashMap<String, ConversationHistory> {
        self.inner.list()
    }
}
