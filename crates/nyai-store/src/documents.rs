use std::collections::HashMap;

use crate::models::DocumentRecord;
use crate::store::KeyedStore;

/// Uploaded documents, keyed by document id.
#[derive(Default)]
pub struct DocumentStore {
    inner: KeyedStore<DocumentRecord>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, document_id: impl Into<String>, record: DocumentRecord) {
        self.inner.put(document_id, record);
    }

    pub fn get(&self, document_id: &str) -> Option<DocumentRecord> {
        self.inner.get(document_id)
    }

    pub fn delete(&self, document_id: &str) -> Option<DocumentRecord> {
        self.inner.delete(document_id)
    }

    pub fn list(&self) -> HashMap<String, DocumentRecord> {
        self.inner.list()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
