use std::sync::Arc;
use std::thread;

use nyai_store::{ConversationStore, DocumentRecord, DocumentStore, KeyedStore};

fn record(n: usize) -> DocumentRecord {
    // filename and text are correlated so a torn read would be detectable
    DocumentRecord::new(format!("doc-{n}.txt"), "text/plain", "x ".repeat(n + 1))
}

#[test]
fn put_get_delete_roundtrip() {
    let store = DocumentStore::new();
    store.put("doc_1", record(3));

    let fetched = store.get("doc_1").unwrap();
    assert_eq!(fetched.filename, "doc-3.txt");
    assert_eq!(fetched.word_count, 4);

    let removed = store.delete("doc_1").unwrap();
    assert_eq!(removed.filename, "doc-3.txt");
    assert!(store.get("doc_1").is_none());
    assert!(store.delete("doc_1").is_none());
}

#[test]
fn put_overwrites_colliding_id() {
    let store = DocumentStore::new();
    store.put("doc_1", record(1));
    store.put("doc_1", record(2));

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("doc_1").unwrap().filename, "doc-2.txt");
}

#[test]
fn list_is_a_snapshot_not_a_live_view() {
    let store = DocumentStore::new();
    store.put("doc_1", record(1));

    let snapshot = store.list();
    store.put("doc_2", record(2));
    store.delete("doc_1");

    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains_key("doc_1"));
}

#[test]
fn concurrent_puts_never_tear_a_record() {
    let store = Arc::new(KeyedStore::new());
    let writers: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..250 {
                    store.put("shared", record(t * 1000 + i));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..2)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    if let Some(r) = store.get("shared") {
                        // every field must come from the same put
                        let n = r.word_count - 1;
                        assert_eq!(r.filename, format!("doc-{n}.txt"));
                        assert_eq!(r.char_count, (n + 1) * 2);
                    }
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }
}

#[test]
fn get_or_create_is_idempotent_under_concurrency() {
    let store = Arc::new(ConversationStore::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.get_or_create("alice"))
        })
        .collect();

    for handle in handles {
        let history = handle.join().unwrap();
        assert!(history.conversations.is_empty());
        assert_eq!(history.active_conversation, None);
    }
    assert_eq!(store.list().len(), 1);
}

#[test]
fn update_on_missing_key_returns_none() {
    let store: KeyedStore<DocumentRecord> = KeyedStore::new();
    assert!(store.update("missing", |r| r.filename.clone()).is_none());
}
