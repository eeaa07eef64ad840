use std::collections::HashMap;

use parking_lot::Mutex;

/// A thread-safe keyed container with clone-out snapshot semantics.
///
/// One coarse mutex guards the whole map: every operation is atomic with
/// respect to concurrent callers, at the cost of serializing unrelated keys.
/// `get` and `list` return point-in-time copies, never live views. Inserting
/// under an existing key overwrites (last-writer-wins).
pub struct KeyedStore<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn put(&self, key: impl Into<String>, value: V) {
        self.entries.lock().insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().get(key).cloned()
    }

    pub fn delete(&self, key: &str) -> Option<V> {
        self.entries.lock().remove(key)
    }

    /// Point-in-time copy of the whole map.
    pub fn list(&self) -> HashMap<String, V> {
        self.entries.lock().clone()
    }

    /// Run `mutate` on the stored value under the lock. Returns `None` when
    /// the key is absent.
    pub fn update<R>(&self, key: &str, mutate: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.entries.lock().get_mut(key).map(mutate)
    }

    /// Run `f` on the entry for `key`, inserting `default()` first when the
    /// key is unprecedented. Creation happens exactly once per key.
    pub fn with_entry<R>(
        &self,
        key: &str,
        default: impl FnOnce() -> V,
        f: impl FnOnce(&mut V) -> R,
    ) -> R {
        let mut entries = self.entries.lock();
        let value = entries.entry(key.to_string()).or_insert_with(default);
        f(value)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<V: Clone> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
