use super::{KeyValueStore, KvResult};
use std::collections::HashMap;

/// In-process key-value store. Contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> KvResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryKeyValueStore;
    use crate::kv::KeyValueStore;

    #[test]
    fn set_get_remove_cycle() {
        let mut store = MemoryKeyValueStore::new();
        assert_eq!(store.get_item("contacts").unwrap(), None);

        store.set_item("contacts", "[]").unwrap();
        store.set_item("contacts", "[1]").unwrap();
        assert_eq!(store.get_item("contacts").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.len(), 1);

        store.remove_item("contacts").unwrap();
        store.remove_item("contacts").unwrap();
        assert!(store.is_empty());
    }
}
