// ABOUTME: Name-to-container-ID registry, the engine's only shared mutable state.
// ABOUTME: All access is read-modify-write under a parking_lot mutex.

use crate::types::ContainerId;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Maps caller-chosen container names to runtime-assigned IDs.
///
/// Entries are created by `run` and never removed automatically; there
/// is no stop/remove tracking, so the registry lives as long as its
/// engine unless explicitly cleared. Concurrent writers serialize on
/// the lock: a reused name is overwritten atomically, last writer wins.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<HashMap<String, ContainerId>>,
}

impl Registry {
    /// Track `id` under `name`, returning the displaced ID if the name
    /// was already tracked.
    pub fn insert(&self, name: &str, id: ContainerId) -> Option<ContainerId> {
        self.inner.lock().insert(name.to_string(), id)
    }

    /// The ID tracked for `name`, if any.
    pub fn get(&self, name: &str) -> Option<ContainerId> {
        self.inner.lock().get(name).cloned()
    }

    /// All tracked names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.inner.lock().keys().cloned().collect()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_empty() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.get("app"), None);
    }

    #[test]
    fn insert_then_get_round_trips() {
        let registry = Registry::default();
        assert_eq!(registry.insert("app", ContainerId::new("abc123")), None);
        assert_eq!(registry.get("app"), Some(ContainerId::new("abc123")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reused_name_keeps_only_the_latest_id() {
        let registry = Registry::default();
        registry.insert("app", ContainerId::new("first"));
        let displaced = registry.insert("app", ContainerId::new("second"));
        assert_eq!(displaced, Some(ContainerId::new("first")));
        assert_eq!(registry.get("app"), Some(ContainerId::new("second")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let registry = Registry::default();
        registry.insert("a", ContainerId::new("1"));
        registry.insert("b", ContainerId::new("2"));
        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn concurrent_writers_never_tear_entries() {
        let registry = Arc::new(Registry::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.insert("contested", ContainerId::new(format!("id-{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Exactly one writer's ID survives, intact.
        let id = registry.get("contested").unwrap();
        assert!(id.as_str().starts_with("id-"));
        assert_eq!(registry.len(), 1);
    }
}
