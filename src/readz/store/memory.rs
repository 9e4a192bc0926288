use super::KeyValueStore;
use crate::error::{ReadzError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Reads the raw value without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }

    fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ReadzError::Store("simulated read failure".to_string()));
        }
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ReadzError::Store("simulated write failure".to_string()));
        }
        self.insert(key, value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{default_chapters, Chapter};

    pub const KEY: &str = "power-systems-chapters";

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_chapters(self, chapters: &[Chapter]) -> Self {
            let json = serde_json::to_string(chapters).unwrap();
            self.store.insert(KEY, &json);
            self
        }

        pub fn with_completed_defaults(self, ids: &[u64]) -> Self {
            let mut chapters = default_chapters();
            for ch in chapters.iter_mut() {
                ch.completed = ids.contains(&ch.id);
            }
            self.with_chapters(&chapters)
        }

        pub fn with_raw(self, raw: &str) -> Self {
            self.store.insert(KEY, raw);
            self
        }
    }
}
