//! # Storage Layer
//!
//! The tracker persists its whole chapter list as one opaque document under a
//! single key. The [`KeyValueStore`] trait is that seam: the state controller
//! only ever asks for `get(key)` and `set(key, value)`, and never interprets
//! anything about where or how the value is kept.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One file per key: `{data_dir}/{key}.json`
//!   - Writes go to a temp file first and are renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can be told to fail reads or writes, to exercise the fallback paths
//!
//! ## Async
//!
//! Both operations are async and fallible. Callers treat a failed `get` the
//! same as a corrupt document, and a failed `set` as non-fatal: the in-memory
//! list stays authoritative.

use crate::error::Result;
use async_trait::async_trait;

pub mod fs;
pub mod memory;

/// Abstract key-value persistence.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
