//! # Readz Architecture
//!
//! Readz tracks reading progress through a textbook: one ordered list of
//! chapters, each with a completion flag and free-text notes, persisted as a
//! single JSON document in a key-value store.
//!
//! Like any small app with a UI, the binary is only one client of the
//! library. Nothing from `api.rs` inward prints, exits, or assumes a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, formats output, runs shell    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs, state.rs, persist.rs)                   │
//! │  - Owns the chapter list and transient UI state             │
//! │  - Decides when a snapshot may be persisted                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure list logic, plus async load/save against a store    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Async KeyValueStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persistence rules
//!
//! - Loading never leaves the list empty: a missing, unreadable, corrupt or
//!   empty document all seed the twelve default chapters.
//! - Nothing is written while loading or while the list is empty.
//! - Every write is a full snapshot; the newest snapshot wins.
//!
//! ## Module Overview
//!
//! - [`api`]: The state controller facade
//! - [`commands`]: One module per operation
//! - [`state`]: Chapter list, draft, status line, loading flag
//! - [`persist`]: Debounced background saving
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: `Chapter`, `ChapterNumber`, `ChapterDraft`, `Progress`
//! - [`config`]: Configuration management
//! - [`logging`]: Log subscriber setup
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod persist;
pub mod state;
pub mod store;
