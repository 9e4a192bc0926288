//! # API Facade
//!
//! [`TrackerApi`] is the state controller every UI talks to. It owns the
//! [`TrackerState`] and the store handle, dispatches to the command modules,
//! and posts each result's message to the status line.
//!
//! ## Mutations vs. persistence
//!
//! Mutating methods (`toggle_complete`, `add_chapter`, ...) are synchronous
//! and only change memory. Persisting is a separate, explicit step:
//!
//! - [`TrackerApi::save`] writes immediately (one-shot CLI commands), or
//! - [`TrackerApi::pending_snapshot`] hands a snapshot to a
//!   [`crate::persist::SaveQueue`] for debounced writing (the shell).
//!
//! Both refuse while the initial load is running and when the list is empty.
//!
//! ## Generic Over KeyValueStore
//!
//! - Production: `TrackerApi<FileStore>`
//! - Testing: `TrackerApi<InMemoryStore>`

use crate::commands;
use crate::config::ReadzConfig;
use crate::error::Result;
use crate::model::{Chapter, ChapterDraft, Progress};
use crate::state::{StatusMessage, StatusTtl, TrackerState};
use crate::store::KeyValueStore;
use chrono::Utc;
use std::sync::Arc;

pub use crate::commands::export::ExportSnapshot;
pub use crate::commands::load::LoadSource;
pub use crate::commands::save::SaveOutcome;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct TrackerApi<S: KeyValueStore> {
    store: Arc<S>,
    config: ReadzConfig,
    state: TrackerState,
}

impl<S: KeyValueStore> TrackerApi<S> {
    pub fn new(store: Arc<S>, config: ReadzConfig) -> Self {
        Self {
            store,
            config,
            state: TrackerState::new(),
        }
    }

    pub async fn load(&mut self) -> (LoadSource, CmdResult) {
        let loaded = commands::load::run(self.store.as_ref(), &self.config.storage_key).await;
        self.state.finish_loading(loaded.chapters);
        self.post(&loaded.result);
        (loaded.source, loaded.result)
    }

    pub async fn save(&mut self) -> (SaveOutcome, CmdResult) {
        if !self.state.is_persistable() {
            return (SaveOutcome::Skipped, CmdResult::unchanged());
        }
        let (outcome, result) = commands::save::run(
            self.store.as_ref(),
            &self.config.storage_key,
            self.state.chapters(),
        )
        .await;
        self.post(&result);
        (outcome, result)
    }

    /// A snapshot to persist after a change, or `None` if saving is not allowed.
    pub fn pending_snapshot(&self) -> Option<Vec<Chapter>> {
        self.state
            .is_persistable()
            .then(|| self.state.chapters().to_vec())
    }

    pub fn toggle_complete(&mut self, id: u64) -> CmdResult {
        let result = commands::toggle::run(self.state.chapters_mut(), id);
        self.post(&result);
        result
    }

    pub fn delete_chapter(&mut self, id: u64) -> CmdResult {
        let result = commands::delete::run(self.state.chapters_mut(), id);
        self.post(&result);
        result
    }

    pub fn toggle_edit(&mut self, id: u64) -> CmdResult {
        let result = commands::notes::toggle_edit(self.state.chapters_mut(), id);
        self.post(&result);
        result
    }

    pub fn update_notes(&mut self, id: u64, text: impl Into<String>) -> CmdResult {
        let result = commands::notes::update(self.state.chapters_mut(), id, text);
        self.post(&result);
        result
    }

    /// Adds a chapter from the current draft (see [`Self::draft_mut`]).
    pub fn add_from_draft(&mut self) -> CmdResult {
        let (chapters, draft) = self.state.chapters_and_draft();
        let result = commands::add::run(chapters, draft);
        self.post(&result);
        result
    }

    /// Replaces the draft with `draft` and adds it.
    pub fn add_chapter(&mut self, draft: ChapterDraft) -> CmdResult {
        *self.state.draft_mut() = draft;
        self.add_from_draft()
    }

    pub fn reset_all(&mut self, confirmed: bool) -> CmdResult {
        let result = commands::reset::run(self.state.chapters_mut(), confirmed);
        self.post(&result);
        result
    }

    pub fn export(&mut self) -> Result<(ExportSnapshot, CmdResult)> {
        let (snapshot, result) =
            commands::export::run(self.state.chapters(), &self.config.export_filename)?;
        self.post(&result);
        Ok((snapshot, result))
    }

    pub fn import(&mut self, contents: &str) -> CmdResult {
        let result = commands::import::run(self.state.chapters_mut(), contents);
        self.post(&result);
        result
    }

    pub fn chapters(&self) -> &[Chapter] {
        self.state.chapters()
    }

    pub fn chapter(&self, id: u64) -> Result<&Chapter> {
        commands::helpers::require(self.state.chapters(), id)
    }

    pub fn progress(&self) -> Progress {
        Progress::of(self.state.chapters())
    }

    pub fn draft(&self) -> &ChapterDraft {
        self.state.draft()
    }

    pub fn draft_mut(&mut self) -> &mut ChapterDraft {
        self.state.draft_mut()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.state.status(Utc::now())
    }

    /// Shows a result produced elsewhere (e.g. by the save queue).
    pub fn post(&mut self, result: &CmdResult) {
        let now = Utc::now();
        let ttl = self.status_ttl();
        self.state.clear_expired_status(now);
        self.state.post(result, now, ttl);
    }

    pub fn config(&self) -> &ReadzConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    fn status_ttl(&self) -> StatusTtl {
        StatusTtl {
            normal: self.config.status_ttl(),
            warning: self.config.warning_ttl(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_chapters;
    use crate::store::memory::fixtures::{StoreFixture, KEY};
    use crate::store::memory::InMemoryStore;

    async fn loaded_api(store: InMemoryStore) -> TrackerApi<InMemoryStore> {
        let mut api = TrackerApi::new(Arc::new(store), ReadzConfig::default());
        api.load().await;
        api
    }

    #[tokio::test]
    async fn nothing_is_saved_before_load() {
        let store = Arc::new(InMemoryStore::new());
        let mut api = TrackerApi::new(store.clone(), ReadzConfig::default());
        assert!(api.is_loading());
        assert!(api.pending_snapshot().is_none());

        let (outcome, _) = api.save().await;
        assert_eq!(outcome, SaveOutcome::Skipped);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn load_seeds_defaults_and_reports_status() {
        let api = loaded_api(InMemoryStore::new()).await;
        assert!(!api.is_loading());
        assert_eq!(api.chapters(), default_chapters().as_slice());
        assert_eq!(api.status().unwrap().content, "Using default chapters");
    }

    #[tokio::test]
    async fn load_after_failure_yields_exact_defaults() {
        let store = StoreFixture::new()
            .with_completed_defaults(&[3])
            .store
            .failing_reads();
        let api = loaded_api(store).await;
        assert_eq!(api.chapters(), default_chapters().as_slice());

        let api = loaded_api(StoreFixture::new().with_raw("[{\"id\":").store).await;
        assert_eq!(api.chapters(), default_chapters().as_slice());
    }

    #[tokio::test]
    async fn mutate_then_save_persists_latest_list() {
        let mut api = loaded_api(InMemoryStore::new()).await;
        api.toggle_complete(3);
        api.update_notes(3, "transformer tests");
        let (outcome, _) = api.save().await;
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(api.status().unwrap().content, "✓ Saved");

        let mut again = TrackerApi::new(api.store(), ReadzConfig::default());
        let (source, _) = again.load().await;
        assert_eq!(source, LoadSource::Stored);
        assert_eq!(again.chapter(3).unwrap().notes, "transformer tests");
        assert_eq!(again.progress().completed, 1);
    }

    #[tokio::test]
    async fn save_failure_keeps_memory() {
        let mut api = loaded_api(InMemoryStore::new().failing_writes()).await;
        api.delete_chapter(1);
        let (outcome, _) = api.save().await;
        assert_eq!(outcome, SaveOutcome::Failed);
        assert_eq!(api.chapters().len(), 11);
        assert_eq!(api.status().unwrap().level, MessageLevel::Warning);
    }

    #[tokio::test]
    async fn empty_list_after_import_is_not_saved() {
        let mut api = loaded_api(InMemoryStore::new()).await;
        api.save().await;
        api.import("[]");
        assert!(api.chapters().is_empty());
        assert!(api.pending_snapshot().is_none());

        let (outcome, _) = api.save().await;
        assert_eq!(outcome, SaveOutcome::Skipped);
        let stored = api.store().peek(KEY).unwrap();
        assert!(stored.starts_with("[{"));

        let res = api.add_chapter(ChapterDraft::new("Fresh start"));
        assert_eq!(res.affected_chapters[0].id, 1);
    }

    #[tokio::test]
    async fn draft_is_kept_when_refused_and_cleared_when_added() {
        let mut api = loaded_api(InMemoryStore::new()).await;
        api.draft_mut().pages = "1-9".into();
        assert!(!api.add_from_draft().changed);
        assert_eq!(api.draft().pages, "1-9");

        api.draft_mut().title = "Preface".into();
        assert!(api.add_from_draft().changed);
        assert_eq!(api.draft(), &ChapterDraft::default());
        assert_eq!(api.chapters().last().unwrap().pages, "1-9");
    }

    #[tokio::test]
    async fn export_uses_configured_filename() {
        let mut config = ReadzConfig::default();
        config.export_filename = "mine.json".into();
        let mut api = TrackerApi::new(Arc::new(InMemoryStore::new()), config);
        api.load().await;

        let (snapshot, _) = api.export().unwrap();
        assert_eq!(snapshot.filename, "mine.json");
        assert_eq!(api.status().unwrap().content, "✓ Exported");
    }

    #[tokio::test]
    async fn reset_requires_confirmation() {
        let mut api = loaded_api(InMemoryStore::new()).await;
        api.delete_chapter(2);
        assert!(!api.reset_all(false).changed);
        assert_eq!(api.chapters().len(), 11);
        assert!(api.reset_all(true).changed);
        assert_eq!(api.chapters(), default_chapters().as_slice());
    }
}
