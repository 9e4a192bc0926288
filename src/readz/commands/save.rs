use crate::commands::{CmdMessage, CmdResult};
use crate::model::Chapter;
use crate::store::KeyValueStore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Empty lists are never persisted.
    Skipped,
    Failed,
}

/// Writes a full snapshot of `chapters` under `key`.
///
/// Failures are reported, not returned: the caller's in-memory list stays
/// authoritative and nothing is retried.
pub async fn run<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
    chapters: &[Chapter],
) -> (SaveOutcome, CmdResult) {
    if chapters.is_empty() {
        debug!(key, "skipping save of empty chapter list");
        return (SaveOutcome::Skipped, CmdResult::unchanged());
    }

    let written = match serde_json::to_string(chapters) {
        Ok(json) => store.set(key, &json).await,
        Err(err) => Err(err.into()),
    };

    match written {
        Ok(()) => {
            debug!(key, count = chapters.len(), "saved chapters");
            (
                SaveOutcome::Saved,
                CmdResult::unchanged().with_message(CmdMessage::success("✓ Saved")),
            )
        }
        Err(err) => {
            warn!(error = %err, key, "save failed");
            (
                SaveOutcome::Failed,
                CmdResult::unchanged().with_message(CmdMessage::warning("⚠ Save failed")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::load;
    use crate::model::default_chapters;
    use crate::store::memory::fixtures::KEY;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn saved_list_loads_back() {
        let store = InMemoryStore::new();
        let mut chapters = default_chapters();
        chapters[4].notes = "per-unit".into();

        let (outcome, res) = run(&store, KEY, &chapters).await;
        assert_eq!(outcome, SaveOutcome::Saved);
        assert_eq!(res.last_message().unwrap().content, "✓ Saved");

        let loaded = load::run(&store, KEY).await;
        assert_eq!(loaded.chapters, chapters);
    }

    #[tokio::test]
    async fn empty_list_is_not_written() {
        let store = InMemoryStore::new();
        let (outcome, res) = run(&store, KEY, &[]).await;
        assert_eq!(outcome, SaveOutcome::Skipped);
        assert!(res.messages.is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let store = InMemoryStore::new().failing_writes();
        let (outcome, res) = run(&store, KEY, &default_chapters()).await;
        assert_eq!(outcome, SaveOutcome::Failed);
        assert_eq!(res.last_message().unwrap().content, "⚠ Save failed");
    }
}
