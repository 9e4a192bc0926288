use crate::commands::{CmdMessage, CmdResult};
use crate::model::{default_chapters, Chapter};
use crate::store::KeyValueStore;
use tracing::{debug, warn};

/// Where the loaded chapter list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// The persisted document parsed into a non-empty list.
    Stored,
    /// Nothing was stored yet.
    Missing,
    /// The store failed, or the document was malformed or empty.
    Unusable,
}

#[derive(Debug)]
pub struct Loaded {
    pub chapters: Vec<Chapter>,
    pub source: LoadSource,
    pub result: CmdResult,
}

/// Reads the chapter list stored under `key`.
///
/// Never yields an empty list: every failure falls back to the full default
/// list, never to a partial one.
pub async fn run<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Loaded {
    let raw = match store.get(key).await {
        Ok(raw) => raw,
        Err(err) => {
            warn!(error = %err, key, "failed to read stored chapters");
            return defaults(LoadSource::Unusable, "No saved data found, using defaults");
        }
    };

    let Some(raw) = raw else {
        debug!(key, "nothing stored yet");
        return defaults(LoadSource::Missing, "Using default chapters");
    };

    match serde_json::from_str::<Vec<Chapter>>(&raw) {
        Ok(chapters) if !chapters.is_empty() => {
            debug!(key, count = chapters.len(), "loaded stored chapters");
            Loaded {
                chapters,
                source: LoadSource::Stored,
                result: CmdResult::changed()
                    .with_message(CmdMessage::success("Data loaded successfully!")),
            }
        }
        Ok(_) => {
            warn!(key, "stored chapter list is empty");
            defaults(LoadSource::Unusable, "No saved data found, using defaults")
        }
        Err(err) => {
            warn!(error = %err, key, "stored chapters are corrupt");
            defaults(LoadSource::Unusable, "No saved data found, using defaults")
        }
    }
}

fn defaults(source: LoadSource, message: &str) -> Loaded {
    Loaded {
        chapters: default_chapters(),
        source,
        result: CmdResult::changed().with_message(CmdMessage::info(message)),
    }
}
