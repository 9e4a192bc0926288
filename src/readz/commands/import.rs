use crate::commands::{CmdMessage, CmdResult};
use crate::model::Chapter;
use tracing::warn;

/// Replaces the whole list with the chapters in `contents`.
///
/// Any JSON array of chapter records is accepted; records only need an `id`
/// and a `title`, every other field falls back to its default. Nothing else
/// is checked: duplicate ids or an empty array are taken as-is. When the
/// document does not parse, the list is left untouched.
///
/// Fields outside the chapter schema are dropped, and a missing `number`
/// comes back as `""` on export, so a hand-written file does not export
/// byte for byte.
pub fn run(chapters: &mut Vec<Chapter>, contents: &str) -> CmdResult {
    match serde_json::from_str::<Vec<Chapter>>(contents) {
        Ok(imported) => {
            *chapters = imported;
            CmdResult::changed().with_message(CmdMessage::success("✓ Imported successfully"))
        }
        Err(err) => {
            warn!(error = %err, "import rejected");
            CmdResult::unchanged().with_message(CmdMessage::warning("⚠ Import failed"))
        }
    }
}
