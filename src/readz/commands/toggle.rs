use crate::commands::CmdResult;
use crate::model::Chapter;

use super::helpers::find_mut;

/// Flips `completed` on the chapter with `id`. Unknown ids are a no-op.
pub fn run(chapters: &mut [Chapter], id: u64) -> CmdResult {
    match find_mut(chapters, id) {
        Some(ch) => {
            ch.completed = !ch.completed;
            CmdResult::changed().with_affected_chapters(vec![ch.clone()])
        }
        None => CmdResult::unchanged(),
    }
}
