use crate::commands::CmdResult;
use crate::model::Chapter;

/// Removes the chapter with `id`. Remaining chapters keep their ids and numbers.
pub fn run(chapters: &mut Vec<Chapter>, id: u64) -> CmdResult {
    match chapters.iter().position(|ch| ch.id == id) {
        Some(pos) => {
            let removed = chapters.remove(pos);
            CmdResult::changed().with_affected_chapters(vec![removed])
        }
        None => CmdResult::unchanged(),
    }
}
