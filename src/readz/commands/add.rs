use crate::commands::CmdResult;
use crate::model::{Chapter, ChapterDraft, ChapterNumber};

use super::helpers::next_id;

/// Appends a chapter built from `draft` and clears the draft.
///
/// A draft without a title is refused silently: the list and the draft are
/// left as they were and no message is reported. The same happens when no id
/// is left above the current maximum.
pub fn run(chapters: &mut Vec<Chapter>, draft: &mut ChapterDraft) -> CmdResult {
    if draft.title.is_empty() {
        return CmdResult::unchanged();
    }
    let Some(id) = next_id(chapters) else {
        return CmdResult::unchanged();
    };

    let number = if draft.number.trim().is_empty() {
        ChapterNumber::Int(chapters.len() as i64 + 1)
    } else {
        ChapterNumber::Text(draft.number.clone())
    };

    let chapter = Chapter::new(
        id,
        number,
        draft.title.clone(),
        draft.pages.clone(),
    );
    chapters.push(chapter.clone());
    draft.clear();

    CmdResult::changed().with_affected_chapters(vec![chapter])
}
