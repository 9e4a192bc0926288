use crate::commands::CmdResult;
use crate::model::Chapter;

use super::helpers::find_mut;

/// Replaces the notes of chapter `id`. Any text is accepted, including "".
pub fn update(chapters: &mut [Chapter], id: u64, text: impl Into<String>) -> CmdResult {
    match find_mut(chapters, id) {
        Some(ch) => {
            ch.notes = text.into();
            CmdResult::changed().with_affected_chapters(vec![ch.clone()])
        }
        None => CmdResult::unchanged(),
    }
}

/// Flips the notes edit mode of chapter `id`.
pub fn toggle_edit(chapters: &mut [Chapter], id: u64) -> CmdResult {
    match find_mut(chapters, id) {
        Some(ch) => {
            ch.editing = !ch.editing;
            CmdResult::changed().with_affected_chapters(vec![ch.clone()])
        }
        None => CmdResult::unchanged(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{delete, toggle};
    use crate::model::default_chapters;
    use std::collections::BTreeSet;

    fn ids(chapters: &[Chapter]) -> BTreeSet<u64> {
        chapters.iter().map(|ch| ch.id).collect()
    }

    #[test]
    fn notes_survive_edit_toggling() {
        let mut chapters = default_chapters();
        update(&mut chapters, 1, "Review per-unit system");
        let before = chapters[0].editing;

        toggle_edit(&mut chapters, 1);
        assert_ne!(chapters[0].editing, before);
        toggle_edit(&mut chapters, 1);

        assert_eq!(chapters[0].editing, before);
        assert_eq!(chapters[0].notes, "Review per-unit system");
    }

    #[test]
    fn empty_notes_are_allowed() {
        let mut chapters = default_chapters();
        update(&mut chapters, 2, "something");
        let res = update(&mut chapters, 2, "");
        assert!(res.changed);
        assert_eq!(chapters[1].notes, "");
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut chapters = default_chapters();
        assert!(!update(&mut chapters, 99, "x").changed);
        assert!(!toggle_edit(&mut chapters, 99).changed);
        assert_eq!(chapters, default_chapters());
    }

    #[test]
    fn only_delete_shrinks_the_id_set() {
        let mut chapters = default_chapters();
        let all = ids(&chapters);

        for id in [1, 5, 12, 5, 7] {
            toggle::run(&mut chapters, id);
            update(&mut chapters, id, format!("note {}", id));
            toggle_edit(&mut chapters, id);
            assert_eq!(ids(&chapters), all);
        }

        delete::run(&mut chapters, 5);
        let mut expected = all.clone();
        expected.remove(&5);
        assert_eq!(ids(&chapters), expected);
    }
}
