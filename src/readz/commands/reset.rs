use crate::commands::{CmdMessage, CmdResult};
use crate::model::{default_chapters, Chapter};

/// Replaces the whole list with the default chapters.
///
/// Destructive: nothing happens unless the caller obtained confirmation.
pub fn run(chapters: &mut Vec<Chapter>, confirmed: bool) -> CmdResult {
    if !confirmed {
        return CmdResult::unchanged().with_message(CmdMessage::info("Reset cancelled."));
    }

    *chapters = default_chapters();
    CmdResult::changed().with_message(CmdMessage::success("✓ Reset to defaults"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, delete, notes, toggle};
    use crate::model::ChapterDraft;

    #[test]
    fn restores_defaults_after_any_edits() {
        let mut chapters = default_chapters();
        delete::run(&mut chapters, 1);
        delete::run(&mut chapters, 7);
        toggle::run(&mut chapters, 2);
        notes::update(&mut chapters, 3, "x");
        add::run(&mut chapters, &mut ChapterDraft::new("Custom"));

        let res = run(&mut chapters, true);
        assert!(res.changed);
        assert_eq!(chapters, default_chapters());
    }

    #[test]
    fn restores_defaults_from_empty() {
        let mut chapters = Vec::new();
        run(&mut chapters, true);
        assert_eq!(chapters.len(), 12);
    }

    #[test]
    fn unconfirmed_reset_keeps_everything() {
        let mut chapters = default_chapters();
        delete::run(&mut chapters, 1);
        let res = run(&mut chapters, false);
        assert!(!res.changed);
        assert_eq!(chapters.len(), 11);
    }
}
