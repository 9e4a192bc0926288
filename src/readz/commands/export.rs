use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Chapter;

/// A serialized copy of the chapter list, ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    pub filename: String,
    pub contents: String,
}

/// Serializes `chapters` as pretty-printed JSON. Does not modify the list.
pub fn run(chapters: &[Chapter], filename: &str) -> Result<(ExportSnapshot, CmdResult)> {
    let contents = serde_json::to_string_pretty(chapters)?;
    let snapshot = ExportSnapshot {
        filename: filename.to_string(),
        contents,
    };
    let result = CmdResult::unchanged().with_message(CmdMessage::success("✓ Exported"));
    Ok((snapshot, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, delete, import, notes, toggle};
    use crate::model::{default_chapters, ChapterDraft};

    #[test]
    fn output_is_indented_json_array() {
        let (snap, res) = run(&default_chapters(), "out.json").unwrap();
        assert_eq!(snap.filename, "out.json");
        assert!(snap.contents.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(!res.changed);
        assert_eq!(res.last_message().unwrap().content, "✓ Exported");
    }

    #[test]
    fn exported_bytes_import_to_the_same_list() {
        let mut chapters = default_chapters();
        toggle::run(&mut chapters, 2);
        delete::run(&mut chapters, 5);
        notes::update(&mut chapters, 6, "Newton-Raphson\n\"Gauss-Seidel\"");
        notes::toggle_edit(&mut chapters, 6);
        add::run(
            &mut chapters,
            &mut ChapterDraft::new("Extra").with_number("13b"),
        );
        add::run(&mut chapters, &mut ChapterDraft::new("Ünïcode ✓"));

        let (snap, _) = run(&chapters, "x.json").unwrap();

        let mut restored = default_chapters();
        let res = import::run(&mut restored, &snap.contents);
        assert!(res.changed);
        assert_eq!(restored, chapters);
    }
}
