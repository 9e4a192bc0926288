use serde::{Deserialize, Serialize};
use std::fmt;

/// A chapter number as the user typed it.
///
/// Stored documents hold either a JSON number (the seeded chapters) or a
/// string (chapters added by hand), and both must survive a round trip
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterNumber {
    Int(i64),
    Text(String),
}

impl Default for ChapterNumber {
    fn default() -> Self {
        ChapterNumber::Text(String::new())
    }
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterNumber::Int(n) => write!(f, "{}", n),
            ChapterNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u64,
    #[serde(default)]
    pub number: ChapterNumber,
    pub title: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
    // UI flag, but persisted with the record so exported files keep it
    #[serde(default)]
    pub editing: bool,
}

impl Chapter {
    pub fn new(id: u64, number: ChapterNumber, title: String, pages: String) -> Self {
        Self {
            id,
            number,
            title,
            pages,
            completed: false,
            notes: String::new(),
            editing: false,
        }
    }
}

/// The "add chapter" form. Blank fields count as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterDraft {
    pub number: String,
    pub title: String,
    pub pages: String,
}

impl ChapterDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = pages.into();
        self
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn of(chapters: &[Chapter]) -> Self {
        let total = chapters.len();
        let completed = chapters.iter().filter(|ch| ch.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }
}

const TABLE_OF_CONTENTS: [(&str, &str); 12] = [
    ("Introduction", "1-30"),
    ("Fundamentals", "31-80"),
    ("Power Transformers", "81-140"),
    ("Transmission Line Parameters", "141-200"),
    ("Transmission Lines: Steady-State Operation", "201-260"),
    ("Power Flows", "261-320"),
    ("Symmetrical Faults", "321-380"),
    ("Symmetrical Components", "381-440"),
    ("Unsymmetrical Faults", "441-500"),
    ("System Protection", "501-560"),
    ("Transient Stability", "561-620"),
    ("Power System Controls", "621-680"),
];

/// The seeded chapter list: the textbook's table of contents, nothing read yet.
pub fn default_chapters() -> Vec<Chapter> {
    TABLE_OF_CONTENTS
        .iter()
        .enumerate()
        .map(|(i, (title, pages))| {
            let n = i as u64 + 1;
            Chapter::new(
                n,
                ChapterNumber::Int(n as i64),
                title.to_string(),
                pages.to_string(),
            )
        })
        .collect()
}
