//! # Command Layer
//!
//! One module per tracker operation. Mutations take the chapter list by
//! `&mut Vec<Chapter>`, change it in place, and report what happened in a
//! [`CmdResult`]. They never touch storage: persisting the new list is a
//! separate step (`load`/`save`) so the list logic is testable without a store.

use crate::model::Chapter;

pub mod add;
pub mod delete;
pub mod export;
pub mod helpers;
pub mod import;
pub mod load;
pub mod notes;
pub mod reset;
pub mod save;
pub mod toggle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Whether the chapter list differs from before the command ran.
    pub changed: bool,
    pub affected_chapters: Vec<Chapter>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed() -> Self {
        Self {
            changed: true,
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_chapters(mut self, chapters: Vec<Chapter>) -> Self {
        self.affected_chapters = chapters;
        self
    }

    /// The message a status line would show: the last one reported.
    pub fn last_message(&self) -> Option<&CmdMessage> {
        self.messages.last()
    }

    /// Folds a follow-up result (usually a save) into this one.
    pub fn merge(&mut self, other: CmdResult) {
        self.changed |= other.changed;
        self.affected_chapters.extend(other.affected_chapters);
        self.messages.extend(other.messages);
    }
}
