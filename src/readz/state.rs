//! In-memory tracker state: the chapter list plus the transient bits a UI
//! needs around it (the add-chapter draft, the status line, the loading flag).

use crate::commands::{CmdMessage, CmdResult, MessageLevel};
use crate::model::{Chapter, ChapterDraft};
use chrono::{DateTime, Duration, Utc};

/// A status line that disappears on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub content: String,
    pub expires_at: DateTime<Utc>,
}

impl StatusMessage {
    pub fn new(message: &CmdMessage, now: DateTime<Utc>, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::zero());
        Self {
            level: message.level,
            content: message.content.clone(),
            expires_at: now + ttl,
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// How long a status line stays up, per message level.
#[derive(Debug, Clone, Copy)]
pub struct StatusTtl {
    pub normal: std::time::Duration,
    pub warning: std::time::Duration,
}

impl StatusTtl {
    fn for_level(&self, level: MessageLevel) -> std::time::Duration {
        match level {
            MessageLevel::Warning => self.warning,
            MessageLevel::Info | MessageLevel::Success => self.normal,
        }
    }
}

#[derive(Debug)]
pub struct TrackerState {
    chapters: Vec<Chapter>,
    draft: ChapterDraft,
    status: Option<StatusMessage>,
    loading: bool,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerState {
    /// A fresh state is empty and loading until the first load finishes.
    pub fn new() -> Self {
        Self {
            chapters: Vec::new(),
            draft: ChapterDraft::default(),
            status: None,
            loading: true,
        }
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapters_mut(&mut self) -> &mut Vec<Chapter> {
        &mut self.chapters
    }

    pub fn draft(&self) -> &ChapterDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ChapterDraft {
        &mut self.draft
    }

    /// The chapter list and the draft, borrowed together for `add`.
    pub fn chapters_and_draft(&mut self) -> (&mut Vec<Chapter>, &mut ChapterDraft) {
        (&mut self.chapters, &mut self.draft)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn finish_loading(&mut self, chapters: Vec<Chapter>) {
        self.chapters = chapters;
        self.loading = false;
    }

    /// Whether the current list should be written out at all.
    pub fn is_persistable(&self) -> bool {
        !self.loading && !self.chapters.is_empty()
    }

    /// Shows the last message of `result`, if it has one.
    pub fn post(&mut self, result: &CmdResult, now: DateTime<Utc>, ttl: StatusTtl) {
        if let Some(message) = result.last_message() {
            self.status = Some(StatusMessage::new(message, now, ttl.for_level(message.level)));
        }
    }

    /// The status line, if it has not expired yet.
    pub fn status(&self, now: DateTime<Utc>) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| s.is_active(now))
    }

    pub fn clear_expired_status(&mut self, now: DateTime<Utc>) {
        if self.status.as_ref().is_some_and(|s| !s.is_active(now)) {
            self.status = None;
        }
    }
}
