use crate::error::{ReadzError, Result};
use crate::model::Chapter;

pub fn find_mut(chapters: &mut [Chapter], id: u64) -> Option<&mut Chapter> {
    chapters.iter_mut().find(|ch| ch.id == id)
}

pub fn require(chapters: &[Chapter], id: u64) -> Result<&Chapter> {
    chapters
        .iter()
        .find(|ch| ch.id == id)
        .ok_or(ReadzError::ChapterNotFound(id))
}

/// One past the largest id in use, never below 1. `None` once `u64::MAX`
/// is taken, which only an imported list can reach.
pub fn next_id(chapters: &[Chapter]) -> Option<u64> {
    chapters.iter().map(|ch| ch.id).max().unwrap_or(0).checked_add(1)
}
