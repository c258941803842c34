//! Layout Selector — single-column vs two-column page layout.

use crate::render::sections::SectionPresence;

/// Resumes with more than this many present sections split into two columns;
/// sparse resumes render full-width to avoid a ragged half-empty page.
/// Fixed design constant, not configurable.
pub const TWO_COLUMN_THRESHOLD: usize = 4;

pub fn two_column(presence: SectionPresence) -> bool {
    presence.count() > TWO_COLUMN_THRESHOLD
}
