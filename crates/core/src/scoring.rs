//! Scoring module - points awarded for clearing rows
//!
//! A commit that clears `n` rows scores `LINE_SCORES[n]`. There are no levels,
//! combos or drop bonuses: the score depends only on how many rows each commit
//! removed.

use crate::types::LINE_SCORES;

/// Points for clearing `rows` rows with a single commit
///
/// A four-cell piece can complete at most four rows, but a board that was
/// narrowed by a resize may already hold complete rows; anything above four
/// scores like four.
pub fn points_for_rows(rows: usize) -> u32 {
    LINE_SCORES[rows.min(LINE_SCORES.len() - 1)]
}
