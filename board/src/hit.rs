#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::note::{NoteDoc, NoteKey};
use crate::viewport::Point;

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Empty board area.
    Board,
    /// A note body.
    Note(NoteKey),
}

/// Test which note (if any) is under `board_pt`. Overlapping notes resolve
/// to the one drawn on top.
#[must_use]
pub fn hit_test(board_pt: Point, doc: &NoteDoc) -> Hit {
    doc.sorted()
        .into_iter()
        .rev()
        .find(|view| view.contains(board_pt))
        .map_or(Hit::Board, |view| Hit::Note(view.key))
}
