//! Note model: the wire record, the per-note view state, and the store that
//! owns every note the client currently knows about.
//!
//! Data flows into this layer from the Note Store (initial list, create
//! confirmations) and from the interaction engine (position, stacking and
//! selection changes). All mutation is synchronous and last-write-wins; the
//! store never holds more than one selected note.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::consts::{COLORS, MAX_CONTENT_CHARS, MAX_ROTATION_DEG, NOTE_HEIGHT, NOTE_WIDTH};
use crate::viewport::Point;

/// Server-assigned note identifier.
pub type NoteId = i64;

/// Client-local handle for a note. Assigned once and never changed, so it
/// stays valid while an optimistic create is still waiting for its `NoteId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteKey(pub u64);

/// A note as persisted by the Note Store and sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub color: String,
    pub position_x: f64,
    pub position_y: f64,
    /// Stacking order, when the deployment persists it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Create request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub content: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_y: Option<f64>,
}

/// Local input validation failures. Rejected before any state changes or
/// network calls happen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("note content cannot be empty")]
    EmptyContent,
    #[error("note content is {len} characters; the limit is {max}")]
    ContentTooLong { len: usize, max: usize },
    #[error("unknown note color: {0}")]
    UnknownColor(String),
}

/// Check content and color for a new note.
///
/// # Errors
///
/// Returns the first rule the input breaks: blank content, content longer
/// than [`MAX_CONTENT_CHARS`], or a color outside the palette.
pub fn validate_new_note(content: &str, color: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong { len, max: MAX_CONTENT_CHARS });
    }
    if !COLORS.contains(&color) {
        return Err(ValidationError::UnknownColor(color.to_owned()));
    }
    Ok(())
}

/// Mutable view state for one note.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteView {
    pub key: NoteKey,
    /// `None` until the server confirms an optimistic create.
    pub id: Option<NoteId>,
    pub content: String,
    pub color: String,
    /// Top-left corner in board space.
    pub position: Point,
    pub z_index: i64,
    /// Cosmetic tilt in degrees.
    pub rotation: f64,
    pub selected: bool,
    pub dragging: bool,
    pub created_at: Option<OffsetDateTime>,
}

impl NoteView {
    /// Whether `board_pt` falls inside this note's rectangle.
    #[must_use]
    pub fn contains(&self, board_pt: Point) -> bool {
        board_pt.x >= self.position.x
            && board_pt.x <= self.position.x + NOTE_WIDTH
            && board_pt.y >= self.position.y
            && board_pt.y <= self.position.y + NOTE_HEIGHT
    }

    /// Center of the note rectangle in board space.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.position.x + NOTE_WIDTH / 2.0, self.position.y + NOTE_HEIGHT / 2.0)
    }
}

/// Deterministic cosmetic tilt for a key, in whole degrees.
#[must_use]
pub fn rotation_for(key: NoteKey) -> f64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let span = (MAX_ROTATION_DEG as u64) * 2 + 1;
    #[allow(clippy::cast_precision_loss)]
    let step = (key.0.wrapping_mul(37) % span) as f64;
    step - MAX_ROTATION_DEG
}

/// In-memory store of note view state, keyed by [`NoteKey`].
#[derive(Debug, Default)]
pub struct NoteDoc {
    notes: HashMap<NoteKey, NoteView>,
    next_key: u64,
}

impl NoteDoc {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_key(&mut self) -> NoteKey {
        self.next_key += 1;
        NoteKey(self.next_key)
    }

    /// Insert a persisted note, or overwrite the one already holding its id.
    ///
    /// Overwriting replaces content, color, position and timestamp; the local
    /// key, stacking index and selection are kept.
    pub fn upsert(&mut self, note: &Note) -> NoteKey {
        let position = Point::new(note.position_x, note.position_y);
        if let Some(key) = self.key_for_id(note.id) {
            if let Some(view) = self.notes.get_mut(&key) {
                view.content.clone_from(&note.content);
                view.color.clone_from(&note.color);
                view.position = position;
                view.created_at = Some(note.created_at);
            }
            return key;
        }

        let key = self.allocate_key();
        self.notes.insert(
            key,
            NoteView {
                key,
                id: Some(note.id),
                content: note.content.clone(),
                color: note.color.clone(),
                position,
                z_index: note.z_index.unwrap_or(0),
                rotation: rotation_for(key),
                selected: false,
                dragging: false,
                created_at: Some(note.created_at),
            },
        );
        key
    }

    /// Insert an optimistic note that has no server id yet.
    pub fn insert_pending(&mut self, content: &str, color: &str, position: Point) -> NoteKey {
        let key = self.allocate_key();
        self.notes.insert(
            key,
            NoteView {
                key,
                id: None,
                content: content.to_owned(),
                color: color.to_owned(),
                position,
                z_index: 0,
                rotation: rotation_for(key),
                selected: false,
                dragging: false,
                created_at: None,
            },
        );
        key
    }

    /// Attach the server-assigned id and timestamp to an optimistic note.
    /// Local position, stacking and selection stay as they are.
    pub fn confirm(&mut self, key: NoteKey, note: &Note) -> bool {
        let Some(view) = self.notes.get_mut(&key) else {
            return false;
        };
        view.id = Some(note.id);
        view.created_at = Some(note.created_at);
        view.content.clone_from(&note.content);
        view.color.clone_from(&note.color);
        true
    }

    /// Overwrite a note's position. No bounds checking.
    pub fn set_position(&mut self, key: NoteKey, position: Point) -> bool {
        let Some(view) = self.notes.get_mut(&key) else {
            return false;
        };
        view.position = position;
        true
    }

    /// Overwrite a note's stacking index.
    pub fn set_z_index(&mut self, key: NoteKey, z_index: i64) -> bool {
        let Some(view) = self.notes.get_mut(&key) else {
            return false;
        };
        view.z_index = z_index;
        true
    }

    /// Set or clear a note's selection. Selecting one note clears every other
    /// note's selection in the same call.
    pub fn set_selected(&mut self, key: NoteKey, selected: bool) -> bool {
        if !self.notes.contains_key(&key) {
            return false;
        }
        for view in self.notes.values_mut() {
            if view.key == key {
                view.selected = selected;
            } else if selected {
                view.selected = false;
            }
        }
        true
    }

    /// Set a note's dragging flag.
    pub fn set_dragging(&mut self, key: NoteKey, dragging: bool) -> bool {
        let Some(view) = self.notes.get_mut(&key) else {
            return false;
        };
        view.dragging = dragging;
        true
    }

    /// The selected note, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NoteKey> {
        self.notes.values().find(|v| v.selected).map(|v| v.key)
    }

    /// Look up a note by key.
    #[must_use]
    pub fn get(&self, key: NoteKey) -> Option<&NoteView> {
        self.notes.get(&key)
    }

    /// Find the local key for a server id.
    #[must_use]
    pub fn key_for_id(&self, id: NoteId) -> Option<NoteKey> {
        self.notes.values().find(|v| v.id == Some(id)).map(|v| v.key)
    }

    /// All notes sorted by `(z_index, key)`, i.e. back-to-front draw order.
    #[must_use]
    pub fn sorted(&self) -> Vec<&NoteView> {
        let mut views: Vec<&NoteView> = self.notes.values().collect();
        views.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.key.cmp(&b.key)));
        views
    }

    /// Center of the bounding box around all notes, or `None` when empty.
    #[must_use]
    pub fn cluster_center(&self) -> Option<Point> {
        let mut views = self.notes.values();
        let first = views.next()?;
        let (mut min, mut max) = (first.position, first.position);
        for v in views {
            min = Point::new(min.x.min(v.position.x), min.y.min(v.position.y));
            max = Point::new(max.x.max(v.position.x), max.y.max(v.position.y));
        }
        Some(Point::new((min.x + max.x + NOTE_WIDTH) / 2.0, (min.y + max.y + NOTE_HEIGHT) / 2.0))
    }

    /// Number of notes in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns `true` if the store holds no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Drop every note.
    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
