//! Input model: pointer events and the gesture state machine states.
//!
//! Mouse and touch feed the same events. A touch gesture is driven by the
//! first touch point only; any other pointer that goes down while a gesture
//! is active is ignored until the gesture ends. `InteractionMode` is the
//! active gesture tracked between pointer-down and pointer-up, carrying the
//! context needed to apply incremental pans or absolute drags and to decide
//! on release whether the gesture was a click.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::CLICK_THRESHOLD_PX;
use crate::note::NoteKey;
use crate::viewport::Point;

/// Which physical pointer produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// The mouse (or pen).
    Mouse,
    /// A touch point, by the identifier the platform assigns it.
    Touch(u32),
}

/// A pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub pointer: Pointer,
    pub screen: Point,
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { pointer: Pointer::Mouse, screen: Point::new(x, y) }
    }

    #[must_use]
    pub fn touch(id: u32, x: f64, y: f64) -> Self {
        Self { pointer: Pointer::Touch(id), screen: Point::new(x, y) }
    }
}

/// Whether a press/release pair with total `travel` counts as a click.
#[must_use]
pub fn is_click(travel: Point) -> bool {
    travel.within(CLICK_THRESHOLD_PX)
}

/// The gesture in progress. One per board session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionMode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Dragging the board. Started on empty board or escalated from a press
    /// on an unselected note that travelled past the click threshold.
    PanningBoard {
        pointer: Pointer,
        /// Screen position at pointer-down.
        origin: Point,
        /// Screen position of the previous event; pans apply the delta from here.
        last_screen: Point,
    },
    /// Pressed on an unselected note. Pans like `PanningBoard`, but a release
    /// within the click threshold toggles the note's selection.
    AwaitingClickOrDrag {
        note: NoteKey,
        pointer: Pointer,
        origin: Point,
        last_screen: Point,
    },
    /// Moving a selected note. Position is always `initial + (pointer - origin)`.
    DraggingNote {
        note: NoteKey,
        pointer: Pointer,
        origin: Point,
        /// Board-space note position at pointer-down.
        initial: Point,
        /// Set once the pointer has left the click threshold.
        moved: bool,
    },
}

impl InteractionMode {
    /// The pointer driving the current gesture.
    #[must_use]
    pub fn pointer(&self) -> Option<Pointer> {
        match *self {
            Self::Idle => None,
            Self::PanningBoard { pointer, .. }
            | Self::AwaitingClickOrDrag { pointer, .. }
            | Self::DraggingNote { pointer, .. } => Some(pointer),
        }
    }

    /// The note being dragged, if any.
    #[must_use]
    pub fn dragging_note(&self) -> Option<NoteKey> {
        match *self {
            Self::DraggingNote { note, .. } => Some(note),
            _ => None,
        }
    }

    /// Screen position where the current gesture started.
    #[must_use]
    pub fn gesture_origin(&self) -> Option<Point> {
        match *self {
            Self::Idle => None,
            Self::PanningBoard { origin, .. }
            | Self::AwaitingClickOrDrag { origin, .. }
            | Self::DraggingNote { origin, .. } => Some(origin),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
