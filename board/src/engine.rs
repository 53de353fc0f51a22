//! Board session: the single owner of all client-side board state.
//!
//! `BoardCore` holds the note store, viewport, stacking counter and the
//! active gesture, and is passed by reference to whatever drives it (a UI
//! event loop, a test). Every handler mutates local state synchronously and
//! returns the [`Action`]s the host must act on: persisting through the sync
//! client, or re-rendering. Completion of a network call only ever comes back
//! through [`BoardCore::confirm_created`] or [`BoardCore::show_error`], never
//! through the gesture handlers, so a slow request cannot disturb a drag.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::consts::{CREATE_CASCADE_STEP, CREATE_CASCADE_WRAP, NOTE_HEIGHT, NOTE_WIDTH};
use crate::hit::{Hit, hit_test};
use crate::input::{InteractionMode, PointerEvent, is_click};
use crate::note::{NewNote, Note, NoteDoc, NoteId, NoteKey, NoteView, ValidationError, validate_new_note};
use crate::viewport::{Point, Viewport};
use crate::zorder::ZOrder;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Persist a newly created note. `key` identifies the optimistic local copy.
    CreateNote { key: NoteKey, note: NewNote },
    /// Persist a completed drag. `id` is `None` while the create is in flight.
    UpdatePosition { key: NoteKey, id: Option<NoteId>, x: f64, y: f64 },
    /// Persist a stacking change.
    UpdateZIndex { key: NoteKey, id: Option<NoteId>, z_index: i64 },
    /// The selected note changed.
    SelectionChanged(Option<NoteKey>),
    /// Local state changed and the board should be redrawn.
    RenderNeeded,
}

/// Progress of the initial full load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// The load failed; the board shows this instead of an empty board.
    Failed(String),
}

/// Board session state.
#[derive(Debug, Default)]
pub struct BoardCore {
    pub doc: NoteDoc,
    pub viewport: Viewport,
    pub zorder: ZOrder,
    pub input: InteractionMode,
    status: LoadStatus,
    error: Option<String>,
    created: u64,
}

impl BoardCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Load ---

    /// Replace all notes with a store listing and center the viewport on them.
    pub fn load_snapshot(&mut self, notes: Vec<Note>) -> Vec<Action> {
        self.doc.clear();
        for note in &notes {
            self.doc.upsert(note);
        }
        self.zorder = ZOrder::default();
        self.zorder.assign_load_order(&mut self.doc);
        self.viewport.center_on(self.doc.cluster_center().unwrap_or_default());
        self.input = InteractionMode::Idle;
        self.status = LoadStatus::Ready;
        vec![Action::RenderNeeded]
    }

    /// Record a failed initial load.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed(message.into());
    }

    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    // --- Viewport ---

    /// Update viewport dimensions; keeps the virtual center in the middle.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        self.viewport.resize(width, height);
        vec![Action::RenderNeeded]
    }

    // --- Create ---

    /// Validate and optimistically add a note near the middle of the view.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] and leaves state untouched if the
    /// content is blank or too long, or the color is not in the palette.
    pub fn create_note(&mut self, content: &str, color: &str) -> Result<Vec<Action>, ValidationError> {
        validate_new_note(content, color)?;

        #[allow(clippy::cast_precision_loss)]
        let cascade = (self.created % CREATE_CASCADE_WRAP) as f64 * CREATE_CASCADE_STEP;
        self.created += 1;
        let center = self.viewport.visual_center();
        let position = Point::new(center.x - NOTE_WIDTH / 2.0 + cascade, center.y - NOTE_HEIGHT / 2.0 + cascade);

        let key = self.doc.insert_pending(content, color, position);

        let mut actions = vec![Action::CreateNote {
            key,
            note: NewNote {
                content: content.to_owned(),
                color: color.to_owned(),
                position_x: Some(position.x),
                position_y: Some(position.y),
            },
        }];
        // The store inserts without a stacking index; persist the raise
        // behind the create so the note stays on top after a reload.
        if let Some(z_index) = self.zorder.bring_to_front(&mut self.doc, key) {
            actions.push(Action::UpdateZIndex { key, id: None, z_index });
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Attach the server's id and timestamp to an optimistic note.
    pub fn confirm_created(&mut self, key: NoteKey, note: &Note) -> bool {
        self.doc.confirm(key, note)
    }

    // --- Error banner ---

    /// Show a transient, dismissable error.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, ev: PointerEvent) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }

        let board_pt = self.viewport.screen_to_board(ev.screen);
        self.input = match hit_test(board_pt, &self.doc) {
            Hit::Note(note) => match self.doc.get(note).filter(|v| v.selected).map(|v| v.position) {
                Some(initial) => {
                    self.doc.set_dragging(note, true);
                    InteractionMode::DraggingNote { note, pointer: ev.pointer, origin: ev.screen, initial, moved: false }
                }
                None => InteractionMode::AwaitingClickOrDrag {
                    note,
                    pointer: ev.pointer,
                    origin: ev.screen,
                    last_screen: ev.screen,
                },
            },
            Hit::Board => {
                InteractionMode::PanningBoard { pointer: ev.pointer, origin: ev.screen, last_screen: ev.screen }
            }
        };
        Vec::new()
    }

    pub fn on_pointer_move(&mut self, ev: PointerEvent) -> Vec<Action> {
        if self.input.pointer() != Some(ev.pointer) {
            return Vec::new();
        }

        match self.input {
            InteractionMode::Idle => Vec::new(),
            InteractionMode::PanningBoard { pointer, origin, last_screen } => {
                self.viewport.pan(ev.screen - last_screen);
                self.input = InteractionMode::PanningBoard { pointer, origin, last_screen: ev.screen };
                vec![Action::RenderNeeded]
            }
            InteractionMode::AwaitingClickOrDrag { note, pointer, origin, last_screen } => {
                self.viewport.pan(ev.screen - last_screen);
                self.input = if is_click(ev.screen - origin) {
                    InteractionMode::AwaitingClickOrDrag { note, pointer, origin, last_screen: ev.screen }
                } else {
                    InteractionMode::PanningBoard { pointer, origin, last_screen: ev.screen }
                };
                vec![Action::RenderNeeded]
            }
            InteractionMode::DraggingNote { note, pointer, origin, initial, moved } => {
                let moved = moved || !is_click(ev.screen - origin);
                let position = self.drag_position(initial, origin, ev.screen);
                self.doc.set_position(note, position);
                self.input = InteractionMode::DraggingNote { note, pointer, origin, initial, moved };
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, ev: PointerEvent) -> Vec<Action> {
        self.finish_gesture(ev, true)
    }

    /// Platform cancelled the pointer. Ends the gesture like pointer-up, but
    /// never resolves it as a click.
    pub fn on_pointer_cancel(&mut self, ev: PointerEvent) -> Vec<Action> {
        self.finish_gesture(ev, false)
    }

    fn finish_gesture(&mut self, ev: PointerEvent, allow_click: bool) -> Vec<Action> {
        if self.input.pointer() != Some(ev.pointer) {
            return Vec::new();
        }

        match std::mem::take(&mut self.input) {
            InteractionMode::Idle => Vec::new(),
            InteractionMode::PanningBoard { last_screen, .. } => {
                self.viewport.pan(ev.screen - last_screen);
                vec![Action::RenderNeeded]
            }
            InteractionMode::AwaitingClickOrDrag { note, origin, last_screen, .. } => {
                self.viewport.pan(ev.screen - last_screen);
                let mut actions = vec![Action::RenderNeeded];
                if allow_click && is_click(ev.screen - origin) {
                    actions.extend(self.toggle_selection(note));
                }
                actions
            }
            InteractionMode::DraggingNote { note, origin, initial, moved, .. } => {
                self.doc.set_dragging(note, false);
                if !moved && is_click(ev.screen - origin) {
                    // Released in place: a click on the selected note, not a move.
                    self.doc.set_position(note, initial);
                    let mut actions = vec![Action::RenderNeeded];
                    if allow_click {
                        actions.extend(self.toggle_selection(note));
                    }
                    return actions;
                }

                let position = self.drag_position(initial, origin, ev.screen);
                self.doc.set_position(note, position);
                let id = self.doc.get(note).and_then(|v| v.id);
                vec![Action::UpdatePosition { key: note, id, x: position.x, y: position.y }, Action::RenderNeeded]
            }
        }
    }

    fn drag_position(&self, initial: Point, origin: Point, screen: Point) -> Point {
        initial + self.viewport.screen_delta_to_board(screen - origin)
    }

    /// Flip a note's selection. Selecting also raises it to the front.
    fn toggle_selection(&mut self, note: NoteKey) -> Vec<Action> {
        let Some(selected) = self.doc.get(note).map(|v| !v.selected) else {
            return Vec::new();
        };
        self.doc.set_selected(note, selected);
        let mut actions = vec![Action::SelectionChanged(self.doc.selected())];
        if selected {
            if let Some(z_index) = self.zorder.bring_to_front(&mut self.doc, note) {
                let id = self.doc.get(note).and_then(|v| v.id);
                actions.push(Action::UpdateZIndex { key: note, id, z_index });
            }
        }
        actions
    }

    // --- Queries ---

    /// The currently selected note, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NoteKey> {
        self.doc.selected()
    }

    /// Look up a note by key.
    #[must_use]
    pub fn note(&self, key: NoteKey) -> Option<&NoteView> {
        self.doc.get(key)
    }

    /// Notes in back-to-front draw order.
    #[must_use]
    pub fn notes(&self) -> Vec<&NoteView> {
        self.doc.sorted()
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
