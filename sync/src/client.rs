//! Fire-and-forget persistence of board actions.
//!
//! ORDERING
//! ========
//! Every note key owns one lane: an unbounded channel drained by a single
//! task. Commands for the same note are therefore sent in dispatch order,
//! and a lane that starts with a create holds later updates until the store
//! has assigned an id. Lanes for different notes run concurrently.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is retried and local state is never rolled back. Create failures
//! become `SyncEvent::CreateFailed` (the host shows a banner); update
//! failures are logged and reported as `SyncEvent::UpdateFailed` only.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use board::engine::{Action, BoardCore};
use board::note::{NewNote, Note, NoteId, NoteKey};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::store::{NoteStore, StoreError};

/// Message shown when an optimistic create could not be saved.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to add note. Please try again.";

/// Message shown when the initial load fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load sticky notes. Please try again later.";

#[derive(Debug, Clone, Copy)]
pub struct SyncConfig {
    /// Send stacking changes to the store. Deployments without a `z_index`
    /// column turn this off.
    pub persist_z_index: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { persist_z_index: true }
    }
}

/// Completion reports sent back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The store accepted a create and assigned an id.
    Created { key: NoteKey, note: Note },
    /// A create failed; the optimistic note stays on the board.
    CreateFailed { key: NoteKey, message: String },
    /// A position or z-index write failed. Local state stays authoritative.
    UpdateFailed { key: NoteKey, id: Option<NoteId>, message: String },
}

impl SyncEvent {
    /// Apply a completion to the board session. Only reconciles ids or sets
    /// the error banner; never touches the gesture state.
    pub fn apply(self, core: &mut BoardCore) {
        match self {
            Self::Created { key, note } => {
                if !core.confirm_created(key, &note) {
                    debug!(?key, id = note.id, "created note no longer on board");
                }
            }
            Self::CreateFailed { .. } => core.show_error(CREATE_FAILED_MESSAGE),
            Self::UpdateFailed { .. } => {}
        }
    }
}

#[derive(Debug)]
enum Command {
    Create(NewNote),
    Position { id: Option<NoteId>, x: f64, y: f64 },
    ZIndex { id: Option<NoteId>, z_index: i64 },
}

/// Fire-and-forget persistence for one board session.
///
/// Holds one lane (an open channel and its task) per note touched this
/// session, so memory is bounded by the number of notes on the board. Lanes
/// close when their task stops and on [`SyncClient::flush`].
pub struct SyncClient {
    store: Arc<dyn NoteStore>,
    config: SyncConfig,
    lanes: HashMap<NoteKey, mpsc::UnboundedSender<Command>>,
    tasks: Vec<JoinHandle<()>>,
    events: mpsc::UnboundedSender<SyncEvent>,
}

impl SyncClient {
    /// Create a client and the receiver its completion events arrive on.
    #[must_use]
    pub fn new(store: Arc<dyn NoteStore>, config: SyncConfig) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        (Self { store, config, lanes: HashMap::new(), tasks: Vec::new(), events }, rx)
    }

    /// Fetch the full note list for the initial board load.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged; a failed load is fatal for the board.
    pub async fn load(&self) -> Result<Vec<Note>, StoreError> {
        match self.store.list_notes().await {
            Ok(notes) => {
                info!(count = notes.len(), "loaded notes");
                Ok(notes)
            }
            Err(e) => {
                error!(error = %e, "initial note load failed");
                Err(e)
            }
        }
    }

    /// Load notes straight into a board session, recording failure on it.
    pub async fn load_into(&self, core: &mut BoardCore) -> Vec<Action> {
        match self.load().await {
            Ok(notes) => core.load_snapshot(notes),
            Err(_) => {
                core.load_failed(LOAD_FAILED_MESSAGE);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Queue the persistence work for one action. Never blocks.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&mut self, action: &Action) {
        let (key, command) = match action {
            Action::CreateNote { key, note } => (*key, Command::Create(note.clone())),
            Action::UpdatePosition { key, id, x, y } => (*key, Command::Position { id: *id, x: *x, y: *y }),
            Action::UpdateZIndex { key, id, z_index } => {
                if !self.config.persist_z_index {
                    return;
                }
                (*key, Command::ZIndex { id: *id, z_index: *z_index })
            }
            Action::SelectionChanged(_) | Action::RenderNeeded => return,
        };
        self.enqueue(key, command);
    }

    /// Number of open lanes, one per note touched since the last flush.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    /// Dispatch every action in order.
    pub fn dispatch_all(&mut self, actions: &[Action]) {
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Close all lanes and wait for queued work to finish.
    pub async fn flush(mut self) {
        self.lanes.clear();
        for task in self.tasks.drain(..) {
            if let Err(e) = task.await {
                error!(error = %e, "sync lane task failed");
            }
        }
    }

    fn enqueue(&mut self, key: NoteKey, command: Command) {
        self.tasks.retain(|task| !task.is_finished());
        self.lanes.retain(|_, lane| !lane.is_closed());

        let lane = match self.lanes.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let (tx, rx) = mpsc::unbounded_channel();
                let store = Arc::clone(&self.store);
                self.tasks.push(tokio::spawn(run_lane(store, key, rx, self.events.clone())));
                entry.insert(tx)
            }
        };

        if let Err(mpsc::error::SendError(command)) = lane.send(command) {
            error!(?key, ?command, "sync lane closed; dropping command");
            self.lanes.remove(&key);
        }
    }
}

/// Drain one note's commands in order.
async fn run_lane(
    store: Arc<dyn NoteStore>,
    key: NoteKey,
    mut rx: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SyncEvent>,
) {
    // Id learned from this lane's own create, for updates queued before it existed.
    let mut assigned: Option<NoteId> = None;

    while let Some(command) = rx.recv().await {
        match command {
            Command::Create(new_note) => match store.create_note(&new_note).await {
                Ok(note) => {
                    debug!(?key, id = note.id, "note created");
                    assigned = Some(note.id);
                    emit(&events, SyncEvent::Created { key, note });
                }
                Err(e) => {
                    warn!(?key, error = %e, "create note failed");
                    emit(&events, SyncEvent::CreateFailed { key, message: e.to_string() });
                }
            },
            Command::Position { id, x, y } => {
                let Some(id) = id.or(assigned) else {
                    warn!(?key, "dropping position update for a note that was never saved");
                    continue;
                };
                if let Err(e) = store.update_position(id, x, y).await {
                    warn!(?key, id, error = %e, "position update failed");
                    emit(&events, SyncEvent::UpdateFailed { key, id: Some(id), message: e.to_string() });
                }
            }
            Command::ZIndex { id, z_index } => {
                let Some(id) = id.or(assigned) else {
                    warn!(?key, "dropping z-index update for a note that was never saved");
                    continue;
                };
                if let Err(e) = store.update_z_index(id, z_index).await {
                    warn!(?key, id, error = %e, "z-index update failed");
                    emit(&events, SyncEvent::UpdateFailed { key, id: Some(id), message: e.to_string() });
                }
            }
        }
    }
}

fn emit(events: &mpsc::UnboundedSender<SyncEvent>, event: SyncEvent) {
    if events.send(event).is_err() {
        debug!("sync event receiver dropped");
    }
}
