//! Note Store contract consumed by the sync client.

use board::note::{NewNote, Note, NoteId};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error("rejected by note store: {0}")]
    Rejected(String),
    #[error("note store returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Canonical note persistence. Last write wins by arrival order.
#[async_trait::async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest first by `created_at`.
    ///
    /// # Errors
    ///
    /// Returns a transport or storage error.
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError>;

    /// Persist a new note; the store assigns `id` and `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the content or color fails validation.
    async fn create_note(&self, note: &NewNote) -> Result<Note, StoreError>;

    /// Overwrite a note's position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no note has this id.
    async fn update_position(&self, id: NoteId, x: f64, y: f64) -> Result<Note, StoreError>;

    /// Overwrite a note's stacking index.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no note has this id.
    async fn update_z_index(&self, id: NoteId, z_index: i64) -> Result<Note, StoreError>;
}
