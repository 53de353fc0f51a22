//! Note service — the canonical sticky-note store.
//!
//! DESIGN
//! ======
//! Every mutation is a single-row statement with `RETURNING`, so the caller
//! always gets the stored note back. Concurrent writes to the same note are
//! last-write-wins by arrival; repeating a write is harmless.

#[cfg(test)]
#[path = "note_test.rs"]
mod note_test;

use board::note::{NewNote, Note, NoteId, ValidationError, validate_new_note};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("position must be finite, got ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

type NoteRow = (i64, String, String, f64, f64, Option<i64>, OffsetDateTime);

const NOTE_COLUMNS: &str = "id, content, color, position_x, position_y, z_index, created_at";

fn to_note(row: NoteRow) -> Note {
    let (id, content, color, position_x, position_y, z_index, created_at) = row;
    Note { id, content, color, position_x, position_y, z_index, created_at }
}

fn check_position(x: f64, y: f64) -> Result<(), NoteError> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err(NoteError::InvalidPosition { x, y })
    }
}

/// Validate a create request and resolve its starting position.
///
/// # Errors
///
/// Returns `Invalid` for blank, oversized or off-palette input, and
/// `InvalidPosition` for a non-finite coordinate.
pub fn prepare_new_note(note: &NewNote) -> Result<(f64, f64), NoteError> {
    validate_new_note(&note.content, &note.color)?;
    let x = note.position_x.unwrap_or(0.0);
    let y = note.position_y.unwrap_or(0.0);
    check_position(x, y)?;
    Ok((x, y))
}

// =============================================================================
// QUERIES
// =============================================================================

/// All notes, newest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_notes(pool: &PgPool) -> Result<Vec<Note>, NoteError> {
    let rows = sqlx::query_as::<_, NoteRow>(&format!(
        "SELECT {NOTE_COLUMNS} FROM sticky_notes ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(to_note).collect())
}

/// Insert a note. The store assigns `id` and `created_at`.
///
/// # Errors
///
/// Returns a validation error before touching the database, or a database
/// error if the insert fails.
pub async fn create_note(pool: &PgPool, note: &NewNote) -> Result<Note, NoteError> {
    let (x, y) = prepare_new_note(note)?;

    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "INSERT INTO sticky_notes (content, color, position_x, position_y)
         VALUES ($1, $2, $3, $4)
         RETURNING {NOTE_COLUMNS}"
    ))
    .bind(&note.content)
    .bind(&note.color)
    .bind(x)
    .bind(y)
    .fetch_one(pool)
    .await?;

    let created = to_note(row);
    info!(id = created.id, color = %created.color, "note created");
    Ok(created)
}

/// Overwrite a note's position.
///
/// # Errors
///
/// Returns `NotFound` if no row has `id`, `InvalidPosition` for non-finite
/// input, or a database error.
pub async fn update_position(pool: &PgPool, id: NoteId, x: f64, y: f64) -> Result<Note, NoteError> {
    check_position(x, y)?;

    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "UPDATE sticky_notes SET position_x = $2, position_y = $3 WHERE id = $1 RETURNING {NOTE_COLUMNS}"
    ))
    .bind(id)
    .bind(x)
    .bind(y)
    .fetch_optional(pool)
    .await?
    .ok_or(NoteError::NotFound(id))?;

    Ok(to_note(row))
}

/// Overwrite a note's stacking index.
///
/// # Errors
///
/// Returns `NotFound` if no row has `id`, or a database error.
pub async fn update_z_index(pool: &PgPool, id: NoteId, z_index: i64) -> Result<Note, NoteError> {
    let row = sqlx::query_as::<_, NoteRow>(&format!(
        "UPDATE sticky_notes SET z_index = $2 WHERE id = $1 RETURNING {NOTE_COLUMNS}"
    ))
    .bind(id)
    .bind(z_index)
    .fetch_optional(pool)
    .await?
    .ok_or(NoteError::NotFound(id))?;

    Ok(to_note(row))
}
