//! Sticky note routes.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use board::note::{NewNote, Note, NoteId};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::services::note::{self, NoteError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PositionBody {
    pub position_x: f64,
    pub position_y: f64,
}

#[derive(Deserialize)]
pub struct ZIndexBody {
    pub z_index: i64,
}

/// Failure envelope shared by every route.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

/// Error half of every handler result.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { success: false, message: self.message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: rejection.body_text() }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: rejection.body_text() }
    }
}

/// `Json` whose rejections answer with the failure envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Path` whose rejections answer with the failure envelope.
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Map a service error to status and client-facing message. Database
/// details are logged, never returned.
pub(crate) fn note_error_to_api(err: NoteError, context: &'static str) -> ApiError {
    match err {
        NoteError::NotFound(_) => ApiError { status: StatusCode::NOT_FOUND, message: "Note not found".into() },
        NoteError::Invalid(e) => ApiError { status: StatusCode::BAD_REQUEST, message: e.to_string() },
        e @ NoteError::InvalidPosition { .. } => ApiError { status: StatusCode::BAD_REQUEST, message: e.to_string() },
        NoteError::Database(e) => {
            error!(error = %e, context, "note query failed");
            ApiError { status: StatusCode::INTERNAL_SERVER_ERROR, message: context.into() }
        }
    }
}

/// `GET /api/notes` — all notes, newest first.
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = note::list_notes(&state.pool)
        .await
        .map_err(|e| note_error_to_api(e, "Failed to fetch sticky notes"))?;
    Ok(Json(notes))
}

/// `POST /api/notes` — create a note.
pub async fn create_note(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewNote>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = note::create_note(&state.pool, &body)
        .await
        .map_err(|e| note_error_to_api(e, "Failed to create sticky note"))?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// `PATCH /api/notes/:id/position` — move a note.
pub async fn update_position(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NoteId>,
    ApiJson(body): ApiJson<PositionBody>,
) -> Result<Json<Note>, ApiError> {
    let note = note::update_position(&state.pool, id, body.position_x, body.position_y)
        .await
        .map_err(|e| note_error_to_api(e, "Failed to update note position"))?;
    Ok(Json(note))
}

/// `PATCH /api/notes/:id/z-index` — restack a note.
pub async fn update_z_index(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<NoteId>,
    ApiJson(body): ApiJson<ZIndexBody>,
) -> Result<Json<Note>, ApiError> {
    let note = note::update_z_index(&state.pool, id, body.z_index)
        .await
        .map_err(|e| note_error_to_api(e, "Failed to update note z-index"))?;
    Ok(Json(note))
}
