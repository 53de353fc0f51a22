use super::*;
use board::note::ValidationError;

#[test]
fn not_found_maps_to_404() {
    let err = note_error_to_api(NoteError::NotFound(7), "ctx");
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.message, "Note not found");
}

#[test]
fn validation_maps_to_400_with_reason() {
    let err = note_error_to_api(NoteError::Invalid(ValidationError::EmptyContent), "ctx");
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.message, "note content cannot be empty");
}

#[test]
fn bad_position_maps_to_400() {
    let err = note_error_to_api(NoteError::InvalidPosition { x: f64::INFINITY, y: 0.0 }, "ctx");
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
}

#[test]
fn database_error_hides_details() {
    let err = note_error_to_api(NoteError::Database(sqlx::Error::PoolTimedOut), "Failed to fetch sticky notes");
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, "Failed to fetch sticky notes");
}
