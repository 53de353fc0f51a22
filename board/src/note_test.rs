#![allow(clippy::float_cmp)]

use time::macros::datetime;

use super::*;

fn wire_note(id: NoteId, x: f64, y: f64) -> Note {
    Note {
        id,
        content: format!("note {id}"),
        color: "#ffadad".into(),
        position_x: x,
        position_y: y,
        z_index: None,
        created_at: datetime!(2024-05-01 12:00 UTC),
    }
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn note_deserializes_from_server_json() {
    let json = r##"{"id":7,"content":"hello","color":"#ffadad","position_x":10.5,"position_y":-4,"created_at":"2024-05-01T12:00:00.000Z"}"##;
    let note: Note = serde_json::from_str(json).unwrap();
    assert_eq!(note.id, 7);
    assert_eq!(note.content, "hello");
    assert_eq!(note.position_x, 10.5);
    assert_eq!(note.position_y, -4.0);
    assert_eq!(note.z_index, None);
    assert_eq!(note.created_at, datetime!(2024-05-01 12:00 UTC));
}

#[test]
fn note_serializes_created_at_as_rfc3339() {
    let value = serde_json::to_value(wire_note(1, 0.0, 0.0)).unwrap();
    assert_eq!(value["created_at"], "2024-05-01T12:00:00Z");
    assert!(value.get("z_index").is_none());
}

#[test]
fn new_note_omits_missing_position() {
    let body = NewNote { content: "x".into(), color: "#caffbf".into(), position_x: None, position_y: None };
    let value = serde_json::to_value(&body).unwrap();
    assert_eq!(value, serde_json::json!({"content": "x", "color": "#caffbf"}));
}

// =============================================================
// Upsert
// =============================================================

#[test]
fn upsert_inserts_new_note() {
    let mut doc = NoteDoc::new();
    let key = doc.upsert(&wire_note(1, 5.0, 6.0));
    let view = doc.get(key).unwrap();
    assert_eq!(view.id, Some(1));
    assert_eq!(view.position, Point::new(5.0, 6.0));
    assert!(!view.selected);
    assert!(!view.dragging);
    assert_eq!(doc.len(), 1);
}

#[test]
fn upsert_overwrites_by_id_and_keeps_key() {
    let mut doc = NoteDoc::new();
    let key = doc.upsert(&wire_note(1, 5.0, 6.0));
    doc.set_selected(key, true);
    let mut changed = wire_note(1, 50.0, 60.0);
    changed.content = "edited".into();
    let again = doc.upsert(&changed);
    assert_eq!(again, key);
    assert_eq!(doc.len(), 1);
    let view = doc.get(key).unwrap();
    assert_eq!(view.content, "edited");
    assert_eq!(view.position, Point::new(50.0, 60.0));
    assert!(view.selected);
}

#[test]
fn keys_are_never_reused() {
    let mut doc = NoteDoc::new();
    let a = doc.upsert(&wire_note(1, 0.0, 0.0));
    doc.clear();
    let b = doc.upsert(&wire_note(1, 0.0, 0.0));
    assert_ne!(a, b);
}

// =============================================================
// Pending / confirm
// =============================================================

#[test]
fn pending_note_has_no_id_until_confirmed() {
    let mut doc = NoteDoc::new();
    let key = doc.insert_pending("hello", "#ffadad", Point::new(1.0, 2.0));
    assert_eq!(doc.get(key).unwrap().id, None);

    doc.set_position(key, Point::new(9.0, 9.0));
    assert!(doc.confirm(key, &wire_note(42, 1.0, 2.0)));

    let view = doc.get(key).unwrap();
    assert_eq!(view.id, Some(42));
    assert!(view.created_at.is_some());
    // Local position wins over the create response.
    assert_eq!(view.position, Point::new(9.0, 9.0));
    assert_eq!(doc.key_for_id(42), Some(key));
}

#[test]
fn confirm_unknown_key_is_rejected() {
    let mut doc = NoteDoc::new();
    assert!(!doc.confirm(NoteKey(99), &wire_note(1, 0.0, 0.0)));
}

// =============================================================
// Setters
// =============================================================

#[test]
fn set_position_allows_off_screen_values() {
    let mut doc = NoteDoc::new();
    let key = doc.upsert(&wire_note(1, 0.0, 0.0));
    assert!(doc.set_position(key, Point::new(-10_000.0, 1e9)));
    assert_eq!(doc.get(key).unwrap().position, Point::new(-10_000.0, 1e9));
}

#[test]
fn setters_report_missing_keys() {
    let mut doc = NoteDoc::new();
    assert!(!doc.set_position(NoteKey(1), Point::default()));
    assert!(!doc.set_z_index(NoteKey(1), 3));
    assert!(!doc.set_selected(NoteKey(1), true));
    assert!(!doc.set_dragging(NoteKey(1), true));
}

#[test]
fn selecting_one_note_deselects_the_other() {
    let mut doc = NoteDoc::new();
    let a = doc.upsert(&wire_note(1, 0.0, 0.0));
    let b = doc.upsert(&wire_note(2, 0.0, 0.0));
    doc.set_selected(a, true);
    assert_eq!(doc.selected(), Some(a));
    doc.set_selected(b, true);
    assert_eq!(doc.selected(), Some(b));
    assert!(!doc.get(a).unwrap().selected);
}

#[test]
fn deselecting_leaves_others_alone() {
    let mut doc = NoteDoc::new();
    let a = doc.upsert(&wire_note(1, 0.0, 0.0));
    let b = doc.upsert(&wire_note(2, 0.0, 0.0));
    doc.set_selected(a, true);
    doc.set_selected(b, false);
    assert_eq!(doc.selected(), Some(a));
}

// =============================================================
// Queries
// =============================================================

#[test]
fn sorted_orders_by_z_then_key() {
    let mut doc = NoteDoc::new();
    let a = doc.upsert(&wire_note(1, 0.0, 0.0));
    let b = doc.upsert(&wire_note(2, 0.0, 0.0));
    let c = doc.upsert(&wire_note(3, 0.0, 0.0));
    doc.set_z_index(a, 5);
    doc.set_z_index(b, 1);
    doc.set_z_index(c, 1);
    let order: Vec<NoteKey> = doc.sorted().iter().map(|v| v.key).collect();
    assert_eq!(order, vec![b, c, a]);
}

#[test]
fn cluster_center_spans_note_rectangles() {
    let mut doc = NoteDoc::new();
    assert_eq!(doc.cluster_center(), None);
    doc.upsert(&wire_note(1, 0.0, 0.0));
    doc.upsert(&wire_note(2, 400.0, 200.0));
    assert_eq!(doc.cluster_center(), Some(Point::new(300.0, 200.0)));
}

#[test]
fn contains_uses_note_rectangle() {
    let mut doc = NoteDoc::new();
    let key = doc.upsert(&wire_note(1, 100.0, 100.0));
    let view = doc.get(key).unwrap();
    assert!(view.contains(Point::new(100.0, 100.0)));
    assert!(view.contains(Point::new(300.0, 300.0)));
    assert!(!view.contains(Point::new(99.0, 150.0)));
    assert!(!view.contains(Point::new(150.0, 301.0)));
    assert_eq!(view.center(), Point::new(200.0, 200.0));
}

#[test]
fn rotation_stays_within_tilt_range() {
    for k in 0..50 {
        let r = rotation_for(NoteKey(k));
        assert!((-MAX_ROTATION_DEG..=MAX_ROTATION_DEG).contains(&r), "rotation {r} for key {k}");
        assert_eq!(r, rotation_for(NoteKey(k)));
    }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_accepts_palette_color_and_text() {
    assert_eq!(validate_new_note("hello", "#ffadad"), Ok(()));
}

#[test]
fn validate_rejects_blank_content() {
    assert_eq!(validate_new_note("", "#ffadad"), Err(ValidationError::EmptyContent));
    assert_eq!(validate_new_note("  \n\t", "#ffadad"), Err(ValidationError::EmptyContent));
}

#[test]
fn validate_limit_counts_characters_not_bytes() {
    let at_limit = "é".repeat(MAX_CONTENT_CHARS);
    assert_eq!(validate_new_note(&at_limit, "#ffadad"), Ok(()));

    let over = "x".repeat(MAX_CONTENT_CHARS + 1);
    assert_eq!(
        validate_new_note(&over, "#ffadad"),
        Err(ValidationError::ContentTooLong { len: MAX_CONTENT_CHARS + 1, max: MAX_CONTENT_CHARS })
    );
}

#[test]
fn validate_rejects_unknown_color() {
    assert_eq!(
        validate_new_note("hi", "yellow"),
        Err(ValidationError::UnknownColor("yellow".into()))
    );
}
