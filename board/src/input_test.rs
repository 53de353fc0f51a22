use super::*;

#[test]
fn default_mode_is_idle() {
    let mode = InteractionMode::default();
    assert!(mode.is_idle());
    assert_eq!(mode.pointer(), None);
    assert_eq!(mode.dragging_note(), None);
    assert_eq!(mode.gesture_origin(), None);
}

#[test]
fn click_threshold_is_inclusive_per_axis() {
    assert!(is_click(Point::new(0.0, 0.0)));
    assert!(is_click(Point::new(CLICK_THRESHOLD_PX, -CLICK_THRESHOLD_PX)));
    assert!(!is_click(Point::new(CLICK_THRESHOLD_PX + 0.5, 0.0)));
    assert!(!is_click(Point::new(0.0, -CLICK_THRESHOLD_PX - 0.5)));
}

#[test]
fn dragging_mode_reports_note_and_pointer() {
    let mode = InteractionMode::DraggingNote {
        note: NoteKey(4),
        pointer: Pointer::Touch(1),
        origin: Point::new(1.0, 2.0),
        initial: Point::new(10.0, 20.0),
        moved: false,
    };
    assert_eq!(mode.dragging_note(), Some(NoteKey(4)));
    assert_eq!(mode.pointer(), Some(Pointer::Touch(1)));
    assert_eq!(mode.gesture_origin(), Some(Point::new(1.0, 2.0)));
    assert!(!mode.is_idle());
}

#[test]
fn awaiting_mode_is_not_a_drag() {
    let mode = InteractionMode::AwaitingClickOrDrag {
        note: NoteKey(2),
        pointer: Pointer::Mouse,
        origin: Point::default(),
        last_screen: Point::default(),
    };
    assert_eq!(mode.dragging_note(), None);
}

#[test]
fn event_constructors() {
    assert_eq!(PointerEvent::mouse(1.0, 2.0).pointer, Pointer::Mouse);
    let t = PointerEvent::touch(9, 3.0, 4.0);
    assert_eq!(t.pointer, Pointer::Touch(9));
    assert_eq!(t.screen, Point::new(3.0, 4.0));
}
