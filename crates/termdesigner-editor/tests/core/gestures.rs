use std::rc::Rc;
use termdesigner_core::{NodeId, Point, Rect};
use termdesigner_editor::{
    Document, GestureOutcome, PointerEvent, Pos, PropertyKey, PropertyValue, WidgetKind,
};
use termdesigner_settings::DesignerConfig;

fn new_doc() -> Document {
    Document::new(&DesignerConfig::default()).unwrap()
}

fn add(doc: &mut Document, kind: WidgetKind, parent: NodeId) -> NodeId {
    doc.add_view(kind, parent, None).unwrap().unwrap()
}

fn place(doc: &mut Document, id: NodeId, x: i32, y: i32) {
    doc.set_property(id, PropertyKey::X, PropertyValue::Pos(Pos::at(x)))
        .unwrap();
    doc.set_property(id, PropertyKey::Y, PropertyValue::Pos(Pos::at(y)))
        .unwrap();
}

fn frame(doc: &Document, id: NodeId) -> Rect {
    doc.tree().frame(id).unwrap()
}

#[test]
fn test_drag_commits_and_undoes() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 4, 1));

    let out = doc.handle_pointer(PointerEvent::press(2, 1)).unwrap();
    assert_eq!(out, GestureOutcome::DragStarted(label));
    doc.handle_pointer(PointerEvent::moved(7, 3)).unwrap();
    // live feedback before release
    assert_eq!(frame(&doc, label), Rect::new(6, 3, 4, 1));
    let out = doc.handle_pointer(PointerEvent::release(12, 6)).unwrap();
    assert_eq!(out, GestureOutcome::Committed(true));
    assert_eq!(frame(&doc, label), Rect::new(11, 6, 4, 1));
    assert_eq!(doc.history().next_undo_name(), Some("Drag"));
    assert!(doc.gestures().is_idle());

    assert!(doc.undo());
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 4, 1));
    assert!(doc.redo());
    assert_eq!(frame(&doc, label), Rect::new(11, 6, 4, 1));
}

#[test]
fn test_drag_without_movement_is_discarded() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);
    let before = doc.history().undo_count();

    doc.handle_pointer(PointerEvent::press(2, 1)).unwrap();
    let out = doc.handle_pointer(PointerEvent::release(2, 1)).unwrap();
    assert_eq!(out, GestureOutcome::Committed(false));
    assert_eq!(doc.history().undo_count(), before);
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 4, 1));
}

#[test]
fn test_drop_into_container_keeps_screen_position() {
    let mut doc = new_doc();
    let root = doc.root();
    let view = add(&mut doc, WidgetKind::View, root);
    let label = add(&mut doc, WidgetKind::Label, root);
    place(&mut doc, label, 30, 0);
    assert_eq!(frame(&doc, view), Rect::new(1, 1, 20, 6));
    assert_eq!(frame(&doc, label), Rect::new(31, 1, 4, 1));

    doc.handle_pointer(PointerEvent::press(32, 1)).unwrap();
    doc.handle_pointer(PointerEvent::moved(20, 2)).unwrap();
    let out = doc.handle_pointer(PointerEvent::release(5, 3)).unwrap();
    assert_eq!(out, GestureOutcome::Committed(true));

    assert_eq!(doc.tree().parent(label), Some(view));
    assert_eq!(frame(&doc, label), Rect::new(4, 3, 4, 1));
    let widget = doc.tree().node(label).unwrap().widget();
    assert_eq!(widget.x.as_absolute(), Some(3));
    assert_eq!(widget.y.as_absolute(), Some(2));

    doc.undo();
    assert_eq!(doc.tree().parent(label), Some(root));
    assert_eq!(doc.tree().child_designs(root), vec![view, label]);
    assert_eq!(frame(&doc, label), Rect::new(31, 1, 4, 1));

    doc.redo();
    assert_eq!(doc.tree().parent(label), Some(view));
    assert_eq!(frame(&doc, label), Rect::new(4, 3, 4, 1));
}

#[test]
fn test_resize_from_lower_right_corner() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);

    let out = doc.handle_pointer(PointerEvent::press(4, 1)).unwrap();
    assert_eq!(out, GestureOutcome::ResizeStarted(label));
    let out = doc.handle_pointer(PointerEvent::release(9, 3)).unwrap();
    assert_eq!(out, GestureOutcome::Committed(true));
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 9, 3));
    assert_eq!(doc.history().next_undo_name(), Some("Resize"));

    doc.undo();
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 4, 1));
    doc.redo();
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 9, 3));
}

#[test]
fn test_resize_never_shrinks_below_minimum() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);

    doc.handle_pointer(PointerEvent::press(4, 1)).unwrap();
    doc.handle_pointer(PointerEvent::release(0, 0)).unwrap();
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 1, 1));
}

#[test]
fn test_resize_handle_can_be_disabled() {
    let mut config = DesignerConfig::default();
    config.gestures.resize_handle_enabled = false;
    let mut doc = Document::new(&config).unwrap();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);

    let out = doc.handle_pointer(PointerEvent::press(4, 1)).unwrap();
    assert_eq!(out, GestureOutcome::DragStarted(label));
}

#[test]
fn test_rubber_band_selects_and_highlights() {
    let mut doc = new_doc();
    let root = doc.root();
    let a = add(&mut doc, WidgetKind::Label, root);
    let b = add(&mut doc, WidgetKind::Button, root);
    let c = add(&mut doc, WidgetKind::Label, root);
    place(&mut doc, b, 10, 5);
    place(&mut doc, c, 40, 15);

    let out = doc.handle_pointer(PointerEvent::press(0, 0)).unwrap();
    assert_eq!(out, GestureOutcome::RubberBandStarted(root));
    doc.handle_pointer(PointerEvent::moved(20, 10)).unwrap();
    assert_eq!(doc.gestures().selection_box(), Some(Rect::new(0, 0, 21, 11)));
    let out = doc.handle_pointer(PointerEvent::release(20, 10)).unwrap();
    assert_eq!(out, GestureOutcome::Selected(vec![a, b]));

    assert_eq!(doc.selection().selected(), &[a, b]);
    let highlight = Rc::clone(doc.context().highlight.highlight());
    for id in [a, b] {
        let scheme = doc.tree().node(id).unwrap().widget().scheme.clone().unwrap();
        assert!(Rc::ptr_eq(&scheme, &highlight));
    }
    assert!(doc.tree().node(c).unwrap().widget().scheme.is_none());
    // selection is not an edit
    assert_eq!(doc.history().next_undo_name(), Some("Set Y"));
}

#[test]
fn test_container_interior_starts_rubber_band_and_border_drags() {
    let mut doc = new_doc();
    let root = doc.root();
    let view = add(&mut doc, WidgetKind::View, root);

    let out = doc.handle_pointer(PointerEvent::press(5, 3)).unwrap();
    assert_eq!(out, GestureOutcome::RubberBandStarted(view));
    doc.cancel_gesture();

    let out = doc.handle_pointer(PointerEvent::press(1, 3)).unwrap();
    assert_eq!(out, GestureOutcome::DragStarted(view));
}

#[test]
fn test_cancel_reverts_live_drag() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = add(&mut doc, WidgetKind::Label, root);
    let before = doc.history().undo_count();

    doc.handle_pointer(PointerEvent::press(2, 1)).unwrap();
    doc.handle_pointer(PointerEvent::moved(9, 9)).unwrap();
    doc.cancel_gesture();
    assert!(doc.gestures().is_idle());
    assert_eq!(frame(&doc, label), Rect::new(1, 1, 4, 1));
    assert_eq!(doc.history().undo_count(), before);
}

#[test]
fn test_press_outside_screen_is_ignored() {
    let mut doc = new_doc();
    let out = doc.handle_pointer(PointerEvent::press(100, 100)).unwrap();
    assert_eq!(out, GestureOutcome::Ignored);
}

#[test]
fn test_rubber_band_only_reaches_shown_tab() {
    let mut doc = new_doc();
    let root = doc.root();
    let tabs = add(&mut doc, WidgetKind::TabView, root);
    let first = doc.add_view(WidgetKind::Label, tabs, Some(0)).unwrap().unwrap();
    let second = doc.add_view(WidgetKind::Label, tabs, Some(1)).unwrap().unwrap();
    assert_eq!(frame(&doc, first), frame(&doc, second));

    let out = doc.handle_pointer(PointerEvent::press(10, 5)).unwrap();
    assert_eq!(out, GestureOutcome::RubberBandStarted(tabs));
    let out = doc.handle_pointer(PointerEvent::release(2, 2)).unwrap();
    assert_eq!(out, GestureOutcome::Selected(vec![first]));

    doc.context_mut().tree.set_active_pane(tabs, 1).unwrap();
    assert_eq!(doc.tree().hit_test(Point::new(2, 2), None).unwrap().node, second);
    doc.handle_pointer(PointerEvent::press(10, 5)).unwrap();
    let out = doc.handle_pointer(PointerEvent::release(2, 2)).unwrap();
    assert_eq!(out, GestureOutcome::Selected(vec![second]));

    assert!(doc.context_mut().tree.set_active_pane(tabs, 2).is_err());
}
