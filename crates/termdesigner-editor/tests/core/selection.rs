use std::cell::RefCell;
use std::rc::Rc;
use termdesigner_core::{Attribute, Color, ColorScheme};
use termdesigner_editor::{Document, WidgetKind};
use termdesigner_settings::DesignerConfig;

#[test]
fn test_highlight_restores_exact_schemes() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let b = doc.add_view(WidgetKind::Button, root, None).unwrap().unwrap();
    let own = Rc::new(ColorScheme::uniform(Attribute::new(Color::Cyan, Color::Black)));
    doc.context_mut().tree.get_mut(a).unwrap().widget_mut().scheme = Some(Rc::clone(&own));

    assert!(doc.select(&[a, b, a]));
    let highlight = Rc::clone(doc.context().highlight.highlight());
    for id in [a, b] {
        let scheme = doc.tree().node(id).unwrap().widget().scheme.clone().unwrap();
        assert!(Rc::ptr_eq(&scheme, &highlight));
    }
    assert_eq!(doc.context().highlight.selected(), &[a, b]);

    doc.clear_selection();
    let restored = doc.tree().node(a).unwrap().widget().scheme.clone().unwrap();
    assert!(Rc::ptr_eq(&restored, &own));
    assert!(doc.tree().node(b).unwrap().widget().scheme.is_none());
    assert!(doc.selection().is_empty());
}

#[test]
fn test_reselecting_replaces_previous_highlight() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let b = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    doc.select(&[a]);
    doc.select(&[b]);
    assert!(doc.tree().node(a).unwrap().widget().scheme.is_none());
    assert!(doc.context().highlight.is_highlighted(b));
    assert!(!doc.context().highlight.is_highlighted(a));
}

#[test]
fn test_locked_selection_ignores_select() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    doc.context_mut().selection.lock();
    assert!(!doc.select(&[a]));
    assert!(doc.selection().is_empty());
    assert!(!doc.context().highlight.is_highlighted(a));

    doc.context_mut().selection.unlock();
    assert!(doc.select(&[a]));
}

#[test]
fn test_selection_listener_sees_changes() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    doc.context_mut()
        .selection
        .on_changed(move |ids| sink.borrow_mut().push(ids.len()));

    doc.select(&[a]);
    doc.clear_selection();
    assert_eq!(*seen.borrow(), vec![1, 0]);
}

#[test]
fn test_deleting_highlighted_design_restores_its_scheme() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    doc.select(&[a]);
    doc.delete_selected().unwrap();
    assert!(doc.context().highlight.selected().is_empty());

    doc.undo();
    assert!(doc.tree().node(a).unwrap().widget().scheme.is_none());
}

#[test]
fn test_undone_add_does_not_keep_highlight() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    doc.select(&[a]);
    assert!(doc.undo());
    doc.clear_selection();
    assert!(doc.redo());
    assert!(doc.tree().node(a).unwrap().widget().scheme.is_none());
    assert!(!doc.context().highlight.is_highlighted(a));
}

#[test]
fn test_undone_paste_does_not_keep_highlight() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let a = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    doc.select(&[a]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());
    let pasted = doc.selection().primary().unwrap();

    doc.select(&[pasted]);
    assert!(doc.undo());
    doc.clear_selection();
    assert!(doc.redo());
    assert!(doc.tree().node(pasted).unwrap().widget().scheme.is_none());

    // a copy of the restored design carries its own scheme, not the highlight
    doc.select(&[pasted]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());
    let again = doc.selection().primary().unwrap();
    assert!(doc.tree().node(again).unwrap().widget().scheme.is_none());
}
