use std::rc::Rc;
use termdesigner_core::{Attribute, Color, ColorScheme, DesignError, NodeId};
use termdesigner_editor::{
    DefaultWidgetFactory, Document, Pos, PropertyKey, PropertyValue, Side, TableData, Widget,
    WidgetFactory, WidgetKind,
};
use termdesigner_settings::DesignerConfig;

fn new_doc() -> Document {
    Document::new(&DesignerConfig::default()).unwrap()
}

/// A view holding label `a` and button `b`, with `b.X = Pos.Right(a) + 2`.
fn view_with_relative_pair(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
    let root = doc.root();
    let view = doc.add_view(WidgetKind::View, root, None).unwrap().unwrap();
    let a = doc.add_view(WidgetKind::Label, view, None).unwrap().unwrap();
    let b = doc.add_view(WidgetKind::Button, view, None).unwrap().unwrap();
    doc.set_property(
        b,
        PropertyKey::X,
        PropertyValue::Pos(Pos::create_relative(a, Side::Right, 2)),
    )
    .unwrap();
    (view, a, b)
}

fn x_of(doc: &Document, id: NodeId) -> Pos {
    match doc.tree().get_property(id, PropertyKey::X).unwrap() {
        PropertyValue::Pos(p) => p,
        other => panic!("unexpected X value {:?}", other),
    }
}

#[test]
fn test_paste_container_and_child_as_one_subtree() {
    let mut doc = new_doc();
    let root = doc.root();
    let (view, a, _) = view_with_relative_pair(&mut doc);

    doc.select(&[view, a]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());

    let top = doc.tree().child_designs(root);
    assert_eq!(top.len(), 2);
    let pasted = top[1];
    assert_eq!(doc.selection().selected(), &[pasted]);
    assert_eq!(doc.tree().node(pasted).unwrap().kind(), WidgetKind::View);
    assert_eq!(doc.tree().child_designs(pasted).len(), 2);
}

#[test]
fn test_paste_migrates_relative_references_inside_copy() {
    let mut doc = new_doc();
    let root = doc.root();
    let (view, _, _) = view_with_relative_pair(&mut doc);

    doc.select(&[view]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());

    let pasted = doc.selection().primary().unwrap();
    let children = doc.tree().child_designs(pasted);
    let (a2, b2) = (children[0], children[1]);
    assert_eq!(x_of(&doc, b2).as_relative(), Some((a2, Side::Right, 2)));
}

#[test]
fn test_paste_keeps_reference_to_uncopied_referent() {
    let mut doc = new_doc();
    let root = doc.root();
    let (_, a, b) = view_with_relative_pair(&mut doc);

    doc.select(&[b]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());

    let b2 = doc.selection().primary().unwrap();
    assert_ne!(b2, b);
    assert_eq!(x_of(&doc, b2).as_relative(), Some((a, Side::Right, 2)));
}

#[test]
fn test_paste_copies_property_values() {
    let mut doc = new_doc();
    let root = doc.root();
    let label = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    doc.set_property(label, PropertyKey::Text, PropertyValue::Text("Name:".to_string()))
        .unwrap();
    let scheme = Rc::new(ColorScheme::uniform(Attribute::new(Color::Red, Color::Black)));
    doc.context_mut().tree.get_mut(label).unwrap().widget_mut().scheme = Some(Rc::clone(&scheme));

    doc.select(&[label]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());

    let clone = doc.selection().primary().unwrap();
    let widget = doc.tree().node(clone).unwrap().widget();
    assert_eq!(widget.text, "Name:");
    assert_ne!(widget.handle(), doc.tree().node(label).unwrap().widget().handle());
    // the clone gets the original's own scheme, not the highlight
    assert!(Rc::ptr_eq(widget.scheme.as_ref().unwrap(), &scheme));
}

#[test]
fn test_paste_into_itself_is_impossible() {
    let mut doc = new_doc();
    let (view, _, _) = view_with_relative_pair(&mut doc);
    let before = doc.history().undo_count();
    let len = doc.tree().len();

    doc.select(&[view]);
    doc.copy_selected();
    assert!(!doc.paste_into(view, None).unwrap());
    assert_eq!(doc.history().undo_count(), before);
    assert_eq!(doc.tree().len(), len);
}

#[test]
fn test_paste_into_descendant_is_impossible() {
    let mut doc = new_doc();
    let root = doc.root();
    let outer = doc.add_view(WidgetKind::View, root, None).unwrap().unwrap();
    let inner = doc.add_view(WidgetKind::FrameView, outer, None).unwrap().unwrap();
    let before = doc.history().undo_count();

    doc.select(&[outer]);
    doc.copy_selected();
    assert!(!doc.paste_into(inner, None).unwrap());
    assert_eq!(doc.history().undo_count(), before);
}

#[test]
fn test_paste_undo_redo_keeps_identities() {
    let mut doc = new_doc();
    let root = doc.root();
    let (view, _, _) = view_with_relative_pair(&mut doc);

    doc.select(&[view]);
    doc.copy_selected();
    doc.paste_into(root, None).unwrap();
    let pasted = doc.selection().primary().unwrap();
    let inner = doc.tree().child_designs(pasted);
    let handle = doc.tree().node(pasted).unwrap().widget().handle();

    assert!(doc.undo());
    assert!(!doc.tree().contains(pasted));
    assert!(inner.iter().all(|id| !doc.tree().contains(*id)));
    assert_eq!(doc.selection().selected(), &[view]);

    assert!(doc.redo());
    assert_eq!(doc.tree().node(pasted).unwrap().widget().handle(), handle);
    assert_eq!(doc.tree().child_designs(pasted), inner);
    assert_eq!(doc.selection().selected(), &[pasted]);
    assert_eq!(x_of(&doc, inner[1]).as_relative(), Some((inner[0], Side::Right, 2)));
}

#[test]
fn test_paste_into_tab_pane() {
    let mut doc = new_doc();
    let root = doc.root();
    let tabs = doc.add_view(WidgetKind::TabView, root, None).unwrap().unwrap();
    let label = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    doc.select(&[label]);
    doc.copy_selected();
    assert!(doc.paste_into(tabs, Some(1)).unwrap());

    let panes = doc.tree().node(tabs).unwrap().panes();
    assert!(panes[0].children.is_empty());
    assert_eq!(panes[1].children.len(), 1);
}

struct NoButtons;

impl WidgetFactory for NoButtons {
    fn create(&self, kind: WidgetKind) -> Result<Widget, DesignError> {
        if kind == WidgetKind::Button {
            return Err(DesignError::Factory {
                kind: kind.to_string(),
                reason: "buttons are disabled".to_string(),
            });
        }
        DefaultWidgetFactory.create(kind)
    }
}

fn doc_without_buttons() -> (Document, NodeId, NodeId) {
    let mut doc = Document::with_factory(&DesignerConfig::default(), Rc::new(NoButtons)).unwrap();
    let root = doc.root();
    let label = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    let button = DefaultWidgetFactory.create(WidgetKind::Button).unwrap();
    let button = doc
        .context_mut()
        .tree
        .insert(root, None, button, None)
        .unwrap();
    (doc, label, button)
}

#[test]
fn test_paste_partial_failure_keeps_successes() {
    let (mut doc, label, button) = doc_without_buttons();
    let root = doc.root();

    doc.select(&[label, button]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());

    let top = doc.tree().child_designs(root);
    assert_eq!(top.len(), 3);
    assert_eq!(doc.selection().selected(), &[top[2]]);
    assert_eq!(doc.tree().node(top[2]).unwrap().kind(), WidgetKind::Label);
}

#[test]
fn test_paste_total_failure_records_nothing() {
    let (mut doc, _, button) = doc_without_buttons();
    let root = doc.root();
    let before = doc.history().undo_count();

    doc.select(&[button]);
    doc.copy_selected();
    assert!(!doc.paste_into(root, None).unwrap());
    assert_eq!(doc.history().undo_count(), before);
    assert!(doc.selection().is_empty());
    assert_eq!(doc.tree().child_designs(root).len(), 2);
}

#[test]
fn test_pasted_table_rows_are_independent() {
    let mut doc = new_doc();
    let root = doc.root();
    let table = doc.add_view(WidgetKind::TableView, root, None).unwrap().unwrap();
    let mut data = TableData::new(vec!["Name".to_string(), "Age".to_string()]);
    data.add_row(vec!["Ada".to_string(), "36".to_string()]);
    doc.set_property(table, PropertyKey::Table, PropertyValue::Table(data.clone()))
        .unwrap();

    doc.select(&[table]);
    doc.copy_selected();
    assert!(doc.paste_into(root, None).unwrap());
    let copy = doc.selection().primary().unwrap();
    assert_ne!(copy, table);
    assert_eq!(
        doc.tree().get_property(copy, PropertyKey::Table).unwrap(),
        PropertyValue::Table(data.clone())
    );

    doc.context_mut()
        .tree
        .get_mut(copy)
        .unwrap()
        .widget_mut()
        .table
        .as_mut()
        .unwrap()
        .add_row(vec!["Grace".to_string(), "45".to_string()]);
    assert_eq!(
        doc.tree().get_property(table, PropertyKey::Table).unwrap(),
        PropertyValue::Table(data)
    );
    assert_eq!(doc.tree().node(copy).unwrap().widget().table.as_ref().unwrap().rows.len(), 2);
}
