use termdesigner_core::{DesignError, Error, MenuItemId, NodeId};
use termdesigner_editor::{Document, MenuBarModel, WidgetKind};
use termdesigner_settings::DesignerConfig;

/// A document with a menu bar holding `_File` > `Do Something`, `Save`, `Quit`.
fn doc_with_menu() -> (Document, NodeId, Vec<MenuItemId>) {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let bar = doc.add_view(WidgetKind::MenuBar, root, None).unwrap().unwrap();
    let model = menu_mut(&mut doc, bar);
    let file = model.menus()[0].id;
    let first = model.menus()[0].children()[0].id;
    let save = model.add_item(file, "Save").unwrap();
    let quit = model.add_item(file, "Quit").unwrap();
    (doc, bar, vec![first, save, quit])
}

fn menu_mut(doc: &mut Document, bar: NodeId) -> &mut MenuBarModel {
    doc.context_mut()
        .tree
        .get_mut(bar)
        .unwrap()
        .widget_mut()
        .menu
        .as_mut()
        .unwrap()
}

fn outline(doc: &Document, bar: NodeId) -> String {
    doc.tree()
        .node(bar)
        .unwrap()
        .widget()
        .menu
        .as_ref()
        .unwrap()
        .outline()
}

const FLAT: &str = "_File\n  Do Something\n  Save\n  Quit";

#[test]
fn test_move_right_promotes_and_undo_collapses() {
    let (mut doc, bar, items) = doc_with_menu();
    assert_eq!(outline(&doc, bar), FLAT);

    assert!(doc.move_menu_item_right(bar, items[1]).unwrap());
    assert_eq!(outline(&doc, bar), "_File\n  Do Something\n    Save\n  Quit");

    assert!(doc.undo());
    assert_eq!(outline(&doc, bar), FLAT);
    let menu = doc.tree().node(bar).unwrap().widget().menu.clone().unwrap();
    assert!(!menu.find(items[0]).unwrap().is_submenu());

    assert!(doc.redo());
    assert_eq!(outline(&doc, bar), "_File\n  Do Something\n    Save\n  Quit");
}

#[test]
fn test_move_right_of_first_item_is_not_recorded() {
    let (mut doc, bar, items) = doc_with_menu();
    let before = doc.history().undo_count();
    assert!(!doc.move_menu_item_right(bar, items[0]).unwrap());
    assert_eq!(doc.history().undo_count(), before);
    assert_eq!(outline(&doc, bar), FLAT);
}

#[test]
fn test_move_left_and_undo_returns_to_submenu() {
    let (mut doc, bar, items) = doc_with_menu();
    // top-level items cannot move further left
    assert!(!doc.move_menu_item_left(bar, items[1]).unwrap());

    doc.move_menu_item_right(bar, items[1]).unwrap();
    doc.move_menu_item_right(bar, items[2]).unwrap();
    assert_eq!(
        outline(&doc, bar),
        "_File\n  Do Something\n    Save\n    Quit"
    );

    assert!(doc.move_menu_item_left(bar, items[1]).unwrap());
    assert_eq!(
        outline(&doc, bar),
        "_File\n  Do Something\n    Quit\n  Save"
    );

    doc.undo();
    assert_eq!(
        outline(&doc, bar),
        "_File\n  Do Something\n    Save\n    Quit"
    );
    doc.redo();
    assert_eq!(
        outline(&doc, bar),
        "_File\n  Do Something\n    Quit\n  Save"
    );
}

#[test]
fn test_move_up_down_cycle() {
    let (mut doc, bar, items) = doc_with_menu();
    assert!(!doc.move_menu_item_up(bar, items[0]).unwrap());
    assert!(!doc.move_menu_item_down(bar, items[2]).unwrap());

    assert!(doc.move_menu_item_up(bar, items[2]).unwrap());
    assert_eq!(outline(&doc, bar), "_File\n  Do Something\n  Quit\n  Save");
    assert_eq!(doc.history().next_undo_name(), Some("Move Menu Item Up"));

    assert!(doc.move_menu_item_down(bar, items[0]).unwrap());
    assert_eq!(outline(&doc, bar), "_File\n  Quit\n  Do Something\n  Save");

    doc.undo();
    doc.undo();
    assert_eq!(outline(&doc, bar), FLAT);
}

#[test]
fn test_menu_commands_require_a_menu_bar() {
    let (mut doc, _, items) = doc_with_menu();
    let root = doc.root();
    let label = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();

    let err = doc.move_menu_item_right(label, items[1]).unwrap_err();
    assert!(matches!(
        err,
        Error::Design(DesignError::WrongWidgetKind { id, .. }) if id == label
    ));
}
