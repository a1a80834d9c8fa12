use tempfile::TempDir;
use termdesigner_editor::{Document, ExportedNode, PropertyKey, PropertyValue, WidgetKind};
use termdesigner_settings::DesignerConfig;

#[test]
fn test_documents_are_independent() {
    let config = DesignerConfig::default();
    let mut first = Document::new(&config).unwrap();
    let mut second = Document::new(&config).unwrap();
    assert_ne!(first.id(), second.id());

    let root = first.root();
    let label = first.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    first.select(&[label]);
    first.copy_selected();

    assert_eq!(second.tree().len(), 1);
    assert!(second.selection().is_empty());
    assert!(second.clipboard().is_empty());
    assert!(!second.undo());
    let second_root = second.root();
    second.add_view(WidgetKind::Button, second_root, None).unwrap();
    assert_eq!(first.history().undo_count(), 1);
}

#[test]
fn test_modified_flag_tracks_edits() {
    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    assert!(!doc.is_modified());
    let root = doc.root();
    doc.add_view(WidgetKind::Label, root, None).unwrap();
    assert!(doc.is_modified());
    doc.mark_saved();
    assert!(!doc.is_modified());
    doc.undo();
    assert!(doc.is_modified());
}

#[test]
fn test_save_snapshot_writes_tree() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("designs").join("login.json");

    let mut doc = Document::new(&DesignerConfig::default()).unwrap();
    let root = doc.root();
    let label = doc.add_view(WidgetKind::Label, root, None).unwrap().unwrap();
    doc.set_property(label, PropertyKey::Text, PropertyValue::Text("User:".to_string()))
        .unwrap();
    doc.add_view(WidgetKind::TableView, root, None).unwrap();

    doc.save_snapshot(&path).unwrap();
    assert!(!doc.is_modified());

    let json = std::fs::read_to_string(&path).unwrap();
    let snapshot = ExportedNode::from_json(&json).unwrap();
    assert_eq!(snapshot, doc.export());
    assert_eq!(snapshot.name, "root");
    assert_eq!(snapshot.kind, "Window");
    assert_eq!(snapshot.properties.get("Width").unwrap(), "Dim.Fill(0)");

    let exported = snapshot.find("label1").unwrap();
    assert_eq!(exported.properties.get("Text").unwrap(), "User:");
    assert_eq!(exported.properties.get("X").unwrap(), "0");
    assert!(snapshot.find("tableView1").unwrap().properties.contains_key("Table"));
}
