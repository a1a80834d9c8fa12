//! Serializable snapshot of a design tree.
//!
//! Layout descriptors are written as their canonical source text, with
//! relative positions naming their referent by design name, so the snapshot
//! reads the way generated code would.

use crate::property::PropertyValue;
use crate::tree::DesignTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use termdesigner_core::NodeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPane {
    pub title: String,
    pub children: Vec<ExportedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedNode {
    pub name: String,
    pub kind: String,
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExportedNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub panes: Vec<ExportedPane>,
}

impl ExportedNode {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Depth-first search by design name.
    pub fn find(&self, name: &str) -> Option<&ExportedNode> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter()
            .chain(self.panes.iter().flat_map(|p| p.children.iter()))
            .find_map(|c| c.find(name))
    }
}

/// Snapshot of the whole tree, starting at the root.
pub fn export_tree(tree: &DesignTree) -> ExportedNode {
    export_node(tree, tree.root())
}

fn export_node(tree: &DesignTree, id: NodeId) -> ExportedNode {
    let Some(node) = tree.get(id) else {
        tracing::warn!("Skipping {} while exporting: not in tree", id);
        return ExportedNode {
            name: String::new(),
            kind: String::new(),
            properties: BTreeMap::new(),
            children: Vec::new(),
            panes: Vec::new(),
        };
    };

    let name_of = |n: NodeId| tree.name_of(n).map(str::to_string);
    let mut properties = BTreeMap::new();
    for prop in crate::property::designable_properties(node.kind()) {
        let text = match prop.get(node) {
            PropertyValue::Text(s) => s,
            PropertyValue::Pos(p) => p.to_code(&name_of),
            PropertyValue::Dim(d) => d.to_code(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Table(t) => json_or_empty(&t),
            PropertyValue::Tabs(t) => json_or_empty(&t),
            PropertyValue::Menus(m) => json_or_empty(&m),
        };
        properties.insert(prop.key().to_string(), text);
    }

    ExportedNode {
        name: node.name().to_string(),
        kind: node.kind().to_string(),
        properties,
        children: node
            .children()
            .iter()
            .map(|c| export_node(tree, *c))
            .collect(),
        panes: node
            .panes()
            .iter()
            .map(|p| ExportedPane {
                title: p.title.clone(),
                children: p.children.iter().map(|c| export_node(tree, *c)).collect(),
            })
            .collect(),
    }
}

fn json_or_empty<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        tracing::warn!("Could not serialize property value: {}", e);
        String::new()
    })
}
