//! A design node: one widget placed in the tree, plus its name and links.

use crate::widget::{Widget, WidgetKind};
use termdesigner_core::NodeId;

/// A titled content area of a container, such as one tab of a tab view.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPane {
    pub title: String,
    pub children: Vec<NodeId>,
}

impl ContentPane {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }
}

/// Wraps exactly one widget. Parent and child links are maintained by the
/// tree.
#[derive(Debug)]
pub struct DesignNode {
    id: NodeId,
    name: String,
    widget: Widget,
    parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) panes: Vec<ContentPane>,
    active_pane: usize,
}

impl DesignNode {
    pub(crate) fn new(id: NodeId, name: String, widget: Widget, parent: Option<NodeId>) -> Self {
        let panes = widget
            .kind()
            .default_panes()
            .into_iter()
            .map(ContentPane::new)
            .collect();
        Self {
            id,
            name,
            widget,
            parent,
            children: Vec::new(),
            panes,
            active_pane: 0,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> WidgetKind {
        self.widget.kind()
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut Widget {
        &mut self.widget
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    /// Ordinary children, excluding those hosted in content panes.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn panes(&self) -> &[ContentPane] {
        &self.panes
    }

    /// The pane currently shown, such as the open tab.
    pub fn active_pane(&self) -> usize {
        self.active_pane
    }

    pub(crate) fn set_active_pane(&mut self, pane: usize) -> bool {
        if pane >= self.panes.len() {
            return false;
        }
        self.active_pane = pane;
        true
    }

    /// Ordinary children followed by the active pane's children. Designs on
    /// hidden panes are left out.
    pub fn visible_designs(&self) -> Vec<NodeId> {
        let mut shown = self.children.clone();
        if let Some(pane) = self.panes.get(self.active_pane) {
            shown.extend(pane.children.iter().copied());
        }
        shown
    }

    /// Ordinary children followed by every pane's children.
    pub fn child_designs(&self) -> Vec<NodeId> {
        let mut all = self.children.clone();
        for pane in &self.panes {
            all.extend(pane.children.iter().copied());
        }
        all
    }

    /// The child list for a slot: `None` for ordinary children, `Some(i)`
    /// for pane `i`.
    pub(crate) fn slot(&self, pane: Option<usize>) -> Option<&Vec<NodeId>> {
        match pane {
            None => Some(&self.children),
            Some(i) => self.panes.get(i).map(|p| &p.children),
        }
    }

    pub(crate) fn slot_mut(&mut self, pane: Option<usize>) -> Option<&mut Vec<NodeId>> {
        match pane {
            None => Some(&mut self.children),
            Some(i) => self.panes.get_mut(i).map(|p| &mut p.children),
        }
    }

    /// Where `child` sits among this node's slots.
    pub(crate) fn locate_child(&self, child: NodeId) -> Option<(Option<usize>, usize)> {
        if let Some(i) = self.children.iter().position(|c| *c == child) {
            return Some((None, i));
        }
        self.panes.iter().enumerate().find_map(|(p, pane)| {
            pane.children
                .iter()
                .position(|c| *c == child)
                .map(|i| (Some(p), i))
        })
    }
}
