//! Selection state for one document.
//!
//! [`SelectionManager`] owns the logical selection. [`MultiSelectionManager`]
//! is the visual layer: it swaps the colour scheme of multi-selected widgets
//! for the highlight scheme and puts the original back afterwards.

use crate::tree::DesignTree;
use std::fmt;
use std::rc::Rc;
use termdesigner_core::{ColorScheme, NodeId};

type Listener = Box<dyn FnMut(&[NodeId])>;

/// The active selection of a document.
#[derive(Default)]
pub struct SelectionManager {
    selected: Vec<NodeId>,
    locked: bool,
    listeners: Vec<Listener>,
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selected", &self.selected)
            .field("locked", &self.locked)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
    }

    /// The first selected design.
    pub fn primary(&self) -> Option<NodeId> {
        self.selected.first().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// While locked, [`set_selection`](Self::set_selection) is ignored.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Registers a callback invoked with the new selection on each change.
    pub fn on_changed(&mut self, listener: impl FnMut(&[NodeId]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces the selection unless locked. Duplicates are dropped.
    /// Returns whether the selection was applied.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = NodeId>) -> bool {
        if self.locked {
            tracing::debug!("Selection locked, ignoring change");
            return false;
        }
        self.force_set_selection(ids);
        true
    }

    /// Replaces the selection even while locked.
    pub fn force_set_selection(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let mut selected: Vec<NodeId> = Vec::new();
        for id in ids {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        self.selected = selected;
        self.notify();
    }

    /// Empties the selection; listeners hear about it only when `notify`.
    pub fn clear(&mut self, notify: bool) {
        self.selected.clear();
        if notify {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let selected = self.selected.clone();
        for listener in &mut self.listeners {
            listener(&selected);
        }
    }
}

/// Highlights multi-selected widgets and restores their own schemes later.
#[derive(Debug)]
pub struct MultiSelectionManager {
    selection: Vec<NodeId>,
    old_schemes: Vec<(NodeId, Option<Rc<ColorScheme>>)>,
    highlight: Rc<ColorScheme>,
}

impl MultiSelectionManager {
    pub fn new(highlight: ColorScheme) -> Self {
        Self {
            selection: Vec::new(),
            old_schemes: Vec::new(),
            highlight: Rc::new(highlight),
        }
    }

    /// The scheme assigned to highlighted widgets.
    pub fn highlight(&self) -> &Rc<ColorScheme> {
        &self.highlight
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn is_highlighted(&self, id: NodeId) -> bool {
        self.old_schemes.iter().any(|(n, _)| *n == id)
    }

    /// Restores every current highlight, then highlights `ids`.
    pub fn set_selection(&mut self, tree: &mut DesignTree, ids: &[NodeId]) {
        self.clear(tree);

        for &id in ids {
            if self.is_highlighted(id) {
                continue;
            }
            let Some(node) = tree.get_mut(id) else {
                continue;
            };
            let widget = node.widget_mut();
            self.old_schemes.push((id, widget.scheme.take()));
            widget.scheme = Some(Rc::clone(&self.highlight));
            self.selection.push(id);
        }
    }

    /// Puts back the scheme each highlighted widget had before.
    pub fn clear(&mut self, tree: &mut DesignTree) {
        self.selection.clear();
        for (id, scheme) in self.old_schemes.drain(..) {
            match tree.get_mut(id) {
                Some(node) => node.widget_mut().scheme = scheme,
                None => tracing::debug!("Highlighted design {} no longer attached", id),
            }
        }
    }
}
