use super::Command;
use crate::document::DesignContext;
use crate::tree::DetachedSubtree;
use crate::widget::Widget;
use termdesigner_core::{DesignError, NodeId, Result};

/// Adds a freshly built widget to a container.
///
/// Undo detaches the created node into the command; redo reattaches that
/// same node, so ids and widget handles survive the round trip.
pub struct AddView {
    parent: NodeId,
    pane: Option<usize>,
    name: Option<String>,
    pending: Option<Widget>,
    added: Option<NodeId>,
    detached: Option<DetachedSubtree>,
}

impl AddView {
    pub fn new(widget: Widget, parent: NodeId, pane: Option<usize>) -> Self {
        Self {
            parent,
            pane,
            name: None,
            pending: Some(widget),
            added: None,
            detached: None,
        }
    }

    /// Requests a specific design name; a taken name gets a numeric suffix.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The node created by a successful execute.
    pub fn added(&self) -> Option<NodeId> {
        self.added
    }
}

impl Command for AddView {
    fn name(&self) -> &str {
        "Add View"
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        if !ctx.tree.is_container_view(self.parent) {
            tracing::debug!("Cannot add into {}, not a container", self.parent);
            return Ok(false);
        }
        // a second execute has nothing left to add
        let Some(widget) = self.pending.take() else {
            return Ok(false);
        };
        let id = ctx
            .tree
            .insert(self.parent, self.pane, widget, self.name.as_deref())?;
        if !ctx.tree.contains(id) {
            return Err(DesignError::Invariant(format!("add produced no design for {}", id)).into());
        }
        self.added = Some(id);
        Ok(true)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        let Some(id) = self.added else {
            return;
        };
        // a detached design must leave with its own scheme
        ctx.highlight.clear(&mut ctx.tree);
        match ctx.tree.detach(id) {
            Ok(subtree) => self.detached = Some(subtree),
            Err(e) => tracing::warn!("Undo of add could not detach {}: {}", id, e),
        }
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        let Some(subtree) = self.detached.take() else {
            return;
        };
        if let Err(e) = ctx.tree.reattach(subtree) {
            tracing::warn!("Redo of add failed: {}", e);
        }
    }

    fn created(&self) -> Vec<NodeId> {
        self.added.into_iter().collect()
    }
}
