use super::Command;
use crate::document::DesignContext;
use crate::layout::Dim;
use crate::tree::DesignTree;
use termdesigner_core::{DesignError, NodeId, Point, Result};

/// Resizes a design by dragging its lower-right corner.
pub struct ResizeView {
    node: NodeId,
    origin: Point,
    original_width: Dim,
    original_height: Dim,
    base_size: (i32, i32),
    min_size: i32,
    delta: (i32, i32),
    final_size: Option<(Dim, Dim)>,
}

impl ResizeView {
    /// Starts a resize of `node` from the cell `origin`. No resize shrinks
    /// the design below `min_size` cells on either axis.
    pub fn new(
        tree: &DesignTree,
        node: NodeId,
        origin: Point,
        min_size: i32,
    ) -> std::result::Result<Self, DesignError> {
        if node == tree.root() {
            return Err(DesignError::RootImmutable {
                action: "resized".to_string(),
            });
        }
        let widget = tree.node(node)?.widget();
        let frame = tree
            .frame(node)
            .ok_or(DesignError::NodeNotFound { id: node })?;
        Ok(Self {
            node,
            origin,
            original_width: widget.width.clone(),
            original_height: widget.height.clone(),
            base_size: (frame.width, frame.height),
            min_size: min_size.max(1),
            delta: (0, 0),
            final_size: None,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn delta(&self) -> (i32, i32) {
        self.delta
    }

    /// Shows the design sized to reach `to`.
    pub fn continue_resize(&mut self, ctx: &mut DesignContext, to: Point) {
        let (dx, dy) = to.delta_from(self.origin);
        self.delta = (
            dx.max(self.min_size - self.base_size.0),
            dy.max(self.min_size - self.base_size.1),
        );
        let (w, h) = self.resized();
        set_size(&mut ctx.tree, self.node, w, h);
    }

    /// Reverts the visual feedback of an uncommitted resize.
    pub fn cancel(&mut self, ctx: &mut DesignContext) {
        self.delta = (0, 0);
        set_size(
            &mut ctx.tree,
            self.node,
            self.original_width.clone(),
            self.original_height.clone(),
        );
    }

    fn resized(&self) -> (Dim, Dim) {
        (
            self.original_width.shifted(self.delta.0),
            self.original_height.shifted(self.delta.1),
        )
    }
}

fn set_size(tree: &mut DesignTree, node: NodeId, width: Dim, height: Dim) {
    match tree.get_mut(node) {
        Some(n) => {
            let w = n.widget_mut();
            w.width = width;
            w.height = height;
        }
        None => tracing::warn!("Resized design {} is no longer attached", node),
    }
}

impl Command for ResizeView {
    fn name(&self) -> &str {
        "Resize"
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        if self.delta == (0, 0) {
            self.cancel(ctx);
            return Ok(false);
        }
        let (w, h) = self.resized();
        set_size(&mut ctx.tree, self.node, w.clone(), h.clone());
        self.final_size = Some((w, h));
        Ok(true)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        set_size(
            &mut ctx.tree,
            self.node,
            self.original_width.clone(),
            self.original_height.clone(),
        );
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        if let Some((w, h)) = self.final_size.clone() {
            set_size(&mut ctx.tree, self.node, w, h);
        }
    }
}
