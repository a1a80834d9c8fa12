use super::Command;
use crate::document::DesignContext;
use crate::layout::Pos;
use crate::tree::{DesignTree, Placement};
use termdesigner_core::{DesignError, NodeId, Point, Result};

/// Moves a design by pointer drag, optionally into another container.
///
/// While the pointer is held the gesture calls
/// [`continue_drag`](DragView::continue_drag) for visual feedback; the move
/// only enters history when the stack executes the command on release.
pub struct DragView {
    node: NodeId,
    origin: Point,
    original_x: Pos,
    original_y: Pos,
    original_placement: Placement,
    delta: (i32, i32),
    drop_into: Option<NodeId>,
    moved_to: Option<Placement>,
    final_position: Option<(Pos, Pos)>,
}

impl DragView {
    /// Starts a drag of `node` from the cell `origin`.
    pub fn new(tree: &DesignTree, node: NodeId, origin: Point) -> std::result::Result<Self, DesignError> {
        if node == tree.root() {
            return Err(DesignError::RootImmutable {
                action: "dragged".to_string(),
            });
        }
        let widget = tree.node(node)?.widget();
        let original_placement = tree
            .placement(node)
            .ok_or(DesignError::NodeNotFound { id: node })?;
        Ok(Self {
            node,
            origin,
            original_x: widget.x.clone(),
            original_y: widget.y.clone(),
            original_placement,
            delta: (0, 0),
            drop_into: None,
            moved_to: None,
            final_position: None,
        })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn delta(&self) -> (i32, i32) {
        self.delta
    }

    /// Shows the design at the offset of `to` from the press point.
    pub fn continue_drag(&mut self, ctx: &mut DesignContext, to: Point) {
        self.delta = to.delta_from(self.origin);
        let (x, y) = self.shifted();
        set_position(&mut ctx.tree, self.node, x, y);
    }

    /// Container the design is released over, if any.
    pub fn set_drop_into(&mut self, container: Option<NodeId>) {
        self.drop_into = container;
    }

    /// Reverts the visual feedback of an uncommitted drag.
    pub fn cancel(&mut self, ctx: &mut DesignContext) {
        self.delta = (0, 0);
        set_position(
            &mut ctx.tree,
            self.node,
            self.original_x.clone(),
            self.original_y.clone(),
        );
    }

    fn shifted(&self) -> (Pos, Pos) {
        (
            self.original_x.shifted(self.delta.0),
            self.original_y.shifted(self.delta.1),
        )
    }

    fn new_container(&self, tree: &DesignTree) -> Option<NodeId> {
        self.drop_into.filter(|c| {
            *c != self.original_placement.parent
                && *c != self.node
                && tree.is_container_view(*c)
                && !tree.is_descendant(*c, self.node)
        })
    }
}

fn set_position(tree: &mut DesignTree, node: NodeId, x: Pos, y: Pos) {
    match tree.get_mut(node) {
        Some(n) => {
            let w = n.widget_mut();
            w.x = x;
            w.y = y;
        }
        None => tracing::warn!("Dragged design {} is no longer attached", node),
    }
}

impl Command for DragView {
    fn name(&self) -> &str {
        "Drag"
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        let target = self.new_container(&ctx.tree);
        if self.delta == (0, 0) && target.is_none() {
            self.cancel(ctx);
            return Ok(false);
        }

        let (mut x, mut y) = self.shifted();
        set_position(&mut ctx.tree, self.node, x.clone(), y.clone());

        if let Some(container) = target {
            // keep the design where it was dropped, measured from the new container
            if let (Some(frame), Some(area)) =
                (ctx.tree.frame(self.node), ctx.tree.content_area(container))
            {
                x = Pos::at(frame.x - area.x);
                y = Pos::at(frame.y - area.y);
            }
            if let Err(e) = ctx.tree.reparent(self.node, container, None) {
                self.cancel(ctx);
                return Err(e.into());
            }
            self.moved_to = ctx.tree.placement(self.node);
            set_position(&mut ctx.tree, self.node, x.clone(), y.clone());
        }

        self.final_position = Some((x, y));
        Ok(true)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        if self.moved_to.is_some() {
            if let Err(e) = ctx.tree.move_to(self.node, self.original_placement) {
                tracing::warn!("Undo of drag could not move {} back: {}", self.node, e);
            }
        }
        set_position(
            &mut ctx.tree,
            self.node,
            self.original_x.clone(),
            self.original_y.clone(),
        );
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        if let Some(placement) = self.moved_to {
            if let Err(e) = ctx.tree.move_to(self.node, placement) {
                tracing::warn!("Redo of drag could not move {}: {}", self.node, e);
            }
        }
        if let Some((x, y)) = self.final_position.clone() {
            set_position(&mut ctx.tree, self.node, x, y);
        }
    }
}
