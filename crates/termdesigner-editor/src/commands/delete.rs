use super::Command;
use crate::clone::prune_child_views;
use crate::document::DesignContext;
use crate::tree::DetachedSubtree;
use termdesigner_core::{NodeId, Result};

/// Removes designs, together with everything they contain.
pub struct DeleteViews {
    targets: Vec<NodeId>,
    old_selection: Vec<NodeId>,
    detached: Vec<DetachedSubtree>,
    impossible: bool,
}

impl DeleteViews {
    pub fn new(ctx: &DesignContext, targets: &[NodeId]) -> Self {
        let targets = prune_child_views(&ctx.tree, targets);
        let impossible = targets.is_empty() || targets.contains(&ctx.tree.root());
        Self {
            targets,
            old_selection: ctx.selection.selected().to_vec(),
            detached: Vec::new(),
            impossible,
        }
    }

    fn detach_all(&mut self, ctx: &mut DesignContext) -> usize {
        // detached widgets must leave with their own schemes
        ctx.highlight.clear(&mut ctx.tree);
        for id in &self.targets {
            match ctx.tree.detach(*id) {
                Ok(subtree) => self.detached.push(subtree),
                Err(e) => tracing::warn!("Could not delete {}: {}", id, e),
            }
        }
        let gone: Vec<NodeId> = self
            .old_selection
            .iter()
            .copied()
            .filter(|id| !ctx.tree.contains(*id))
            .collect();
        if !gone.is_empty() {
            let remaining: Vec<NodeId> = self
                .old_selection
                .iter()
                .copied()
                .filter(|id| ctx.tree.contains(*id))
                .collect();
            ctx.selection.force_set_selection(remaining);
        }
        self.detached.len()
    }
}

impl Command for DeleteViews {
    fn name(&self) -> &str {
        "Delete"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        if !self.detached.is_empty() {
            return Ok(false);
        }
        Ok(self.detach_all(ctx) > 0)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        // reverse order restores each sibling index exactly
        while let Some(subtree) = self.detached.pop() {
            let id = subtree.root();
            if let Err(e) = ctx.tree.reattach(subtree) {
                tracing::warn!("Undo of delete could not restore {}: {}", id, e);
            }
        }
        ctx.selection.force_set_selection(self.old_selection.clone());
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        self.detach_all(ctx);
    }
}
