//! Commands restructuring the entries of a menu bar design.

use super::Command;
use crate::document::DesignContext;
use crate::menu::MenuBarModel;
use crate::tree::DesignTree;
use crate::widget::WidgetKind;
use termdesigner_core::{DesignError, MenuItemId, NodeId, Result};

/// Proof that a design wraps a menu bar, checked once when a menu command
/// is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBarBinding {
    node: NodeId,
}

impl MenuBarBinding {
    pub fn bind(tree: &DesignTree, node: NodeId) -> std::result::Result<Self, DesignError> {
        let kind = tree.node(node)?.kind();
        if kind != WidgetKind::MenuBar {
            return Err(DesignError::WrongWidgetKind {
                id: node,
                expected: WidgetKind::MenuBar.to_string(),
                actual: kind.to_string(),
            });
        }
        Ok(Self { node })
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The bound bar's model, or `None` once the design has been detached.
    pub fn model_mut<'a>(&self, tree: &'a mut DesignTree) -> Option<&'a mut MenuBarModel> {
        let widget = tree.get_mut(self.node)?.widget_mut();
        Some(widget.menu.get_or_insert_with(MenuBarModel::new))
    }
}

/// Demotes an entry into the submenu of the entry above it.
pub struct MoveMenuItemRight {
    bar: MenuBarBinding,
    item: MenuItemId,
    /// Entry above that this command turned into a submenu.
    promoted: Option<MenuItemId>,
}

impl MoveMenuItemRight {
    pub fn new(tree: &DesignTree, node: NodeId, item: MenuItemId) -> std::result::Result<Self, DesignError> {
        Ok(Self {
            bar: MenuBarBinding::bind(tree, node)?,
            item,
            promoted: None,
        })
    }

    fn apply(&mut self, ctx: &mut DesignContext) -> bool {
        let Some(model) = self.bar.model_mut(&mut ctx.tree) else {
            return false;
        };
        match model.move_right(self.item) {
            Some(promoted) => {
                self.promoted = if promoted {
                    model.parent_of(self.item)
                } else {
                    None
                };
                true
            }
            None => false,
        }
    }
}

impl Command for MoveMenuItemRight {
    fn name(&self) -> &str {
        "Move Menu Item Right"
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        Ok(self.apply(ctx))
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        let Some(model) = self.bar.model_mut(&mut ctx.tree) else {
            tracing::warn!("Menu bar {} is no longer attached", self.bar.node());
            return;
        };
        if model.move_left(self.item).is_none() {
            tracing::warn!("Undo could not move {} back out", self.item);
            return;
        }
        if let Some(submenu) = self.promoted.take() {
            model.collapse(submenu);
        }
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        if !self.apply(ctx) {
            tracing::warn!("Redo could not move {} right again", self.item);
        }
    }
}

/// Moves an entry out of its submenu to directly after that submenu.
pub struct MoveMenuItemLeft {
    bar: MenuBarBinding,
    item: MenuItemId,
    /// Submenu left and the index held inside it.
    from: Option<(MenuItemId, usize)>,
}

impl MoveMenuItemLeft {
    pub fn new(tree: &DesignTree, node: NodeId, item: MenuItemId) -> std::result::Result<Self, DesignError> {
        Ok(Self {
            bar: MenuBarBinding::bind(tree, node)?,
            item,
            from: None,
        })
    }

    fn apply(&mut self, ctx: &mut DesignContext) -> bool {
        let Some(model) = self.bar.model_mut(&mut ctx.tree) else {
            return false;
        };
        let Some(submenu) = model.parent_of(self.item) else {
            return false;
        };
        match model.move_left(self.item) {
            Some(index) => {
                self.from = Some((submenu, index));
                true
            }
            None => false,
        }
    }
}

impl Command for MoveMenuItemLeft {
    fn name(&self) -> &str {
        "Move Menu Item Left"
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        Ok(self.apply(ctx))
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        let (Some(model), Some((submenu, index))) = (self.bar.model_mut(&mut ctx.tree), self.from) else {
            return;
        };
        if !model.move_into(self.item, submenu, index) {
            tracing::warn!("Undo could not return {} to {}", self.item, submenu);
        }
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        if !self.apply(ctx) {
            tracing::warn!("Redo could not move {} left again", self.item);
        }
    }
}

/// Swaps an entry with its neighbour within the same level.
pub struct MoveMenuItemVertical {
    bar: MenuBarBinding,
    item: MenuItemId,
    up: bool,
}

impl MoveMenuItemVertical {
    pub fn new(
        tree: &DesignTree,
        node: NodeId,
        item: MenuItemId,
        up: bool,
    ) -> std::result::Result<Self, DesignError> {
        Ok(Self {
            bar: MenuBarBinding::bind(tree, node)?,
            item,
            up,
        })
    }

    fn shift(&self, ctx: &mut DesignContext, up: bool) -> bool {
        self.bar
            .model_mut(&mut ctx.tree)
            .is_some_and(|m| m.move_vertical(self.item, up))
    }
}

impl Command for MoveMenuItemVertical {
    fn name(&self) -> &str {
        if self.up {
            "Move Menu Item Up"
        } else {
            "Move Menu Item Down"
        }
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        Ok(self.shift(ctx, self.up))
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        if !self.shift(ctx, !self.up) {
            tracing::warn!("Undo could not move {} back", self.item);
        }
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        if !self.shift(ctx, self.up) {
            tracing::warn!("Redo could not move {} again", self.item);
        }
    }
}
