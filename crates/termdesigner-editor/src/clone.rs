//! Copy and paste of designs.
//!
//! [`Clipboard`] remembers which designs were copied. [`PasteViews`] turns
//! that set into one undoable transaction: it prunes nested sources, builds a
//! fresh widget for every copied design through the widget factory, copies
//! designable property values across, and finally points relative layout
//! references among the copied designs at their clones.

use crate::commands::{AddView, Command};
use crate::document::DesignContext;
use crate::layout::Pos;
use crate::tree::DesignTree;
use std::collections::HashMap;
use termdesigner_core::{NodeId, Result};

/// Designs captured by the last copy.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    copied: Vec<NodeId>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copy(&mut self, selection: &[NodeId]) {
        self.copied = selection.to_vec();
        tracing::debug!("Copied {} design(s)", self.copied.len());
    }

    pub fn contents(&self) -> &[NodeId] {
        &self.copied
    }

    pub fn is_empty(&self) -> bool {
        self.copied.is_empty()
    }

    pub fn clear(&mut self) {
        self.copied.clear();
    }
}

/// Drops every id that is a descendant of another id in `ids`, along with
/// duplicates and ids no longer in the tree. Order is preserved.
pub fn prune_child_views(tree: &DesignTree, ids: &[NodeId]) -> Vec<NodeId> {
    let mut pruned: Vec<NodeId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !tree.contains(id) || pruned.contains(&id) {
            continue;
        }
        if ids.iter().any(|&other| other != id && tree.is_descendant(id, other)) {
            continue;
        }
        pruned.push(id);
    }
    pruned
}

/// Pastes copied designs into a container as a single transaction.
pub struct PasteViews {
    to: NodeId,
    pane: Option<usize>,
    to_copy: Vec<NodeId>,
    old_selection: Vec<NodeId>,
    adds: Vec<AddView>,
    /// Source design to clone, in creation order.
    clones: Vec<(NodeId, NodeId)>,
    impossible: bool,
}

impl PasteViews {
    /// Prepares pasting `clipboard` into `to` (or one of its panes).
    pub fn new(ctx: &DesignContext, clipboard: &Clipboard, to: NodeId, pane: Option<usize>) -> Self {
        let tree = &ctx.tree;
        let to_copy = prune_child_views(tree, clipboard.contents());

        let into_itself = to_copy.contains(&to);
        let into_own_child = to_copy.iter().any(|&c| tree.is_descendant(to, c));
        let impossible = to_copy.is_empty() || into_itself || into_own_child;
        if into_itself || into_own_child {
            tracing::debug!("Refusing to paste into a copied design or its contents");
        }

        Self {
            to,
            pane,
            to_copy,
            old_selection: ctx.selection.selected().to_vec(),
            adds: Vec::new(),
            clones: Vec::new(),
            impossible,
        }
    }

    /// `(source, clone)` pairs created by the last execute.
    pub fn clones(&self) -> &[(NodeId, NodeId)] {
        &self.clones
    }

    fn clone_of(&self, source: NodeId) -> Option<NodeId> {
        self.clones
            .iter()
            .find(|(s, _)| *s == source)
            .map(|(_, c)| *c)
    }

    /// Clones of the copied designs, without clones nested in other clones.
    fn pasted_roots(&self, tree: &DesignTree) -> Vec<NodeId> {
        let all: Vec<NodeId> = self.clones.iter().map(|(_, c)| *c).collect();
        prune_child_views(tree, &all)
    }

    fn paste(&mut self, ctx: &mut DesignContext, source: NodeId, into: NodeId, pane: Option<usize>) -> bool {
        let kind = match ctx.tree.node(source) {
            Ok(node) => node.kind(),
            Err(e) => {
                tracing::warn!("Cannot paste {}: {}", source, e);
                return false;
            }
        };
        let widget = match ctx.factory.create(kind) {
            Ok(widget) => widget,
            Err(e) => {
                tracing::warn!("Cannot paste {}: {}", source, e);
                return false;
            }
        };

        let mut add = AddView::new(widget, into, pane);
        match add.execute(ctx) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Paste of {} into {} added nothing", source, into);
                return false;
            }
            Err(e) => {
                tracing::warn!("Paste of {} into {} failed: {}", source, into, e);
                return false;
            }
        }
        let Some(clone) = add.added() else {
            return false;
        };
        self.adds.push(add);

        self.copy_properties(ctx, source, clone);
        self.clones.push((source, clone));

        if ctx.tree.is_container_view(source) {
            let (children, panes) = match ctx.tree.get(source) {
                Some(node) => (
                    node.children().to_vec(),
                    node.panes()
                        .iter()
                        .map(|p| p.children.clone())
                        .collect::<Vec<_>>(),
                ),
                None => return true,
            };
            for child in children {
                self.paste(ctx, child, clone, None);
            }
            for (i, pane_children) in panes.into_iter().enumerate() {
                for child in pane_children {
                    self.paste(ctx, child, clone, Some(i));
                }
            }
        }
        true
    }

    fn copy_properties(&self, ctx: &mut DesignContext, from: NodeId, to: NodeId) {
        let props = match ctx.tree.properties(from) {
            Ok(props) => props,
            Err(e) => {
                tracing::warn!("Cannot read properties of {}: {}", from, e);
                return;
            }
        };
        for prop in props {
            let value = match ctx.tree.get_property(from, prop.key()) {
                Ok(v) => v.duplicate(),
                Err(_) => continue,
            };
            if let Err(e) = ctx.tree.set_property(to, prop.key(), value) {
                tracing::warn!("Could not copy {} to {}: {}", prop.key(), to, e);
            }
        }
        // a highlighted source is showing the selection scheme, not its own
        if !ctx.highlight.is_highlighted(from) {
            let scheme = ctx.tree.get(from).and_then(|n| n.widget().scheme.clone());
            if let Some(node) = ctx.tree.get_mut(to) {
                node.widget_mut().scheme = scheme;
            }
        }
    }

    /// Points relative X/Y of every clone at the clone of its referent when
    /// that referent was copied too.
    fn migrate_pos_relatives(&self, tree: &mut DesignTree) {
        let map: HashMap<NodeId, NodeId> = self.clones.iter().copied().collect();
        for &(_, clone) in &self.clones {
            let Some(node) = tree.get_mut(clone) else {
                continue;
            };
            let widget = node.widget_mut();
            widget.x = migrate(&widget.x, &map);
            widget.y = migrate(&widget.y, &map);
        }
    }
}

fn migrate(pos: &Pos, clones: &HashMap<NodeId, NodeId>) -> Pos {
    match pos.as_relative() {
        Some((referent, side, offset)) => match clones.get(&referent) {
            Some(&clone) => Pos::create_relative(clone, side, offset),
            // referent was not copied, keep pointing at the original
            None => pos.clone(),
        },
        None => pos.clone(),
    }
}

impl Command for PasteViews {
    fn name(&self) -> &str {
        "Paste"
    }

    fn is_impossible(&self) -> bool {
        self.impossible
    }

    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool> {
        if self.to_copy.is_empty() || !self.adds.is_empty() {
            return Ok(false);
        }

        let mut did_any = false;
        for source in self.to_copy.clone() {
            did_any = self.paste(ctx, source, self.to, self.pane) || did_any;
        }

        self.migrate_pos_relatives(&mut ctx.tree);

        if did_any {
            let roots = self.pasted_roots(&ctx.tree);
            tracing::info!("Pasted {} design(s) into {}", roots.len(), self.to);
            ctx.selection.force_set_selection(roots);
        } else {
            ctx.selection.clear(false);
        }
        Ok(did_any)
    }

    fn undo(&mut self, ctx: &mut DesignContext) {
        // nested clones first, then the clones containing them
        for add in self.adds.iter_mut().rev() {
            add.undo(ctx);
        }
        ctx.selection.force_set_selection(self.old_selection.clone());
    }

    fn redo(&mut self, ctx: &mut DesignContext) {
        for add in self.adds.iter_mut() {
            add.redo(ctx);
        }
        let roots = self.pasted_roots(&ctx.tree);
        ctx.selection.force_set_selection(roots);
    }

    fn created(&self) -> Vec<NodeId> {
        self.to_copy
            .iter()
            .filter_map(|s| self.clone_of(*s))
            .collect()
    }
}
