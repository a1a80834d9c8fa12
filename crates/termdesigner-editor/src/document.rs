//! One open design document and the state scoped to it.
//!
//! Everything that would otherwise be process-wide (the selection, the undo
//! history, the clipboard) lives here, so several documents can be edited
//! side by side without interfering.

use crate::clone::{Clipboard, PasteViews};
use crate::commands::{
    AddView, CommandStack, DeleteViews, MoveMenuItemLeft, MoveMenuItemRight, MoveMenuItemVertical,
    SetProperty,
};
use crate::export::{export_tree, ExportedNode};
use crate::gesture::{GestureController, GestureOutcome, PointerEvent};
use crate::property::{PropertyKey, PropertyValue};
use crate::selection::{MultiSelectionManager, SelectionManager};
use crate::tree::DesignTree;
use crate::widget::{DefaultWidgetFactory, WidgetFactory, WidgetKind};
use anyhow::Context;
use std::path::Path;
use std::rc::Rc;
use termdesigner_core::{DocumentId, MenuItemId, NodeId, Rect, Result};
use termdesigner_settings::DesignerConfig;

/// Default screen the root window is laid out on.
pub const DEFAULT_SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 25,
};

/// State every command operates on.
pub struct DesignContext {
    pub tree: DesignTree,
    pub selection: SelectionManager,
    pub highlight: MultiSelectionManager,
    pub factory: Rc<dyn WidgetFactory>,
}

impl DesignContext {
    /// Builds a context with a fresh root window made by `factory`.
    pub fn new(config: &DesignerConfig, factory: Rc<dyn WidgetFactory>) -> Result<Self> {
        let root = factory.create(WidgetKind::Window)?;
        let mut tree = DesignTree::new(root, DEFAULT_SCREEN)?;
        tree.set_lowercase_names(config.naming.lowercase_names);
        Ok(Self {
            tree,
            selection: SelectionManager::new(),
            highlight: MultiSelectionManager::new(config.selection.highlight.clone()),
            factory,
        })
    }

    /// Default configuration and the stock widget factory.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&DesignerConfig::default(), Rc::new(DefaultWidgetFactory))
    }
}

pub struct Document {
    id: DocumentId,
    ctx: DesignContext,
    history: CommandStack,
    clipboard: Clipboard,
    gestures: GestureController,
    modified: bool,
}

impl Document {
    pub fn new(config: &DesignerConfig) -> Result<Self> {
        Self::with_factory(config, Rc::new(DefaultWidgetFactory))
    }

    pub fn with_factory(config: &DesignerConfig, factory: Rc<dyn WidgetFactory>) -> Result<Self> {
        let id = DocumentId::new();
        tracing::info!("Opened design document {}", id);
        Ok(Self {
            id,
            ctx: DesignContext::new(config, factory)?,
            history: CommandStack::with_depth(config.history.max_depth),
            clipboard: Clipboard::new(),
            gestures: GestureController::new(config.gestures.clone()),
            modified: false,
        })
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn context(&self) -> &DesignContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut DesignContext {
        &mut self.ctx
    }

    pub fn tree(&self) -> &DesignTree {
        &self.ctx.tree
    }

    pub fn root(&self) -> NodeId {
        self.ctx.tree.root()
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.ctx.selection
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    fn run(&mut self, cmd: Box<dyn crate::commands::Command>) -> Result<bool> {
        let committed = self.history.execute(cmd, &mut self.ctx)?;
        self.modified |= committed;
        Ok(committed)
    }

    /// Adds a default widget of `kind` to `parent`. Returns the new design,
    /// or `None` when nothing was added.
    pub fn add_view(
        &mut self,
        kind: WidgetKind,
        parent: NodeId,
        pane: Option<usize>,
    ) -> Result<Option<NodeId>> {
        let widget = self.ctx.factory.create(kind)?;
        if !self.run(Box::new(AddView::new(widget, parent, pane)))? {
            return Ok(None);
        }
        Ok(self
            .history
            .last_committed()
            .and_then(|c| c.created().first().copied()))
    }

    /// Replaces the selection. Returns `false` while the selection is locked.
    pub fn select(&mut self, ids: &[NodeId]) -> bool {
        let applied = self.ctx.selection.set_selection(ids.iter().copied());
        if applied {
            let ctx = &mut self.ctx;
            ctx.highlight.set_selection(&mut ctx.tree, ids);
        }
        applied
    }

    pub fn clear_selection(&mut self) {
        let ctx = &mut self.ctx;
        ctx.highlight.clear(&mut ctx.tree);
        ctx.selection.clear(true);
    }

    pub fn delete_selected(&mut self) -> Result<bool> {
        let targets = self.ctx.selection.selected().to_vec();
        let cmd = DeleteViews::new(&self.ctx, &targets);
        self.run(Box::new(cmd))
    }

    pub fn set_property(&mut self, node: NodeId, key: PropertyKey, value: PropertyValue) -> Result<bool> {
        self.run(Box::new(SetProperty::new(node, key, value)))
    }

    pub fn copy_selected(&mut self) {
        self.clipboard.copy(self.ctx.selection.selected());
    }

    /// Pastes the clipboard into `to`.
    pub fn paste_into(&mut self, to: NodeId, pane: Option<usize>) -> Result<bool> {
        let cmd = PasteViews::new(&self.ctx, &self.clipboard, to, pane);
        // originals show their own schemes again before they are copied
        let ctx = &mut self.ctx;
        ctx.highlight.clear(&mut ctx.tree);
        self.run(Box::new(cmd))
    }

    pub fn move_menu_item_right(&mut self, bar: NodeId, item: MenuItemId) -> Result<bool> {
        let cmd = MoveMenuItemRight::new(&self.ctx.tree, bar, item)?;
        self.run(Box::new(cmd))
    }

    pub fn move_menu_item_left(&mut self, bar: NodeId, item: MenuItemId) -> Result<bool> {
        let cmd = MoveMenuItemLeft::new(&self.ctx.tree, bar, item)?;
        self.run(Box::new(cmd))
    }

    pub fn move_menu_item_up(&mut self, bar: NodeId, item: MenuItemId) -> Result<bool> {
        let cmd = MoveMenuItemVertical::new(&self.ctx.tree, bar, item, true)?;
        self.run(Box::new(cmd))
    }

    pub fn move_menu_item_down(&mut self, bar: NodeId, item: MenuItemId) -> Result<bool> {
        let cmd = MoveMenuItemVertical::new(&self.ctx.tree, bar, item, false)?;
        self.run(Box::new(cmd))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<GestureOutcome> {
        let outcome = self
            .gestures
            .handle(event, &mut self.ctx, &mut self.history)?;
        if outcome == GestureOutcome::Committed(true) {
            self.modified = true;
        }
        Ok(outcome)
    }

    /// Abandons any held gesture, e.g. when the editor loses focus.
    pub fn cancel_gesture(&mut self) {
        self.gestures.cancel(&mut self.ctx);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.ctx);
        self.modified |= undone;
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.ctx);
        self.modified |= redone;
        redone
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Snapshot of the whole tree for the code emitter.
    pub fn export(&self) -> ExportedNode {
        export_tree(&self.ctx.tree)
    }

    /// Writes the snapshot as pretty JSON.
    pub fn save_snapshot(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = self
            .export()
            .to_json()
            .context("Failed to serialize design snapshot")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        tracing::info!("Saved design snapshot to {}", path.display());
        self.mark_saved();
        Ok(())
    }
}
