//! Undoable commands and the linear history that holds them.
//!
//! Every mutating action is a [`Command`]. The [`CommandStack`] executes
//! commands, keeps the committed ones for undo, and keeps undone ones for
//! redo until a new command is executed.

mod add;
mod delete;
mod drag;
mod menu;
mod property;
mod resize;

pub use add::AddView;
pub use delete::DeleteViews;
pub use drag::DragView;
pub use menu::{MenuBarBinding, MoveMenuItemLeft, MoveMenuItemRight, MoveMenuItemVertical};
pub use property::SetProperty;
pub use resize::ResizeView;

use crate::document::DesignContext;
use std::collections::VecDeque;
use termdesigner_core::{NodeId, Result};

/// A unit of undoable work.
pub trait Command {
    /// Name for display, e.g. in an Edit menu.
    fn name(&self) -> &str;

    /// Set at construction when the command cannot do anything; the stack
    /// skips such commands without calling [`execute`](Command::execute).
    fn is_impossible(&self) -> bool {
        false
    }

    /// Performs the command. `Ok(false)` means nothing changed and the
    /// command must not enter history.
    fn execute(&mut self, ctx: &mut DesignContext) -> Result<bool>;

    /// Reverts a committed command.
    fn undo(&mut self, ctx: &mut DesignContext);

    /// Reapplies an undone command, reusing what `execute` produced.
    fn redo(&mut self, ctx: &mut DesignContext);

    /// Designs this command brought into the tree.
    fn created(&self) -> Vec<NodeId> {
        Vec::new()
    }
}

/// Linear undo/redo history.
pub struct CommandStack {
    undo_stack: VecDeque<Box<dyn Command>>,
    redo_stack: Vec<Box<dyn Command>>,
    max_depth: usize,
}

impl CommandStack {
    /// Create a new stack with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(100)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Executes `cmd` and records it when it changed something.
    ///
    /// Impossible or no-op commands are dropped and `Ok(false)` returned.
    /// A failing command is dropped and its error returned; history is left
    /// untouched in both cases.
    pub fn execute(&mut self, mut cmd: Box<dyn Command>, ctx: &mut DesignContext) -> Result<bool> {
        if cmd.is_impossible() {
            tracing::debug!("Skipping impossible command '{}'", cmd.name());
            return Ok(false);
        }
        match cmd.execute(ctx) {
            Ok(true) => {
                tracing::info!("Committed '{}'", cmd.name());
                self.push(cmd);
                Ok(true)
            }
            Ok(false) => {
                tracing::debug!("Command '{}' changed nothing, discarded", cmd.name());
                Ok(false)
            }
            Err(e) => {
                tracing::debug!("Command '{}' failed: {}", cmd.name(), e);
                Err(e)
            }
        }
    }

    fn push(&mut self, cmd: Box<dyn Command>) {
        self.redo_stack.clear();
        self.undo_stack.push_back(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
    }

    /// Undo the latest committed command
    pub fn undo(&mut self, ctx: &mut DesignContext) -> bool {
        match self.undo_stack.pop_back() {
            Some(mut cmd) => {
                cmd.undo(ctx);
                tracing::info!("Undid '{}'", cmd.name());
                self.redo_stack.push(cmd);
                true
            }
            None => false,
        }
    }

    /// Redo the latest undone command
    pub fn redo(&mut self, ctx: &mut DesignContext) -> bool {
        match self.redo_stack.pop() {
            Some(mut cmd) => {
                cmd.redo(ctx);
                tracing::info!("Redid '{}'", cmd.name());
                self.undo_stack.push_back(cmd);
                true
            }
            None => false,
        }
    }

    /// The most recently committed command.
    pub fn last_committed(&self) -> Option<&dyn Command> {
        self.undo_stack.back().map(|c| c.as_ref())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn next_undo_name(&self) -> Option<&str> {
        self.undo_stack.back().map(|c| c.name())
    }

    pub fn next_redo_name(&self) -> Option<&str> {
        self.redo_stack.last().map(|c| c.name())
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for CommandStack {
    fn default() -> Self {
        Self::new()
    }
}
