//! Pointer gestures: rubber-band selection, dragging and resizing.
//!
//! ```text
//!          press in container interior
//! Idle ─────────────────────────────────▶ RubberBand ──release──▶ Idle
//!   │      press on a design
//!   ├──────────────────────────────────▶ Dragging   ──release──▶ Idle (commit)
//!   │      press on a lower-right corner
//!   └──────────────────────────────────▶ Resizing   ──release──▶ Idle (commit)
//! ```
//!
//! Drags and resizes build their command on press and update it on every
//! move so the tree shows the in-progress change. Nothing enters history
//! until release, when the command is handed to the stack.

use crate::commands::{Command, CommandStack, DragView, ResizeView};
use crate::document::DesignContext;
use serde::{Deserialize, Serialize};
use termdesigner_core::{NodeId, Point, Rect, Result};
use termdesigner_settings::GestureSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerAction {
    Press,
    Move,
    Release,
}

/// A single pointer event in absolute cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
}

impl PointerEvent {
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Press,
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Move,
            position: Point::new(x, y),
        }
    }

    pub fn release(x: i32, y: i32) -> Self {
        Self {
            action: PointerAction::Release,
            position: Point::new(x, y),
        }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The event did not start, advance or end a gesture.
    Ignored,
    RubberBandStarted(NodeId),
    DragStarted(NodeId),
    ResizeStarted(NodeId),
    /// A held gesture was updated.
    Updated,
    /// A rubber band ended and selected these designs.
    Selected(Vec<NodeId>),
    /// A drag or resize ended; `true` when it entered history.
    Committed(bool),
}

enum GestureState {
    Idle,
    RubberBand {
        container: NodeId,
        start: Point,
        end: Point,
    },
    Dragging(DragView),
    Resizing(ResizeView),
}

impl GestureState {
    fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::RubberBand { .. } => "rubber band",
            GestureState::Dragging(_) => "dragging",
            GestureState::Resizing(_) => "resizing",
        }
    }
}

/// Turns pointer events into selections and committed commands.
pub struct GestureController {
    state: GestureState,
    settings: GestureSettings,
}

impl GestureController {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            state: GestureState::Idle,
            settings,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, GestureState::Idle)
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// The rectangle currently drawn by a rubber band.
    pub fn selection_box(&self) -> Option<Rect> {
        match &self.state {
            GestureState::RubberBand { start, end, .. } => {
                Rect::from_between_points(Some(*start), Some(*end))
            }
            _ => None,
        }
    }

    /// The container a rubber band was started in.
    pub fn selection_container(&self) -> Option<NodeId> {
        match &self.state {
            GestureState::RubberBand { container, .. } => Some(*container),
            _ => None,
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        ctx: &mut DesignContext,
        history: &mut CommandStack,
    ) -> Result<GestureOutcome> {
        match event.action {
            PointerAction::Press => Ok(self.press(event.position, ctx)),
            PointerAction::Move => Ok(self.update(event.position, ctx)),
            PointerAction::Release => self.release(event.position, ctx, history),
        }
    }

    fn press(&mut self, at: Point, ctx: &mut DesignContext) -> GestureOutcome {
        if !self.is_idle() {
            return GestureOutcome::Ignored;
        }
        let Some(hit) = ctx.tree.hit_test(at, None) else {
            return GestureOutcome::Ignored;
        };
        let node = hit.node;
        let root = ctx.tree.root();
        let on_border = ctx.tree.frame(node).is_some_and(|f| f.is_on_border(at));

        // containers are dragged by their border; the root never moves
        if node == root || (ctx.tree.is_container_view(node) && !on_border) {
            tracing::debug!("Rubber band started in {} at {:?}", node, at);
            self.state = GestureState::RubberBand {
                container: node,
                start: at,
                end: at,
            };
            return GestureOutcome::RubberBandStarted(node);
        }

        if hit.is_lower_right && self.settings.resize_handle_enabled {
            match ResizeView::new(&ctx.tree, node, at, self.settings.min_size) {
                Ok(cmd) => {
                    tracing::debug!("Resize started on {}", node);
                    self.state = GestureState::Resizing(cmd);
                    GestureOutcome::ResizeStarted(node)
                }
                Err(e) => {
                    tracing::debug!("Cannot resize {}: {}", node, e);
                    GestureOutcome::Ignored
                }
            }
        } else {
            match DragView::new(&ctx.tree, node, at) {
                Ok(cmd) => {
                    tracing::debug!("Drag started on {}", node);
                    self.state = GestureState::Dragging(cmd);
                    GestureOutcome::DragStarted(node)
                }
                Err(e) => {
                    tracing::debug!("Cannot drag {}: {}", node, e);
                    GestureOutcome::Ignored
                }
            }
        }
    }

    fn update(&mut self, at: Point, ctx: &mut DesignContext) -> GestureOutcome {
        match &mut self.state {
            GestureState::Idle => return GestureOutcome::Ignored,
            GestureState::RubberBand { end, .. } => *end = at,
            GestureState::Dragging(cmd) => cmd.continue_drag(ctx, at),
            GestureState::Resizing(cmd) => cmd.continue_resize(ctx, at),
        }
        GestureOutcome::Updated
    }

    fn release(
        &mut self,
        at: Point,
        ctx: &mut DesignContext,
        history: &mut CommandStack,
    ) -> Result<GestureOutcome> {
        if self.is_idle() {
            return Ok(GestureOutcome::Ignored);
        }
        self.update(at, ctx);

        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Idle => Ok(GestureOutcome::Ignored),
            GestureState::RubberBand {
                container,
                start,
                end,
            } => {
                let selected = match Rect::from_between_points(Some(start), Some(end)) {
                    Some(area) => ctx
                        .tree
                        .visible_designs(container)
                        .into_iter()
                        .filter(|c| ctx.tree.frame(*c).is_some_and(|f| f.intersects(&area)))
                        .collect(),
                    None => Vec::new(),
                };
                tracing::debug!("Rubber band selected {} design(s)", selected.len());
                ctx.selection.set_selection(selected.iter().copied());
                ctx.highlight.set_selection(&mut ctx.tree, &selected);
                Ok(GestureOutcome::Selected(selected))
            }
            GestureState::Dragging(mut cmd) => {
                let drop_into = ctx.tree.container_at(at, Some(cmd.node()));
                cmd.set_drop_into(drop_into);
                commit(Box::new(cmd), ctx, history)
            }
            GestureState::Resizing(cmd) => commit(Box::new(cmd), ctx, history),
        }
    }

    /// Abandons a held gesture, reverting its visual change. History is not
    /// touched.
    pub fn cancel(&mut self, ctx: &mut DesignContext) {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging(mut cmd) => cmd.cancel(ctx),
            GestureState::Resizing(mut cmd) => cmd.cancel(ctx),
            GestureState::RubberBand { .. } | GestureState::Idle => {}
        }
        tracing::debug!("Gesture cancelled");
    }
}

fn commit(
    cmd: Box<dyn Command>,
    ctx: &mut DesignContext,
    history: &mut CommandStack,
) -> Result<GestureOutcome> {
    history.execute(cmd, ctx).map(GestureOutcome::Committed)
}
