//! The design tree: an arena of [`DesignNode`]s addressed by [`NodeId`].
//!
//! The root is the window being edited. Every other node has exactly one
//! parent container and sits in one of its slots (ordinary children or a
//! content pane). Ids are never reused, so a detached subtree can be
//! reattached later under the same ids, which is what undo/redo relies on.

use crate::layout::Axis;
use crate::node::DesignNode;
use crate::property::{designable_properties, DesignableProperty, PropertyKey, PropertyValue};
use crate::widget::Widget;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use termdesigner_core::{DesignError, NodeId, Point, Rect};

/// Where a node sits inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub parent: NodeId,
    pub pane: Option<usize>,
    pub index: usize,
}

/// A node and all of its descendants, removed from the tree.
#[derive(Debug)]
pub struct DetachedSubtree {
    root: NodeId,
    placement: Placement,
    nodes: Vec<DesignNode>,
}

impl DetachedSubtree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Result of hit-testing a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub node: NodeId,
    /// The cell is the node's lower-right resize handle.
    pub is_lower_right: bool,
}

#[derive(Debug)]
pub struct DesignTree {
    nodes: HashMap<NodeId, DesignNode>,
    root: NodeId,
    next_id: u64,
    screen: Rect,
    lowercase_names: bool,
}

impl DesignTree {
    /// Creates a tree whose root wraps `root_widget`, laid out on `screen`.
    pub fn new(root_widget: Widget, screen: Rect) -> Result<Self, DesignError> {
        let kind = root_widget.kind();
        if !kind.is_container() {
            return Err(DesignError::NotAContainer {
                id: NodeId::new(1),
                kind: kind.to_string(),
            });
        }
        let root = NodeId::new(1);
        let mut nodes = HashMap::new();
        nodes.insert(root, DesignNode::new(root, "root".to_string(), root_widget, None));
        Ok(Self {
            nodes,
            root,
            next_id: 1,
            screen,
            lowercase_names: true,
        })
    }

    /// Whether generated names start lowercase (`label1`) or not (`Label1`).
    pub fn set_lowercase_names(&mut self, lowercase: bool) {
        self.lowercase_names = lowercase;
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&DesignNode> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut DesignNode> {
        self.nodes.get_mut(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&DesignNode, DesignError> {
        self.nodes.get(&id).ok_or(DesignError::NodeNotFound { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut DesignNode, DesignError> {
        self.nodes.get_mut(&id).ok_or(DesignError::NodeNotFound { id })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent())
    }

    /// Ordinary children plus pane children of `id`.
    pub fn child_designs(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| n.child_designs())
            .unwrap_or_default()
    }

    /// Every descendant of `id`, depth first, including designs hosted in
    /// content panes.
    pub fn all_child_designs(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_designs(id).into_iter().rev().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.child_designs(next).into_iter().rev());
        }
        out
    }

    /// The root followed by every other design.
    pub fn all_designs(&self) -> Vec<NodeId> {
        let mut all = vec![self.root];
        all.extend(self.all_child_designs(self.root));
        all
    }

    /// Whether `id` accepts new child designs and rubber-band selection.
    pub fn is_container_view(&self, id: NodeId) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|n| n.kind().is_container())
    }

    /// True when `id` is strictly below `of`.
    pub fn is_descendant(&self, id: NodeId, of: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == of {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .values()
            .find(|n| n.name() == name)
            .map(|n| n.id())
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.name())
    }

    /// First free name of the form `<base><n>`, counting from 1.
    pub fn unique_name(&self, base: &str) -> String {
        let base = if self.lowercase_names {
            let mut chars = base.chars();
            match chars.next() {
                Some(first) => first.to_lowercase().chain(chars).collect(),
                None => String::new(),
            }
        } else {
            base.to_string()
        };
        (1..)
            .map(|n| format!("{}{}", base, n))
            .find(|candidate| self.find_by_name(candidate).is_none())
            .unwrap_or_default()
    }

    pub fn placement(&self, id: NodeId) -> Option<Placement> {
        let parent = self.parent(id)?;
        let (pane, index) = self.nodes.get(&parent)?.locate_child(id)?;
        Some(Placement {
            parent,
            pane,
            index,
        })
    }

    fn check_slot(&self, parent: NodeId, pane: Option<usize>) -> Result<(), DesignError> {
        let node = self.node(parent)?;
        if !node.kind().is_container() {
            return Err(DesignError::NotAContainer {
                id: parent,
                kind: node.kind().to_string(),
            });
        }
        if node.slot(pane).is_none() {
            return Err(DesignError::NoSuchPane {
                id: parent,
                pane: pane.unwrap_or_default(),
            });
        }
        Ok(())
    }

    /// Adds `widget` as the last design in `parent`'s slot. A missing or
    /// taken name is replaced by a generated one.
    pub fn insert(
        &mut self,
        parent: NodeId,
        pane: Option<usize>,
        widget: Widget,
        name: Option<&str>,
    ) -> Result<NodeId, DesignError> {
        self.check_slot(parent, pane)?;
        let name = match name {
            Some(n) if !n.is_empty() && self.find_by_name(n).is_none() => n.to_string(),
            Some(n) if !n.is_empty() => self.unique_name(n),
            _ => self.unique_name(widget.kind().name()),
        };

        self.next_id += 1;
        let id = NodeId::new(self.next_id);
        self.nodes
            .insert(id, DesignNode::new(id, name, widget, Some(parent)));
        self.node_mut(parent)?
            .slot_mut(pane)
            .ok_or(DesignError::NoSuchPane {
                id: parent,
                pane: pane.unwrap_or_default(),
            })?
            .push(id);
        tracing::debug!("Inserted design {} under {}", id, parent);
        Ok(id)
    }

    /// Removes `id` and its descendants, remembering the exact slot.
    pub fn detach(&mut self, id: NodeId) -> Result<DetachedSubtree, DesignError> {
        if id == self.root {
            return Err(DesignError::RootImmutable {
                action: "detached".to_string(),
            });
        }
        let placement = self
            .placement(id)
            .ok_or(DesignError::NodeNotFound { id })?;

        let mut ids = vec![id];
        ids.extend(self.all_child_designs(id));

        if let Some(slot) = self
            .nodes
            .get_mut(&placement.parent)
            .and_then(|p| p.slot_mut(placement.pane))
        {
            slot.remove(placement.index);
        }
        let nodes = ids
            .iter()
            .filter_map(|i| self.nodes.remove(i))
            .collect();

        tracing::debug!("Detached design {}", id);
        Ok(DetachedSubtree {
            root: id,
            placement,
            nodes,
        })
    }

    /// Puts a detached subtree back into the slot it came from. The index is
    /// clamped if the slot has since shrunk.
    pub fn reattach(&mut self, subtree: DetachedSubtree) -> Result<NodeId, DesignError> {
        let Placement {
            parent,
            pane,
            index,
        } = subtree.placement;
        self.check_slot(parent, pane)?;
        if let Some(clash) = subtree.nodes.iter().find(|n| self.nodes.contains_key(&n.id())) {
            return Err(DesignError::Invariant(format!(
                "design {} is already attached",
                clash.id()
            )));
        }

        let root = subtree.root;
        for node in subtree.nodes {
            self.nodes.insert(node.id(), node);
        }
        let slot = self
            .node_mut(parent)?
            .slot_mut(pane)
            .ok_or(DesignError::NoSuchPane {
                id: parent,
                pane: pane.unwrap_or_default(),
            })?;
        let at = index.min(slot.len());
        slot.insert(at, root);
        tracing::debug!("Reattached design {} under {}", root, parent);
        Ok(root)
    }

    /// Moves `id` to `to`, returning where it was before.
    pub fn move_to(&mut self, id: NodeId, to: Placement) -> Result<Placement, DesignError> {
        if id == self.root {
            return Err(DesignError::RootImmutable {
                action: "moved".to_string(),
            });
        }
        if to.parent == id || self.is_descendant(to.parent, id) {
            return Err(DesignError::Cycle {
                id,
                into: to.parent,
            });
        }
        self.check_slot(to.parent, to.pane)?;
        let from = self
            .placement(id)
            .ok_or(DesignError::NodeNotFound { id })?;

        if let Some(slot) = self
            .nodes
            .get_mut(&from.parent)
            .and_then(|p| p.slot_mut(from.pane))
        {
            slot.remove(from.index);
        }
        let slot = self
            .node_mut(to.parent)?
            .slot_mut(to.pane)
            .ok_or(DesignError::NoSuchPane {
                id: to.parent,
                pane: to.pane.unwrap_or_default(),
            })?;
        slot.insert(to.index.min(slot.len()), id);
        self.node_mut(id)?.set_parent(Some(to.parent));
        Ok(from)
    }

    /// Moves `id` to the end of `new_parent`'s slot.
    pub fn reparent(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
        pane: Option<usize>,
    ) -> Result<Placement, DesignError> {
        let index = self
            .nodes
            .get(&new_parent)
            .and_then(|n| n.slot(pane))
            .map(|s| s.len())
            .unwrap_or_default();
        self.move_to(
            id,
            Placement {
                parent: new_parent,
                pane,
                index,
            },
        )
    }

    pub fn properties(&self, id: NodeId) -> Result<Vec<DesignableProperty>, DesignError> {
        Ok(designable_properties(self.node(id)?.kind()))
    }

    fn property(&self, id: NodeId, key: PropertyKey) -> Result<DesignableProperty, DesignError> {
        self.properties(id)?
            .into_iter()
            .find(|p| p.key() == key)
            .ok_or(DesignError::UnknownProperty {
                id,
                property: key.to_string(),
            })
    }

    pub fn get_property(&self, id: NodeId, key: PropertyKey) -> Result<PropertyValue, DesignError> {
        let prop = self.property(id, key)?;
        Ok(prop.get(self.node(id)?))
    }

    /// Sets a property, returning the previous value.
    pub fn set_property(
        &mut self,
        id: NodeId,
        key: PropertyKey,
        value: PropertyValue,
    ) -> Result<PropertyValue, DesignError> {
        let prop = self.property(id, key)?;
        let node = self.node_mut(id)?;
        let old = prop.get(node);
        prop.set(node, value)?;
        Ok(old)
    }

    /// Shows pane `pane` of `id`. Only the shown pane takes part in hit
    /// testing and rubber-band selection.
    pub fn set_active_pane(&mut self, id: NodeId, pane: usize) -> Result<(), DesignError> {
        if self.node_mut(id)?.set_active_pane(pane) {
            Ok(())
        } else {
            Err(DesignError::NoSuchPane { id, pane })
        }
    }

    /// Children of `id` that are on screen: ordinary children plus the
    /// active pane's.
    pub fn visible_designs(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| n.visible_designs())
            .unwrap_or_default()
    }

    /// Screen frame of `id` with every descriptor resolved.
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        FrameResolver::new(self).frame(id)
    }

    /// Area available to the children of `id`: its frame less any border.
    pub fn content_area(&self, id: NodeId) -> Option<Rect> {
        FrameResolver::new(self).content_area(id)
    }

    /// The deepest design under `point`, skipping `exclude` and its subtree.
    pub fn hit_test(&self, point: Point, exclude: Option<NodeId>) -> Option<Hit> {
        let frames = FrameResolver::new(self);
        let node = self.deepest_at(&frames, self.root, point, exclude, false)?;
        let is_lower_right = frames
            .frame(node)
            .and_then(|f| f.lower_right())
            .is_some_and(|corner| corner == point);
        Some(Hit {
            node,
            is_lower_right,
        })
    }

    /// The deepest container under `point`, skipping `exclude` and its
    /// subtree.
    pub fn container_at(&self, point: Point, exclude: Option<NodeId>) -> Option<NodeId> {
        self.deepest_at(&FrameResolver::new(self), self.root, point, exclude, true)
    }

    fn deepest_at(
        &self,
        frames: &FrameResolver<'_>,
        id: NodeId,
        point: Point,
        exclude: Option<NodeId>,
        containers_only: bool,
    ) -> Option<NodeId> {
        if Some(id) == exclude {
            return None;
        }
        let node = self.nodes.get(&id)?;
        if !frames.frame(id)?.contains(point) {
            return None;
        }
        // later designs draw on top
        for child in node.visible_designs().into_iter().rev() {
            if let Some(hit) = self.deepest_at(frames, child, point, exclude, containers_only) {
                return Some(hit);
            }
        }
        if containers_only && !node.kind().is_container() {
            return None;
        }
        Some(id)
    }
}

/// One layout pass over a tree. Every frame is computed at most once; a
/// reference back to a design still being laid out resolves as missing.
struct FrameResolver<'t> {
    tree: &'t DesignTree,
    resolved: RefCell<HashMap<NodeId, Rect>>,
    visiting: RefCell<HashSet<NodeId>>,
}

impl<'t> FrameResolver<'t> {
    fn new(tree: &'t DesignTree) -> Self {
        Self {
            tree,
            resolved: RefCell::new(HashMap::new()),
            visiting: RefCell::new(HashSet::new()),
        }
    }

    fn frame(&self, id: NodeId) -> Option<Rect> {
        if let Some(frame) = self.resolved.borrow().get(&id) {
            return Some(*frame);
        }
        if !self.visiting.borrow_mut().insert(id) {
            tracing::warn!("Layout of design {} references itself", id);
            return None;
        }
        let frame = self.compute(id);
        self.visiting.borrow_mut().remove(&id);
        if let Some(frame) = frame {
            self.resolved.borrow_mut().insert(id, frame);
        }
        frame
    }

    fn content_area(&self, id: NodeId) -> Option<Rect> {
        let node = self.tree.nodes.get(&id)?;
        let frame = self.frame(id)?;
        if node.kind().has_border() {
            Some(frame.inset(1))
        } else {
            Some(frame)
        }
    }

    fn compute(&self, id: NodeId) -> Option<Rect> {
        let node = self.tree.nodes.get(&id)?;
        let area = match node.parent() {
            Some(parent) => self.content_area(parent)?,
            None => self.tree.screen,
        };
        let frame_of = |target: NodeId| self.frame(target);
        let w = node.widget();
        let x = w.x.resolve(Axis::Horizontal, &area, &frame_of);
        let y = w.y.resolve(Axis::Vertical, &area, &frame_of);
        let width = w.width.resolve(Axis::Horizontal, &area, x);
        let height = w.height.resolve(Axis::Vertical, &area, y);
        Some(Rect::new(x, y, width, height))
    }
}
