//! Menu bar content and its restructuring primitives.
//!
//! A bar holds top-level menus; each menu holds entries, and an entry is
//! either a plain item or a submenu with children of its own. Every entry
//! carries a [`MenuItemId`] unique within the bar.
//!
//! The primitives here only rearrange data. The undoable commands that use
//! them live in `commands::menu`.

use serde::{Deserialize, Serialize};
use termdesigner_core::MenuItemId;

/// One entry of a menu: an item, or a submenu when `children` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub id: MenuItemId,
    pub title: String,
    children: Option<Vec<MenuEntry>>,
}

impl MenuEntry {
    fn item(id: MenuItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            children: None,
        }
    }

    fn submenu(id: MenuItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            children: Some(Vec::new()),
        }
    }

    pub fn is_submenu(&self) -> bool {
        self.children.is_some()
    }

    /// Children of a submenu; empty for a plain item.
    pub fn children(&self) -> &[MenuEntry] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Content of a menu bar widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MenuBarModel {
    menus: Vec<MenuEntry>,
    next_id: u32,
}

impl MenuBarModel {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> MenuItemId {
        self.next_id += 1;
        MenuItemId::new(self.next_id)
    }

    /// Top-level menus in bar order.
    pub fn menus(&self) -> &[MenuEntry] {
        &self.menus
    }

    /// Appends a top-level menu.
    pub fn add_menu(&mut self, title: impl Into<String>) -> MenuItemId {
        let id = self.mint();
        self.menus.push(MenuEntry::submenu(id, title));
        id
    }

    /// Appends an item to a menu or submenu. Returns `None` when `parent`
    /// is unknown or is a plain item.
    pub fn add_item(&mut self, parent: MenuItemId, title: impl Into<String>) -> Option<MenuItemId> {
        let path = self.path_of(parent)?;
        if !self.entry(&path)?.is_submenu() {
            return None;
        }
        let id = self.mint();
        self.children_at_mut(&path)?.push(MenuEntry::item(id, title));
        Some(id)
    }

    pub fn find(&self, id: MenuItemId) -> Option<&MenuEntry> {
        let path = self.path_of(id)?;
        self.entry(&path)
    }

    /// The menu or submenu directly containing `id`.
    pub fn parent_of(&self, id: MenuItemId) -> Option<MenuItemId> {
        let path = self.path_of(id)?;
        if path.len() < 2 {
            return None;
        }
        self.entry(&path[..path.len() - 1]).map(|e| e.id)
    }

    /// Index of `id` within its containing list.
    pub fn index_of(&self, id: MenuItemId) -> Option<usize> {
        self.path_of(id).and_then(|p| p.last().copied())
    }

    /// Every entry id, depth first.
    pub fn all_ids(&self) -> Vec<MenuItemId> {
        fn walk(entries: &[MenuEntry], out: &mut Vec<MenuItemId>) {
            for e in entries {
                out.push(e.id);
                walk(e.children(), out);
            }
        }
        let mut out = Vec::new();
        walk(&self.menus, &mut out);
        out
    }

    /// Number of nesting levels below the bar at which `id` sits; 1 for a
    /// top-level menu, 2 for an item directly inside a menu.
    pub fn depth_of(&self, id: MenuItemId) -> Option<usize> {
        self.path_of(id).map(|p| p.len())
    }

    fn path_of(&self, id: MenuItemId) -> Option<Vec<usize>> {
        fn search(entries: &[MenuEntry], id: MenuItemId, path: &mut Vec<usize>) -> bool {
            for (i, e) in entries.iter().enumerate() {
                path.push(i);
                if e.id == id || search(e.children(), id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }
        let mut path = Vec::new();
        search(&self.menus, id, &mut path).then_some(path)
    }

    fn entry(&self, path: &[usize]) -> Option<&MenuEntry> {
        let (first, rest) = path.split_first()?;
        let mut current = self.menus.get(*first)?;
        for i in rest {
            current = current.children.as_ref()?.get(*i)?;
        }
        Some(current)
    }

    /// The list that an entry at `path` would index into when `path` is the
    /// path of its parent. An empty `path` is the bar itself.
    fn children_at_mut(&mut self, path: &[usize]) -> Option<&mut Vec<MenuEntry>> {
        let mut list = &mut self.menus;
        for i in path {
            list = list.get_mut(*i)?.children.as_mut()?;
        }
        Some(list)
    }

    /// Demotes `id` into the submenu of the entry directly above it,
    /// promoting that entry to a submenu first when needed.
    ///
    /// Returns `None` when nothing is above, or `id` is a top-level menu.
    /// Otherwise returns whether the entry above was promoted.
    pub fn move_right(&mut self, id: MenuItemId) -> Option<bool> {
        let path = self.path_of(id)?;
        if path.len() < 2 {
            return None;
        }
        let (index, parent) = path.split_last()?;
        let index = *index;
        if index == 0 {
            return None;
        }
        let list = self.children_at_mut(parent)?;
        let promoted = list[index - 1].children.is_none();
        let moved = list.remove(index);
        let above = &mut list[index - 1];
        above.children.get_or_insert_with(Vec::new).push(moved);
        Some(promoted)
    }

    /// Moves `id` out of its submenu to directly after that submenu.
    ///
    /// Returns `None` when `id` sits directly in a top-level menu; otherwise
    /// the index it occupied inside the submenu.
    pub fn move_left(&mut self, id: MenuItemId) -> Option<usize> {
        let path = self.path_of(id)?;
        if path.len() < 3 {
            return None;
        }
        let index = path[path.len() - 1];
        let submenu_index = path[path.len() - 2];
        let grandparent = &path[..path.len() - 2];

        let moved = self.children_at_mut(&path[..path.len() - 1])?.remove(index);
        self.children_at_mut(grandparent)?
            .insert(submenu_index + 1, moved);
        Some(index)
    }

    /// Moves `id` into `submenu` at `index`, clamped to its length.
    pub fn move_into(&mut self, id: MenuItemId, submenu: MenuItemId, index: usize) -> bool {
        let Some(source) = self.path_of(id) else {
            return false;
        };
        let Some(target) = self.path_of(submenu) else {
            return false;
        };
        // refuse to move an entry into itself or its own descendants
        if target.starts_with(&source) || !self.entry(&target).is_some_and(|e| e.is_submenu()) {
            return false;
        }
        let Some((last, parent)) = source.split_last() else {
            return false;
        };
        let Some(list) = self.children_at_mut(parent) else {
            return false;
        };
        let moved = list.remove(*last);
        // removal may have shifted the target path
        let Some(target) = self.path_of(submenu) else {
            return false;
        };
        match self.children_at_mut(&target) {
            Some(children) => {
                let at = index.min(children.len());
                children.insert(at, moved);
                true
            }
            None => false,
        }
    }

    /// Turns an empty submenu back into a plain item.
    pub fn collapse(&mut self, id: MenuItemId) -> bool {
        let Some(path) = self.path_of(id) else {
            return false;
        };
        if path.len() < 2 {
            return false;
        }
        let (last, parent) = match path.split_last() {
            Some(split) => split,
            None => return false,
        };
        match self.children_at_mut(parent).and_then(|l| l.get_mut(*last)) {
            Some(entry) if entry.children().is_empty() => {
                entry.children = None;
                true
            }
            _ => false,
        }
    }

    /// Swaps `id` with its neighbour above (`up`) or below.
    pub fn move_vertical(&mut self, id: MenuItemId, up: bool) -> bool {
        let Some(path) = self.path_of(id) else {
            return false;
        };
        let Some((&index, parent)) = path.split_last() else {
            return false;
        };
        let Some(list) = self.children_at_mut(parent) else {
            return false;
        };
        let other = if up {
            match index.checked_sub(1) {
                Some(i) => i,
                None => return false,
            }
        } else {
            index + 1
        };
        if other >= list.len() {
            return false;
        }
        list.swap(index, other);
        true
    }

    /// Multi-line outline, one entry per line indented by depth.
    pub fn outline(&self) -> String {
        fn walk(entries: &[MenuEntry], depth: usize, out: &mut Vec<String>) {
            for e in entries {
                out.push(format!("{}{}", "  ".repeat(depth), e.title));
                walk(e.children(), depth + 1, out);
            }
        }
        let mut lines = Vec::new();
        walk(&self.menus, 0, &mut lines);
        lines.join("\n")
    }
}
