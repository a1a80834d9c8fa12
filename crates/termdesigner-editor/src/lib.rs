//! # TermDesigner Editor
//!
//! The editing core of the designer: a tree of designs wrapping live
//! terminal widgets, and every operation a user can perform on it.
//!
//! ## Core Components
//!
//! ### Model
//! - **Design tree**: arena of design nodes with stable ids, container
//!   slots and tab panes
//! - **Layout descriptors**: `Pos`/`Dim` expressions with classification,
//!   offsetting and canonical text
//! - **Designable properties**: per-kind getter/setter pairs
//! - **Menu bars**: nested menus with restructuring primitives
//!
//! ### Editing
//! - **Commands**: add, delete, property edits, drag, resize and menu moves,
//!   each undoable through the [`CommandStack`]
//! - **Copy/Paste**: recursive cloning with relative layout migration
//! - **Selection**: single selection plus scheme highlighting of many
//! - **Gestures**: rubber band, drag and resize from pointer events
//!
//! ## Architecture
//!
//! ```text
//! Document
//!   ├── DesignContext (tree, selection, highlight, factory)
//!   ├── CommandStack (undo/redo)
//!   ├── Clipboard
//!   └── GestureController
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use termdesigner_editor::{Document, WidgetKind};
//! use termdesigner_settings::DesignerConfig;
//!
//! let mut doc = Document::new(&DesignerConfig::default())?;
//! let root = doc.root();
//! let label = doc.add_view(WidgetKind::Label, root, None)?;
//! doc.undo();
//! ```

pub mod clone;
pub mod commands;
pub mod document;
pub mod export;
pub mod gesture;
pub mod layout;
pub mod menu;
pub mod node;
pub mod property;
pub mod selection;
pub mod tree;
pub mod widget;

pub use clone::{prune_child_views, Clipboard, PasteViews};
pub use commands::{
    AddView, Command, CommandStack, DeleteViews, DragView, MenuBarBinding, MoveMenuItemLeft,
    MoveMenuItemRight, MoveMenuItemVertical, ResizeView, SetProperty,
};
pub use document::{DesignContext, Document, DEFAULT_SCREEN};
pub use export::{export_tree, ExportedNode, ExportedPane};
pub use gesture::{GestureController, GestureOutcome, PointerAction, PointerEvent};
pub use layout::{parse_dim, parse_pos, Axis, Dim, DimInfo, DimType, Pos, PosInfo, PosType, Side};
pub use menu::{MenuBarModel, MenuEntry};
pub use node::{ContentPane, DesignNode};
pub use property::{designable_properties, DesignableProperty, PropertyKey, PropertyValue};
pub use selection::{MultiSelectionManager, SelectionManager};
pub use tree::{DesignTree, DetachedSubtree, Hit, Placement};
pub use widget::{DefaultWidgetFactory, TableData, Widget, WidgetFactory, WidgetKind};
