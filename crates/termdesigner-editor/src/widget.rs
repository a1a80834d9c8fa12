//! Widgets being designed and the factory that builds them.

use crate::layout::{Dim, Pos};
use crate::menu::MenuBarModel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use termdesigner_core::{ColorScheme, DesignError, WidgetHandle};

/// The widget kinds the designer can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetKind {
    Window,
    FrameView,
    View,
    TabView,
    Label,
    Button,
    TextField,
    CheckBox,
    TableView,
    MenuBar,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 10] = [
        WidgetKind::Window,
        WidgetKind::FrameView,
        WidgetKind::View,
        WidgetKind::TabView,
        WidgetKind::Label,
        WidgetKind::Button,
        WidgetKind::TextField,
        WidgetKind::CheckBox,
        WidgetKind::TableView,
        WidgetKind::MenuBar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Window => "Window",
            WidgetKind::FrameView => "FrameView",
            WidgetKind::View => "View",
            WidgetKind::TabView => "TabView",
            WidgetKind::Label => "Label",
            WidgetKind::Button => "Button",
            WidgetKind::TextField => "TextField",
            WidgetKind::CheckBox => "CheckBox",
            WidgetKind::TableView => "TableView",
            WidgetKind::MenuBar => "MenuBar",
        }
    }

    /// Whether designs of this kind accept new child designs and rubber-band
    /// selection.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            WidgetKind::Window | WidgetKind::FrameView | WidgetKind::View | WidgetKind::TabView
        )
    }

    /// Whether the container draws a one-cell border around its content.
    pub fn has_border(&self) -> bool {
        matches!(
            self,
            WidgetKind::Window | WidgetKind::FrameView | WidgetKind::TabView
        )
    }

    /// Titles of the content panes a fresh design of this kind starts with.
    pub fn default_panes(&self) -> Vec<String> {
        match self {
            WidgetKind::TabView => vec!["Tab1".to_string(), "Tab2".to_string()],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rows and columns backing a table view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Copies the schema, then every row, into an independent table.
    pub fn duplicate(&self) -> Self {
        let mut copy = Self::new(self.columns.clone());
        for row in &self.rows {
            copy.add_row(row.iter().cloned().collect());
        }
        copy
    }
}

/// A live widget. Owned by the design node that wraps it.
///
/// Deliberately not `Clone`: a copy would share the handle. Duplicates are
/// built through a [`WidgetFactory`] and have their properties copied over.
#[derive(Debug)]
pub struct Widget {
    handle: WidgetHandle,
    kind: WidgetKind,
    pub text: String,
    pub visible: bool,
    pub checked: bool,
    pub x: Pos,
    pub y: Pos,
    pub width: Dim,
    pub height: Dim,
    /// `None` inherits the parent's scheme.
    pub scheme: Option<Rc<ColorScheme>>,
    pub table: Option<TableData>,
    pub menu: Option<MenuBarModel>,
}

impl Widget {
    /// Builds a widget with a fresh handle and empty content.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            handle: WidgetHandle::new(),
            kind,
            text: String::new(),
            visible: true,
            checked: false,
            x: Pos::default(),
            y: Pos::default(),
            width: Dim::default(),
            height: Dim::default(),
            scheme: None,
            table: None,
            menu: None,
        }
    }

    pub fn handle(&self) -> WidgetHandle {
        self.handle
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }
}

/// Builds default-constructed widgets by kind.
pub trait WidgetFactory {
    fn create(&self, kind: WidgetKind) -> Result<Widget, DesignError>;
}

/// Factory producing the stock look of each kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWidgetFactory;

impl WidgetFactory for DefaultWidgetFactory {
    fn create(&self, kind: WidgetKind) -> Result<Widget, DesignError> {
        let mut w = Widget::new(kind);
        match kind {
            WidgetKind::Window => {
                w.text = "Window".to_string();
                w.width = Dim::fill(0);
                w.height = Dim::fill(0);
            }
            WidgetKind::FrameView | WidgetKind::View => {
                w.text = kind.name().to_string();
                w.width = Dim::sized(20);
                w.height = Dim::sized(6);
            }
            WidgetKind::TabView => {
                w.width = Dim::sized(30);
                w.height = Dim::sized(8);
            }
            WidgetKind::Label => {
                w.text = "Heya".to_string();
                w.width = Dim::sized(4);
            }
            WidgetKind::Button => {
                w.text = "Ok".to_string();
                w.width = Dim::sized(6);
            }
            WidgetKind::TextField => {
                w.width = Dim::sized(10);
            }
            WidgetKind::CheckBox => {
                w.text = "Check".to_string();
                w.width = Dim::sized(9);
            }
            WidgetKind::TableView => {
                w.width = Dim::sized(20);
                w.height = Dim::sized(5);
                let mut table = TableData::new(vec!["Column1".to_string(), "Column2".to_string()]);
                table.add_row(vec![String::new(), String::new()]);
                w.table = Some(table);
            }
            WidgetKind::MenuBar => {
                w.width = Dim::fill(0);
                let mut bar = MenuBarModel::new();
                let file = bar.add_menu("_File");
                bar.add_item(file, "Do Something");
                w.menu = Some(bar);
            }
        }
        tracing::debug!("Created {} widget {}", kind, w.handle());
        Ok(w)
    }
}
