//! Designable properties: the per-kind list of values a user may edit, each
//! a getter/setter pair over the design node.

use crate::layout::{Dim, Pos};
use crate::menu::MenuBarModel;
use crate::node::{ContentPane, DesignNode};
use crate::widget::{TableData, WidgetKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use termdesigner_core::DesignError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKey {
    Text,
    X,
    Y,
    Width,
    Height,
    Visible,
    Checked,
    Table,
    Tabs,
    Menus,
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A property value, typed by what the property holds.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Pos(Pos),
    Dim(Dim),
    Bool(bool),
    Table(TableData),
    Tabs(Vec<String>),
    Menus(MenuBarModel),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Text(_) => "text",
            PropertyValue::Pos(_) => "position",
            PropertyValue::Dim(_) => "size",
            PropertyValue::Bool(_) => "boolean",
            PropertyValue::Table(_) => "table",
            PropertyValue::Tabs(_) => "tab list",
            PropertyValue::Menus(_) => "menu",
        }
    }

    /// An independent copy; structured data such as tables is duplicated
    /// row by row.
    pub fn duplicate(&self) -> Self {
        match self {
            PropertyValue::Table(t) => PropertyValue::Table(t.duplicate()),
            other => other.clone(),
        }
    }
}

type Getter = fn(&DesignNode) -> PropertyValue;
type Setter = fn(&mut DesignNode, PropertyValue) -> Result<(), DesignError>;

/// One editable property of a design.
#[derive(Clone, Copy)]
pub struct DesignableProperty {
    key: PropertyKey,
    getter: Getter,
    setter: Setter,
}

impl fmt::Debug for DesignableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesignableProperty")
            .field("key", &self.key)
            .finish()
    }
}

impl DesignableProperty {
    pub fn key(&self) -> PropertyKey {
        self.key
    }

    pub fn get(&self, node: &DesignNode) -> PropertyValue {
        (self.getter)(node)
    }

    pub fn set(&self, node: &mut DesignNode, value: PropertyValue) -> Result<(), DesignError> {
        (self.setter)(node, value)
    }
}

fn mismatch(key: PropertyKey, value: &PropertyValue) -> DesignError {
    DesignError::PropertyType {
        property: key.to_string(),
        value: value.type_name().to_string(),
    }
}

const TEXT: DesignableProperty = DesignableProperty {
    key: PropertyKey::Text,
    getter: |n| PropertyValue::Text(n.widget().text.clone()),
    setter: |n, v| match v {
        PropertyValue::Text(s) => {
            n.widget_mut().text = s;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Text, &other)),
    },
};

const X: DesignableProperty = DesignableProperty {
    key: PropertyKey::X,
    getter: |n| PropertyValue::Pos(n.widget().x.clone()),
    setter: |n, v| match v {
        PropertyValue::Pos(p) => {
            n.widget_mut().x = p;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::X, &other)),
    },
};

const Y: DesignableProperty = DesignableProperty {
    key: PropertyKey::Y,
    getter: |n| PropertyValue::Pos(n.widget().y.clone()),
    setter: |n, v| match v {
        PropertyValue::Pos(p) => {
            n.widget_mut().y = p;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Y, &other)),
    },
};

const WIDTH: DesignableProperty = DesignableProperty {
    key: PropertyKey::Width,
    getter: |n| PropertyValue::Dim(n.widget().width.clone()),
    setter: |n, v| match v {
        PropertyValue::Dim(d) => {
            n.widget_mut().width = d;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Width, &other)),
    },
};

const HEIGHT: DesignableProperty = DesignableProperty {
    key: PropertyKey::Height,
    getter: |n| PropertyValue::Dim(n.widget().height.clone()),
    setter: |n, v| match v {
        PropertyValue::Dim(d) => {
            n.widget_mut().height = d;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Height, &other)),
    },
};

const VISIBLE: DesignableProperty = DesignableProperty {
    key: PropertyKey::Visible,
    getter: |n| PropertyValue::Bool(n.widget().visible),
    setter: |n, v| match v {
        PropertyValue::Bool(b) => {
            n.widget_mut().visible = b;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Visible, &other)),
    },
};

const CHECKED: DesignableProperty = DesignableProperty {
    key: PropertyKey::Checked,
    getter: |n| PropertyValue::Bool(n.widget().checked),
    setter: |n, v| match v {
        PropertyValue::Bool(b) => {
            n.widget_mut().checked = b;
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Checked, &other)),
    },
};

const TABLE: DesignableProperty = DesignableProperty {
    key: PropertyKey::Table,
    getter: |n| PropertyValue::Table(n.widget().table.clone().unwrap_or_default()),
    setter: |n, v| match v {
        PropertyValue::Table(t) => {
            n.widget_mut().table = Some(t);
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Table, &other)),
    },
};

const MENUS: DesignableProperty = DesignableProperty {
    key: PropertyKey::Menus,
    getter: |n| PropertyValue::Menus(n.widget().menu.clone().unwrap_or_default()),
    setter: |n, v| match v {
        PropertyValue::Menus(m) => {
            n.widget_mut().menu = Some(m);
            Ok(())
        }
        other => Err(mismatch(PropertyKey::Menus, &other)),
    },
};

const TABS: DesignableProperty = DesignableProperty {
    key: PropertyKey::Tabs,
    getter: |n| PropertyValue::Tabs(n.panes().iter().map(|p| p.title.clone()).collect()),
    setter: set_tabs,
};

/// Renames existing panes in order, appends new empty ones, and drops
/// trailing panes only while they are empty.
fn set_tabs(node: &mut DesignNode, value: PropertyValue) -> Result<(), DesignError> {
    let titles = match value {
        PropertyValue::Tabs(t) => t,
        other => return Err(mismatch(PropertyKey::Tabs, &other)),
    };
    if let Some(busy) = node.panes.iter().skip(titles.len()).find(|p| !p.children.is_empty()) {
        return Err(DesignError::Invariant(format!(
            "tab '{}' of {} still hosts designs",
            busy.title,
            node.name()
        )));
    }
    node.panes.truncate(titles.len());
    for (i, title) in titles.into_iter().enumerate() {
        match node.panes.get_mut(i) {
            Some(pane) => pane.title = title,
            None => node.panes.push(ContentPane::new(title)),
        }
    }
    if node.active_pane() >= node.panes.len() {
        node.set_active_pane(node.panes.len().saturating_sub(1));
    }
    Ok(())
}

/// The properties a design of `kind` exposes, in display order.
pub fn designable_properties(kind: WidgetKind) -> Vec<DesignableProperty> {
    let mut props = Vec::with_capacity(8);
    match kind {
        WidgetKind::TabView | WidgetKind::TableView | WidgetKind::MenuBar => {}
        _ => props.push(TEXT),
    }
    props.extend([X, Y, WIDTH, HEIGHT, VISIBLE]);
    match kind {
        WidgetKind::CheckBox => props.push(CHECKED),
        WidgetKind::TableView => props.push(TABLE),
        WidgetKind::TabView => props.push(TABS),
        WidgetKind::MenuBar => props.push(MENUS),
        _ => {}
    }
    props
}
