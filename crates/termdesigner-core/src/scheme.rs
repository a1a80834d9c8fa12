//! Colour schemes assigned to widgets.
//!
//! Widgets share schemes through `Rc<ColorScheme>`; highlighting swaps the
//! pointer and restoring puts the exact same pointer back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 16 terminal colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    Gray,
    DarkGray,
    BrightBlue,
    BrightGreen,
    BrightCyan,
    BrightRed,
    BrightMagenta,
    BrightYellow,
    White,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    pub foreground: Color,
    pub background: Color,
}

impl Attribute {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// Attributes for each widget state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub normal: Attribute,
    pub focus: Attribute,
    pub hot_normal: Attribute,
    pub hot_focus: Attribute,
    pub disabled: Attribute,
}

impl ColorScheme {
    /// A scheme using the same attribute for every state.
    pub fn uniform(attribute: Attribute) -> Self {
        Self {
            normal: attribute,
            focus: attribute,
            hot_normal: attribute,
            hot_focus: attribute,
            disabled: attribute,
        }
    }

    /// Scheme applied to widgets that are part of a multi-selection.
    pub fn selection_highlight() -> Self {
        Self::uniform(Attribute::new(Color::BrightGreen, Color::Green))
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            normal: Attribute::new(Color::White, Color::Blue),
            focus: Attribute::new(Color::Black, Color::Gray),
            hot_normal: Attribute::new(Color::BrightYellow, Color::Blue),
            hot_focus: Attribute::new(Color::BrightYellow, Color::Gray),
            disabled: Attribute::new(Color::DarkGray, Color::Blue),
        }
    }
}
