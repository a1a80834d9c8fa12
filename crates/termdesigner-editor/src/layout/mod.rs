//! Layout descriptors: one axis of a widget's position (`Pos`) or size (`Dim`).
//!
//! Descriptors are small expression trees, composed the same way layout code
//! is written by hand (`Pos.Percent(50) + 2`). [`Pos::classify`] and
//! [`Dim::classify`] reduce an expression to a single kind, base value and
//! additive offset; compositions with no such reduction classify as
//! `Unrecognized`.
//!
//! ## Canonical text
//!
//! ```text
//! 5                      absolute
//! Pos.Percent(50) + 2    percent with offset
//! Dim.Fill(5) - 2        fill with negative offset
//! Pos.Right(label1) + 2  relative to another design
//! ```
//!
//! Parsing canonical text with [`parse_pos`] / [`parse_dim`] reproduces the
//! same classification.

mod code;
mod dim;
mod pos;

pub use code::{parse_dim, parse_pos};
pub use dim::Dim;
pub use pos::Pos;

use serde::{Deserialize, Serialize};
use termdesigner_core::{NodeId, Rect};

/// The edge or centre line of a referent that a relative position anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
    CenterX,
    CenterY,
}

impl Side {
    pub const ALL: [Side; 6] = [
        Side::Left,
        Side::Right,
        Side::Top,
        Side::Bottom,
        Side::CenterX,
        Side::CenterY,
    ];

    /// Function name used in canonical text (`Pos.<name>(...)`).
    pub fn code_name(&self) -> &'static str {
        match self {
            Side::Left => "Left",
            Side::Right => "Right",
            Side::Top => "Top",
            Side::Bottom => "Bottom",
            Side::CenterX => "CenterX",
            Side::CenterY => "CenterY",
        }
    }

    /// Inverse of [`Side::code_name`]; `X` and `Y` are accepted as aliases
    /// of `Left` and `Top`.
    pub fn from_code_name(name: &str) -> Option<Side> {
        match name {
            "Left" | "X" => Some(Side::Left),
            "Right" => Some(Side::Right),
            "Top" | "Y" => Some(Side::Top),
            "Bottom" => Some(Side::Bottom),
            "CenterX" => Some(Side::CenterX),
            "CenterY" => Some(Side::CenterY),
            _ => None,
        }
    }

    /// The coordinate of this side of `frame`.
    pub fn of(&self, frame: &Rect) -> i32 {
        match self {
            Side::Left => frame.x,
            Side::Right => frame.right(),
            Side::Top => frame.y,
            Side::Bottom => frame.bottom(),
            Side::CenterX => frame.x + frame.width / 2,
            Side::CenterY => frame.y + frame.height / 2,
        }
    }
}

/// Which axis a descriptor lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub(crate) fn origin(&self, area: &Rect) -> i32 {
        match self {
            Axis::Horizontal => area.x,
            Axis::Vertical => area.y,
        }
    }

    pub(crate) fn extent(&self, area: &Rect) -> i32 {
        match self {
            Axis::Horizontal => area.width,
            Axis::Vertical => area.height,
        }
    }
}

/// Kind of a classified position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosType {
    Absolute,
    Percent,
    Fill,
    Relative,
    Unrecognized,
}

/// Kind of a classified size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimType {
    Absolute,
    Percent,
    Fill,
    Unrecognized,
}

/// A position reduced to `(kind, value, referent, side, offset)`.
///
/// `value` holds whole cells for absolute and fill kinds; every `i32` is
/// exact in an `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosInfo {
    pub kind: PosType,
    pub value: f64,
    pub referent: Option<NodeId>,
    pub side: Option<Side>,
    pub offset: i32,
}

impl PosInfo {
    pub(crate) fn simple(kind: PosType, value: f64) -> Self {
        Self {
            kind,
            value,
            referent: None,
            side: None,
            offset: 0,
        }
    }

    pub(crate) fn unrecognized() -> Self {
        Self::simple(PosType::Unrecognized, 0.0)
    }

    /// `value` as whole cells.
    pub fn cells(&self) -> i32 {
        self.value as i32
    }
}

/// A size reduced to `(kind, value, offset)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimInfo {
    pub kind: DimType,
    pub value: f64,
    pub offset: i32,
}

impl DimInfo {
    pub(crate) fn unrecognized() -> Self {
        Self {
            kind: DimType::Unrecognized,
            value: 0.0,
            offset: 0,
        }
    }

    /// `value` as whole cells.
    pub fn cells(&self) -> i32 {
        self.value as i32
    }
}

/// Splits a signed offset into the magnitude and operator of a `Combine`.
/// `i32::MIN` has no positive counterpart and is kept as an added negative.
pub(crate) fn offset_parts(offset: i32) -> (i32, bool) {
    match offset.checked_abs() {
        Some(n) => (n, offset < 0),
        None => (offset, false),
    }
}
