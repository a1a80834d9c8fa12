//! # TermDesigner Core
//!
//! Core types shared by every TermDesigner crate.
//! Provides the stable identifiers used by the design tree arena, cell
//! geometry for hit-testing, colour schemes for highlighting, and the
//! error types used across the workspace.

pub mod error;
pub mod geometry;
pub mod ids;
pub mod scheme;

pub use error::{DesignError, Error, LayoutError, Result};
pub use geometry::{Point, Rect};
pub use ids::{DocumentId, MenuItemId, NodeId, WidgetHandle};
pub use scheme::{Attribute, Color, ColorScheme};
