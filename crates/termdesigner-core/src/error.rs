//! Error handling for TermDesigner
//!
//! Provides error types for all layers of the designer:
//! - Design errors (tree structure, commands, widget kinds)
//! - Layout errors (descriptor text parsing)
//!
//! Ordinary user-input edge cases (pasting into itself, moving a menu item
//! with nothing above it) are not errors: commands report them by refusing
//! to execute. These types cover caller bugs and broken invariants.
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::ids::NodeId;
use thiserror::Error;

/// Design tree and command error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// No node with this id is attached to the tree
    #[error("Design node {id} not found")]
    NodeNotFound {
        /// The missing node.
        id: NodeId,
    },

    /// The target node cannot host children
    #[error("Design node {id} ({kind}) is not a container")]
    NotAContainer {
        /// The node that was asked to host a child.
        id: NodeId,
        /// Its widget kind.
        kind: String,
    },

    /// The operation would make a node its own ancestor
    #[error("Moving {id} into {into} would create a cycle")]
    Cycle {
        /// The node being moved.
        id: NodeId,
        /// The requested new parent.
        into: NodeId,
    },

    /// The root node cannot be detached or moved
    #[error("The root design node cannot be {action}")]
    RootImmutable {
        /// What was attempted.
        action: String,
    },

    /// A kind-specific command was bound to a node of another kind
    #[error("Design node {id} wraps a {actual} but this operation requires a {expected}")]
    WrongWidgetKind {
        /// The node the command was constructed for.
        id: NodeId,
        /// The kind the command operates on.
        expected: String,
        /// The kind the node actually wraps.
        actual: String,
    },

    /// A property value did not match the property type
    #[error("Property '{property}' cannot be set from a {value} value")]
    PropertyType {
        /// The property key.
        property: String,
        /// The kind of value supplied.
        value: String,
    },

    /// The widget kind does not expose this property
    #[error("Design node {id} has no property '{property}'")]
    UnknownProperty {
        /// The node.
        id: NodeId,
        /// The property key.
        property: String,
    },

    /// The requested content pane does not exist
    #[error("Design node {id} has no content pane {pane}")]
    NoSuchPane {
        /// The container.
        id: NodeId,
        /// The pane index.
        pane: usize,
    },

    /// The widget factory could not build a widget
    #[error("Widget factory failed to create a {kind}: {reason}")]
    Factory {
        /// The requested widget kind.
        kind: String,
        /// Why construction failed.
        reason: String,
    },

    /// An internal invariant was broken
    #[error("Invariant violated: {0}")]
    Invariant(String),
}

/// Layout descriptor parse error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Nothing to parse
    #[error("Empty layout descriptor")]
    Empty,

    /// The function name is not a known descriptor constructor
    #[error("Unknown layout function '{0}'")]
    UnknownFunction(String),

    /// A numeric argument or offset could not be read
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// A relative descriptor names a node that cannot be resolved
    #[error("Unknown referent '{0}'")]
    UnknownReferent(String),

    /// The text is not a well formed descriptor
    #[error("Malformed layout descriptor '{text}': {reason}")]
    Malformed {
        /// The input text.
        text: String,
        /// What was wrong.
        reason: String,
    },
}

/// Main error type for TermDesigner
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Design error
    #[error(transparent)]
    Design(#[from] DesignError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a design tree error
    pub fn is_design_error(&self) -> bool {
        matches!(self, Error::Design(_))
    }

    /// Check if this is a layout parse error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
