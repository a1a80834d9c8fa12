//! # TermDesigner
//!
//! Interactive designer core for terminal user interface layouts:
//! - Design tree of live widgets with stable node ids
//! - Undoable editing: add, delete, property edits, drag, resize, menu moves
//! - Layout descriptors (`Pos`/`Dim`) with canonical source text
//! - Copy/paste with relative layout migration
//! - Rubber-band selection and pointer gestures
//!
//! ## Architecture
//!
//! TermDesigner is organized as a workspace with multiple crates:
//!
//! 1. **termdesigner-core** - Ids, cell geometry, colour schemes, errors
//! 2. **termdesigner-editor** - Design tree, commands, clipboard, gestures, export
//! 3. **termdesigner-settings** - Designer configuration persisted as JSON/TOML
//! 4. **termdesigner** - This facade, re-exporting the crates above

pub use termdesigner_editor::{clone, commands, export, gesture, layout, menu, selection, tree};

pub use termdesigner_core::{
    Attribute, Color, ColorScheme, DesignError, DocumentId, Error, LayoutError, MenuItemId,
    NodeId, Point, Rect, Result, WidgetHandle,
};

pub use termdesigner_editor::{
    parse_dim, parse_pos, Clipboard, Command, CommandStack, DefaultWidgetFactory, DesignContext,
    DesignNode, DesignTree, Dim, Document, ExportedNode, GestureOutcome, MenuBarModel,
    PointerAction, PointerEvent, Pos, PropertyKey, PropertyValue, Side, Widget, WidgetFactory,
    WidgetKind,
};

pub use termdesigner_settings::{ConfigError, DesignerConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(())
}

/// Initialize logging as one JSON object per line, for piping into log
/// collectors.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).json())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    Ok(())
}
