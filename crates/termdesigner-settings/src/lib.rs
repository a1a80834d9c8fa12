//! TermDesigner Settings Crate
//!
//! Handles designer configuration: history depth, selection highlight,
//! gesture tuning and naming, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{DesignerConfig, GestureSettings, HistorySettings, NamingSettings, SelectionSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
