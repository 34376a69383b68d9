//! Configuration file access.

pub mod config;

pub use config::{load_config, ConfigError, EditorConfig};
