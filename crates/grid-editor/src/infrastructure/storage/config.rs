//! TOML-based configuration for the grid editor.
//!
//! The editor reads `grid-editor.toml` from the working directory unless a
//! different path is given on the command line.  Example:
//!
//! ```toml
//! [grid]
//! rows = 3
//! cols = 4
//!
//! [editor]
//! log_level = "debug"
//! growth_rows = 2
//!
//! [[palette]]
//! label = "chart"
//! rows = 2
//! cols = 2
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file.  This allows
//! the editor to start with no config file at all, and lets a file set only
//! the handful of values it cares about.
//!
//! The file configures the board; it never stores placed tiles.

use std::path::{Path, PathBuf};

use grid_core::{GridConfig, GridError, PartialGridConfig, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::drag_session::{GrowthPolicy, MAX_GROWTH_ROWS};

/// Row height used by the editor when the `[grid]` table does not set one.
pub const EDITOR_ROW_HEIGHT: u32 = 40;

/// File name looked up in the working directory by default.
pub const DEFAULT_CONFIG_FILE: &str = "grid-editor.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The parsed values describe an impossible grid or tile.
    #[error("invalid config: {0}")]
    Invalid(#[from] GridError),

    /// Two palette entries share a label.
    #[error("duplicate palette label: {0}")]
    DuplicateLabel(String),

    /// `growth_rows` is above [`MAX_GROWTH_ROWS`].
    #[error("growth_rows = {0} exceeds the limit of {MAX_GROWTH_ROWS}")]
    GrowthTooLarge(usize),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Board dimensions; any field may be omitted.
    #[serde(default)]
    pub grid: PartialGridConfig,
    #[serde(default)]
    pub editor: EditorSection,
    /// Tile shapes available for new drags.
    #[serde(default = "default_palette")]
    pub palette: Vec<PaletteEntry>,
}

/// General editor behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorSection {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to append rows when a drop fills the last row.
    #[serde(default = "default_true")]
    pub auto_grow: bool,
    /// Rows appended per growth step.
    #[serde(default = "default_growth_rows")]
    pub growth_rows: usize,
}

/// A named tile shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaletteEntry {
    pub label: String,
    #[serde(default = "default_one")]
    pub rows: usize,
    #[serde(default = "default_one")]
    pub cols: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_true() -> bool {
    true
}
fn default_growth_rows() -> usize {
    3
}
fn default_one() -> usize {
    1
}
fn default_palette() -> Vec<PaletteEntry> {
    vec![PaletteEntry {
        label: "tile".to_string(),
        rows: 1,
        cols: 2,
    }]
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: PartialGridConfig::default(),
            editor: EditorSection::default(),
            palette: default_palette(),
        }
    }
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            auto_grow: default_true(),
            growth_rows: default_growth_rows(),
        }
    }
}

impl PaletteEntry {
    /// The validated tile size.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroSize`] if either dimension is zero.
    pub fn size(&self) -> Result<Size, GridError> {
        Size::new(self.rows, self.cols)
    }
}

impl EditorConfig {
    /// The effective grid config: the `[grid]` table over the grid defaults,
    /// with the editor's own row height when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] for a zero row or column count.
    pub fn grid_config(&self) -> Result<GridConfig, GridError> {
        PartialGridConfig {
            row_height: self.grid.row_height.or(Some(EDITOR_ROW_HEIGHT)),
            ..self.grid
        }
        .resolve()
    }

    /// Growth settings for the drag session.
    pub fn growth_policy(&self) -> GrowthPolicy {
        GrowthPolicy {
            enabled: self.editor.auto_grow,
            rows: self.editor.growth_rows,
        }
    }

    /// Looks up a palette entry by label.
    pub fn palette_entry(&self, label: &str) -> Option<&PaletteEntry> {
        self.palette.iter().find(|entry| entry.label == label)
    }

    /// Checks that the grid and every palette shape are well formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero dimensions and
    /// [`ConfigError::DuplicateLabel`] for repeated palette labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid_config()?;
        if self.editor.growth_rows > MAX_GROWTH_ROWS {
            return Err(ConfigError::GrowthTooLarge(self.editor.growth_rows));
        }
        for (index, entry) in self.palette.iter().enumerate() {
            entry.size()?;
            if self.palette[..index].iter().any(|e| e.label == entry.label) {
                return Err(ConfigError::DuplicateLabel(entry.label.clone()));
            }
        }
        Ok(())
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Parses and validates config text.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the TOML is malformed, or the errors of
/// [`EditorConfig::validate`].
pub fn parse_config(content: &str) -> Result<EditorConfig, ConfigError> {
    let cfg: EditorConfig = toml::from_str(content)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Loads `EditorConfig` from `path`, returning `EditorConfig::default()` if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and the validation errors
/// of [`EditorConfig::validate`].
pub fn load_config(path: &Path) -> Result<EditorConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EditorConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_editor_config_default_grid_is_three_by_three_with_editor_row_height() {
        let grid = EditorConfig::default().grid_config().unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.row_height, EDITOR_ROW_HEIGHT);
    }

    #[test]
    fn test_editor_config_default_palette_has_one_wide_tile() {
        let cfg = EditorConfig::default();
        let entry = cfg.palette_entry("tile").expect("default tile");
        assert_eq!(entry.size().unwrap(), Size::new(1, 2).unwrap());
    }

    #[test]
    fn test_editor_section_default_grows_by_three() {
        let policy = EditorConfig::default().growth_policy();
        assert!(policy.enabled);
        assert_eq!(policy.rows, 3);
    }

    // ── Parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_partial_grid_table_fills_missing_fields() {
        // Arrange
        let text = "[grid]\ncols = 5\n";

        // Act
        let cfg = parse_config(text).expect("valid config");

        // Assert
        let grid = cfg.grid_config().unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 5);
        assert_eq!(grid.row_height, EDITOR_ROW_HEIGHT);
        assert_eq!(cfg.editor.log_level, "info");
    }

    #[test]
    fn test_parse_explicit_row_height_wins() {
        let cfg = parse_config("[grid]\nrow_height = 120\n").unwrap();
        assert_eq!(cfg.grid_config().unwrap().row_height, 120);
    }

    #[test]
    fn test_parse_palette_replaces_default_palette() {
        let text = r#"
            [[palette]]
            label = "chart"
            rows = 2
            cols = 2

            [[palette]]
            label = "note"
        "#;
        let cfg = parse_config(text).unwrap();

        assert_eq!(cfg.palette.len(), 2);
        assert!(cfg.palette_entry("tile").is_none());
        assert_eq!(cfg.palette_entry("note").unwrap().size().unwrap(), Size::UNIT);
    }

    #[test]
    fn test_parse_rejects_zero_grid_rows() {
        let result = parse_config("[grid]\nrows = 0\n");
        assert!(matches!(
            result,
            Err(ConfigError::Invalid(GridError::ZeroDimension { rows: 0, .. }))
        ));
    }

    #[test]
    fn test_parse_rejects_zero_sized_palette_entry() {
        let text = "[[palette]]\nlabel = \"flat\"\nrows = 0\n";
        assert!(matches!(
            parse_config(text),
            Err(ConfigError::Invalid(GridError::ZeroSize { .. }))
        ));
    }

    #[test]
    fn test_parse_rejects_duplicate_palette_labels() {
        let text = "[[palette]]\nlabel = \"a\"\n[[palette]]\nlabel = \"a\"\n";
        assert!(matches!(
            parse_config(text),
            Err(ConfigError::DuplicateLabel(label)) if label == "a"
        ));
    }

    #[test]
    fn test_parse_rejects_oversized_growth_step() {
        let text = "[editor]\ngrowth_rows = 1000000\n";
        assert!(matches!(
            parse_config(text),
            Err(ConfigError::GrowthTooLarge(1_000_000))
        ));
        assert!(parse_config(&format!("[editor]\ngrowth_rows = {MAX_GROWTH_ROWS}\n")).is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_toml() {
        assert!(matches!(parse_config("[grid"), Err(ConfigError::Parse(_))));
    }

    // ── File loading ──────────────────────────────────────────────────────────

    #[test]
    fn test_load_config_missing_file_returns_default() {
        let path = std::env::temp_dir().join(format!("grid-editor-missing-{}.toml", uuid::Uuid::new_v4()));
        let cfg = load_config(&path).expect("missing file is not an error");
        assert_eq!(cfg, EditorConfig::default());
    }

    #[test]
    fn test_load_config_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("grid-editor-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[editor]\nauto_grow = false\n").expect("write temp config");

        let cfg = load_config(&path);
        let _ = std::fs::remove_file(&path);

        assert!(!cfg.expect("valid config").growth_policy().enabled);
    }

    #[test]
    fn test_editor_config_round_trips_through_toml() {
        let mut cfg = EditorConfig::default();
        cfg.grid.cols = Some(6);
        cfg.editor.growth_rows = 1;

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&text).expect("deserialize");

        assert_eq!(cfg, restored);
    }
}
