//! Grid dimensions.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the source document, so a
//! configuration table that only sets `cols = 4` still yields a full
//! [`GridConfig`] with the default row count and row height.

use serde::{Deserialize, Serialize};

use super::grid::GridError;

/// Dimensions of a grid plus its display row height.
///
/// `row_height` is carried for the benefit of renderers; the engine never
/// reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of rows (vertical extent).  Grows with [`crate::Grid::add_rows`].
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Number of columns (horizontal extent).
    #[serde(default = "default_cols")]
    pub cols: usize,
    /// Height of a row in display units.
    #[serde(default = "default_row_height")]
    pub row_height: u32,
}

/// A configuration where any field may be left out.
///
/// Missing fields take their value from [`GridConfig::default`] when the
/// partial config is applied with [`PartialGridConfig::resolve`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialGridConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cols: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<u32>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_rows() -> usize {
    3
}
fn default_cols() -> usize {
    3
}
fn default_row_height() -> u32 {
    80
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            row_height: default_row_height(),
        }
    }
}

impl GridConfig {
    /// Creates a config with the given dimensions and the default row height.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self {
            rows,
            cols,
            ..Self::default()
        }
        .validated()
    }

    /// Returns `self` if both dimensions are at least 1.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] otherwise.
    pub fn validated(self) -> Result<Self, GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

impl PartialGridConfig {
    /// Merges the supplied fields over [`GridConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if the merged dimensions contain a
    /// zero.
    pub fn resolve(&self) -> Result<GridConfig, GridError> {
        let defaults = GridConfig::default();
        GridConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            cols: self.cols.unwrap_or(defaults.cols),
            row_height: self.row_height.unwrap_or(defaults.row_height),
        }
        .validated()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_config_default_is_three_by_three() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.rows, 3);
        assert_eq!(cfg.cols, 3);
        assert_eq!(cfg.row_height, 80);
        assert_eq!(cfg.cell_count(), 9);
    }

    #[test]
    fn test_grid_config_new_rejects_zero_rows() {
        assert_eq!(
            GridConfig::new(0, 3),
            Err(GridError::ZeroDimension { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn test_partial_config_keeps_default_row_height() {
        // Arrange
        let partial = PartialGridConfig {
            rows: Some(2),
            cols: Some(2),
            row_height: None,
        };

        // Act
        let cfg = partial.resolve().expect("valid dimensions");

        // Assert
        assert_eq!(cfg.rows, 2);
        assert_eq!(cfg.cols, 2);
        assert_eq!(cfg.row_height, GridConfig::default().row_height);
    }

    #[test]
    fn test_empty_partial_config_resolves_to_defaults() {
        let cfg = PartialGridConfig::default().resolve().unwrap();
        assert_eq!(cfg, GridConfig::default());
    }

    #[test]
    fn test_partial_config_rejects_zero_cols() {
        let partial = PartialGridConfig {
            cols: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            partial.resolve(),
            Err(GridError::ZeroDimension { cols: 0, .. })
        ));
    }

    #[test]
    fn test_grid_config_missing_fields_take_serde_defaults() {
        let cfg: GridConfig = serde_json::from_str(r#"{"cols": 5}"#).expect("deserialize");
        assert_eq!(cfg.rows, 3);
        assert_eq!(cfg.cols, 5);
        assert_eq!(cfg.row_height, 80);
    }
}
