//! Headless script driver.
//!
//! Replays drag gestures written as text commands (see [`command`]) against a
//! board, printing the result of each command.  A bad line is reported and
//! skipped; the rest of the script still runs.
//!
//! # Example
//!
//! ```text
//! $ printf 'new 2x2\nover 1 1\nshow\ndrop 1 1\nshow\n' | grid-editor
//! picked up 2x2 (2x2)
//! over (1, 1): free
//! ...
//! .++
//! .++
//! dropped at (1, 1), grid grew by 3 rows
//! ...
//! .##
//! .##
//! ...
//! ...
//! ...
//! ```

pub mod command;
pub mod render;

use std::io::{BufRead, Write};

use grid_core::{Grid, GridError, Size};
use thiserror::Error;
use tracing::warn;

use crate::application::drag_session::{DragError, DragSession, Tile};
use crate::infrastructure::storage::EditorConfig;

pub use command::{parse_line, Command, TileShape};
pub use render::{render_text, Snapshot};

/// Error type for script parsing and execution.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {command} {expected}")]
    Usage {
        command: String,
        expected: &'static str,
    },

    #[error("not a cell index: {0}")]
    BadNumber(String),

    #[error("{value} is above the limit of {max}")]
    TooLarge { value: usize, max: usize },

    #[error("no palette entry named {0:?}")]
    UnknownTile(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Drag(#[from] DragError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Counters reported after a script finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands that completed.
    pub executed: usize,
    /// Lines that failed to parse or execute.
    pub failed: usize,
}

/// Owns one board and one drag session and applies commands to them.
pub struct ScriptRunner {
    config: EditorConfig,
    grid: Grid<Tile>,
    session: DragSession,
}

impl ScriptRunner {
    /// Builds an empty board from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if the configured board is empty.
    pub fn new(config: EditorConfig) -> Result<Self, GridError> {
        let grid = Grid::new(config.grid_config()?)?;
        let session = DragSession::new(config.growth_policy());
        Ok(Self {
            config,
            grid,
            session,
        })
    }

    /// The board being edited.
    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    /// Runs every line of `input`, writing results to `out` and per-line
    /// errors to `err`.
    ///
    /// # Errors
    ///
    /// Only I/O failures on `input`, `out`, or `err` abort the run.
    pub fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> Result<RunSummary, ScriptError>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let mut summary = RunSummary::default();
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let result = parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(&command, out).map(Some),
                None => Ok(None),
            });
            match result {
                Ok(Some(())) => summary.executed += 1,
                Ok(None) => {}
                Err(ScriptError::Io(e)) => return Err(ScriptError::Io(e)),
                Err(e) => {
                    summary.failed += 1;
                    warn!(line = index + 1, error = %e, "script command failed");
                    writeln!(err, "line {}: {e}", index + 1)?;
                }
            }
        }
        Ok(summary)
    }

    /// Applies a single command.
    ///
    /// # Errors
    ///
    /// Returns the drag or lookup error that stopped the command.  The board
    /// is unchanged in that case.
    pub fn execute<W: Write>(&mut self, command: &Command, out: &mut W) -> Result<(), ScriptError> {
        match command {
            Command::New(shape) => {
                let (size, label) = self.resolve_shape(shape)?;
                writeln!(out, "picked up {label} ({}x{})", size.rows(), size.cols())?;
                self.session.begin_new(&mut self.grid, size, Tile::new(label));
            }
            Command::Pick(position) => {
                let size = self.session.begin_move(&mut self.grid, *position)?;
                let label = self
                    .session
                    .tile_in_hand()
                    .map(|tile| tile.label.as_str())
                    .unwrap_or_default();
                writeln!(
                    out,
                    "picked up {label} ({}x{}) from ({}, {})",
                    size.rows(),
                    size.cols(),
                    position.row,
                    position.col
                )?;
            }
            Command::Over(position) => {
                let free = self.session.drag_over(&mut self.grid, *position)?;
                let verdict = if free { "free" } else { "blocked" };
                writeln!(out, "over ({}, {}): {verdict}", position.row, position.col)?;
            }
            Command::Drop(position) => {
                let outcome = self.session.drop_at(&mut self.grid, *position)?;
                write!(out, "dropped at ({}, {})", position.row, position.col)?;
                if outcome.grown_by > 0 {
                    write!(out, ", grid grew by {} rows", outcome.grown_by)?;
                }
                writeln!(out)?;
            }
            Command::Cancel => {
                if self.session.cancel(&mut self.grid) {
                    writeln!(out, "cancelled")?;
                } else {
                    writeln!(out, "nothing to cancel")?;
                }
            }
            Command::Remove(position) => {
                let removed = self.session.remove_at(&mut self.grid, *position)?;
                writeln!(out, "removed {}", removed.payload.label)?;
            }
            Command::Grow(rows) => {
                self.grid.add_rows(*rows)?;
                let cfg = self.grid.config();
                writeln!(out, "grid is now {}x{}", cfg.rows, cfg.cols)?;
            }
            Command::Show => {
                write!(out, "{}", render_text(&self.grid))?;
            }
            Command::Json => {
                serde_json::to_writer(&mut *out, &Snapshot::of(&self.grid))?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn resolve_shape(&self, shape: &TileShape) -> Result<(Size, String), ScriptError> {
        match shape {
            TileShape::Sized(size) => Ok((*size, format!("{}x{}", size.rows(), size.cols()))),
            TileShape::Named(label) => {
                let entry = self
                    .config
                    .palette_entry(label)
                    .ok_or_else(|| ScriptError::UnknownTile(label.clone()))?;
                Ok((entry.size()?, entry.label.clone()))
            }
        }
    }
}
