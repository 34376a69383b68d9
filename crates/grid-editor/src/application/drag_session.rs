//! DragSessionUseCase: turns drag gestures into grid engine calls.
//!
//! A UI (or the script driver in this crate) reports four kinds of events
//! while the user rearranges the board:
//!
//! ```text
//! begin_new / begin_move  ──►  drag_over …  ──►  drop_at
//!                                          └──►  cancel
//! ```
//!
//! - `begin_new` picks a fresh tile from the palette; it has a size but no
//!   position yet.
//! - `begin_move` picks up a tile already on the board.  The tile keeps its
//!   cells until it is dropped elsewhere, but it may be dropped onto a spot
//!   that overlaps where it currently sits.
//! - `drag_over` previews the tile at the pointer cell and reports whether a
//!   drop there would succeed.
//! - `drop_at` commits the tile.  When the board's last row is no longer
//!   empty afterwards, the board grows so there is always room below.
//!
//! # Explicit dependency passing
//!
//! The session never owns the grid.  Each call receives `&mut Grid<Tile>`
//! from the caller, so the same session type works for any number of boards
//! and tests can build a fresh grid per case.

use grid_core::{Grid, GridError, Item, MovingItem, Position, Size, Spot};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Payload attached to every tile on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Unique identifier, assigned when the tile leaves the palette.
    pub id: Uuid,
    /// Human-readable name shown on the tile.
    pub label: String,
}

impl Tile {
    /// Creates a tile with a fresh v4 UUID.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }
}

/// Error type for drag operations.
#[derive(Debug, Error, PartialEq)]
pub enum DragError {
    /// A drag event arrived while nothing was being dragged.
    #[error("no drag in progress")]
    NoDrag,

    /// No placed tile covers the given cell.
    #[error("no tile at row {}, col {}", .0.row, .0.col)]
    NothingAt(Position),

    /// The grid refused the drop.
    #[error("drop rejected: {0}")]
    Rejected(#[from] GridError),
}

/// Upper bound on rows added in one growth step.
pub const MAX_GROWTH_ROWS: usize = 1024;

/// How the board grows after a drop fills its last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Whether to grow at all.
    pub enabled: bool,
    /// Rows appended per growth step.
    pub rows: usize,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            rows: 3,
        }
    }
}

/// Result of a successful drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Where the tile landed.
    pub position: Position,
    /// Rows appended because the drop filled the last row (0 if none).
    pub grown_by: usize,
}

/// Drives one drag at a time against a caller-supplied grid.
#[derive(Debug, Default)]
pub struct DragSession {
    growth: GrowthPolicy,
    /// Payload of the tile in hand, cloned from the board for moves.
    in_hand: Option<Tile>,
}

impl DragSession {
    pub fn new(growth: GrowthPolicy) -> Self {
        Self {
            growth,
            in_hand: None,
        }
    }

    /// Returns `true` while a tile is in hand.
    pub fn is_dragging(&self) -> bool {
        self.in_hand.is_some()
    }

    /// The tile currently in hand.
    pub fn tile_in_hand(&self) -> Option<&Tile> {
        self.in_hand.as_ref()
    }

    /// Starts dragging a new tile of `size`.  Replaces any drag in progress.
    pub fn begin_new(&mut self, grid: &mut Grid<Tile>, size: Size, tile: Tile) {
        debug!(label = %tile.label, rows = size.rows(), cols = size.cols(), "drag started (new tile)");
        grid.unhover_grid();
        grid.set_moving_item(MovingItem::Unplaced { size });
        self.in_hand = Some(tile);
    }

    /// Starts dragging the placed tile covering `position`.
    ///
    /// Returns the size of the picked tile.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NothingAt`] if no tile covers `position`; any
    /// drag in progress is left as it was.
    pub fn begin_move(&mut self, grid: &mut Grid<Tile>, position: Position) -> Result<Size, DragError> {
        let (origin, tile) = grid
            .item_at(position)
            .map(|item| (item.spot(), item.payload.clone()))
            .ok_or(DragError::NothingAt(position))?;

        debug!(label = %tile.label, from = ?origin.position, "drag started (placed tile)");
        grid.unhover_grid();
        grid.set_moving_item(MovingItem::Placed { origin });
        self.in_hand = Some(tile);
        Ok(origin.size)
    }

    /// Previews the tile in hand anchored at `position`.
    ///
    /// Returns whether dropping there would succeed.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NoDrag`] if nothing is being dragged.
    pub fn drag_over(&mut self, grid: &mut Grid<Tile>, position: Position) -> Result<bool, DragError> {
        let spot = self.spot_in_hand(grid, position)?;
        grid.hover_item_spot(&spot);
        Ok(grid.is_item_spot_available(&spot))
    }

    /// Drops the tile in hand at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NoDrag`] if nothing is being dragged, or
    /// [`DragError::Rejected`] if the spot is taken or leaves the board.  A
    /// rejected drop keeps the tile in hand so the user can try elsewhere.
    pub fn drop_at(&mut self, grid: &mut Grid<Tile>, position: Position) -> Result<DropOutcome, DragError> {
        let spot = self.spot_in_hand(grid, position)?;
        let tile = self.in_hand.clone().ok_or(DragError::NoDrag)?;

        grid.add_item(Item::new(spot.position, spot.size, tile))?;
        self.in_hand = None;

        let mut grown_by = 0;
        if self.growth.enabled && !grid.is_last_row_empty() {
            match grid.add_rows(self.growth.rows) {
                Ok(()) => grown_by = self.growth.rows,
                Err(e) => warn!(error = %e, "tile dropped but grid not grown"),
            }
        }

        info!(row = position.row, col = position.col, grown_by, "tile dropped");
        Ok(DropOutcome { position, grown_by })
    }

    /// Abandons the drag in progress, if any.
    ///
    /// Returns `true` if a tile was in hand.
    pub fn cancel(&mut self, grid: &mut Grid<Tile>) -> bool {
        grid.clear_moving_item();
        grid.unhover_grid();
        let was_dragging = self.in_hand.take().is_some();
        if was_dragging {
            debug!("drag cancelled");
        }
        was_dragging
    }

    /// Removes the placed tile covering `position`.
    ///
    /// If that tile was being dragged, the drag is cancelled as well.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NothingAt`] if no tile covers `position`.
    pub fn remove_at(&mut self, grid: &mut Grid<Tile>, position: Position) -> Result<Item<Tile>, DragError> {
        let spot = grid
            .item_at(position)
            .map(|item| item.spot())
            .ok_or(DragError::NothingAt(position))?;

        if grid.moving_item().and_then(|m| m.origin()) == Some(spot) {
            self.cancel(grid);
        }

        let removed = grid.remove_item(&spot).ok_or(DragError::NothingAt(position))?;
        info!(label = %removed.payload.label, row = spot.position.row, col = spot.position.col, "tile removed");
        Ok(removed)
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn spot_in_hand(&self, grid: &Grid<Tile>, position: Position) -> Result<Spot, DragError> {
        if self.in_hand.is_none() {
            return Err(DragError::NoDrag);
        }
        let moving = grid.moving_item().ok_or(DragError::NoDrag)?;
        Ok(Spot::new(position, moving.size()))
    }
}
