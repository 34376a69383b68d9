//! Grid occupancy engine.
//!
//! The engine keeps the placed items of one grid and answers, for any
//! candidate spot, whether an item may be put there.  It is the single source
//! of truth for spatial state: callers never flip cells themselves, they go
//! through the operations below.
//!
//! # Two matrices (for beginners)
//!
//! The grid keeps two `rows × cols` boolean matrices side by side:
//!
//! - **occupation** – `true` where a placed item covers the cell.  Footprints
//!   of two placed items never share a cell, so every `true` belongs to
//!   exactly one item.
//! - **hover** – `true` where a drag preview currently sits.  Hover is
//!   advisory only: it never blocks a placement and never frees a cell.
//!
//! The derived [`CellType`] view folds both into one value per cell, with
//! hover winning over occupation.
//!
//! # A typical drag
//!
//! ```text
//! set_moving_item()  ──►  hover_item_spot() …  ──►  add_item()   (drop)
//!                                             └──►  clear_moving_item() +
//!                                                   unhover_grid() (cancel)
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::config::{GridConfig, PartialGridConfig};
use super::geometry::{Item, Position, Size, Spot};

/// Errors produced by the grid domain.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The candidate spot leaves the grid or covers an occupied cell.
    #[error("cannot add grid item: overlap")]
    Overlap,

    /// An item size with a zero dimension was requested.
    #[error("invalid item size {rows}x{cols}: both dimensions must be at least 1")]
    ZeroSize { rows: usize, cols: usize },

    /// A grid configuration with a zero dimension was requested.
    #[error("invalid grid dimensions {rows}x{cols}: both dimensions must be at least 1")]
    ZeroDimension { rows: usize, cols: usize },

    /// Growing the grid would overflow its row count.
    #[error("cannot add {count} rows to a grid of {rows}: row count overflows")]
    RowOverflow { rows: usize, count: usize },
}

/// Display state of a single cell.
///
/// Serializes to the same stable label returned by [`CellType::label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CellType {
    #[serde(rename = "empty")]
    Empty,
    #[serde(rename = "occupated")]
    Occupied,
    #[serde(rename = "hovered")]
    Hovered,
}

impl CellType {
    /// Stable string label for display binding.
    pub fn label(&self) -> &'static str {
        match self {
            CellType::Empty => "empty",
            CellType::Occupied => "occupated",
            CellType::Hovered => "hovered",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The item currently being dragged, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovingItem {
    /// An item already on the grid, identified by the spot it occupies.
    Placed { origin: Spot },
    /// A new item that has no position yet.
    Unplaced { size: Size },
}

impl MovingItem {
    /// Extent of the dragged item.
    pub fn size(&self) -> Size {
        match self {
            MovingItem::Placed { origin } => origin.size,
            MovingItem::Unplaced { size } => *size,
        }
    }

    /// The spot the item is being dragged away from, for placed items.
    pub fn origin(&self) -> Option<Spot> {
        match self {
            MovingItem::Placed { origin } => Some(*origin),
            MovingItem::Unplaced { .. } => None,
        }
    }
}

/// A grid of cells holding non-overlapping rectangular items.
///
/// `P` is the caller's payload type; the engine stores it alongside each item
/// and never looks at it.
///
/// The grid is single-threaded: wrap it in a lock if several threads need
/// it.
#[derive(Debug, Clone)]
pub struct Grid<P> {
    config: GridConfig,
    /// Placed items in insertion order.
    items: Vec<Item<P>>,
    /// `occupied[row][col]` is `true` when a placed item covers the cell.
    occupied: Vec<Vec<bool>>,
    /// `hovered[row][col]` is `true` when the drag preview covers the cell.
    hovered: Vec<Vec<bool>>,
    moving: Option<MovingItem>,
}

impl<P> Default for Grid<P> {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            items: Vec::new(),
            occupied: blank_matrix(&config),
            hovered: blank_matrix(&config),
            moving: None,
            config,
        }
    }
}

impl<P> Grid<P> {
    /// Creates an empty grid with the given dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if `config` has zero rows or
    /// columns.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let config = config.validated()?;
        Ok(Self {
            items: Vec::new(),
            occupied: blank_matrix(&config),
            hovered: blank_matrix(&config),
            moving: None,
            config,
        })
    }

    /// Re-initialises the grid from a partial config merged over the defaults.
    ///
    /// Both matrices are reallocated.  Placed items whose footprint still fits
    /// the new dimensions are reserved again; items that no longer fit are
    /// dropped.  Any pending hover is cleared.
    ///
    /// Returns the effective config.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroDimension`] if the merged dimensions contain
    /// a zero.  The grid is left untouched in that case.
    pub fn init_config(&mut self, partial: PartialGridConfig) -> Result<GridConfig, GridError> {
        let config = partial.resolve()?;
        self.config = config;
        self.occupied = blank_matrix(&config);
        self.hovered = blank_matrix(&config);

        let before = self.items.len();
        self.items.retain(|item| fits(&config, &item.spot()));
        let evicted = before - self.items.len();
        if evicted > 0 {
            warn!(
                evicted,
                rows = config.rows,
                cols = config.cols,
                "items no longer fit the grid and were removed"
            );
        }

        if let Some(origin) = self.moving.and_then(|m| m.origin()) {
            if self.index_of(&origin).is_none() {
                self.moving = None;
            }
        }

        self.resync();
        debug!(rows = config.rows, cols = config.cols, "grid re-initialised");
        Ok(config)
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// Current grid configuration.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Placed items in insertion order.
    pub fn items(&self) -> &[Item<P>] {
        &self.items
    }

    /// The raw occupation matrix, indexed `[row][col]`.
    pub fn cells_occupied(&self) -> &[Vec<bool>] {
        &self.occupied
    }

    /// Derived per-cell state, indexed `[row][col]`.
    ///
    /// Priority is hovered, then occupied, then empty.
    pub fn cells(&self) -> Vec<Vec<CellType>> {
        self.occupied
            .iter()
            .zip(&self.hovered)
            .map(|(occupied_row, hovered_row)| {
                occupied_row
                    .iter()
                    .zip(hovered_row)
                    .map(|(&occupied, &hovered)| cell_state(occupied, hovered))
                    .collect()
            })
            .collect()
    }

    /// State of a single cell.  Positions outside the grid read as
    /// [`CellType::Empty`].
    pub fn cell_type(&self, position: Position) -> CellType {
        if !self.is_in_grid(position) {
            return CellType::Empty;
        }
        cell_state(
            self.occupied[position.row][position.col],
            self.hovered[position.row][position.col],
        )
    }

    /// Returns `true` if `position` lies inside the grid.
    pub fn is_in_grid(&self, position: Position) -> bool {
        position.row < self.config.rows && position.col < self.config.cols
    }

    /// Returns `true` if `position` is inside the grid and not occupied.
    pub fn is_position_available(&self, position: Position) -> bool {
        self.is_in_grid(position) && !self.occupied[position.row][position.col]
    }

    /// Returns `true` if an item could be committed at `spot`.
    ///
    /// Every covered cell must be inside the grid and free.  While a placed
    /// item is being moved, the cells it currently covers count as free, so it
    /// can be dropped onto a spot overlapping its own old footprint.
    ///
    /// Hover state plays no part in the answer.
    pub fn is_item_spot_available(&self, spot: &Spot) -> bool {
        let exempt = self.moving_origin();
        spot.cells().all(|position| {
            self.is_in_grid(position)
                && (self.is_position_available(position)
                    || exempt.is_some_and(|origin| origin.contains(position)))
        })
    }

    /// Lists every cell covered by `spot`, in row-major order.
    pub fn positions_for_item_spot(&self, spot: &Spot) -> Vec<Position> {
        spot.footprint()
    }

    /// Returns `true` if no cell of the bottom row is occupied.
    pub fn is_last_row_empty(&self) -> bool {
        self.occupied
            .last()
            .map_or(true, |row| !row.iter().any(|&occupied| occupied))
    }

    /// Returns the placed item covering `position`, if any.
    pub fn item_at(&self, position: Position) -> Option<&Item<P>> {
        self.items.iter().find(|item| item.spot().contains(position))
    }

    // ── Moving item ───────────────────────────────────────────────────────────

    /// The item currently being dragged.
    pub fn moving_item(&self) -> Option<&MovingItem> {
        self.moving.as_ref()
    }

    /// Marks `item` as the one being dragged, replacing any previous one.
    pub fn set_moving_item(&mut self, item: MovingItem) {
        trace!(?item, "moving item set");
        self.moving = Some(item);
    }

    /// Forgets the dragged item and returns it.
    pub fn clear_moving_item(&mut self) -> Option<MovingItem> {
        self.moving.take()
    }

    // ── Commit operations ─────────────────────────────────────────────────────

    /// Places `item` on the grid.
    ///
    /// Any pending hover is cleared first.  If a placed item is currently
    /// moving, that item is replaced by `item` instead of a new entry being
    /// appended.  Occupation is then rebuilt from the item list and the moving
    /// item is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Overlap`] if the item's spot is not available.
    /// Items, occupation, and the moving item are unchanged in that case.
    pub fn add_item(&mut self, item: Item<P>) -> Result<(), GridError> {
        self.unhover_grid();

        let spot = item.spot();
        if !self.is_item_spot_available(&spot) {
            debug!(?spot, "placement rejected");
            return Err(GridError::Overlap);
        }

        match self.moving_origin().and_then(|origin| self.index_of(&origin)) {
            Some(index) => {
                debug!(from = ?self.items[index].position, to = ?spot.position, "item moved");
                self.items[index] = item;
            }
            None => {
                debug!(?spot, "item added");
                self.reserve_item_spot(&spot);
                self.items.push(item);
            }
        }

        self.resync();
        self.moving = None;
        Ok(())
    }

    /// Removes the placed item covering exactly `spot` and frees its cells.
    ///
    /// Returns the removed item, or `None` (and changes nothing) when no
    /// placed item matches.
    pub fn remove_item(&mut self, spot: &Spot) -> Option<Item<P>> {
        let index = self.index_of(spot)?;
        let item = self.items.remove(index);
        self.empty_item_spot(spot);
        debug!(?spot, "item removed");
        Some(item)
    }

    /// Rewrites the position of the placed item at `spot`.
    ///
    /// This is a low-level primitive: it neither checks that the new spot is
    /// free nor updates occupation.  Returns `false` if no item matches.
    pub fn move_item(&mut self, spot: &Spot, new_position: Position) -> bool {
        match self.index_of(spot) {
            Some(index) => {
                self.items[index].position = new_position;
                true
            }
            None => false,
        }
    }

    /// Marks each position as occupied.
    ///
    /// # Panics
    ///
    /// Panics if a position lies outside the grid.
    pub fn reserve_positions(&mut self, positions: &[Position]) {
        for position in positions {
            self.occupied[position.row][position.col] = true;
        }
    }

    /// Marks each position as free and clears its hover flag.
    ///
    /// # Panics
    ///
    /// Panics if a position lies outside the grid.
    pub fn empty_positions(&mut self, positions: &[Position]) {
        for position in positions {
            self.occupied[position.row][position.col] = false;
            self.hovered[position.row][position.col] = false;
        }
    }

    /// Reserves every cell covered by `spot`.
    pub fn reserve_item_spot(&mut self, spot: &Spot) {
        self.reserve_positions(&spot.footprint());
    }

    /// Frees every cell covered by `spot`.
    pub fn empty_item_spot(&mut self, spot: &Spot) {
        self.empty_positions(&spot.footprint());
    }

    /// Frees every cell of the grid.  Items are not touched.
    pub fn empty_grid(&mut self) {
        clear(&mut self.occupied);
        clear(&mut self.hovered);
    }

    // ── Hover preview ─────────────────────────────────────────────────────────

    /// Replaces the current hover with `positions`.
    ///
    /// Positions outside the hover matrix are skipped.
    pub fn hover_positions(&mut self, positions: &[Position]) {
        self.unhover_grid();
        for position in positions {
            if let Some(cell) = self
                .hovered
                .get_mut(position.row)
                .and_then(|row| row.get_mut(position.col))
            {
                *cell = true;
            }
        }
        trace!(count = positions.len(), "hover updated");
    }

    /// Replaces the current hover with the cells covered by `spot`.
    ///
    /// Only the part of `spot` inside the grid is visited, so a spot larger
    /// than the grid costs no more than the grid itself.
    pub fn hover_item_spot(&mut self, spot: &Spot) {
        self.unhover_grid();
        let rows = spot.position.row..spot.position.row.saturating_add(spot.size.rows());
        let cols = spot.position.col..spot.position.col.saturating_add(spot.size.cols());
        let mut count = 0usize;
        for row in self.hovered.iter_mut().take(rows.end).skip(rows.start) {
            for cell in row.iter_mut().take(cols.end).skip(cols.start) {
                *cell = true;
                count += 1;
            }
        }
        trace!(count, "hover updated");
    }

    /// Clears every hover flag.
    pub fn unhover_grid(&mut self) {
        clear(&mut self.hovered);
    }

    // ── Growth ────────────────────────────────────────────────────────────────

    /// Appends `count` empty rows at the bottom.
    ///
    /// Existing rows, items, and occupation are preserved as they are.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::RowOverflow`] if the new row count does not fit
    /// in a `usize`.  The grid is unchanged in that case.
    pub fn add_rows(&mut self, count: usize) -> Result<(), GridError> {
        if count == 0 {
            return Ok(());
        }
        let rows = self
            .config
            .rows
            .checked_add(count)
            .ok_or(GridError::RowOverflow {
                rows: self.config.rows,
                count,
            })?;
        let cols = self.config.cols;
        self.config.rows = rows;
        self.occupied.resize_with(rows, || vec![false; cols]);
        self.hovered.resize_with(rows, || vec![false; cols]);
        debug!(added = count, rows, "grid grown");
        Ok(())
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn index_of(&self, spot: &Spot) -> Option<usize> {
        self.items.iter().position(|item| item.is_at(spot))
    }

    /// The origin of the moving item, if it still matches a placed item.
    fn moving_origin(&self) -> Option<Spot> {
        self.moving
            .and_then(|moving| moving.origin())
            .filter(|origin| self.index_of(origin).is_some())
    }

    /// Rebuilds occupation from the item list.
    fn resync(&mut self) {
        self.empty_grid();
        for item in &self.items {
            for position in item.spot().cells() {
                self.occupied[position.row][position.col] = true;
            }
        }
    }
}

fn blank_matrix(config: &GridConfig) -> Vec<Vec<bool>> {
    vec![vec![false; config.cols]; config.rows]
}

fn clear(matrix: &mut [Vec<bool>]) {
    for row in matrix {
        row.fill(false);
    }
}

fn cell_state(occupied: bool, hovered: bool) -> CellType {
    if hovered {
        CellType::Hovered
    } else if occupied {
        CellType::Occupied
    } else {
        CellType::Empty
    }
}

/// Returns `true` if every cell of `spot` lies inside a grid of `config`.
fn fits(config: &GridConfig, spot: &Spot) -> bool {
    spot.position.row.saturating_add(spot.size.rows()) <= config.rows
        && spot.position.col.saturating_add(spot.size.cols()) <= config.cols
}

// ── Tests ─────────────────────────────────────────────────────────────────────
