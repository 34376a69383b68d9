//! Cell coordinates, extents, and placed items.
//!
//! All coordinates are zero-based cell indices: row 0 is the top row and
//! column 0 the leftmost column.  Coordinates are `usize`, so a negative
//! position cannot be expressed at all; the upper bound is not a property of
//! the type but of the grid the position is checked against.

use serde::Serialize;

use super::grid::GridError;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// Row index (vertical), 0 at the top.
    pub row: usize,
    /// Column index (horizontal), 0 at the left.
    pub col: usize,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Position = Position { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The extent of an item, in cells.
///
/// Both dimensions are at least 1; a `Size` can only be built through
/// [`Size::new`], which rejects zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    rows: usize,
    cols: usize,
}

impl Size {
    /// A single cell, the smallest possible item.
    pub const UNIT: Size = Size { rows: 1, cols: 1 };

    /// Creates a size spanning `rows` × `cols` cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ZeroSize`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::ZeroSize { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of rows spanned (vertical extent).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns spanned (horizontal extent).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::UNIT
    }
}

/// Where an item sits and how much room it takes, without its payload.
///
/// Two items with equal spots cover exactly the same cells; this is the key
/// the grid uses to find a placed item again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Spot {
    /// Top-left cell of the spot.
    pub position: Position,
    /// Extent of the spot.
    pub size: Size,
}

impl Spot {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Iterates over the covered cells in row-major order, starting at
    /// `position`.
    ///
    /// # Example
    ///
    /// A 2×2 spot at (0, 0) yields (0,0), (0,1), (1,0), (1,1).
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let Spot { position, size } = *self;
        (0..size.rows()).flat_map(move |r| {
            (0..size.cols()).map(move |c| Position::new(position.row + r, position.col + c))
        })
    }

    /// Collects [`Spot::cells`] into a list: the item's footprint.
    pub fn footprint(&self) -> Vec<Position> {
        let mut cells = Vec::with_capacity(self.size.area());
        cells.extend(self.cells());
        cells
    }

    /// Returns `true` if `position` is one of the covered cells.
    pub fn contains(&self, position: Position) -> bool {
        position.row >= self.position.row
            && position.row < self.position.row + self.size.rows()
            && position.col >= self.position.col
            && position.col < self.position.col + self.size.cols()
    }
}

/// An entity placed (or about to be placed) on the grid.
///
/// `payload` is opaque to the engine: it is carried along with the item and
/// handed back to the caller, never inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item<P> {
    /// Top-left cell of the item.
    pub position: Position,
    /// Extent of the item.
    pub size: Size,
    /// Caller data attached to the item.
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(position: Position, size: Size, payload: P) -> Self {
        Self {
            position,
            size,
            payload,
        }
    }

    /// The payload-free spot this item covers.
    pub fn spot(&self) -> Spot {
        Spot::new(self.position, self.size)
    }

    /// Returns `true` if `other` covers exactly the same cells as this item.
    pub fn is_at(&self, other: &Spot) -> bool {
        self.position == other.position && self.size == other.size
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
