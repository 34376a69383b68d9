//! # grid-core
//!
//! Occupancy and collision engine for a two-dimensional grid of rectangular
//! items.
//!
//! This crate is used by the editor application and by anything else that
//! needs to answer "can this item go here?".  It has zero dependencies on OS
//! APIs, UI frameworks, or input devices.
//!
//! # Architecture overview (for beginners)
//!
//! Picture a dashboard made of tiles: a 3×3 board where a tile may span
//! several cells (a "wide" tile covers two columns, a "tall" tile covers two
//! rows).  Tiles must never overlap, and while the user drags a tile around
//! the board shows a preview of where it would land.
//!
//! This crate (`grid-core`) is the part of that system with actual rules.  It
//! defines:
//!
//! - **`domain::geometry`** – The value types: a cell [`Position`], an extent
//!   [`Size`], a payload-free [`Spot`] (position + size) and a placed
//!   [`Item`] (spot + caller payload).
//!
//! - **`domain::config`** – Grid dimensions ([`GridConfig`]) and the partial
//!   form used to re-initialise a grid over defaults.
//!
//! - **`domain::grid`** – The [`Grid`] engine itself: two boolean matrices
//!   (confirmed occupation and transient hover), the list of placed items, and
//!   every operation that reads or changes them.
//!
//! Everything the user actually sees (pixels, pointer events, animations) is
//! the caller's job.  The caller asks the engine, the engine answers.

// Rust will look for the module in src/domain/mod.rs.
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `grid_core::Grid` instead of `grid_core::domain::grid::Grid`.
pub use domain::config::{GridConfig, PartialGridConfig};
pub use domain::geometry::{Item, Position, Size, Spot};
pub use domain::grid::{CellType, Grid, GridError, MovingItem};
