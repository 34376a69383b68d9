//! Domain entities for the grid layout engine.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from OS APIs, input libraries, storage drivers, or UI
//!   frameworks.
//! - Can be compiled and tested on any platform without any external setup.
//! - Defines the data types and operations that make the system uniquely what it
//!   is: here, a board of cells where rectangular items are placed without
//!   overlapping and the board grows as it fills up.
//!
//! Code in outer layers (drag controllers, script drivers, renderers) depends on
//! the domain, but the domain never depends on them.

/// Grid dimensions and their defaults.
pub mod config;

/// Cell coordinates, extents, and placed items.
pub mod geometry;

/// The occupancy engine, the core domain concept.
///
/// See [`grid::Grid`] for the main type.
pub mod grid;
