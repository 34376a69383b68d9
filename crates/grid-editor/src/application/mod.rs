//! Application layer use cases for the grid editor.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure placement rules in `grid-core`) and the infrastructure (config files,
//! script input, terminal output).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "drag this
//!   tile onto the board and grow the board if it is getting full").
//! - **Receive their collaborators explicitly**: the grid is passed into each
//!   call rather than looked up from global state.
//! - **Contain no file system access and no terminal I/O**.
//!
//! # Sub-modules
//!
//! - **`drag_session`** – Drives one drag at a time: pick a tile up, preview
//!   it over the board, drop or cancel, and remove tiles on click.

pub mod drag_session;
