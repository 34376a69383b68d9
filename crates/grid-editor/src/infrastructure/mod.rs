//! Infrastructure layer for the grid editor.
//!
//! Everything that touches the outside world lives here:
//!
//! - **`storage`** – Reads the TOML configuration file.
//! - **`script`**  – Parses line-oriented drag commands and renders the board
//!   as text or JSON.

pub mod script;
pub mod storage;
