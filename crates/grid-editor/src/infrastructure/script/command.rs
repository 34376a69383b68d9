//! Line-oriented command parser.
//!
//! One command per line; blank lines and anything after `#` are ignored.
//!
//! ```text
//! new wide        # pick a palette tile by label
//! new 2x3         # pick an anonymous tile of 2 rows × 3 cols
//! over 0 1        # preview at row 0, col 1
//! drop 0 1
//! pick 0 1        # pick up the tile covering (0, 1)
//! cancel
//! remove 1 1
//! grow 2
//! show
//! json
//! ```

use grid_core::{Position, Size};

use super::ScriptError;
use crate::application::drag_session::MAX_GROWTH_ROWS;

/// What a `new` command asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileShape {
    /// A palette entry, looked up by label.
    Named(String),
    /// An ad-hoc size written as `<rows>x<cols>`.
    Sized(Size),
}

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(TileShape),
    Pick(Position),
    Over(Position),
    Drop(Position),
    Cancel,
    Remove(Position),
    Grow(usize),
    Show,
    Json,
}

/// Parses one script line.
///
/// Returns `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// Returns a [`ScriptError`] describing the first problem found.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.split('#').next().unwrap_or_default();
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "new" => Command::New(parse_shape(single_arg(name, &args, "<label>|<rows>x<cols>")?)?),
        "pick" => Command::Pick(parse_position(name, &args)?),
        "over" => Command::Over(parse_position(name, &args)?),
        "drop" => Command::Drop(parse_position(name, &args)?),
        "remove" => Command::Remove(parse_position(name, &args)?),
        "grow" => Command::Grow(parse_growth(single_arg(name, &args, "<rows>")?)?),
        "cancel" => no_args(name, &args, Command::Cancel)?,
        "show" => no_args(name, &args, Command::Show)?,
        "json" => no_args(name, &args, Command::Json)?,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn single_arg<'a>(name: &str, args: &[&'a str], expected: &'static str) -> Result<&'a str, ScriptError> {
    match args {
        [arg] => Ok(*arg),
        _ => Err(ScriptError::Usage {
            command: name.to_string(),
            expected,
        }),
    }
}

fn no_args(name: &str, args: &[&str], command: Command) -> Result<Command, ScriptError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ScriptError::Usage {
            command: name.to_string(),
            expected: "no arguments",
        })
    }
}

fn parse_position(name: &str, args: &[&str]) -> Result<Position, ScriptError> {
    match args {
        [row, col] => Ok(Position::new(parse_number(row)?, parse_number(col)?)),
        _ => Err(ScriptError::Usage {
            command: name.to_string(),
            expected: "<row> <col>",
        }),
    }
}

fn parse_number(word: &str) -> Result<usize, ScriptError> {
    word.parse()
        .map_err(|_| ScriptError::BadNumber(word.to_string()))
}

fn parse_growth(word: &str) -> Result<usize, ScriptError> {
    let rows = parse_number(word)?;
    if rows > MAX_GROWTH_ROWS {
        return Err(ScriptError::TooLarge {
            value: rows,
            max: MAX_GROWTH_ROWS,
        });
    }
    Ok(rows)
}

/// `2x3` is a size; anything else is a palette label.
fn parse_shape(word: &str) -> Result<TileShape, ScriptError> {
    let Some((rows, cols)) = word.split_once('x') else {
        return Ok(TileShape::Named(word.to_string()));
    };
    match (rows.parse::<usize>(), cols.parse::<usize>()) {
        (Ok(rows), Ok(cols)) => Ok(TileShape::Sized(Size::new(rows, cols)?)),
        _ => Ok(TileShape::Named(word.to_string())),
    }
}
