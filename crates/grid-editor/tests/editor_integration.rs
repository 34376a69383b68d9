//! Integration tests for the grid editor.
//!
//! These tests wire configuration, drag session, and script runner together
//! through the public API, the same way `main.rs` does.

use grid_core::{CellType, Grid, Position, Size};
use grid_editor::application::drag_session::{DragError, DragSession, GrowthPolicy, Tile};
use grid_editor::infrastructure::script::{RunSummary, ScriptRunner};
use grid_editor::infrastructure::storage::config::parse_config;

const CONFIG: &str = r#"
[grid]
rows = 2
cols = 4

[editor]
growth_rows = 2

[[palette]]
label = "banner"
rows = 1
cols = 4

[[palette]]
label = "square"
rows = 2
cols = 2
"#;

fn run(runner: &mut ScriptRunner, script: &str) -> (String, RunSummary) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let summary = runner
        .run(script.as_bytes(), &mut out, &mut err)
        .expect("in-memory I/O does not fail");
    (String::from_utf8(out).expect("utf-8 output"), summary)
}

#[test]
fn test_configured_board_grows_as_rows_fill() {
    let config = parse_config(CONFIG).expect("valid config");
    let mut runner = ScriptRunner::new(config).expect("valid board");

    let (out, summary) = run(
        &mut runner,
        "new square\ndrop 0 0\nnew banner\ndrop 2 0\nshow\n",
    );

    assert_eq!(summary.failed, 0);
    // The square reaches the last row of the 2-row board, so two rows are added.
    assert!(out.contains("dropped at (0, 0), grid grew by 2 rows"));
    assert!(out.contains("dropped at (2, 0)\n"));
    assert!(out.ends_with("##..\n##..\n####\n....\n"));
    assert_eq!(runner.grid().config().rows, 4);
}

#[test]
fn test_overlapping_drop_is_rejected_and_retry_succeeds() {
    let config = parse_config(CONFIG).expect("valid config");
    let mut runner = ScriptRunner::new(config).expect("valid board");

    let (out, summary) = run(
        &mut runner,
        "new square\ndrop 0 0\nnew square\nover 0 1\ndrop 0 1\ndrop 0 2\n",
    );

    assert_eq!(summary, RunSummary { executed: 5, failed: 1 });
    assert!(out.contains("over (0, 1): blocked"));
    assert_eq!(runner.grid().items().len(), 2);
}

#[test]
fn test_drag_session_full_cycle_on_shared_grid() {
    let mut grid: Grid<Tile> = Grid::default();
    let mut session = DragSession::new(GrowthPolicy::default());
    let wide = Size::new(1, 2).unwrap();

    // place, preview a move, cancel it, then move for real
    session.begin_new(&mut grid, wide, Tile::new("wide"));
    assert!(session.drag_over(&mut grid, Position::new(0, 0)).unwrap());
    session.drop_at(&mut grid, Position::new(0, 0)).unwrap();

    session.begin_move(&mut grid, Position::new(0, 0)).unwrap();
    session.drag_over(&mut grid, Position::new(1, 1)).unwrap();
    assert_eq!(grid.cell_type(Position::new(1, 2)), CellType::Hovered);
    session.cancel(&mut grid);
    assert_eq!(grid.cell_type(Position::new(0, 1)), CellType::Occupied);
    assert_eq!(grid.cell_type(Position::new(1, 2)), CellType::Empty);

    session.begin_move(&mut grid, Position::new(0, 1)).unwrap();
    let outcome = session.drop_at(&mut grid, Position::new(0, 1)).unwrap();

    assert_eq!(outcome.grown_by, 0);
    assert_eq!(grid.items().len(), 1);
    assert_eq!(grid.items()[0].position, Position::new(0, 1));
    assert_eq!(grid.cell_type(Position::new(0, 0)), CellType::Empty);

    // the board is a parameter, so a second board is independent
    let mut other: Grid<Tile> = Grid::default();
    assert_eq!(session.drop_at(&mut other, Position::ORIGIN), Err(DragError::NoDrag));
}
