//! Text and JSON views of the board.

use grid_core::{CellType, Grid, GridConfig, Item};
use serde::Serialize;

use crate::application::drag_session::Tile;

/// Everything a front end needs to draw the board.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub config: &'a GridConfig,
    pub items: &'a [Item<Tile>],
    pub cells: Vec<Vec<CellType>>,
}

impl<'a> Snapshot<'a> {
    pub fn of(grid: &'a Grid<Tile>) -> Self {
        Self {
            config: grid.config(),
            items: grid.items(),
            cells: grid.cells(),
        }
    }
}

fn glyph(cell: CellType) -> char {
    match cell {
        CellType::Empty => '.',
        CellType::Occupied => '#',
        CellType::Hovered => '+',
    }
}

/// Renders one line per row: `.` empty, `#` occupied, `+` hovered.
pub fn render_text<P>(grid: &Grid<P>) -> String {
    let config = grid.config();
    let mut out = String::with_capacity(config.cell_count() + config.rows);
    for row in grid.cells() {
        out.extend(row.into_iter().map(glyph));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_core::{Position, Size, Spot};

    #[test]
    fn test_render_text_uses_one_glyph_per_state() {
        let mut grid: Grid<Tile> = Grid::default();
        grid.add_item(Item::new(Position::new(0, 0), Size::new(1, 2).unwrap(), Tile::new("a")))
            .unwrap();
        grid.hover_item_spot(&Spot::new(Position::new(2, 2), Size::UNIT));

        assert_eq!(render_text(&grid), "##.\n...\n..+\n");
    }

    #[test]
    fn test_snapshot_serializes_labels_and_items() {
        let mut grid: Grid<Tile> = Grid::default();
        grid.add_item(Item::new(Position::new(1, 1), Size::UNIT, Tile::new("dot")))
            .unwrap();

        let value = serde_json::to_value(Snapshot::of(&grid)).unwrap();

        assert_eq!(value["config"]["rows"], 3);
        assert_eq!(value["items"][0]["payload"]["label"], "dot");
        assert_eq!(value["items"][0]["position"]["row"], 1);
        assert_eq!(value["cells"][1][1], "occupated");
        assert_eq!(value["cells"][0][0], "empty");
    }
}
