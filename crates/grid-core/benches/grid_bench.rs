//! Criterion benchmarks for [`Grid`] hot paths.
//!
//! A drag controller calls `hover_item_spot` and `is_item_spot_available` on
//! every pointer move, and `add_item` rebuilds occupation from the full item
//! list on every drop, so these three are measured against growing grids.
//!
//! Run with:
//! ```bash
//! cargo bench --package grid-core --bench grid_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use grid_core::{Grid, GridConfig, Item, MovingItem, Position, Size, Spot};

// ── Grid fixture builders ─────────────────────────────────────────────────────

/// Creates a `rows × 12` grid whose rows are filled with 1×2 tiles, leaving
/// the last two rows free.
///
/// Row r holds tiles at columns 0, 2, 4, … 10.
fn build_filled_grid(rows: usize) -> Grid<usize> {
    let mut grid = Grid::new(GridConfig::new(rows, 12).expect("valid dimensions"))
        .expect("valid grid");
    let tile = Size::new(1, 2).expect("valid size");

    for row in 0..rows.saturating_sub(2) {
        for col in (0..12).step_by(2) {
            grid.add_item(Item::new(Position::new(row, col), tile, row * 12 + col))
                .expect("tiles must not overlap");
        }
    }

    grid
}

// ── Benchmarks: is_item_spot_available ────────────────────────────────────────

/// Benchmarks [`Grid::is_item_spot_available`] for a free and a taken spot.
fn bench_spot_available(c: &mut Criterion) {
    let grid = build_filled_grid(16);
    let square = Size::new(2, 2).expect("valid size");
    let mut group = c.benchmark_group("is_item_spot_available");

    let free = Spot::new(Position::new(14, 0), square);
    group.bench_function("free_spot", |b| {
        b.iter(|| grid.is_item_spot_available(black_box(&free)))
    });

    let taken = Spot::new(Position::new(0, 0), square);
    group.bench_function("taken_spot", |b| {
        b.iter(|| grid.is_item_spot_available(black_box(&taken)))
    });

    group.finish();
}

/// Benchmarks availability while a placed item is being dragged, which adds
/// an item-list lookup to every check.
fn bench_spot_available_while_moving(c: &mut Criterion) {
    let mut grid = build_filled_grid(16);
    let tile = Size::new(1, 2).expect("valid size");
    grid.set_moving_item(MovingItem::Placed {
        origin: Spot::new(Position::new(13, 10), tile),
    });
    let target = Spot::new(Position::new(13, 10), tile);

    c.bench_function("is_item_spot_available/moving_last_item", |b| {
        b.iter(|| grid.is_item_spot_available(black_box(&target)))
    });
}

// ── Benchmarks: hover ─────────────────────────────────────────────────────────

/// Benchmarks [`Grid::hover_item_spot`] scaling with grid height, since each
/// call clears the whole hover matrix first.
fn bench_hover_scaling(c: &mut Criterion) {
    let row_counts = [4usize, 16, 64, 256];
    let mut group = c.benchmark_group("hover_item_spot_scaling");
    let square = Size::new(2, 2).expect("valid size");

    for &rows in &row_counts {
        let mut grid = build_filled_grid(rows);
        let spot = Spot::new(Position::new(rows - 2, 4), square);

        group.bench_with_input(BenchmarkId::new("rows", rows), &spot, |b, spot| {
            b.iter(|| grid.hover_item_spot(black_box(spot)))
        });
    }

    group.finish();
}

// ── Benchmarks: add_item ──────────────────────────────────────────────────────

/// Benchmarks a drop (add then remove, so every iteration starts from the
/// same state) scaling with the number of placed items.
fn bench_add_item_resync_scaling(c: &mut Criterion) {
    let row_counts = [4usize, 16, 64];
    let mut group = c.benchmark_group("add_item_resync_scaling");
    let tile = Size::new(1, 2).expect("valid size");

    for &rows in &row_counts {
        let mut grid = build_filled_grid(rows);
        let spot = Spot::new(Position::new(rows - 1, 0), tile);

        group.bench_with_input(BenchmarkId::new("items", grid.items().len()), &spot, |b, spot| {
            b.iter(|| {
                grid.add_item(Item::new(spot.position, spot.size, 0))
                    .expect("last row is free");
                grid.remove_item(black_box(spot))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_spot_available,
    bench_spot_available_while_moving,
    bench_hover_scaling,
    bench_add_item_resync_scaling,
);
criterion_main!(benches);
