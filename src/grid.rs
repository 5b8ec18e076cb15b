//! Near-square grid partitioning of a rectangular canvas.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, Result};
use crate::geometry::XY;

/// Square cells arranged in `columns × rows`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub cell_size: f64,
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn capacity(&self) -> usize {
        self.columns * self.rows
    }

    /// Gap between neighbouring cells when the grid is stretched over `target`.
    pub fn spacing(&self, target: XY) -> XY {
        XY::new(
            axis_spacing(target.x, self.cell_size, self.columns),
            axis_spacing(target.y, self.cell_size, self.rows),
        )
    }

    /// Top-left corner of the cell at `index` (row-major) inside `target` at `offset`.
    pub fn cell_origin(&self, index: usize, target: XY, offset: XY) -> XY {
        let spacing = self.spacing(target);
        let pitch = XY::new(self.cell_size + spacing.x, self.cell_size + spacing.y);
        let used = XY::new(
            self.columns as f64 * self.cell_size + (self.columns as f64 - 1.0) * spacing.x,
            self.rows as f64 * self.cell_size + (self.rows as f64 - 1.0) * spacing.y,
        );
        let margin = 0.5 * (target - used);
        let cell = XY::new((index % self.columns) as f64, (index / self.columns) as f64);
        offset + margin + cell * pitch
    }
}

fn axis_spacing(extent: f64, cell_size: f64, count: usize) -> f64 {
    if count > 1 {
        (extent - cell_size * count as f64) / (count as f64 - 1.0)
    } else {
        0.0
    }
}

/// Find the grid with the largest square cell that holds `count` items in `target`.
///
/// Every column count from 1 to `count` is tried with the fewest rows that
/// fit; on equal cell sizes the first candidate (fewest columns) wins.
pub fn compute_grid(count: usize, target: XY) -> Result<GridLayout> {
    if count == 0 {
        return Err(PosterError::layout("cannot lay out zero items"));
    }
    if !(target.x > 0.0 && target.y > 0.0) {
        return Err(PosterError::layout(format!(
            "target size {}x{} has a non-positive dimension",
            target.x, target.y
        )));
    }

    let mut best: Option<GridLayout> = None;
    for columns in 1..=count {
        let rows = count.div_ceil(columns);
        let cell_size = (target.x / columns as f64).min(target.y / rows as f64);
        if best.map_or(true, |b| cell_size > b.cell_size) {
            best = Some(GridLayout {
                cell_size,
                columns,
                rows,
            });
        }
    }

    best.ok_or_else(|| PosterError::layout("no grid candidate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force_best(count: usize, target: XY) -> f64 {
        let mut best = 0.0f64;
        for c in 1..=count {
            for r in 1..=count {
                if c * r >= count {
                    best = best.max((target.x / c as f64).min(target.y / r as f64));
                }
            }
        }
        best
    }

    #[test]
    fn test_single_item() {
        let grid = compute_grid(1, XY::new(180.0, 240.0)).unwrap();
        assert_eq!((grid.columns, grid.rows), (1, 1));
        assert_eq!(grid.cell_size, 180.0);
        assert_eq!(grid.spacing(XY::new(180.0, 240.0)), XY::ZERO);
    }

    #[test]
    fn test_square_canvas() {
        let grid = compute_grid(9, XY::new(90.0, 90.0)).unwrap();
        assert_eq!((grid.columns, grid.rows), (3, 3));
        assert!((grid.cell_size - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_is_optimal() {
        let targets = [XY::new(180.0, 240.0), XY::new(300.0, 50.0), XY::new(1.0, 1.0)];
        for &target in &targets {
            for count in 1..=60 {
                let grid = compute_grid(count, target).unwrap();
                assert!(grid.columns >= 1 && grid.rows >= 1);
                assert!(grid.capacity() >= count);
                let best = brute_force_best(count, target);
                assert!(grid.cell_size >= best - 1e-12, "count {}", count);
            }
        }
    }

    #[test]
    fn test_tie_prefers_fewer_columns() {
        // 2 items on a unit canvas: 1x2 and 2x1 both give 0.5
        let grid = compute_grid(2, XY::new(1.0, 1.0)).unwrap();
        assert_eq!((grid.columns, grid.rows), (1, 2));
        assert_eq!(grid.cell_size, 0.5);

        // Wide canvas breaks the tie the other way
        let grid = compute_grid(2, XY::new(2.0, 1.0)).unwrap();
        assert_eq!((grid.columns, grid.rows), (2, 1));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            compute_grid(0, XY::new(10.0, 10.0)),
            Err(PosterError::Layout { .. })
        ));
        assert!(matches!(
            compute_grid(4, XY::new(0.0, 10.0)),
            Err(PosterError::Layout { .. })
        ));
        assert!(matches!(
            compute_grid(4, XY::new(10.0, -1.0)),
            Err(PosterError::Layout { .. })
        ));
    }

    #[test]
    fn test_cell_origins() {
        let target = XY::new(100.0, 100.0);
        let grid = compute_grid(4, target).unwrap();
        assert_eq!((grid.columns, grid.rows), (2, 2));
        assert_eq!(grid.spacing(target), XY::ZERO);

        let offset = XY::new(10.0, 30.0);
        assert_eq!(grid.cell_origin(0, target, offset), XY::new(10.0, 30.0));
        assert_eq!(grid.cell_origin(1, target, offset), XY::new(60.0, 30.0));
        assert_eq!(grid.cell_origin(3, target, offset), XY::new(60.0, 80.0));
    }

    #[test]
    fn test_spacing_spreads_spare_room() {
        let target = XY::new(100.0, 40.0);
        let grid = compute_grid(3, target).unwrap();
        // 3 columns of 33.3 limited by width, a single row
        assert_eq!((grid.columns, grid.rows), (3, 1));
        let spacing = grid.spacing(target);
        assert!(spacing.x.abs() < 1e-9);
        assert_eq!(spacing.y, 0.0);
        let origin = grid.cell_origin(0, target, XY::ZERO);
        assert!((origin.y - (40.0 - 100.0 / 3.0) / 2.0).abs() < 1e-9);
    }
}
