//! Integer-only Bresenham line rasterization.

use crate::grid::Grid;
use crate::types::geom::{Cell, LogicalPoint};

/// Walks the cells of a segment from `from` to `to`, both inclusive.
///
/// Uses the classic single error term `err = dx - dy`. Every step moves one
/// cell in x, in y or in both, so the output is 8-connected.
#[derive(Debug, Clone)]
pub struct Bresenham {
    x:   i32,
    y:   i32,
    x2:  i32,
    y2:  i32,
    dx:  i32,
    dy:  i32,
    sx:  i32,
    sy:  i32,
    err: i32,
    done: bool,
}

impl Bresenham {
    pub fn new((x1, y1): (i32, i32), (x2, y2): (i32, i32)) -> Self {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        Self {
            x: x1, y: y1, x2, y2, dx, dy,
            sx: if x1 < x2 { 1 } else { -1 },
            sy: if y1 < y2 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done { return None; }
        let current = (self.x, self.y);
        if self.x == self.x2 && self.y == self.y2 {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy { self.err -= self.dy; self.x += self.sx; }
        if e2 <  self.dx { self.err += self.dx; self.y += self.sy; }
        Some(current)
    }
}

/// Cells from `a` to `b`, in that order.
///
/// The walk always starts at the smaller endpoint and the result is reversed
/// when needed, so `a → b` and `b → a` cover exactly the same cells even where
/// the error term ties.
pub fn bresenham(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
    if b < a {
        let mut pts: Vec<_> = Bresenham::new(b, a).collect();
        pts.reverse();
        pts
    } else {
        Bresenham::new(a, b).collect()
    }
}

/// Rasterize a segment directly in logical space.
pub fn rasterize_line(a: LogicalPoint, b: LogicalPoint) -> Vec<LogicalPoint> {
    bresenham((a.x, a.y), (b.x, b.y))
        .into_iter()
        .map(LogicalPoint::from)
        .collect()
}

/// Rasterize a segment in cell space: both ends are mapped to cells first.
/// Cells outside the grid are dropped.
pub fn line_cells(grid: &Grid, a: LogicalPoint, b: LogicalPoint) -> Vec<Cell> {
    let ca = grid.logical_to_cell(a);
    let cb = grid.logical_to_cell(b);
    bresenham((ca.col, ca.row), (cb.col, cb.row))
        .into_iter()
        .map(Cell::from)
        .filter(|c| grid.contains(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point() {
        assert_eq!(bresenham((3, 4), (3, 4)), vec![(3, 4)]);
    }

    #[test]
    fn horizontal_and_diagonal() {
        assert_eq!(bresenham((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(bresenham((0, 0), (-2, -2)), vec![(0, 0), (-1, -1), (-2, -2)]);
    }

    #[test]
    fn shallow_line() {
        assert_eq!(bresenham((0, 0), (4, 2)), vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 2)]);
    }

    #[test]
    fn tie_case_is_order_independent() {
        // The raw walk from (2,1) would visit (1,1); canonical order keeps (1,0).
        let fwd = bresenham((0, 0), (2, 1));
        let mut back = bresenham((2, 1), (0, 0));
        back.reverse();
        assert_eq!(fwd, back);
        assert_eq!(fwd, vec![(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    fn line_cells_clips_to_grid() {
        let g = Grid::new(50, 50, 10, 2).unwrap();
        let cells = line_cells(&g, LogicalPoint::new(-10, 0), LogicalPoint::new(10, 0));
        assert_eq!(cells.len(), 5);
        assert!(cells.iter().all(|c| c.row == 2));
    }
}
