//! The cell color surface the algorithms paint into.
//!
//! In an interactive host this is owned by the display layer; the core only
//! ever asks it to paint a cell or report a cell's color. Everything runs on
//! one thread, so the surface is borrowed mutably for the length of one
//! operation and never shared. A multi-threaded host should put the whole
//! surface behind a single `Mutex` (or one owning task); operations are short
//! and sequential, so nothing finer is needed.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::types::color::Color;
use crate::types::geom::Cell;

pub trait ColorSurface {
    /// Paint one cell. Cells outside the surface are ignored.
    fn paint_cell(&mut self, cell: Cell, color: Color);

    /// Current color of a cell, `None` when unpainted or outside the surface.
    fn cell_color(&self, cell: Cell) -> Option<Color>;

    fn contains(&self, cell: Cell) -> bool;

    /// Drop every painted cell.
    fn clear(&mut self);

    fn paint_all(&mut self, cells: &[Cell], color: Color) {
        for &cell in cells {
            self.paint_cell(cell, color);
        }
    }
}

/// Sparse in-memory surface: only painted cells take space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellSurface {
    columns: i32,
    rows:    i32,
    cells:   HashMap<Cell, Color>,
}

impl CellSurface {
    pub fn new(columns: i32, rows: i32) -> Self {
        Self { columns, rows, cells: HashMap::new() }
    }

    pub fn for_grid(grid: &Grid) -> Self { Self::new(grid.columns(), grid.rows()) }

    /// Match new grid dimensions. Painted state is dropped, since after a
    /// geometry change it has to be rebuilt from the model anyway.
    pub fn reshape(&mut self, grid: &Grid) {
        self.columns = grid.columns();
        self.rows    = grid.rows();
        self.cells.clear();
    }

    pub fn columns(&self) -> i32 { self.columns }
    pub fn rows(&self)    -> i32 { self.rows }

    pub fn painted_count(&self) -> usize { self.cells.len() }

    pub fn count_color(&self, color: Color) -> usize {
        self.cells.values().filter(|&&c| c == color).count()
    }

    /// Painted cells in row-major order.
    pub fn painted(&self) -> Vec<(Cell, Color)> {
        let mut out: Vec<(Cell, Color)> = self.cells.iter().map(|(k, v)| (*k, *v)).collect();
        out.sort_by_key(|(c, _)| (c.row, c.col));
        out
    }
}

impl ColorSurface for CellSurface {
    fn paint_cell(&mut self, cell: Cell, color: Color) {
        if self.contains(cell) {
            self.cells.insert(cell, color);
        }
    }

    fn cell_color(&self, cell: Cell) -> Option<Color> {
        self.cells.get(&cell).copied()
    }

    fn contains(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.col) && (0..self.rows).contains(&cell.row)
    }

    fn clear(&mut self) {
        self.cells.clear();
    }
}
