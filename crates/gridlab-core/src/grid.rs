//! Grid coordinate mapper.
//!
//! A fixed-size surface of `width_px × height_px` pixels is cut into square
//! cells of `cell_size` pixels. Logical coordinates put (0,0) on the center
//! cell with y growing upward; cell rows grow downward like screen pixels.

use tracing::debug;

use crate::error::{Error, Result};
use crate::types::geom::{Cell, LogicalPoint};

/// Smallest cell accepted by the raster and fill surfaces.
pub const RASTER_MIN_CELL_SIZE: i32 = 2;
/// Smallest cell accepted by the transform surface.
pub const TRANSFORM_MIN_CELL_SIZE: i32 = 5;

/// Grid spans (columns + rows) a transformed vertex may stray from the origin.
const REACH_SPANS: i32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width_px:      i32,
    height_px:     i32,
    cell_size:     i32,
    min_cell_size: i32,
    columns:       i32,
    rows:          i32,
    center_col:    i32,
    center_row:    i32,
}

impl Grid {
    pub fn new(width_px: i32, height_px: i32, cell_size: i32, min_cell_size: i32) -> Result<Self> {
        if width_px <= 0 || height_px <= 0 {
            return Err(Error::geometry(format!(
                "surface must have a positive size, got {width_px}×{height_px}"
            )));
        }
        let min_cell_size = min_cell_size.max(1);
        check_cell_size(cell_size, min_cell_size)?;
        let mut grid = Self {
            width_px, height_px, cell_size, min_cell_size,
            columns: 0, rows: 0, center_col: 0, center_row: 0,
        };
        grid.recompute();
        Ok(grid)
    }

    fn recompute(&mut self) {
        self.columns    = (self.width_px / self.cell_size).max(1);
        self.rows       = (self.height_px / self.cell_size).max(1);
        self.center_col = self.columns / 2;
        self.center_row = self.rows / 2;
        debug!(
            cell_size = self.cell_size, columns = self.columns, rows = self.rows,
            "grid geometry recomputed"
        );
    }

    /// Change the cell size. Everything painted so far is stale afterwards and
    /// the owner must redraw from its model.
    pub fn set_cell_size(&mut self, cell_size: i32) -> Result<()> {
        check_cell_size(cell_size, self.min_cell_size)?;
        self.cell_size = cell_size;
        self.recompute();
        Ok(())
    }

    /// Change the pixel size of the surface. Same redraw rule as `set_cell_size`.
    pub fn resize(&mut self, width_px: i32, height_px: i32) -> Result<()> {
        if width_px <= 0 || height_px <= 0 {
            return Err(Error::geometry(format!(
                "surface must have a positive size, got {width_px}×{height_px}"
            )));
        }
        self.width_px  = width_px;
        self.height_px = height_px;
        self.recompute();
        Ok(())
    }

    pub fn cell_size(&self)     -> i32 { self.cell_size }
    pub fn min_cell_size(&self) -> i32 { self.min_cell_size }
    pub fn columns(&self)       -> i32 { self.columns }
    pub fn rows(&self)          -> i32 { self.rows }
    pub fn center_col(&self)    -> i32 { self.center_col }
    pub fn center_row(&self)    -> i32 { self.center_row }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.columns).contains(&cell.col) && (0..self.rows).contains(&cell.row)
    }

    /// Floored division, so pixels left of / above the surface land in
    /// negative cells instead of collapsing onto cell 0.
    pub fn pixel_to_cell(&self, px: i32, py: i32) -> Cell {
        Cell::new(px.div_euclid(self.cell_size), py.div_euclid(self.cell_size))
    }

    pub fn cell_to_logical(&self, cell: Cell) -> LogicalPoint {
        LogicalPoint::new(cell.col - self.center_col, self.center_row - cell.row)
    }

    pub fn logical_to_cell(&self, p: LogicalPoint) -> Cell {
        Cell::new(p.x.saturating_add(self.center_col), self.center_row.saturating_sub(p.y))
    }

    pub fn pixel_to_logical(&self, px: i32, py: i32) -> LogicalPoint {
        self.cell_to_logical(self.pixel_to_cell(px, py))
    }

    /// Top-left pixel of the cell holding logical point `p`.
    pub fn logical_to_cell_top_left(&self, p: LogicalPoint) -> (i32, i32) {
        let cell = self.logical_to_cell(p);
        (cell.col * self.cell_size, cell.row * self.cell_size)
    }

    /// Cells of the logical X axis (center row) followed by the Y axis (center column).
    pub fn axis_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let x_axis = (0..self.columns).map(|c| Cell::new(c, self.center_row));
        let y_axis = (0..self.rows).map(|r| Cell::new(self.center_col, r));
        x_axis.chain(y_axis)
    }

    /// Largest logical coordinate a polygon vertex may take: a few grid spans
    /// past the visible edge.
    pub fn reach(&self) -> i32 { (self.columns + self.rows).saturating_mul(REACH_SPANS) }

    pub fn within_reach(&self, p: LogicalPoint) -> bool {
        let r = self.reach();
        (-r..=r).contains(&p.x) && (-r..=r).contains(&p.y)
    }

    /// Error for a cell the caller explicitly addressed.
    pub fn check(&self, cell: Cell) -> Result<Cell> {
        if self.contains(cell) { Ok(cell) } else { Err(Error::OutOfBounds { col: cell.col, row: cell.row }) }
    }
}

fn check_cell_size(cell_size: i32, min: i32) -> Result<()> {
    if cell_size < min {
        Err(Error::geometry(format!("cell size must be at least {min} px, got {cell_size}")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid { Grid::new(400, 300, 10, RASTER_MIN_CELL_SIZE).unwrap() }

    #[test]
    fn geometry_from_size() {
        let g = grid();
        assert_eq!((g.columns(), g.rows()), (40, 30));
        assert_eq!((g.center_col(), g.center_row()), (20, 15));
    }

    #[test]
    fn pixel_to_cell_floors_negative_pixels() {
        let g = grid();
        assert_eq!(g.pixel_to_cell(19, 0), Cell::new(1, 0));
        assert_eq!(g.pixel_to_cell(-1, -10), Cell::new(-1, -1));
        assert_eq!(g.pixel_to_cell(-11, 5), Cell::new(-2, 0));
    }

    #[test]
    fn logical_round_trip() {
        let g = grid();
        assert_eq!(g.cell_to_logical(Cell::new(20, 15)), LogicalPoint::new(0, 0));
        assert_eq!(g.cell_to_logical(Cell::new(25, 10)), LogicalPoint::new(5, 5));
        let p = LogicalPoint::new(-7, 3);
        assert_eq!(g.cell_to_logical(g.logical_to_cell(p)), p);
        assert_eq!(g.logical_to_cell_top_left(p), (130, 120));
    }

    #[test]
    fn far_points_saturate_and_fall_out_of_reach() {
        let g = grid();
        assert_eq!(g.reach(), 280);
        assert!(g.within_reach(LogicalPoint::new(-280, 280)));
        assert!(!g.within_reach(LogicalPoint::new(281, 0)));
        let far = LogicalPoint::new(i32::MAX, i32::MIN);
        assert_eq!(g.logical_to_cell(far), Cell::new(i32::MAX, i32::MAX));
        assert!(!g.contains(g.logical_to_cell(far)));
    }

    #[test]
    fn click_maps_to_logical() {
        let g = grid();
        assert_eq!(g.pixel_to_logical(205, 155), LogicalPoint::new(0, 0));
        assert_eq!(g.pixel_to_logical(0, 0), LogicalPoint::new(-20, 15));
    }

    #[test]
    fn rejects_small_cells_and_keeps_geometry() {
        let mut g = grid();
        let err = g.set_cell_size(1).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidGeometry);
        assert_eq!(g.cell_size(), 10);

        let mut t = Grid::new(400, 400, 20, TRANSFORM_MIN_CELL_SIZE).unwrap();
        assert!(t.set_cell_size(4).is_err());
        t.set_cell_size(5).unwrap();
        assert_eq!(t.columns(), 80);
        assert_eq!(t.center_col(), 40);
    }

    #[test]
    fn axis_cells_cover_center_row_and_column() {
        let g = Grid::new(50, 30, 10, 2).unwrap();
        let cells: Vec<Cell> = g.axis_cells().collect();
        assert_eq!(cells.len(), 5 + 3);
        assert!(cells.iter().all(|c| c.row == 1 || c.col == 2));
    }

    #[test]
    fn bounds() {
        let g = grid();
        assert!(g.contains(Cell::new(0, 0)));
        assert!(!g.contains(Cell::new(40, 0)));
        assert!(g.check(Cell::new(-1, 0)).is_err());
    }
}
