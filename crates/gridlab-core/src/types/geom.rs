//! Point types shared by every module.
//!
//! Two integer spaces exist side by side and must never be mixed up:
//!   LogicalPoint: origin at the grid center, x right, y up.
//!   Cell: (col, row) index into the grid, row 0 at the top, y down.
//! The `Grid` owns the mapping between them.

use serde::{Deserialize, Serialize};

/// Integer point in logical (center-origin, y-up) grid space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub x: i32,
    pub y: i32,
}

impl LogicalPoint {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }

    /// Saturates at the `i32` range instead of wrapping.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    pub fn to_f64(self) -> PointF { PointF::new(self.x as f64, self.y as f64) }
}

impl From<(i32, i32)> for LogicalPoint {
    fn from((x, y): (i32, i32)) -> Self { Self::new(x, y) }
}

/// One addressable grid cell. Valid iff `0 <= col < columns` and `0 <= row < rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self { Self { col, row } }
}

impl From<(i32, i32)> for Cell {
    fn from((col, row): (i32, i32)) -> Self { Self::new(col, row) }
}

/// Continuous point in logical space: pivots, centroids, transform output
/// before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// Nearest integer point, halves rounded away from zero. Values past the
    /// `i32` range saturate, NaN becomes 0.
    pub fn round(self) -> LogicalPoint {
        LogicalPoint::new(self.x.round() as i32, self.y.round() as i32)
    }
}

/// Direction used by the keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction { Up, Down, Left, Right }

impl Direction {
    /// Unit step in logical space.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up    => ( 0,  1),
            Self::Down  => ( 0, -1),
            Self::Left  => (-1,  0),
            Self::Right => ( 1,  0),
        }
    }
}
