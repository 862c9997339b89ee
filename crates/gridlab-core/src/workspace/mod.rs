//! Workspaces: the stateful drawing sessions a host drives.
//!
//! Each one owns a grid, a cell surface and the model that surface is
//! rebuilt from. The host forwards clicks (in pixels), button actions and
//! timer ticks; it reads back the surface and a one-line status message.
//!
//!   SketchPad       lines and circles with undo
//!   FillCanvas      polygons with flood, boundary and scanline fills
//!   TransformBench  one polygon under affine transforms

pub mod fill;
pub mod sketch;
pub mod transform;

use tracing::warn;

use crate::anim::AnimationState;
use crate::error::Result;
use crate::grid::Grid;
use crate::surface::{CellSurface, ColorSurface};
use crate::types::color::Color;
use crate::types::geom::LogicalPoint;

pub use fill::FillCanvas;
pub use sketch::SketchPad;
pub use transform::TransformBench;

pub trait Workspace {
    fn grid(&self) -> &Grid;
    fn surface(&self) -> &CellSurface;

    /// Last info message: what the previous action did, or why it was refused.
    fn status(&self) -> &str;

    /// A click at pixel `(px, py)`. Returns the logical point it landed on.
    fn on_click(&mut self, px: i32, py: i32) -> Result<LogicalPoint>;

    /// Pointer movement. Only maps the position; nothing is painted.
    fn on_hover(&self, px: i32, py: i32) -> LogicalPoint {
        self.grid().pixel_to_logical(px, py)
    }

    /// Change the cell size and rebuild the surface from the model.
    fn set_cell_size(&mut self, cell_size: i32) -> Result<()>;

    /// Clear the surface and repaint it from the model.
    fn redraw(&mut self);

    /// One timer tick. Returns the animation state after the tick; the host
    /// keeps its timer running while that is `Stepping`.
    fn tick(&mut self) -> AnimationState;

    /// Drop the whole model.
    fn clear(&mut self);
}

// ─── Shared pieces ────────────────────────────────────────────────────────────

/// The info line. Errors routed through [`StatusLine::report`] are logged
/// and shown, then handed back to the caller unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine(String);

impl StatusLine {
    pub fn new(message: impl Into<String>) -> Self { Self(message.into()) }

    pub fn set(&mut self, message: impl Into<String>) { self.0 = message.into(); }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn report<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            warn!(kind = e.kind().as_str(), "{e}");
            self.0 = e.to_string();
        }
        result
    }
}

/// The two most recent clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Picks {
    prev: Option<LogicalPoint>,
    last: Option<LogicalPoint>,
}

impl Picks {
    pub fn push(&mut self, p: LogicalPoint) {
        if self.last.is_some() {
            self.prev = self.last;
        }
        self.last = Some(p);
    }

    pub fn last(&self) -> Option<LogicalPoint> { self.last }
    pub fn prev(&self) -> Option<LogicalPoint> { self.prev }

    /// `(earlier, later)` once two clicks exist.
    pub fn pair(&self) -> Option<(LogicalPoint, LogicalPoint)> {
        Some((self.prev?, self.last?))
    }

    pub fn clear(&mut self) { *self = Self::default(); }
}

/// Paint logical points; returns how many landed inside the grid.
pub(crate) fn paint_points<S: ColorSurface + ?Sized>(
    surface: &mut S,
    grid: &Grid,
    points: &[LogicalPoint],
    color: Color,
) -> usize {
    let mut painted = 0;
    for &p in points {
        let cell = grid.logical_to_cell(p);
        if grid.contains(cell) {
            surface.paint_cell(cell, color);
            painted += 1;
        }
    }
    painted
}

pub(crate) fn paint_axes<S: ColorSurface + ?Sized>(surface: &mut S, grid: &Grid, color: Color) {
    for cell in grid.axis_cells() {
        surface.paint_cell(cell, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn picks_shift() {
        let mut p = Picks::default();
        assert_eq!(p.pair(), None);
        p.push(LogicalPoint::new(1, 1));
        assert_eq!(p.pair(), None);
        assert_eq!(p.last(), Some(LogicalPoint::new(1, 1)));
        p.push(LogicalPoint::new(2, 2));
        assert_eq!(p.pair(), Some((LogicalPoint::new(1, 1), LogicalPoint::new(2, 2))));
        p.push(LogicalPoint::new(3, 3));
        assert_eq!(p.prev(), Some(LogicalPoint::new(2, 2)));
    }

    #[test]
    fn status_reports_errors_only() {
        let mut s = StatusLine::new("ready");
        assert!(s.report(Ok(1)).is_ok());
        assert_eq!(s.as_str(), "ready");
        let _ = s.report::<()>(Err(Error::selection("pick a seed first")));
        assert_eq!(s.as_str(), "no active selection: pick a seed first");
    }

    #[test]
    fn paint_points_clips() {
        let g = Grid::new(50, 50, 10, 2).unwrap();
        let mut s = CellSurface::for_grid(&g);
        let n = paint_points(&mut s, &g, &[LogicalPoint::new(0, 0), LogicalPoint::new(9, 9)], Color::RED);
        assert_eq!(n, 1);
        assert_eq!(s.painted_count(), 1);
    }
}
