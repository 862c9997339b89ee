//! Edge-list scanline fill.
//!
//! Works in logical space. Each integer row `y` is sampled at `y + 0.5`, so
//! a horizontal line never passes exactly through a vertex. Edges count on a
//! row when `y ∈ [min(y1, y2), max(y1, y2))`, which keeps a shared vertex
//! from being counted twice. Spans are shrunk inward by a small epsilon and
//! then rounded to whole cells.

use std::collections::VecDeque;

use tracing::debug;

use crate::anim::Stepper;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::polygon;
use crate::surface::ColorSurface;
use crate::types::color::Color;
use crate::types::geom::LogicalPoint;

const SPAN_EPSILON: f64 = 1e-6;

/// Inclusive run of logical x positions on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub y:       i32,
    pub x_start: i32,
    pub x_end:   i32,
}

impl Span {
    pub fn len(&self) -> usize { (self.x_end - self.x_start + 1).max(0) as usize }

    pub fn points(&self) -> impl Iterator<Item = LogicalPoint> + '_ {
        (self.x_start..=self.x_end).map(move |x| LogicalPoint::new(x, self.y))
    }
}

/// Interior spans of the closed ring `vertices` on row `y`, left to right.
/// Empty spans (intersection pairs closer than one cell) are dropped.
pub fn scanline_spans(vertices: &[LogicalPoint], y: i32) -> Vec<Span> {
    let n = vertices.len();
    let sample = y as f64 + 0.5;
    let mut xs: Vec<f64> = Vec::with_capacity(n);
    for i in 0..n {
        let (p1, p2) = (vertices[i], vertices[(i + 1) % n]);
        if p1.y == p2.y { continue; }
        if y < p1.y.min(p2.y) || y >= p1.y.max(p2.y) { continue; }
        let t = (sample - p1.y as f64) / (p2.y - p1.y) as f64;
        xs.push(p1.x as f64 + t * (p2.x - p1.x) as f64);
    }
    xs.sort_by(f64::total_cmp);

    xs.chunks_exact(2)
        .filter_map(|pair| {
            let x_start = (pair[0] + SPAN_EPSILON).ceil() as i32;
            let x_end   = (pair[1] - SPAN_EPSILON).floor() as i32;
            (x_end >= x_start).then_some(Span { y, x_start, x_end })
        })
        .collect()
}

/// What a scanline fill paints and which color it must leave alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanlineFill {
    pub color: Color,
    /// Cells already in this color are skipped, so the outline survives.
    pub outline: Option<Color>,
}

/// One span per `step`, bottom row first.
#[derive(Debug, Clone)]
pub struct ScanlineStepper {
    grid:     Grid,
    vertices: Vec<LogicalPoint>,
    spec:     ScanlineFill,
    y:        i32,
    y_max:    i32,
    pending:  VecDeque<Span>,
    painted:  usize,
}

impl ScanlineStepper {
    pub fn new(grid: &Grid, vertices: &[LogicalPoint], spec: ScanlineFill) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::geometry(format!(
                "scanline fill needs a polygon with at least 3 vertices, have {}", vertices.len()
            )));
        }
        let (lo, hi) = polygon::bounds(vertices)
            .ok_or_else(|| Error::geometry("scanline fill of an empty polygon"))?;
        debug!(y_min = lo.y, y_max = hi.y, fill = ?spec.color, "scanline fill start");
        Ok(Self {
            grid: grid.clone(),
            vertices: vertices.to_vec(),
            spec,
            y: lo.y,
            y_max: hi.y,
            pending: VecDeque::new(),
            painted: 0,
        })
    }

    pub fn painted(&self) -> usize { self.painted }

    fn next_span(&mut self) -> Option<Span> {
        while self.pending.is_empty() {
            if self.y > self.y_max { return None; }
            self.pending.extend(scanline_spans(&self.vertices, self.y));
            self.y += 1;
        }
        self.pending.pop_front()
    }
}

impl<S: ColorSurface + ?Sized> Stepper<S> for ScanlineStepper {
    type Item = Span;

    /// Paint the next span and return it.
    fn step(&mut self, surface: &mut S) -> Option<Span> {
        let span = self.next_span()?;
        for p in span.points() {
            let cell = self.grid.logical_to_cell(p);
            if !surface.contains(cell) { continue; }
            if self.spec.outline.is_some() && surface.cell_color(cell) == self.spec.outline {
                continue;
            }
            surface.paint_cell(cell, self.spec.color);
            self.painted += 1;
        }
        Some(span)
    }
}

/// Scanline fill in one go. Returns the number of cells painted.
pub fn scanline_fill<S: ColorSurface + ?Sized>(
    surface: &mut S,
    grid: &Grid,
    vertices: &[LogicalPoint],
    spec: ScanlineFill,
) -> Result<usize> {
    let mut stepper = ScanlineStepper::new(grid, vertices, spec)?;
    stepper.finish(surface);
    Ok(stepper.painted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CellSurface;

    fn pts(v: &[(i32, i32)]) -> Vec<LogicalPoint> { v.iter().map(|&p| p.into()).collect() }

    #[test]
    fn square_spans() {
        let sq = pts(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        for y in 0..4 {
            assert_eq!(scanline_spans(&sq, y), vec![Span { y, x_start: 1, x_end: 3 }]);
        }
        // Half-open edge membership: the top row has no crossings.
        assert!(scanline_spans(&sq, 4).is_empty());
        assert!(scanline_spans(&sq, -1).is_empty());
    }

    #[test]
    fn concave_row_has_two_spans() {
        // U shape: notch between x = 3 and x = 6 above y = 3.
        let u = pts(&[(0, 0), (9, 0), (9, 8), (6, 8), (6, 3), (3, 3), (3, 8), (0, 8)]);
        let spans = scanline_spans(&u, 5);
        assert_eq!(spans, vec![
            Span { y: 5, x_start: 1, x_end: 2 },
            Span { y: 5, x_start: 7, x_end: 8 },
        ]);
        assert_eq!(scanline_spans(&u, 1).len(), 1);
    }

    #[test]
    fn fill_skips_outline_cells() {
        let grid = Grid::new(200, 200, 10, 2).unwrap();
        let tri = pts(&[(-5, -5), (5, -5), (0, 5)]);
        let mut s = CellSurface::for_grid(&grid);
        let blocked = grid.logical_to_cell(LogicalPoint::new(0, 0));
        s.paint_cell(blocked, Color::BLUE);

        let spec = ScanlineFill { color: Color::MAGENTA, outline: Some(Color::BLUE) };
        let n = scanline_fill(&mut s, &grid, &tri, spec).unwrap();
        assert!(n > 0);
        assert_eq!(s.cell_color(blocked), Some(Color::BLUE));
        assert_eq!(s.count_color(Color::MAGENTA), n);
    }

    #[test]
    fn too_few_vertices() {
        let grid = Grid::new(100, 100, 10, 2).unwrap();
        let mut s = CellSurface::for_grid(&grid);
        let spec = ScanlineFill { color: Color::MAGENTA, outline: None };
        let err = scanline_fill(&mut s, &grid, &pts(&[(0, 0), (3, 3)]), spec).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidGeometry);
        assert_eq!(s.painted_count(), 0);
    }

    #[test]
    fn stepper_yields_rows_bottom_up() {
        let grid = Grid::new(200, 200, 10, 2).unwrap();
        let sq = pts(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
        let mut s = CellSurface::for_grid(&grid);
        let mut stepper = ScanlineStepper::new(&grid, &sq, ScanlineFill { color: Color::MAGENTA, outline: None }).unwrap();
        let rows: Vec<i32> = std::iter::from_fn(|| stepper.step(&mut s)).map(|sp| sp.y).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
        assert_eq!(stepper.painted(), 12);
    }
}
