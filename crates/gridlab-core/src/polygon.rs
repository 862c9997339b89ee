//! Polygon model: an ordered vertex list in logical space plus the fills that
//! have been applied to it.
//!
//! Vertices are kept in insertion (drawing) order. A closed polygon never
//! stores its first vertex again at the end; the closing edge is implied by
//! index `(i + 1) mod n`.

use tracing::debug;

use crate::error::{Error, Result};
use crate::fill::FillRecords;
use crate::grid::Grid;
use crate::raster::line_cells;
use crate::types::color::Color;
use crate::types::geom::{Cell, LogicalPoint, PointF};

/// Below this absolute signed area a polygon counts as degenerate.
pub const DEGENERATE_AREA: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<LogicalPoint>,
    closed:   bool,
    outline:  Color,
    pub fills: FillRecords,
}

impl Polygon {
    pub fn new(outline: Color) -> Self {
        Self { vertices: Vec::new(), closed: false, outline, fills: FillRecords::default() }
    }

    /// Build an already closed polygon. A trailing copy of the first vertex is dropped.
    pub fn closed_from(vertices: impl IntoIterator<Item = LogicalPoint>, outline: Color) -> Result<Self> {
        let mut poly = Self::new(outline);
        poly.vertices = strip_closing_vertex(vertices.into_iter().collect());
        poly.close()?;
        Ok(poly)
    }

    pub fn vertices(&self) -> &[LogicalPoint] { &self.vertices }
    pub fn len(&self)      -> usize           { self.vertices.len() }
    pub fn is_empty(&self) -> bool            { self.vertices.is_empty() }
    pub fn is_closed(&self) -> bool           { self.closed }
    pub fn outline(&self)  -> Color           { self.outline }

    pub fn set_outline(&mut self, outline: Color) { self.outline = outline; }

    /// Append a vertex to an open polygon. Appending the first vertex again
    /// (with at least three present) closes the polygon instead; returns
    /// whether that happened.
    pub fn push(&mut self, p: LogicalPoint) -> Result<bool> {
        if self.closed {
            return Err(Error::geometry("polygon is already closed"));
        }
        if self.vertices.len() >= 3 && self.vertices.first() == Some(&p) {
            self.closed = true;
            return Ok(true);
        }
        self.vertices.push(p);
        Ok(false)
    }

    /// Close the polygon. Needs at least three vertices; on failure the
    /// polygon stays open and untouched.
    pub fn close(&mut self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(Error::geometry(format!(
                "need at least 3 vertices to close a polygon, have {}", self.vertices.len()
            )));
        }
        self.closed = true;
        debug!(vertices = self.vertices.len(), "polygon closed");
        Ok(())
    }

    /// Replace the vertex list, e.g. with transform output. Closure is kept.
    pub fn set_vertices(&mut self, vertices: Vec<LogicalPoint>) {
        self.vertices = vertices;
    }

    /// Edges in drawing order; a closed polygon includes the last → first edge.
    pub fn edges(&self) -> impl Iterator<Item = (LogicalPoint, LogicalPoint)> + '_ {
        let n = self.vertices.len();
        let count = match (self.closed, n) {
            (_, 0 | 1) => 0,
            (true, _)  => n,
            (false, _) => n - 1,
        };
        (0..count).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Cells of every edge plus the vertex cells, clipped to the grid.
    pub fn outline_cells(&self, grid: &Grid) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.vertices.iter()
            .map(|&v| grid.logical_to_cell(v))
            .filter(|c| grid.contains(*c))
            .collect();
        for (a, b) in self.edges() {
            cells.extend(line_cells(grid, a, b));
        }
        cells
    }

    /// Inclusive `(min, max)` corners of the vertex bounding box.
    pub fn bounds(&self) -> Option<(LogicalPoint, LogicalPoint)> {
        bounds(&self.vertices)
    }

    pub fn signed_area(&self) -> f64 { signed_area(&self.vertices) }

    pub fn centroid(&self) -> Result<PointF> { centroid(&self.vertices) }
}

// ─── Free geometry helpers ────────────────────────────────────────────────────

fn strip_closing_vertex(mut vertices: Vec<LogicalPoint>) -> Vec<LogicalPoint> {
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

fn ring(vertices: &[LogicalPoint]) -> &[LogicalPoint] {
    match vertices {
        [first, .., last] if first == last => &vertices[..vertices.len() - 1],
        _ => vertices,
    }
}

pub fn bounds(vertices: &[LogicalPoint]) -> Option<(LogicalPoint, LogicalPoint)> {
    let first = *vertices.first()?;
    Some(vertices.iter().fold((first, first), |(lo, hi), v| (
        LogicalPoint::new(lo.x.min(v.x), lo.y.min(v.y)),
        LogicalPoint::new(hi.x.max(v.x), hi.y.max(v.y)),
    )))
}

/// Shoelace signed area; positive for counter-clockwise vertex order.
/// A repeated closing vertex is ignored.
pub fn signed_area(vertices: &[LogicalPoint]) -> f64 {
    let v = ring(vertices);
    let n = v.len();
    if n < 3 { return 0.0; }
    let twice: f64 = (0..n).map(|i| cross(v[i], v[(i + 1) % n])).sum();
    twice * 0.5
}

fn cross(p0: LogicalPoint, p1: LogicalPoint) -> f64 {
    p0.x as f64 * p1.y as f64 - p1.x as f64 * p0.y as f64
}

/// Area-weighted centroid. Degenerate (zero-area) vertex sets fall back to the
/// middle of their bounding box. A repeated closing vertex is ignored.
pub fn centroid(vertices: &[LogicalPoint]) -> Result<PointF> {
    let v = ring(vertices);
    let n = v.len();
    if n == 0 {
        return Err(Error::geometry("centroid of an empty polygon"));
    }

    let (mut a, mut cx, mut cy) = (0.0, 0.0, 0.0);
    for i in 0..n {
        let (p0, p1) = (v[i], v[(i + 1) % n]);
        let c = cross(p0, p1);
        a  += c;
        cx += (p0.x as f64 + p1.x as f64) * c;
        cy += (p0.y as f64 + p1.y as f64) * c;
    }

    if a.abs() > DEGENERATE_AREA {
        let a = a * 0.5;
        return Ok(PointF::new(cx / (6.0 * a), cy / (6.0 * a)));
    }

    let (lo, hi) = bounds(v).ok_or_else(|| Error::geometry("centroid of an empty polygon"))?;
    Ok(PointF::new(0.5 * (lo.x as f64 + hi.x as f64), 0.5 * (lo.y as f64 + hi.y as f64)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<LogicalPoint> { v.iter().map(|&p| p.into()).collect() }

    #[test]
    fn close_needs_three_vertices() {
        let mut p = Polygon::new(Color::BLUE);
        p.push(LogicalPoint::new(0, 0)).unwrap();
        p.push(LogicalPoint::new(4, 0)).unwrap();
        let err = p.close().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidGeometry);
        assert!(!p.is_closed());
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn pushing_first_vertex_closes() {
        let mut p = Polygon::new(Color::BLUE);
        for v in pts(&[(0, 0), (4, 0), (4, 4)]) {
            assert!(!p.push(v).unwrap());
        }
        assert!(p.push(LogicalPoint::new(0, 0)).unwrap());
        assert!(p.is_closed());
        assert_eq!(p.len(), 3);
        assert!(p.push(LogicalPoint::new(1, 1)).is_err());
    }

    #[test]
    fn edges_wrap_only_when_closed() {
        let mut p = Polygon::new(Color::BLUE);
        for v in pts(&[(0, 0), (4, 0), (4, 4)]) { p.push(v).unwrap(); }
        assert_eq!(p.edges().count(), 2);
        p.close().unwrap();
        let edges: Vec<_> = p.edges().collect();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2], (LogicalPoint::new(4, 4), LogicalPoint::new(0, 0)));
    }

    #[test]
    fn closed_from_strips_duplicate() {
        let p = Polygon::closed_from(pts(&[(0, 0), (2, 0), (2, 2), (0, 0)]), Color::BLUE).unwrap();
        assert_eq!(p.len(), 3);
        assert!(Polygon::closed_from(pts(&[(0, 0), (2, 0), (0, 0)]), Color::BLUE).is_err());
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid(&pts(&[(0, 0), (4, 0), (4, 4), (0, 4)])).unwrap();
        assert!((c.x - 2.0).abs() < 1e-12 && (c.y - 2.0).abs() < 1e-12);
        // Explicit closing vertex does not shift it.
        let c2 = centroid(&pts(&[(0, 0), (4, 0), (4, 4), (0, 4), (0, 0)])).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn centroid_is_area_weighted() {
        // Right triangle: centroid at the vertex mean (4/3, 1).
        let c = centroid(&pts(&[(0, 0), (4, 0), (0, 3)])).unwrap();
        assert!((c.x - 4.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_centroid_uses_bounding_box() {
        let c = centroid(&pts(&[(0, 0), (2, 2), (6, 6)])).unwrap();
        assert_eq!(c, PointF::new(3.0, 3.0));
        assert!(centroid(&[]).is_err());
    }

    #[test]
    fn centroid_near_the_i32_edge_does_not_overflow() {
        let c = centroid(&pts(&[(i32::MAX - 2, i32::MIN), (i32::MAX, i32::MIN)])).unwrap();
        assert_eq!(c, PointF::new(i32::MAX as f64 - 1.0, i32::MIN as f64));
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        assert_eq!(signed_area(&pts(&[(0, 0), (4, 0), (4, 4), (0, 4)])), 16.0);
        assert_eq!(signed_area(&pts(&[(0, 0), (0, 4), (4, 4), (4, 0)])), -16.0);
    }

    #[test]
    fn outline_cells_cover_edges() {
        let g = Grid::new(100, 100, 10, 2).unwrap();
        let p = Polygon::closed_from(pts(&[(0, 0), (2, 0), (2, 2), (0, 2)]), Color::BLUE).unwrap();
        let cells: std::collections::HashSet<Cell> = p.outline_cells(&g).into_iter().collect();
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&g.logical_to_cell(LogicalPoint::new(1, 1))));
    }
}
