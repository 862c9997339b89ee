//! Affine transforms over a vertex list.
//!
//! Every operation builds one 3×3 matrix, maps each vertex through it in
//! floating point and rounds back to the integer grid. Nothing here holds
//! state; callers swap the returned vertices into their polygon.

use tracing::debug;

use crate::error::{Error, Result};
use crate::polygon::centroid;
use crate::types::geom::LogicalPoint;
use crate::types::mat::{
    M3, m3_about, m3_map, m3_reflect_unit, m3_reflect_x_axis, m3_reflect_y_axis, m3_rotate2d,
    m3_scale2d, m3_shear2d,
};

/// Map every vertex through `m`, rounding to the nearest grid point.
pub fn apply(m: &M3, vertices: &[LogicalPoint]) -> Vec<LogicalPoint> {
    vertices.iter().map(|&v| m3_map(m, v.to_f64()).round()).collect()
}

// ─── Matrices ─────────────────────────────────────────────────────────────────

/// Rotation for a user-facing angle in degrees. The angle is negated before
/// the matrix is built; callers rely on that sign, keep it.
pub fn rotation(degrees: f64) -> M3 {
    m3_rotate2d((-degrees).to_radians())
}

/// Negative inputs shrink instead of mirroring: `s < 0` maps to `1 / (1 + |s|)`.
pub fn effective_scale(s: f64) -> f64 {
    if s < 0.0 { 1.0 / (1.0 + s.abs()) } else { s }
}

// ─── Operations ───────────────────────────────────────────────────────────────

pub fn translate(vertices: &[LogicalPoint], dx: i32, dy: i32) -> Vec<LogicalPoint> {
    vertices.iter().map(|v| v.offset(dx, dy)).collect()
}

/// Rotate about the logical origin.
pub fn rotate(vertices: &[LogicalPoint], degrees: f64) -> Vec<LogicalPoint> {
    apply(&rotation(degrees), vertices)
}

pub fn rotate_about(vertices: &[LogicalPoint], pivot: LogicalPoint, degrees: f64) -> Vec<LogicalPoint> {
    apply(&m3_about(pivot.to_f64(), &rotation(degrees)), vertices)
}

/// Scale about the polygon centroid. `sx`/`sy` go through [`effective_scale`].
pub fn scale_about_centroid(vertices: &[LogicalPoint], sx: f64, sy: f64) -> Result<Vec<LogicalPoint>> {
    let pivot = centroid(vertices)?;
    let (ex, ey) = (effective_scale(sx), effective_scale(sy));
    debug!(pivot.x, pivot.y, input.sx = sx, input.sy = sy, effective.sx = ex, effective.sy = ey, "scale");
    Ok(apply(&m3_about(pivot, &m3_scale2d(ex, ey)), vertices))
}

/// `x' = x + shx·y`, `y' = shy·x + y`, about the polygon centroid.
pub fn shear_about_centroid(vertices: &[LogicalPoint], shx: f64, shy: f64) -> Result<Vec<LogicalPoint>> {
    let pivot = centroid(vertices)?;
    debug!(pivot.x, pivot.y, shx, shy, "shear");
    Ok(apply(&m3_about(pivot, &m3_shear2d(shx, shy)), vertices))
}

/// Mirror across the X axis: `y → -y`.
pub fn reflect_x(vertices: &[LogicalPoint]) -> Vec<LogicalPoint> {
    apply(&m3_reflect_x_axis(), vertices)
}

/// Mirror across the Y axis: `x → -x`.
pub fn reflect_y(vertices: &[LogicalPoint]) -> Vec<LogicalPoint> {
    apply(&m3_reflect_y_axis(), vertices)
}

/// Mirror across the infinite line through `a` and `b`.
///
/// Lines of slope exactly +1 or -1 are handled with an integer coordinate
/// swap, so those reflections are exact. Everything else goes through the
/// reflection matrix relative to `a` and is rounded.
pub fn reflect_about_line(vertices: &[LogicalPoint], a: LogicalPoint, b: LogicalPoint) -> Result<Vec<LogicalPoint>> {
    if a == b {
        return Err(Error::geometry("reflection line needs two distinct points"));
    }
    if let Some(out) = reflect_diagonal(vertices, a, b) {
        debug!(?a, ?b, "reflect about diagonal (exact swap)");
        return Ok(out);
    }

    let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let len = dx.hypot(dy);
    let m = m3_about(a.to_f64(), &m3_reflect_unit(dx / len, dy / len));
    debug!(?a, ?b, "reflect about line");
    Ok(apply(&m, vertices))
}

fn reflect_diagonal(vertices: &[LogicalPoint], a: LogicalPoint, b: LogicalPoint) -> Option<Vec<LogicalPoint>> {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    if dx == 0 {
        return None;
    }
    if dy == dx {
        // y = x + k
        let k = a.y - a.x;
        Some(vertices.iter().map(|v| LogicalPoint::new(v.y - k, v.x + k)).collect())
    } else if dy == -dx {
        // y = -x + k
        let k = a.y + a.x;
        Some(vertices.iter().map(|v| LogicalPoint::new(k - v.y, k - v.x)).collect())
    } else {
        None
    }
}
