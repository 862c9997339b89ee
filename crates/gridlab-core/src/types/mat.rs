//! Pure 2-D affine matrix helpers. No polygon types, no errors.
//! Homogeneous 3×3, row-major: element at (row, col) = data[row * 3 + col].
//! Points are column vectors, so `m3_mul(a, b)` applies `b` first.
//!
//! Used by transform.rs to build every polygon transform.

use crate::types::geom::PointF;

pub type M3 = [f64; 9];

pub fn m3_identity() -> M3 {
    [1., 0., 0.,
     0., 1., 0.,
     0., 0., 1.]
}

pub fn m3_mul(a: &M3, b: &M3) -> M3 {
    let mut c = [0.0f64; 9];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                c[i * 3 + j] += a[i * 3 + k] * b[k * 3 + j];
            }
        }
    }
    c
}

/// Chain several matrices; the last one in the slice is applied first.
pub fn m3_chain(ms: &[M3]) -> M3 {
    ms.iter().fold(m3_identity(), |acc, m| m3_mul(&acc, m))
}

pub fn m3_map(m: &M3, p: PointF) -> PointF {
    PointF::new(
        m[0] * p.x + m[1] * p.y + m[2],
        m[3] * p.x + m[4] * p.y + m[5],
    )
}

// ─── Constructors ─────────────────────────────────────────────────────────────

pub fn m3_translate2d(tx: f64, ty: f64) -> M3 {
    [1., 0., tx,
     0., 1., ty,
     0., 0.,  1.]
}

/// Counter-clockwise rotation in a y-up frame.
pub fn m3_rotate2d(angle_rad: f64) -> M3 {
    let (s, c) = angle_rad.sin_cos();
    [ c, -s, 0.,
      s,  c, 0.,
      0., 0., 1.]
}

pub fn m3_scale2d(sx: f64, sy: f64) -> M3 {
    [sx,  0., 0.,
      0., sy, 0.,
      0., 0., 1.]
}

/// `x' = x + shx·y`, `y' = shy·x + y`.
pub fn m3_shear2d(shx: f64, shy: f64) -> M3 {
    [1.,  shx, 0.,
     shy, 1.,  0.,
     0.,  0.,  1.]
}

pub fn m3_reflect_x_axis() -> M3 {
    [1.,  0., 0.,
     0., -1., 0.,
     0.,  0., 1.]
}

pub fn m3_reflect_y_axis() -> M3 {
    [-1., 0., 0.,
      0., 1., 0.,
      0., 0., 1.]
}

/// Reflection across the line through the origin with unit direction `(ux, uy)`.
pub fn m3_reflect_unit(ux: f64, uy: f64) -> M3 {
    let r11 = 2.0 * ux * ux - 1.0;
    let r12 = 2.0 * ux * uy;
    let r22 = 2.0 * uy * uy - 1.0;
    [r11, r12, 0.,
     r12, r22, 0.,
     0.,  0.,  1.]
}

/// `m` applied about `pivot` instead of the origin.
pub fn m3_about(pivot: PointF, m: &M3) -> M3 {
    m3_chain(&[
        m3_translate2d(pivot.x, pivot.y),
        *m,
        m3_translate2d(-pivot.x, -pivot.y),
    ])
}
