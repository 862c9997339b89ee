//! Affine transform properties over vertex lists.

use gridlab_core::transform::{
    effective_scale, reflect_about_line, reflect_x, reflect_y, rotate, rotate_about, scale_about_centroid,
    shear_about_centroid, translate,
};
use gridlab_core::{ErrorKind, LogicalPoint, Polygon, Color};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn lp(v: &[(i32, i32)]) -> Vec<LogicalPoint> { v.iter().map(|&p| p.into()).collect() }

fn pentagon() -> Vec<LogicalPoint> { lp(&[(0, 0), (9, 1), (12, 8), (4, 13), (-5, 6)]) }

fn max_drift(a: &[LogicalPoint], b: &[LogicalPoint]) -> i32 {
    assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(p, q)| (p.x - q.x).abs().max((p.y - q.y).abs())).max().unwrap_or(0)
}

// ─── Reflections ─────────────────────────────────────────────────────────────

#[test]
fn axis_reflections_are_involutions() {
    let p = pentagon();
    assert_eq!(reflect_x(&reflect_x(&p)), p);
    assert_eq!(reflect_y(&reflect_y(&p)), p);
    assert_eq!(reflect_x(&p)[1], LogicalPoint::new(9, -1));
    assert_eq!(reflect_y(&p)[1], LogicalPoint::new(-9, 1));
}

#[test]
fn diagonal_reflection_is_exact_both_ways() {
    let p = pentagon();
    let (a, b) = (LogicalPoint::new(0, 0), LogicalPoint::new(3, 3));
    let once = reflect_about_line(&p, a, b).unwrap();
    assert_eq!(once, lp(&[(0, 0), (1, 9), (8, 12), (13, 4), (6, -5)]));
    assert_eq!(reflect_about_line(&once, b, a).unwrap(), p);
}

#[test]
fn general_line_reflection_round_trips_within_a_cell() {
    let p = pentagon();
    let (a, b) = (LogicalPoint::new(0, 1), LogicalPoint::new(4, 3));
    let back = reflect_about_line(&reflect_about_line(&p, a, b).unwrap(), a, b).unwrap();
    assert!(max_drift(&p, &back) <= 1);
}

#[test]
fn degenerate_reflection_line_is_refused() {
    let a = LogicalPoint::new(2, 2);
    let err = reflect_about_line(&pentagon(), a, a).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
}

// ─── Rotation ────────────────────────────────────────────────────────────────

#[test]
fn positive_angle_turns_clockwise_on_screen() {
    assert_eq!(rotate(&lp(&[(10, 0)]), 90.0), lp(&[(0, -10)]));
    assert_eq!(rotate_about(&lp(&[(12, 3)]), LogicalPoint::new(2, 3), 90.0), lp(&[(2, -7)]));
}

#[test]
fn rotate_about_pivot_round_trips_within_one_unit() {
    let p = pentagon();
    let pivot = LogicalPoint::new(3, -2);
    for deg in [5.0, 10.0, 15.0, 30.0, 37.0, 45.0, 60.0, 90.0, 137.0, 180.0, 270.0] {
        let back = rotate_about(&rotate_about(&p, pivot, deg), pivot, -deg);
        assert!(max_drift(&p, &back) <= 1, "drift above 1 at {deg}°");
    }
}

#[test]
fn pivot_is_a_fixed_point() {
    let pivot = LogicalPoint::new(-4, 7);
    for deg in [13.0, 90.0, 211.0] {
        assert_eq!(rotate_about(&[pivot], pivot, deg), vec![pivot]);
    }
}

// ─── Scale / shear / translate ───────────────────────────────────────────────

#[test]
fn scale_about_centroid_keeps_the_center() {
    let sq = lp(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
    assert_eq!(scale_about_centroid(&sq, 2.0, 2.0).unwrap(), lp(&[(-2, -2), (6, -2), (6, 6), (-2, 6)]));
    // -1 means "shrink to half", not "mirror".
    assert_eq!(effective_scale(-1.0), 0.5);
    assert_eq!(scale_about_centroid(&sq, -1.0, -1.0).unwrap(), lp(&[(1, 1), (3, 1), (3, 3), (1, 3)]));
}

#[test]
fn shear_about_centroid_moves_rows_sideways() {
    let sq = lp(&[(0, 0), (4, 0), (4, 4), (0, 4)]);
    let out = shear_about_centroid(&sq, 1.0, 0.0).unwrap();
    assert_eq!(out, lp(&[(-2, 0), (2, 0), (6, 4), (2, 4)]));
}

#[test]
fn empty_vertex_list_has_no_centroid() {
    let err = scale_about_centroid(&[], 2.0, 2.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidGeometry);
}

#[test]
fn translate_keeps_shape() {
    let p = pentagon();
    let moved = translate(&p, -3, 5);
    assert_eq!(translate(&moved, 3, -5), p);
    // Saturates instead of wrapping.
    assert_eq!(translate(&lp(&[(i32::MAX - 1, 0)]), 5, 0), lp(&[(i32::MAX, 0)]));
    let mut poly = Polygon::closed_from(p.clone(), Color::WHITE).unwrap();
    let area = poly.signed_area();
    poly.set_vertices(moved);
    assert!(poly.is_closed());
    assert_eq!(poly.signed_area(), area);
}
