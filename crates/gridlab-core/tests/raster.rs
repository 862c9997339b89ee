//! Line and circle rasterization through the public API.

use std::collections::BTreeSet;

use gridlab_core::raster::{CircleAlgorithm, CircleStepper, rasterize_circle, rasterize_line};
use gridlab_core::{Grid, LogicalPoint};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn p(x: i32, y: i32) -> LogicalPoint { LogicalPoint::new(x, y) }

fn set(pts: &[LogicalPoint]) -> BTreeSet<(i32, i32)> {
    pts.iter().map(|p| (p.x, p.y)).collect()
}

fn circle(algorithm: CircleAlgorithm, r: i32) -> BTreeSet<(i32, i32)> {
    let pts = rasterize_circle(algorithm, p(0, 0), r)
        .unwrap_or_else(|e| panic!("{} r={r} failed: {e}", algorithm.as_str()));
    set(&pts)
}

/// Every point of `a` has a point of `b` within one cell (Chebyshev).
fn within_one_cell(a: &BTreeSet<(i32, i32)>, b: &BTreeSet<(i32, i32)>) -> bool {
    a.iter().all(|&(x, y)| b.iter().any(|&(u, v)| (x - u).abs() <= 1 && (y - v).abs() <= 1))
}

// ─── Lines ───────────────────────────────────────────────────────────────────

#[test]
fn line_is_symmetric() {
    let ends = [(-7, 3), (0, 0), (5, 5), (9, -2), (-3, -8), (4, 1), (1, 4), (0, 6)];
    for &(ax, ay) in &ends {
        for &(bx, by) in &ends {
            let forward = rasterize_line(p(ax, ay), p(bx, by));
            let mut backward = rasterize_line(p(bx, by), p(ax, ay));
            backward.reverse();
            assert_eq!(forward, backward, "({ax},{ay}) ↔ ({bx},{by})");
        }
    }
}

#[test]
fn line_is_eight_connected_with_exact_ends() {
    let pts = rasterize_line(p(-6, 2), p(11, -5));
    assert_eq!(pts.first(), Some(&p(-6, 2)));
    assert_eq!(pts.last(), Some(&p(11, -5)));
    assert_eq!(pts.len(), 18);
    for w in pts.windows(2) {
        let (dx, dy) = ((w[1].x - w[0].x).abs(), (w[1].y - w[0].y).abs());
        assert!(dx <= 1 && dy <= 1 && (dx, dy) != (0, 0), "gap between {:?} and {:?}", w[0], w[1]);
    }
}

#[test]
fn steep_line_has_one_cell_per_row() {
    let pts = rasterize_line(p(0, 0), p(3, 10));
    let rows: BTreeSet<i32> = pts.iter().map(|p| p.y).collect();
    assert_eq!(pts.len(), 11);
    assert_eq!(rows.len(), 11);
}

// ─── Circles ─────────────────────────────────────────────────────────────────

#[test]
fn circle_generators_agree_within_one_cell() {
    for r in 1..=40 {
        let polar = circle(CircleAlgorithm::Polar, r);
        let mid   = circle(CircleAlgorithm::Midpoint, r);
        let cart  = circle(CircleAlgorithm::Cartesian, r);
        for (name, a, b) in [
            ("polar/midpoint", &polar, &mid),
            ("midpoint/polar", &mid, &polar),
            ("cartesian/midpoint", &cart, &mid),
            ("midpoint/cartesian", &mid, &cart),
            ("polar/cartesian", &polar, &cart),
            ("cartesian/polar", &cart, &polar),
        ] {
            assert!(within_one_cell(a, b), "{name} disagree at r={r}");
        }
    }
}

#[test]
fn circle_points_lie_near_the_radius() {
    for algorithm in CircleAlgorithm::ALL {
        for r in [1, 3, 8, 17, 30] {
            for (x, y) in circle(algorithm, r) {
                let d = ((x * x + y * y) as f64).sqrt();
                assert!((d - r as f64).abs() <= 1.0, "{} r={r}: ({x},{y}) at {d:.2}", algorithm.as_str());
            }
        }
    }
}

#[test]
fn circle_sets_have_eight_fold_symmetry() {
    for algorithm in CircleAlgorithm::ALL {
        let s = circle(algorithm, 12);
        for &(x, y) in &s {
            for q in [(-x, y), (x, -y), (y, x), (-y, -x)] {
                assert!(s.contains(&q), "{} missing mirror {q:?} of ({x},{y})", algorithm.as_str());
            }
        }
    }
}

#[test]
fn zero_radius_is_the_center() {
    for algorithm in CircleAlgorithm::ALL {
        assert_eq!(circle(algorithm, 0), BTreeSet::from([(0, 0)]));
    }
}

#[test]
fn negative_radius_is_rejected() {
    let err = CircleStepper::new(CircleAlgorithm::Polar, p(0, 0), -2).unwrap_err();
    assert_eq!(err.kind(), gridlab_core::ErrorKind::InvalidGeometry);
}

#[test]
fn stepping_reveals_the_batch_result() {
    for algorithm in CircleAlgorithm::ALL {
        let batch = rasterize_circle(algorithm, p(3, -2), 9).unwrap();
        let mut stepped = Vec::new();
        let mut steps = 0;
        for octant in CircleStepper::new(algorithm, p(3, -2), 9).unwrap() {
            stepped.extend_from_slice(&octant);
            steps += 1;
        }
        assert_eq!(stepped, batch);
        assert_eq!(stepped.len(), steps * 8);
    }
}

// ─── Grid mapping ────────────────────────────────────────────────────────────

#[test]
fn pixel_click_maps_to_logical_and_back() {
    let g = Grid::new(600, 400, 20, 2).unwrap();
    assert_eq!((g.columns(), g.rows()), (30, 20));
    assert_eq!(g.pixel_to_logical(300, 200), p(0, 0));
    assert_eq!(g.pixel_to_logical(345, 170), p(2, 2));
    assert_eq!(g.pixel_to_logical(0, 0), p(-15, 10));
    for lp in [p(0, 0), p(-15, 10), p(14, -9), p(3, 4)] {
        assert_eq!(g.cell_to_logical(g.logical_to_cell(lp)), lp);
    }
}
