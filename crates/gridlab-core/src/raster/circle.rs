//! Circle generators.
//!
//! All three compute one 45° arc (from the +x axis up to the diagonal) and
//! mirror each arc point into the eight octants. The batch functions simply
//! drain a [`CircleStepper`], so an animated draw and a batch draw always
//! produce the same points in the same order.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::geom::LogicalPoint;

/// Largest radius a circle generator accepts.
pub const MAX_RADIUS: i32 = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleAlgorithm {
    /// `x = r·cosθ, y = r·sinθ` for θ in `[0, π/4]`, step `1/r`.
    Polar,
    /// Integer decision-variable (Bresenham) circle.
    #[default]
    Midpoint,
    /// `x = √(r² − y²)` for y in `[0, r/√2]`.
    Cartesian,
}

impl CircleAlgorithm {
    pub const ALL: [CircleAlgorithm; 3] = [Self::Polar, Self::Midpoint, Self::Cartesian];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polar     => "polar",
            Self::Midpoint  => "midpoint",
            Self::Cartesian => "cartesian",
        }
    }
}

/// The eight octant reflections of arc point `(x, y)` around `center`.
pub fn octant_points(center: LogicalPoint, x: i32, y: i32) -> [LogicalPoint; 8] {
    let c = center;
    [
        c.offset( x,  y),
        c.offset(-x,  y),
        c.offset( x, -y),
        c.offset(-x, -y),
        c.offset( y,  x),
        c.offset(-y,  x),
        c.offset( y, -x),
        c.offset(-y, -x),
    ]
}

/// Radius of the circle centered on `center` that passes through `rim`.
pub fn radius_between(center: LogicalPoint, rim: LogicalPoint) -> i32 {
    let dx = rim.x as f64 - center.x as f64;
    let dy = rim.y as f64 - center.y as f64;
    (dx * dx + dy * dy).sqrt().round() as i32
}

// ─── Stepper ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Arc {
    Polar     { theta: f64, step: f64 },
    Midpoint  { x: i32, y: i32, d: i64 },
    Cartesian { y: i32, y_end: i32 },
}

/// One octant step per `next()`: yields the eight mirrored points of the next
/// arc point, `None` once the variant's stop condition holds
/// (`θ > π/4`, `x > y`, or `y > r/√2`).
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStepper {
    algorithm: CircleAlgorithm,
    center: LogicalPoint,
    radius: i32,
    arc: Arc,
}

impl CircleStepper {
    pub fn new(algorithm: CircleAlgorithm, center: LogicalPoint, radius: i32) -> Result<Self> {
        if radius < 0 {
            return Err(Error::geometry(format!("circle radius must not be negative, got {radius}")));
        }
        if radius > MAX_RADIUS {
            return Err(Error::geometry(format!("circle radius must be at most {MAX_RADIUS}, got {radius}")));
        }
        let arc = match algorithm {
            CircleAlgorithm::Polar => Arc::Polar {
                theta: 0.0,
                step: 1.0 / radius.max(1) as f64,
            },
            CircleAlgorithm::Midpoint => Arc::Midpoint { x: 0, y: radius, d: 3 - 2 * radius as i64 },
            CircleAlgorithm::Cartesian => Arc::Cartesian {
                y: 0,
                y_end: (radius as f64 / std::f64::consts::SQRT_2).round() as i32,
            },
        };
        Ok(Self { algorithm, center, radius, arc })
    }

    pub fn algorithm(&self) -> CircleAlgorithm { self.algorithm }
    pub fn center(&self)    -> LogicalPoint    { self.center }
    pub fn radius(&self)    -> i32             { self.radius }
}

impl Iterator for CircleStepper {
    type Item = [LogicalPoint; 8];

    fn next(&mut self) -> Option<Self::Item> {
        let r = self.radius;
        let (x, y) = match &mut self.arc {
            Arc::Polar { theta, step } => {
                if *theta > FRAC_PI_4 { return None; }
                let rf = r as f64;
                let p = ((rf * theta.cos()).round() as i32, (rf * theta.sin()).round() as i32);
                *theta += *step;
                p
            }
            Arc::Midpoint { x, y, d } => {
                if *x > *y { return None; }
                let p = (*x, *y);
                if *d < 0 {
                    *d += 4 * *x as i64 + 6;
                } else {
                    *y -= 1;
                    *d += 4 * (*x - *y) as i64 + 10;
                }
                *x += 1;
                p
            }
            Arc::Cartesian { y, y_end } => {
                if *y > *y_end { return None; }
                let yy = *y;
                let (r, yy) = (r as i64, yy as i64);
                let x = (((r * r - yy * yy) as f64).sqrt()).round() as i32;
                *y += 1;
                (x, yy as i32)
            }
        };
        Some(octant_points(self.center, x, y))
    }
}

// ─── Batch ────────────────────────────────────────────────────────────────────

/// Full point list of a circle, duplicates included (octant seams repeat).
pub fn rasterize_circle(algorithm: CircleAlgorithm, center: LogicalPoint, radius: i32) -> Result<Vec<LogicalPoint>> {
    Ok(CircleStepper::new(algorithm, center, radius)?.flatten().collect())
}

pub fn circle_polar(center: LogicalPoint, radius: i32) -> Result<Vec<LogicalPoint>> {
    rasterize_circle(CircleAlgorithm::Polar, center, radius)
}

pub fn circle_midpoint(center: LogicalPoint, radius: i32) -> Result<Vec<LogicalPoint>> {
    rasterize_circle(CircleAlgorithm::Midpoint, center, radius)
}

pub fn circle_cartesian(center: LogicalPoint, radius: i32) -> Result<Vec<LogicalPoint>> {
    rasterize_circle(CircleAlgorithm::Cartesian, center, radius)
}
