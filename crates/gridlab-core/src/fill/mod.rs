//! Fill engine: seed fills (flood, boundary) and the edge-list scanline fill,
//! plus the declarative records a polygon keeps so fills can be replayed.
//!
//! Every fill is a stepper underneath. The batch entry points just run the
//! stepper to exhaustion, so an animated fill ends in exactly the same surface
//! state as a batch one.

pub mod scanline;
pub mod seed;

use serde::{Deserialize, Serialize};

use crate::types::color::Color;
use crate::types::geom::{Cell, LogicalPoint};

pub use scanline::{ScanlineFill, ScanlineStepper, Span, scanline_fill, scanline_spans};
pub use seed::{BoundaryFill, FloodFill, SeedFillStepper, boundary_fill, flood_fill};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillAlgorithm {
    #[default]
    Flood,
    Boundary,
    Scanline,
}

impl FillAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flood    => "flood",
            Self::Boundary => "boundary",
            Self::Scanline => "scanline",
        }
    }
}

/// Neighbour set a seed fill expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

static FOUR: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
static DIAGONALS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

impl Connectivity {
    /// Neighbour offsets in push order: E, W, S, N, then the diagonals.
    pub fn offsets(self) -> impl Iterator<Item = (i32, i32)> {
        let diagonals: &'static [(i32, i32)] = match self {
            Self::Four  => &[],
            Self::Eight => &DIAGONALS,
        };
        FOUR.iter().chain(diagonals.iter()).copied()
    }

    pub fn neighbours(self, cell: Cell) -> impl Iterator<Item = Cell> {
        self.offsets().map(move |(dx, dy)| Cell::new(cell.col + dx, cell.row + dy))
    }
}

// ─── Replay records ───────────────────────────────────────────────────────────

/// A seed fill as it was requested: where, with what, and how far it spreads.
/// The seed is a logical point, so it still means the same place after the
/// cell size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRecord {
    pub seed: LogicalPoint,
    pub color: Color,
    pub connectivity: Connectivity,
}

/// Fills applied to one polygon. Redraw replays them in a fixed order:
/// boundary, flood, scanline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillRecords {
    pub flood:    Option<SeedRecord>,
    pub boundary: Option<SeedRecord>,
    pub scanline: Option<Color>,
}

impl FillRecords {
    pub fn is_empty(&self) -> bool {
        self.flood.is_none() && self.boundary.is_none() && self.scanline.is_none()
    }

    pub fn clear(&mut self) { *self = Self::default(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbour_counts() {
        let c = Cell::new(5, 5);
        assert_eq!(Connectivity::Four.neighbours(c).count(), 4);
        assert_eq!(Connectivity::Eight.neighbours(c).count(), 8);
        assert!(Connectivity::Eight.neighbours(c).any(|n| n == Cell::new(6, 6)));
        assert!(!Connectivity::Four.neighbours(c).any(|n| n == Cell::new(6, 6)));
    }

    #[test]
    fn records_clear() {
        let mut r = FillRecords::default();
        assert!(r.is_empty());
        r.scanline = Some(Color::MAGENTA);
        assert!(!r.is_empty());
        r.clear();
        assert!(r.is_empty());
    }
}
