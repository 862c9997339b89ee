//! Stack-based seed fills.
//!
//! Both fills pop cells LIFO, visit each cell at most once and push the
//! configured neighbours of every cell they paint. They differ only in the
//! test deciding whether a popped cell gets painted.

use std::collections::HashSet;

use tracing::debug;

use crate::anim::Stepper;
use crate::error::{Error, Result};
use crate::fill::Connectivity;
use crate::surface::ColorSurface;
use crate::types::color::Color;
use crate::types::geom::Cell;

/// Region-driven fill: repaint the connected region that has the seed's color.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodFill {
    pub color: Color,
    pub connectivity: Connectivity,
    /// Colors treated as unpainted background when comparing regions, e.g.
    /// axis cells that should not split a region.
    pub transparent: Vec<Color>,
    /// Colors that are never repainted and never crossed, except on the seed
    /// cell itself, which then counts as background.
    pub barriers: Vec<Color>,
}

impl FloodFill {
    pub fn new(color: Color, connectivity: Connectivity) -> Self {
        Self { color, connectivity, transparent: Vec::new(), barriers: Vec::new() }
    }

    pub fn transparent(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.transparent.extend(colors);
        self
    }

    pub fn barriers(mut self, colors: impl IntoIterator<Item = Color>) -> Self {
        self.barriers.extend(colors);
        self
    }

    fn is_barrier(&self, state: Option<Color>) -> bool {
        state.is_some_and(|c| self.barriers.contains(&c))
    }

    fn region_of(&self, state: Option<Color>) -> Option<Color> {
        match state {
            Some(c) if self.transparent.contains(&c) => None,
            other => other,
        }
    }
}

/// Boundary-driven fill: paint everything reachable that is neither the
/// boundary color nor already the fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryFill {
    pub color: Color,
    pub boundary: Color,
    pub connectivity: Connectivity,
}

#[derive(Debug, Clone, PartialEq)]
enum Rule {
    Flood { spec: FloodFill, region: Option<Color>, seed: Cell },
    Boundary(BoundaryFill),
}

/// Paints one cell per `step`. Exhausted when the stack runs dry.
#[derive(Debug, Clone)]
pub struct SeedFillStepper {
    rule: Rule,
    stack: Vec<Cell>,
    visited: HashSet<Cell>,
    painted: usize,
}

impl SeedFillStepper {
    /// Flood from `seed`. If the seed's region already has the fill color the
    /// stepper starts exhausted and the fill is a no-op.
    pub fn flood<S: ColorSurface + ?Sized>(surface: &S, seed: Cell, spec: FloodFill) -> Result<Self> {
        check_seed(surface, seed)?;
        let state = surface.cell_color(seed);
        let region = if spec.is_barrier(state) { None } else { spec.region_of(state) };
        let stack = if region == Some(spec.color) { Vec::new() } else { vec![seed] };
        debug!(?seed, ?region, fill = ?spec.color, "flood fill start");
        Ok(Self::with_stack(Rule::Flood { spec, region, seed }, stack))
    }

    pub fn boundary<S: ColorSurface + ?Sized>(surface: &S, seed: Cell, spec: BoundaryFill) -> Result<Self> {
        check_seed(surface, seed)?;
        debug!(?seed, fill = ?spec.color, boundary = ?spec.boundary, "boundary fill start");
        Ok(Self::with_stack(Rule::Boundary(spec), vec![seed]))
    }

    fn with_stack(rule: Rule, stack: Vec<Cell>) -> Self {
        Self { rule, stack, visited: HashSet::new(), painted: 0 }
    }

    pub fn painted(&self) -> usize { self.painted }

    pub fn is_exhausted(&self) -> bool { self.stack.is_empty() }

    fn connectivity(&self) -> Connectivity {
        match &self.rule {
            Rule::Flood { spec, .. } => spec.connectivity,
            Rule::Boundary(spec)     => spec.connectivity,
        }
    }

    fn fill_color(&self) -> Color {
        match &self.rule {
            Rule::Flood { spec, .. } => spec.color,
            Rule::Boundary(spec)     => spec.color,
        }
    }

    fn accepts(&self, cell: Cell, state: Option<Color>) -> bool {
        match &self.rule {
            Rule::Flood { seed, .. } if cell == *seed => true,
            Rule::Flood { spec, .. } if spec.is_barrier(state) => false,
            Rule::Flood { spec, region, .. } => spec.region_of(state) == *region,
            Rule::Boundary(spec) => state != Some(spec.color) && state != Some(spec.boundary),
        }
    }
}

impl<S: ColorSurface + ?Sized> Stepper<S> for SeedFillStepper {
    type Item = Cell;

    /// Paint the next accepted cell and return it.
    fn step(&mut self, surface: &mut S) -> Option<Cell> {
        while let Some(cell) = self.stack.pop() {
            if !surface.contains(cell) || !self.visited.insert(cell) {
                continue;
            }
            if !self.accepts(cell, surface.cell_color(cell)) {
                continue;
            }
            surface.paint_cell(cell, self.fill_color());
            self.painted += 1;
            let connectivity = self.connectivity();
            self.stack.extend(connectivity.neighbours(cell));
            return Some(cell);
        }
        None
    }
}

fn check_seed<S: ColorSurface + ?Sized>(surface: &S, seed: Cell) -> Result<()> {
    if surface.contains(seed) {
        Ok(())
    } else {
        Err(Error::OutOfBounds { col: seed.col, row: seed.row })
    }
}

/// Flood fill in one go. Returns the number of cells painted.
pub fn flood_fill<S: ColorSurface + ?Sized>(surface: &mut S, seed: Cell, spec: FloodFill) -> Result<usize> {
    let mut stepper = SeedFillStepper::flood(&*surface, seed, spec)?;
    stepper.finish(surface);
    Ok(stepper.painted())
}

/// Boundary fill in one go. Returns the number of cells painted.
pub fn boundary_fill<S: ColorSurface + ?Sized>(surface: &mut S, seed: Cell, spec: BoundaryFill) -> Result<usize> {
    let mut stepper = SeedFillStepper::boundary(&*surface, seed, spec)?;
    stepper.finish(surface);
    Ok(stepper.painted())
}
