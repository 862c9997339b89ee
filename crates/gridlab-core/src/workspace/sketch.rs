//! Line and circle sketching with an undo history.

use tracing::{debug, info};

use crate::anim::{Animation, AnimationState, Tick};
use crate::error::{Error, Result};
use crate::grid::{Grid, RASTER_MIN_CELL_SIZE};
use crate::history::{ShapeHistory, ShapeKind, ShapeRecord};
use crate::raster::{CircleAlgorithm, CircleStepper, radius_between, rasterize_line};
use crate::settings::Settings;
use crate::surface::{CellSurface, ColorSurface};
use crate::types::color::{Color, Palette};
use crate::types::geom::LogicalPoint;
use crate::workspace::{Picks, StatusLine, Workspace, paint_axes, paint_points};

/// A circle being drawn one octant step per tick, plus what it painted so far.
#[derive(Debug, Clone)]
struct CircleJob {
    stepper: CircleStepper,
    color:   Color,
    points:  Vec<LogicalPoint>,
}

#[derive(Debug, Clone)]
pub struct SketchPad {
    grid:      Grid,
    surface:   CellSurface,
    palette:   Palette,
    algorithm: CircleAlgorithm,
    animate:   bool,
    picks:     Picks,
    history:   ShapeHistory,
    animation: Animation<CircleJob>,
    last_painted: usize,
    status:    StatusLine,
}

impl SketchPad {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let grid = Grid::new(settings.canvas_width, settings.canvas_height, settings.cell_size, RASTER_MIN_CELL_SIZE)?;
        let mut pad = Self {
            surface:   CellSurface::for_grid(&grid),
            grid,
            palette:   settings.palette.clone(),
            algorithm: settings.circle_algorithm,
            animate:   settings.animate,
            picks:     Picks::default(),
            history:   ShapeHistory::default(),
            animation: Animation::default(),
            last_painted: 0,
            status:    StatusLine::new("Click two points, then draw a line or a circle."),
        };
        pad.redraw();
        Ok(pad)
    }

    pub fn algorithm(&self) -> CircleAlgorithm { self.algorithm }
    pub fn set_algorithm(&mut self, algorithm: CircleAlgorithm) { self.algorithm = algorithm; }
    pub fn set_animate(&mut self, animate: bool) { self.animate = animate; }

    pub fn picks(&self) -> Picks { self.picks }
    pub fn history(&self) -> &ShapeHistory { &self.history }

    /// Cells painted by the most recent shape ("Filled: N").
    pub fn last_painted(&self) -> usize { self.last_painted }

    pub fn animation_state(&self) -> AnimationState { self.animation.state() }

    pub fn circle_color(&self, algorithm: CircleAlgorithm) -> Color {
        match algorithm {
            CircleAlgorithm::Polar     => self.palette.circle_polar,
            CircleAlgorithm::Midpoint  => self.palette.circle_midpoint,
            CircleAlgorithm::Cartesian => self.palette.circle_cartesian,
        }
    }

    /// Bresenham line between the two most recent picks.
    pub fn draw_line(&mut self) -> Result<usize> {
        let result = self.try_draw_line();
        self.status.report(result)
    }

    fn try_draw_line(&mut self) -> Result<usize> {
        let (a, b) = self.picks.pair()
            .ok_or_else(|| Error::selection("click two points to draw a line"))?;
        self.finish_animation();
        let points = rasterize_line(a, b);
        let color = self.palette.line;
        Ok(self.commit(ShapeKind::Line, points, color))
    }

    /// Circle centered on the earlier pick, through the later one. With
    /// animation on, nothing is painted yet and `Ok(0)` is returned; ticks
    /// paint it and the finished circle is committed to the history.
    pub fn draw_circle(&mut self) -> Result<usize> {
        let result = self.try_draw_circle();
        self.status.report(result)
    }

    fn try_draw_circle(&mut self) -> Result<usize> {
        let (center, rim) = self.picks.pair()
            .ok_or_else(|| Error::selection("click a center and a point on the rim"))?;
        self.finish_animation();
        let radius = radius_between(center, rim);
        let stepper = CircleStepper::new(self.algorithm, center, radius)?;
        let color = self.circle_color(self.algorithm);
        debug!(algorithm = self.algorithm.as_str(), ?center, radius, animate = self.animate, "circle");

        if self.animate {
            self.animation = Animation::start(CircleJob { stepper, color, points: Vec::new() });
            self.status.set(format!("Drawing {} circle r={radius}", self.algorithm.as_str()));
            return Ok(0);
        }
        let points: Vec<LogicalPoint> = stepper.flatten().collect();
        Ok(self.commit(ShapeKind::Circle(self.algorithm), points, color))
    }

    fn commit(&mut self, kind: ShapeKind, points: Vec<LogicalPoint>, color: Color) -> usize {
        let painted = paint_points(&mut self.surface, &self.grid, &points, color);
        self.last_painted = points.len();
        self.status.set(format!("Drew {} | Filled: {} pixels", kind.label(), points.len()));
        info!(shape = %kind.label(), points = points.len(), painted, "shape committed");
        self.history.commit(ShapeRecord { kind, points, color });
        painted
    }

    /// Run a pending circle animation to the end and commit it.
    fn finish_animation(&mut self) {
        while self.animation.is_running() {
            self.tick();
        }
    }

    /// Stop a running circle. Its partial cells stay on the surface until the
    /// next redraw; nothing is committed.
    pub fn cancel_animation(&mut self) {
        if let Some(job) = self.animation.cancel() {
            debug!(points = job.points.len(), "circle animation cancelled");
            self.status.set("Animation cancelled");
        }
    }

    /// Remove the most recent shape and repaint what is left.
    pub fn undo(&mut self) -> Option<ShapeRecord> {
        self.cancel_animation();
        let record = self.history.undo();
        match &record {
            Some(r) => {
                info!(shape = %r.kind.label(), remaining = self.history.undo_len(), "undo");
                self.status.set(format!("Removed {}", r.kind.label()));
            }
            None => self.status.set("Nothing to undo"),
        }
        self.redraw();
        record
    }

    pub fn redo(&mut self) -> Option<ShapeRecord> {
        self.cancel_animation();
        let record = self.history.redo();
        if let Some(r) = &record {
            info!(shape = %r.kind.label(), "redo");
            self.status.set(format!("Restored {}", r.kind.label()));
            self.redraw();
        }
        record
    }
}

impl Workspace for SketchPad {
    fn grid(&self) -> &Grid { &self.grid }
    fn surface(&self) -> &CellSurface { &self.surface }
    fn status(&self) -> &str { self.status.as_str() }

    fn on_click(&mut self, px: i32, py: i32) -> Result<LogicalPoint> {
        let checked = self.grid.check(self.grid.pixel_to_cell(px, py));
        let cell = self.status.report(checked)?;
        let p = self.grid.cell_to_logical(cell);
        self.picks.push(p);
        self.status.set(format!("X : {}, Y : {}", p.x, p.y));
        Ok(p)
    }

    fn set_cell_size(&mut self, cell_size: i32) -> Result<()> {
        let changed = self.grid.set_cell_size(cell_size);
        self.status.report(changed)?;
        self.finish_animation();
        self.surface.reshape(&self.grid);
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        self.surface.clear();
        paint_axes(&mut self.surface, &self.grid, self.palette.axis);
        for record in self.history.records() {
            paint_points(&mut self.surface, &self.grid, &record.points, record.color);
        }
    }

    fn tick(&mut self) -> AnimationState {
        let Self { animation, surface, grid, .. } = self;
        let tick = animation.tick(|job| {
            let octant = job.stepper.next()?;
            paint_points(surface, grid, &octant, job.color);
            job.points.extend_from_slice(&octant);
            Some(())
        });
        if let Tick::Finished(job) = tick {
            let kind = ShapeKind::Circle(job.stepper.algorithm());
            self.commit(kind, job.points, job.color);
        }
        self.animation.state()
    }

    fn clear(&mut self) {
        self.animation.cancel();
        self.picks.clear();
        self.history.clear();
        self.last_painted = 0;
        self.status.set("Cleared");
        self.redraw();
    }
}
