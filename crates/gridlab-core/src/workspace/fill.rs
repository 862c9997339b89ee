//! Polygon drawing and filling.
//!
//! The surface is never the source of truth. Markers, closed polygons and the
//! fill records on each polygon are; `redraw` rebuilds everything from them
//! in a fixed order: axes, markers, outlines, then per polygon the boundary,
//! flood and scanline fills.

use tracing::{debug, info};

use crate::anim::{Animation, AnimationState, Stepper, Tick};
use crate::error::{Error, Result};
use crate::fill::{
    BoundaryFill, Connectivity, FillAlgorithm, FloodFill, ScanlineFill, ScanlineStepper, SeedFillStepper,
    SeedRecord, boundary_fill, flood_fill, scanline_fill,
};
use crate::grid::{Grid, RASTER_MIN_CELL_SIZE};
use crate::polygon::Polygon;
use crate::settings::Settings;
use crate::surface::{CellSurface, ColorSurface};
use crate::types::color::{Color, Palette};
use crate::types::geom::LogicalPoint;
use crate::workspace::{StatusLine, Workspace, paint_axes, paint_points};

#[derive(Debug, Clone)]
enum FillJob {
    Flood(SeedFillStepper),
    Boundary(SeedFillStepper),
    Scanline(ScanlineStepper),
}

impl FillJob {
    fn algorithm(&self) -> FillAlgorithm {
        match self {
            Self::Flood(_)    => FillAlgorithm::Flood,
            Self::Boundary(_) => FillAlgorithm::Boundary,
            Self::Scanline(_) => FillAlgorithm::Scanline,
        }
    }

    fn painted(&self) -> usize {
        match self {
            Self::Flood(s) | Self::Boundary(s) => s.painted(),
            Self::Scanline(s)                  => s.painted(),
        }
    }

    /// One step; `None` once exhausted.
    fn step(&mut self, surface: &mut CellSurface) -> Option<()> {
        match self {
            Self::Flood(s) | Self::Boundary(s) => s.step(surface).map(drop),
            Self::Scanline(s)                  => s.step(surface).map(drop),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FillCanvas {
    grid:         Grid,
    surface:      CellSurface,
    palette:      Palette,
    algorithm:    FillAlgorithm,
    connectivity: Connectivity,
    animate:      bool,
    polygons:     Vec<Polygon>,
    /// Polygon being drawn; `Some` while in polygon mode.
    draft:        Option<Polygon>,
    markers:      Vec<LogicalPoint>,
    seed:         Option<LogicalPoint>,
    animation:    Animation<FillJob>,
    status:       StatusLine,
}

impl FillCanvas {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let grid = Grid::new(settings.canvas_width, settings.canvas_height, settings.cell_size, RASTER_MIN_CELL_SIZE)?;
        let mut canvas = Self {
            surface:      CellSurface::for_grid(&grid),
            grid,
            palette:      settings.palette.clone(),
            algorithm:    settings.fill_algorithm,
            connectivity: settings.connectivity,
            animate:      settings.animate,
            polygons:     Vec::new(),
            draft:        None,
            markers:      Vec::new(),
            seed:         None,
            animation:    Animation::default(),
            status:       StatusLine::new("Start a polygon, click its vertices, then close it."),
        };
        canvas.redraw();
        Ok(canvas)
    }

    pub fn algorithm(&self) -> FillAlgorithm { self.algorithm }
    pub fn set_algorithm(&mut self, algorithm: FillAlgorithm) { self.algorithm = algorithm; }

    pub fn connectivity(&self) -> Connectivity { self.connectivity }
    pub fn set_connectivity(&mut self, connectivity: Connectivity) { self.connectivity = connectivity; }

    pub fn set_animate(&mut self, animate: bool) { self.animate = animate; }

    pub fn polygons(&self) -> &[Polygon] { &self.polygons }
    pub fn draft(&self) -> Option<&Polygon> { self.draft.as_ref() }
    pub fn markers(&self) -> &[LogicalPoint] { &self.markers }
    pub fn seed(&self) -> Option<LogicalPoint> { self.seed }
    pub fn animation_state(&self) -> AnimationState { self.animation.state() }

    /// Enter polygon mode with a fresh, empty draft.
    pub fn start_polygon(&mut self) {
        self.draft = Some(Polygon::new(self.palette.outline));
        self.status.set("Polygon mode: click vertices, then close.");
    }

    /// Move the draft into the polygon list. Needs at least 3 vertices; on
    /// failure the draft stays open.
    pub fn close_polygon(&mut self) -> Result<()> {
        let result = self.try_close_polygon();
        self.status.report(result)
    }

    fn try_close_polygon(&mut self) -> Result<()> {
        let draft = self.draft.as_mut()
            .ok_or_else(|| Error::selection("no polygon in progress, start one first"))?;
        if !draft.is_closed() {
            draft.close()?;
        }
        self.finish_draft();
        Ok(())
    }

    fn finish_draft(&mut self) {
        let Some(poly) = self.draft.take() else { return };
        info!(vertices = poly.len(), index = self.polygons.len(), "polygon closed");
        self.status.set(format!("Polygon closed with {} vertices", poly.len()));
        self.polygons.push(poly);
        self.redraw();
    }

    /// Apply the selected fill to the most recent polygon and remember it for
    /// replay. Seed fills use the last marker click as their seed.
    pub fn fill_polygon(&mut self) -> Result<usize> {
        let result = self.try_fill_polygon();
        self.status.report(result)
    }

    fn try_fill_polygon(&mut self) -> Result<usize> {
        if self.polygons.is_empty() {
            return Err(Error::selection("no closed polygon to fill"));
        }
        self.finish_animation();

        let algorithm = self.algorithm;
        let mut job = match algorithm {
            FillAlgorithm::Flood | FillAlgorithm::Boundary => {
                let seed = self.seed
                    .ok_or_else(|| Error::selection("click inside the polygon to pick a seed"))?;
                let cell = self.grid.check(self.grid.logical_to_cell(seed))?;
                let record = SeedRecord {
                    seed,
                    color: if algorithm == FillAlgorithm::Flood { self.palette.flood } else { self.palette.boundary },
                    connectivity: self.connectivity,
                };
                if algorithm == FillAlgorithm::Flood {
                    let stepper = SeedFillStepper::flood(&self.surface, cell, self.flood_spec(&record))?;
                    // The seed's own marker is consumed by the flood.
                    self.markers.retain(|&m| m != seed);
                    self.last_polygon_mut()?.fills.flood = Some(record);
                    FillJob::Flood(stepper)
                } else {
                    let outline = self.last_polygon()?.outline();
                    let stepper = SeedFillStepper::boundary(&self.surface, cell, boundary_spec(&record, outline))?;
                    self.last_polygon_mut()?.fills.boundary = Some(record);
                    FillJob::Boundary(stepper)
                }
            }
            FillAlgorithm::Scanline => {
                let color = self.palette.scanline;
                let poly = self.last_polygon()?;
                let spec = ScanlineFill { color, outline: Some(poly.outline()) };
                let stepper = ScanlineStepper::new(&self.grid, poly.vertices(), spec)?;
                self.last_polygon_mut()?.fills.scanline = Some(color);
                FillJob::Scanline(stepper)
            }
        };
        debug!(algorithm = algorithm.as_str(), connectivity = ?self.connectivity, animate = self.animate, "fill");

        if self.animate {
            self.animation = Animation::start(job);
            self.status.set(format!("Filling ({})", algorithm.as_str()));
            return Ok(0);
        }
        while job.step(&mut self.surface).is_some() {}
        let painted = job.painted();
        self.report_fill(algorithm, painted);
        Ok(painted)
    }

    fn report_fill(&mut self, algorithm: FillAlgorithm, painted: usize) {
        info!(algorithm = algorithm.as_str(), painted, "fill applied");
        self.status.set(format!("{} fill: {painted} cells", algorithm.as_str()));
    }

    fn last_polygon(&self) -> Result<&Polygon> {
        self.polygons.last().ok_or_else(|| Error::selection("no closed polygon to fill"))
    }

    fn last_polygon_mut(&mut self) -> Result<&mut Polygon> {
        self.polygons.last_mut().ok_or_else(|| Error::selection("no closed polygon to fill"))
    }

    fn flood_spec(&self, record: &SeedRecord) -> FloodFill {
        FloodFill::new(record.color, record.connectivity)
            .transparent([self.palette.axis])
            .barriers([self.palette.marker])
    }

    fn finish_animation(&mut self) {
        while self.animation.is_running() {
            self.tick();
        }
    }

    /// Stop a running fill. Cells painted so far stay until the next redraw,
    /// which replays the fill in full.
    pub fn cancel_animation(&mut self) {
        if let Some(job) = self.animation.cancel() {
            debug!(painted = job.painted(), "fill animation cancelled");
            self.status.set("Animation cancelled");
        }
    }

    /// Forget every fill record and repaint outlines only.
    pub fn clear_fills(&mut self) {
        self.animation.cancel();
        for poly in &mut self.polygons {
            poly.fills.clear();
        }
        info!("fills cleared");
        self.status.set("Fills cleared");
        self.redraw();
    }

    fn replay_fills(&mut self) {
        for i in 0..self.polygons.len() {
            let poly = &self.polygons[i];
            let (fills, outline) = (poly.fills.clone(), poly.outline());
            if let Some(rec) = fills.boundary {
                let cell = self.grid.logical_to_cell(rec.seed);
                log_replay("boundary", boundary_fill(&mut self.surface, cell, boundary_spec(&rec, outline)));
            }
            if let Some(rec) = fills.flood {
                let cell = self.grid.logical_to_cell(rec.seed);
                let spec = self.flood_spec(&rec);
                log_replay("flood", flood_fill(&mut self.surface, cell, spec));
            }
            if let Some(color) = fills.scanline {
                let spec = ScanlineFill { color, outline: Some(outline) };
                let vertices = self.polygons[i].vertices().to_vec();
                log_replay("scanline", scanline_fill(&mut self.surface, &self.grid, &vertices, spec));
            }
        }
    }
}

fn boundary_spec(record: &SeedRecord, outline: Color) -> BoundaryFill {
    BoundaryFill { color: record.color, boundary: outline, connectivity: record.connectivity }
}

fn log_replay(what: &str, result: Result<usize>) {
    match result {
        Ok(painted) => debug!(fill = what, painted, "replayed"),
        Err(e)      => debug!(fill = what, "replay skipped: {e}"),
    }
}

impl Workspace for FillCanvas {
    fn grid(&self) -> &Grid { &self.grid }
    fn surface(&self) -> &CellSurface { &self.surface }
    fn status(&self) -> &str { self.status.as_str() }

    /// In polygon mode the click adds a vertex (clicking the first vertex
    /// again closes the polygon). Otherwise it paints a marker and becomes
    /// the seed for the next seed fill.
    fn on_click(&mut self, px: i32, py: i32) -> Result<LogicalPoint> {
        let checked = self.grid.check(self.grid.pixel_to_cell(px, py));
        let cell = self.status.report(checked)?;
        let p = self.grid.cell_to_logical(cell);

        if let Some(draft) = self.draft.as_mut() {
            let pushed = draft.push(p);
            if self.status.report(pushed)? {
                self.finish_draft();
            } else {
                self.status.set(format!("Vertex: X={}, Y={}", p.x, p.y));
                self.redraw();
            }
        } else {
            self.markers.push(p);
            self.seed = Some(p);
            self.surface.paint_cell(cell, self.palette.marker);
            self.status.set(format!("Painted: X={}, Y={}", p.x, p.y));
        }
        Ok(p)
    }

    fn set_cell_size(&mut self, cell_size: i32) -> Result<()> {
        let changed = self.grid.set_cell_size(cell_size);
        self.status.report(changed)?;
        self.animation.cancel();
        self.surface.reshape(&self.grid);
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        self.surface.clear();
        paint_axes(&mut self.surface, &self.grid, self.palette.axis);
        paint_points(&mut self.surface, &self.grid, &self.markers, self.palette.marker);
        for poly in &self.polygons {
            let cells = poly.outline_cells(&self.grid);
            self.surface.paint_all(&cells, poly.outline());
        }
        self.replay_fills();

        if let Some(draft) = &self.draft {
            let cells = draft.outline_cells(&self.grid);
            self.surface.paint_all(&cells, self.palette.preview);
            paint_points(&mut self.surface, &self.grid, draft.vertices(), self.palette.vertex);
        }
    }

    fn tick(&mut self) -> AnimationState {
        let Self { animation, surface, .. } = self;
        if let Tick::Finished(job) = animation.tick(|job| job.step(surface)) {
            self.report_fill(job.algorithm(), job.painted());
        }
        self.animation.state()
    }

    fn clear(&mut self) {
        self.animation.cancel();
        self.polygons.clear();
        self.draft = None;
        self.markers.clear();
        self.seed = None;
        self.status.set("Cleared");
        self.redraw();
    }
}
