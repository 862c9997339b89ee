//! A single working polygon under affine transforms.
//!
//! Clicks add vertices until the polygon is closed and always update the
//! pick history. The first close freezes a copy as the original, which
//! stays on screen and can be restored. Held W/A/S/D keys nudge the polygon
//! one cell per tick.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::anim::AnimationState;
use crate::error::{Error, Result};
use crate::grid::{Grid, TRANSFORM_MIN_CELL_SIZE};
use crate::polygon::Polygon;
use crate::raster::line_cells;
use crate::settings::Settings;
use crate::surface::{CellSurface, ColorSurface};
use crate::transform;
use crate::types::color::Palette;
use crate::types::geom::{Direction, LogicalPoint};
use crate::workspace::{Picks, StatusLine, Workspace, paint_axes};

/// W/A/S/D to nudge directions, case-insensitive.
pub fn key_direction(key: char) -> Option<Direction> {
    match key.to_ascii_lowercase() {
        'w' => Some(Direction::Up),
        'a' => Some(Direction::Left),
        's' => Some(Direction::Down),
        'd' => Some(Direction::Right),
        _   => None,
    }
}

#[derive(Debug, Clone)]
pub struct TransformBench {
    grid:        Grid,
    surface:     CellSurface,
    palette:     Palette,
    working:     Polygon,
    original:    Option<Polygon>,
    picks:       Picks,
    helper_line: Option<(LogicalPoint, LogicalPoint)>,
    held:        HashSet<Direction>,
    status:      StatusLine,
}

impl TransformBench {
    pub fn new(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        settings.check_transform_cell_size()?;
        let grid = Grid::new(settings.canvas_width, settings.canvas_height, settings.cell_size, TRANSFORM_MIN_CELL_SIZE)?;
        let mut bench = Self {
            surface:     CellSurface::for_grid(&grid),
            grid,
            working:     Polygon::new(settings.palette.working),
            palette:     settings.palette.clone(),
            original:    None,
            picks:       Picks::default(),
            helper_line: None,
            held:        HashSet::new(),
            status:      StatusLine::new("Click to add vertices. Close polygon to freeze 'original'."),
        };
        bench.redraw();
        Ok(bench)
    }

    pub fn working(&self)  -> &Polygon         { &self.working }
    pub fn original(&self) -> Option<&Polygon> { self.original.as_ref() }
    pub fn picks(&self)    -> Picks            { self.picks }
    pub fn helper_line(&self) -> Option<(LogicalPoint, LogicalPoint)> { self.helper_line }
    pub fn is_nudging(&self) -> bool { !self.held.is_empty() }

    /// Close the working polygon. The first successful close also freezes
    /// the original.
    pub fn close_polygon(&mut self) -> Result<()> {
        let result = if self.working.is_closed() { Ok(()) } else { self.working.close() };
        self.status.report(result)?;
        self.freeze_original();
        self.redraw();
        Ok(())
    }

    fn freeze_original(&mut self) {
        if self.original.is_some() {
            return;
        }
        let mut frozen = self.working.clone();
        frozen.set_outline(self.palette.original);
        self.original = Some(frozen);
        info!(vertices = self.working.len(), "original frozen");
        self.status.set("Original frozen. You can transform the working polygon.");
    }

    /// Put the frozen original back as the working polygon and drop the helper line.
    pub fn revert_to_original(&mut self) -> Result<()> {
        let original = self.original.as_ref()
            .ok_or_else(|| Error::selection("no original yet, close the polygon first"));
        let vertices = self.status.report(original)?.vertices().to_vec();
        self.working.set_vertices(vertices);
        self.helper_line = None;
        info!("reverted to original");
        self.status.set("Reverted to original polygon.");
        self.redraw();
        Ok(())
    }

    fn transform_with(
        &mut self,
        message: String,
        op: impl FnOnce(&[LogicalPoint]) -> Result<Vec<LogicalPoint>>,
    ) -> Result<()> {
        let result = if self.working.is_empty() {
            Err(Error::selection("no polygon to transform, click some vertices first"))
        } else {
            op(self.working.vertices()).and_then(|v| self.within_reach(v))
        };
        let vertices = self.status.report(result)?;
        debug!(?vertices, "{message}");
        self.working.set_vertices(vertices);
        self.status.set(message);
        self.redraw();
        Ok(())
    }

    /// Refuse results that left the drawable neighbourhood of the grid. The
    /// working polygon keeps its previous vertices.
    fn within_reach(&self, vertices: Vec<LogicalPoint>) -> Result<Vec<LogicalPoint>> {
        match vertices.iter().find(|&&p| !self.grid.within_reach(p)) {
            Some(p) => Err(Error::geometry(format!(
                "vertex ({},{}) would land beyond ±{} of the origin",
                p.x, p.y, self.grid.reach(),
            ))),
            None => Ok(vertices),
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.transform_with(format!("Translated by ({dx}, {dy})"), |v| Ok(transform::translate(v, dx, dy)))
    }

    pub fn rotate(&mut self, degrees: f64) -> Result<()> {
        self.transform_with(format!("Rotated {degrees}° about the origin"), |v| Ok(transform::rotate(v, degrees)))
    }

    /// Rotate about the most recent pick.
    pub fn rotate_about_pick(&mut self, degrees: f64) -> Result<()> {
        let pivot = self.picks.last()
            .ok_or_else(|| Error::selection("pick a pivot on the grid (click) and try again"));
        let pivot = self.status.report(pivot)?;
        self.transform_with(
            format!("Rotated about ({},{})", pivot.x, pivot.y),
            |v| Ok(transform::rotate_about(v, pivot, degrees)),
        )
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> Result<()> {
        let (ex, ey) = (transform::effective_scale(sx), transform::effective_scale(sy));
        self.transform_with(
            format!("Scaled about centroid | input ({sx}, {sy}) → effective ({ex:.4}, {ey:.4})"),
            |v| transform::scale_about_centroid(v, sx, sy),
        )
    }

    pub fn shear(&mut self, shx: f64, shy: f64) -> Result<()> {
        self.transform_with(format!("Sheared about centroid ({shx}, {shy})"), |v| transform::shear_about_centroid(v, shx, shy))
    }

    pub fn reflect_x(&mut self) -> Result<()> {
        self.transform_with("Reflected across the X axis".to_string(), |v| Ok(transform::reflect_x(v)))
    }

    pub fn reflect_y(&mut self) -> Result<()> {
        self.transform_with("Reflected across the Y axis".to_string(), |v| Ok(transform::reflect_y(v)))
    }

    /// Helper line through the two most recent picks.
    pub fn set_helper_line(&mut self) -> Result<()> {
        let pair = self.picks.pair()
            .ok_or_else(|| Error::selection("select two points (click twice) to define the line"));
        let (a, b) = self.status.report(pair)?;
        self.helper_line = Some((a, b));
        self.status.set(format!("Helper line set: ({},{}) → ({},{})", a.x, a.y, b.x, b.y));
        self.redraw();
        Ok(())
    }

    pub fn reflect_about_helper_line(&mut self) -> Result<()> {
        let line = self.helper_line
            .ok_or_else(|| Error::selection("no helper line, click two points and set the line first"));
        let (a, b) = self.status.report(line)?;
        self.transform_with(
            format!("Reflected about line ({},{}) → ({},{})", a.x, a.y, b.x, b.y),
            |v| transform::reflect_about_line(v, a, b),
        )
    }

    // ─── Nudge ────────────────────────────────────────────────────────────────

    /// Key down. A fresh press nudges at once; repeats of a held key do nothing.
    pub fn press(&mut self, direction: Direction) {
        if self.held.insert(direction) {
            self.nudge();
        }
    }

    /// Key up. Releasing the last held key stops the repeat.
    pub fn release(&mut self, direction: Direction) {
        self.held.remove(&direction);
    }

    fn nudge(&mut self) {
        let (dx, dy) = self.held.iter()
            .map(|d| d.delta())
            .fold((0, 0), |(x, y), (ddx, ddy)| (x + ddx, y + ddy));
        if (dx, dy) == (0, 0) || self.working.is_empty() {
            return;
        }
        let moved = self.within_reach(transform::translate(self.working.vertices(), dx, dy));
        let Ok(vertices) = self.status.report(moved) else { return };
        self.working.set_vertices(vertices);
        self.status.set(format!("Nudged by ({dx}, {dy})"));
        self.redraw();
    }
}

impl Workspace for TransformBench {
    fn grid(&self) -> &Grid { &self.grid }
    fn surface(&self) -> &CellSurface { &self.surface }
    fn status(&self) -> &str { self.status.as_str() }

    fn on_click(&mut self, px: i32, py: i32) -> Result<LogicalPoint> {
        let checked = self.grid.check(self.grid.pixel_to_cell(px, py));
        let cell = self.status.report(checked)?;
        let p = self.grid.cell_to_logical(cell);
        self.picks.push(p);

        if self.working.is_closed() {
            self.status.set(format!("Last pick: ({},{})", p.x, p.y));
        } else if self.working.push(p)? {
            self.freeze_original();
            self.redraw();
        } else {
            self.status.set(format!("Vertices: {} | Last pick: ({},{})", self.working.len(), p.x, p.y));
            self.redraw();
        }
        self.surface.paint_cell(cell, self.palette.pick);
        Ok(p)
    }

    fn set_cell_size(&mut self, cell_size: i32) -> Result<()> {
        let changed = self.grid.set_cell_size(cell_size);
        self.status.report(changed)?;
        self.surface.reshape(&self.grid);
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        self.surface.clear();
        paint_axes(&mut self.surface, &self.grid, self.palette.axis);
        if let Some((a, b)) = self.helper_line {
            let cells = line_cells(&self.grid, a, b);
            self.surface.paint_all(&cells, self.palette.helper_line);
        }
        if let Some(original) = &self.original {
            self.surface.paint_all(&original.outline_cells(&self.grid), original.outline());
        }
        let cells = self.working.outline_cells(&self.grid);
        self.surface.paint_all(&cells, self.working.outline());
    }

    /// Nudge timer tick: moves the polygon while any key is held.
    fn tick(&mut self) -> AnimationState {
        if self.held.is_empty() {
            return AnimationState::Idle;
        }
        self.nudge();
        AnimationState::Stepping
    }

    fn clear(&mut self) {
        self.working = Polygon::new(self.palette.working);
        self.original = None;
        self.picks.clear();
        self.helper_line = None;
        self.held.clear();
        self.status.set("Cleared. Click to add vertices.");
        self.redraw();
    }
}
