//! Host-facing settings, read from JSON. Every field has a default, so an
//! empty object (or a missing file) gives the stock configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fill::{Connectivity, FillAlgorithm};
use crate::grid::{RASTER_MIN_CELL_SIZE, TRANSFORM_MIN_CELL_SIZE};
use crate::raster::CircleAlgorithm;
use crate::types::color::Palette;

/// Timer periods for the host, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickIntervals {
    pub circle_ms:    u64,
    pub seed_fill_ms: u64,
    pub scanline_ms:  u64,
    pub nudge_ms:     u64,
}

impl Default for TickIntervals {
    fn default() -> Self {
        Self { circle_ms: 100, seed_fill_ms: 15, scanline_ms: 20, nudge_ms: 80 }
    }
}

impl TickIntervals {
    pub fn circle(&self)    -> Duration { Duration::from_millis(self.circle_ms) }
    pub fn seed_fill(&self) -> Duration { Duration::from_millis(self.seed_fill_ms) }
    pub fn scanline(&self)  -> Duration { Duration::from_millis(self.scanline_ms) }
    pub fn nudge(&self)     -> Duration { Duration::from_millis(self.nudge_ms) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width:  i32,
    pub canvas_height: i32,
    pub cell_size:     i32,
    pub connectivity:  Connectivity,
    pub circle_algorithm: CircleAlgorithm,
    pub fill_algorithm:   FillAlgorithm,
    /// Step circles and fills through `tick()` instead of finishing at once.
    pub animate: bool,
    pub debug:   bool,
    pub ticks:   TickIntervals,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width:  600,
            canvas_height: 600,
            cell_size:     20,
            connectivity:  Connectivity::default(),
            circle_algorithm: CircleAlgorithm::default(),
            fill_algorithm:   FillAlgorithm::default(),
            animate: false,
            debug:   false,
            ticks:   TickIntervals::default(),
            palette: Palette::default(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Missing or empty file → defaults. Anything unreadable or invalid is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Checks what every surface needs. The transform surface has a larger
    /// minimum cell, see [`Settings::check_cell_size`].
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width <= 0 || self.canvas_height <= 0 {
            return Err(Error::config(format!(
                "canvas must have a positive size, got {}×{}", self.canvas_width, self.canvas_height
            )));
        }
        self.check_cell_size(RASTER_MIN_CELL_SIZE)?;
        let t = &self.ticks;
        if [t.circle_ms, t.seed_fill_ms, t.scanline_ms, t.nudge_ms].contains(&0) {
            return Err(Error::config("tick intervals must be at least 1 ms"));
        }
        Ok(())
    }

    pub fn check_cell_size(&self, min: i32) -> Result<()> {
        if self.cell_size < min {
            Err(Error::config(format!("cell size must be at least {min} px, got {}", self.cell_size)))
        } else {
            Ok(())
        }
    }

    pub fn check_transform_cell_size(&self) -> Result<()> {
        self.check_cell_size(TRANSFORM_MIN_CELL_SIZE)
    }
}
