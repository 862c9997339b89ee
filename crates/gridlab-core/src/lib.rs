//! Cell-grid rasterization, polygon fills and 2D transforms.
//!
//! The core is host-agnostic: a host (window, terminal, test) forwards pixel
//! clicks and timer ticks to a [`Workspace`] and reads back its
//! [`CellSurface`] and status line.

pub mod anim;
pub mod error;
pub mod fill;
pub mod grid;
pub mod history;
pub mod polygon;
pub mod raster;
pub mod settings;
pub mod surface;
pub mod transform;
pub mod types;
pub mod workspace;

pub use anim::{Animation, AnimationState, Stepper, Tick};
pub use error::{Error, ErrorKind, Result};
pub use fill::{Connectivity, FillAlgorithm, FillRecords, SeedRecord};
pub use grid::{Grid, RASTER_MIN_CELL_SIZE, TRANSFORM_MIN_CELL_SIZE};
pub use history::{ShapeHistory, ShapeKind, ShapeRecord};
pub use polygon::Polygon;
pub use raster::{CircleAlgorithm, CircleStepper};
pub use settings::{Settings, TickIntervals};
pub use surface::{CellSurface, ColorSurface};
pub use types::color::{Color, Palette};
pub use types::geom::{Cell, Direction, LogicalPoint, PointF};
pub use workspace::{FillCanvas, Picks, SketchPad, StatusLine, TransformBench, Workspace};
