pub mod circle;
pub mod line;

pub use circle::{CircleAlgorithm, CircleStepper, MAX_RADIUS, octant_points, radius_between, rasterize_circle};
pub use line::{Bresenham, bresenham, line_cells, rasterize_line};
