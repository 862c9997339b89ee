use serde::{Deserialize, Serialize};

/// Opaque RGB cell color. Cells that were never painted have no color at all
/// (`Option<Color>::None`), so no value here doubles as "background".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    pub const BLACK:   Self = Self::rgb(0, 0, 0);
    pub const WHITE:   Self = Self::rgb(255, 255, 255);
    pub const RED:     Self = Self::rgb(255, 0, 0);
    pub const GREEN:   Self = Self::rgb(0, 255, 0);
    pub const BLUE:    Self = Self::rgb(0, 0, 255);
    pub const YELLOW:  Self = Self::rgb(255, 255, 0);
    pub const CYAN:    Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
}

impl Default for Color {
    fn default() -> Self { Self::BLACK }
}

/// Named colors each workspace paints with. Every entry can be overridden
/// from settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub axis:        Color,
    pub marker:      Color,
    pub outline:     Color,
    pub preview:     Color,
    pub vertex:      Color,
    pub flood:       Color,
    pub boundary:    Color,
    pub scanline:    Color,
    pub line:        Color,
    pub circle_polar:     Color,
    pub circle_midpoint:  Color,
    pub circle_cartesian: Color,
    pub working:     Color,
    pub original:    Color,
    pub pick:        Color,
    pub helper_line: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            axis:        Color::WHITE,
            marker:      Color::YELLOW,
            outline:     Color::BLUE,
            preview:     Color::BLUE,
            vertex:      Color::CYAN,
            flood:       Color::RED,
            boundary:    Color::GREEN,
            scanline:    Color::MAGENTA,
            line:        Color::rgb(80, 220, 255),
            circle_polar:     Color::rgb(150, 0, 0),
            circle_midpoint:  Color::rgb(255, 150, 0),
            circle_cartesian: Color::rgb(255, 200, 0),
            working:     Color::rgb(255, 208, 96),
            original:    Color::rgb(140, 255, 200),
            pick:        Color::rgb(255, 105, 180),
            helper_line: Color::rgb(80, 220, 255),
        }
    }
}
