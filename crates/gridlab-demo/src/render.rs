//! Plain-text view of a cell surface: one character per cell.

use gridlab_core::{Cell, CellSurface, Color, ColorSurface, Palette};

/// Character for each named palette color. Earlier entries win when two
/// names share a color.
fn legend(palette: &Palette) -> Vec<(Color, char)> {
    vec![
        (palette.flood,            'F'),
        (palette.boundary,         'B'),
        (palette.scanline,         'S'),
        (palette.outline,          '#'),
        (palette.vertex,           'v'),
        (palette.marker,           '*'),
        (palette.line,             'L'),
        (palette.circle_polar,     'p'),
        (palette.circle_midpoint,  'm'),
        (palette.circle_cartesian, 'c'),
        (palette.working,          'W'),
        (palette.original,         'o'),
        (palette.pick,             'x'),
        (palette.axis,             '+'),
    ]
}

pub fn to_ascii(surface: &CellSurface, palette: &Palette) -> String {
    let legend = legend(palette);
    let glyph = |color: Color| {
        legend.iter()
            .find(|(c, _)| *c == color)
            .map_or('?', |(_, ch)| *ch)
    };

    let mut out = String::with_capacity(((surface.columns() + 1) * surface.rows()) as usize);
    for row in 0..surface.rows() {
        for col in 0..surface.columns() {
            out.push(surface.cell_color(Cell::new(col, row)).map_or('.', glyph));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpainted_is_dot() {
        let mut s = CellSurface::new(3, 2);
        let palette = Palette::default();
        s.paint_cell(Cell::new(1, 0), palette.flood);
        s.paint_cell(Cell::new(2, 1), Color::rgb(1, 2, 3));
        assert_eq!(to_ascii(&s, &palette), ".F.\n..?\n");
    }
}
