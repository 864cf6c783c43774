use serde::{Deserialize, Serialize};
use symcanvas_core::{Color, Shape, Style};

use crate::surface::CanvasSurface;
use crate::viewport::Viewport;

/// Horizontal grid lines are named `gridHeight{y}`.
pub const GRID_ROW_PREFIX: &str = "gridHeight";
/// Vertical grid lines are named `gridWidth{x}`.
pub const GRID_COLUMN_PREFIX: &str = "gridWidth";

/// Whether `name` has the form of a grid line layer.
pub fn is_grid_layer_name(name: &str) -> bool {
    [GRID_ROW_PREFIX, GRID_COLUMN_PREFIX].iter().any(|prefix| {
        name.strip_prefix(prefix)
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// Reference grid drawn under the symbols so panning is visible even on an
/// otherwise empty canvas.
///
/// Every `spacing` pixels a thin line is drawn. Lines at positive multiples
/// of `major_every` are colored by distance band from the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridStyle {
    pub spacing: u32,
    pub major_every: u32,
    pub palette: Vec<Color>,
    pub minor_color: Color,
    pub minor_opacity: f32,
    pub major_opacity: f32,
    pub stroke_width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            spacing: 25,
            major_every: 100,
            palette: vec![
                Color::RED,
                Color::BLUE,
                Color::LIME,
                Color::YELLOW,
                Color::PURPLE,
                Color::ORANGE,
                Color::CYAN,
                Color::MAGENTA,
                Color::BROWN,
                Color::PINK,
            ],
            minor_color: Color::BLACK,
            minor_opacity: 0.3,
            major_opacity: 1.0,
            stroke_width: 1.0,
        }
    }
}

/// Orientation of a grid line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Runs left to right at a fixed y.
    Horizontal,
    /// Runs top to bottom at a fixed x.
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub name: String,
    pub shape: Shape,
    pub style: Style,
}

impl GridStyle {
    /// Style for the line `position` pixels from the origin.
    pub fn line_style(&self, position: u32) -> Style {
        let major = self.major_every > 0 && position > 0 && position % self.major_every == 0;
        let color = if major && !self.palette.is_empty() {
            let band = (position / self.major_every) as usize;
            Some(self.palette[band % self.palette.len()])
        } else if major {
            Some(self.minor_color)
        } else {
            None
        };

        match color {
            Some(c) => Style::stroked(c, self.stroke_width).with_opacity(self.major_opacity),
            None => Style::stroked(self.minor_color, self.stroke_width)
                .with_opacity(self.minor_opacity),
        }
    }

    /// All lines for `viewport`: horizontal ones first, then vertical.
    pub fn lines(&self, viewport: Viewport) -> Vec<GridLine> {
        if self.spacing == 0 {
            log::warn!("Grid spacing is 0; skipping background");
            return Vec::new();
        }

        let mut lines = Vec::new();
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let (extent, across) = match axis {
                Axis::Horizontal => (viewport.height, f64::from(viewport.width)),
                Axis::Vertical => (viewport.width, f64::from(viewport.height)),
            };
            for position in (0..extent).step_by(self.spacing as usize) {
                let p = f64::from(position);
                let (name, shape) = match axis {
                    Axis::Horizontal => (
                        format!("{}{}", GRID_ROW_PREFIX, position),
                        Shape::line(0.0, p, across, p),
                    ),
                    Axis::Vertical => (
                        format!("{}{}", GRID_COLUMN_PREFIX, position),
                        Shape::line(p, 0.0, p, across),
                    ),
                };
                lines.push(GridLine {
                    name,
                    shape,
                    style: self.line_style(position),
                });
            }
        }
        lines
    }

    pub fn draw<S: CanvasSurface + ?Sized>(&self, surface: &mut S, viewport: Viewport) {
        for line in self.lines(viewport) {
            surface.draw_shape(&line.name, &line.shape, &line.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layer_names() {
        assert!(is_grid_layer_name("gridHeight0"));
        assert!(is_grid_layer_name("gridWidth475"));
        assert!(!is_grid_layer_name("gridHeight"));
        assert!(!is_grid_layer_name("gridWidthX"));
        assert!(!is_grid_layer_name("rect1"));
    }

    #[test]
    fn test_line_count_and_names() {
        let grid = GridStyle::default();
        let lines = grid.lines(Viewport::new(100, 50));
        let names: Vec<&str> = lines.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "gridHeight0",
                "gridHeight25",
                "gridWidth0",
                "gridWidth25",
                "gridWidth50",
                "gridWidth75",
            ]
        );
        assert_eq!(lines[1].shape, Shape::line(0.0, 25.0, 100.0, 25.0));
        assert_eq!(lines[3].shape, Shape::line(25.0, 0.0, 25.0, 50.0));
    }

    #[test]
    fn test_major_lines_use_palette_by_band() {
        let grid = GridStyle::default();
        let origin = grid.line_style(0);
        assert_eq!(origin.stroke, Some(Color::BLACK));
        assert!((origin.opacity - 0.3).abs() < 1e-6);

        let first_band = grid.line_style(100);
        assert_eq!(first_band.stroke, Some(Color::BLUE));
        assert!((first_band.opacity - 1.0).abs() < 1e-6);

        assert_eq!(grid.line_style(300).stroke, Some(Color::YELLOW));
        assert_eq!(grid.line_style(125).stroke, Some(Color::BLACK));
        // Past the end of the palette the bands wrap around.
        assert_eq!(grid.line_style(1000).stroke, Some(Color::RED));
    }

    #[test]
    fn test_zero_spacing_draws_nothing() {
        let grid = GridStyle {
            spacing: 0,
            ..GridStyle::default()
        };
        assert!(grid.lines(Viewport::new(400, 400)).is_empty());
    }

    #[test]
    fn test_empty_palette_falls_back_to_minor_color() {
        let grid = GridStyle {
            palette: Vec::new(),
            ..GridStyle::default()
        };
        let style = grid.line_style(200);
        assert_eq!(style.stroke, Some(Color::BLACK));
        assert!((style.opacity - 1.0).abs() < 1e-6);
    }
}
