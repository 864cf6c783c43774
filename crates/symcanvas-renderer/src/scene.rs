use symcanvas_core::{Color, Shape, Style, SymbolRegistry};

use crate::background::{is_grid_layer_name, GridStyle};
use crate::surface::{CanvasSurface, TransformScope};
use crate::viewport::{PanOffset, Viewport};

/// Layer name of the confirmation marker.
pub const MARKER_NAME: &str = "base";

/// Names the scene draws on its own. A symbol with one of these names would
/// share a layer with the grid or the marker.
pub fn is_reserved_layer_name(name: &str) -> bool {
    name == MARKER_NAME || is_grid_layer_name(name)
}

/// Translucent square at the panned origin, drawn last so it is obvious
/// whether the translate was applied.
pub fn marker() -> (Shape, Style) {
    (
        Shape::rectangle(0.0, 0.0, 100.0, 100.0),
        Style::filled(Color::BLACK).with_opacity(0.2),
    )
}

/// Everything one full redraw reads.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub registry: &'a SymbolRegistry,
    pub viewport: Viewport,
    pub pan: PanOffset,
    pub grid: &'a GridStyle,
    pub show_marker: bool,
}

impl Scene<'_> {
    /// Redraw the whole canvas: clear, grid, pan translate, symbols in
    /// rank order, marker, commit. The transform is restored afterwards.
    pub fn draw<S: CanvasSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        let mut scope = TransformScope::new(surface);
        self.grid.draw(&mut *scope, self.viewport);

        scope.translate(f64::from(self.pan.x), f64::from(self.pan.y));
        for entry in self.registry.all_in_order() {
            scope.draw_symbol(entry.symbol());
        }

        if self.show_marker {
            let (shape, style) = marker();
            scope.draw_shape(MARKER_NAME, &shape, &style);
        }

        scope.commit_layers();
    }
}
