use serde::{Deserialize, Serialize};
use symcanvas_renderer::{GridStyle, Margins};

use crate::clock::Millis;
use crate::scheduler::DEFAULT_INTERVAL_MS;

/// Tunables for one canvas session. Every field has a default, so a partial
/// JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Debounce window for redraws.
    pub redraw_interval_ms: Millis,
    pub margins: Margins,
    pub grid: GridStyle,
    /// Draw the translucent origin marker after the symbols.
    pub show_marker: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            redraw_interval_ms: DEFAULT_INTERVAL_MS,
            margins: Margins::default(),
            grid: GridStyle::default(),
            show_marker: true,
        }
    }
}
