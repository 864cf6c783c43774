use serde::{Deserialize, Serialize};

/// Accumulated drag displacement, applied as a translate to everything
/// drawn after the background.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: i32,
    pub y: i32,
}

impl PanOffset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pan by a delta in screen pixels. Saturates at the `i32` bounds.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }
}

/// Space kept free around the canvas so it never fills the window exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub width: u32,
    pub height: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            width: 40,
            height: 100,
        }
    }
}

/// Drawable canvas size in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas size for a raw window size, with `margins` subtracted.
    /// A window smaller than the margins yields a zero-sized canvas.
    pub fn from_window(window_width: u32, window_height: u32, margins: Margins) -> Self {
        Self {
            width: window_width.saturating_sub(margins.width),
            height: window_height.saturating_sub(margins.height),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
