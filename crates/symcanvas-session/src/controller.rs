use symcanvas_renderer::{Margins, PanOffset, Viewport};

/// What the session should do after an input handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    RenderNeeded,
}

/// Drag-to-pan and resize handling.
///
/// Holds the drag flag, the accumulated pan offset and the viewport size.
/// Handlers never draw; they report [`Action::RenderNeeded`] and leave
/// scheduling to the caller.
#[derive(Debug, Clone)]
pub struct InteractionController {
    dragging: bool,
    pan: PanOffset,
    viewport: Viewport,
    margins: Margins,
    readout: String,
}

impl InteractionController {
    pub fn new(margins: Margins) -> Self {
        let pan = PanOffset::default();
        Self {
            dragging: false,
            pan,
            viewport: Viewport::default(),
            margins,
            readout: format_readout(pan),
        }
    }

    pub fn on_pointer_down(&mut self) -> Action {
        self.dragging = true;
        Action::None
    }

    pub fn on_pointer_up(&mut self) -> Action {
        self.dragging = false;
        Action::None
    }

    /// Pan by the pointer's motion delta while dragging. The readout is
    /// refreshed on every move, dragging or not.
    pub fn on_pointer_move(&mut self, dx: i32, dy: i32) -> Action {
        let action = if self.dragging {
            log::trace!("Drag delta x: {}, y: {}", dx, dy);
            self.pan.pan(dx, dy);
            Action::RenderNeeded
        } else {
            Action::None
        };
        self.readout = format_readout(self.pan);
        action
    }

    /// The window was resized to `window_width` x `window_height`.
    pub fn on_resize(&mut self, window_width: u32, window_height: u32) -> Action {
        self.viewport = Viewport::from_window(window_width, window_height, self.margins);
        log::info!(
            "Canvas resized to width: {}, height: {}",
            self.viewport.width,
            self.viewport.height
        );
        Action::RenderNeeded
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pan(&self) -> PanOffset {
        self.pan
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Human-readable pan position, e.g. `"x: 2, y: 6"`.
    pub fn readout(&self) -> &str {
        &self.readout
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(Margins::default())
    }
}

fn format_readout(pan: PanOffset) -> String {
    format!("x: {}, y: {}", pan.x, pan.y)
}
