//! # SymCanvas Renderer
//!
//! The drawing side of the pan canvas: the [`CanvasSurface`] backend trait,
//! the reference grid, viewport/pan state, and the full-redraw scene pipeline.
//!
//! [`RecordingSurface`] is the in-process backend. It keeps every committed
//! frame as JSON-serializable layer data that a frontend canvas can replay.

pub mod viewport;
pub mod surface;
pub mod recording;
pub mod background;
pub mod scene;

pub use background::{is_grid_layer_name, GridStyle};
pub use recording::{DrawOp, Frame, RecordingSurface, RenderLayer};
pub use scene::{is_reserved_layer_name, Scene};
pub use surface::{CanvasSurface, TransformScope};
pub use viewport::{Margins, PanOffset, Viewport};
