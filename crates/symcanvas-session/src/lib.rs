//! # SymCanvas Session
//!
//! Input handling and redraw timing for the pan canvas. A [`Session`] owns
//! the symbol registry, the drag/pan state, a debounced
//! [`RedrawScheduler`] and the drawing surface, and is driven by plain
//! method calls from the host's event loop.
//!
//! Time comes from an injected [`Clock`]; [`ManualClock`] makes scheduling
//! fully deterministic for tests and script replay.

pub mod clock;
pub mod config;
pub mod scheduler;
pub mod controller;
pub mod session;

pub use clock::{Clock, ManualClock, Millis, SystemClock};
pub use config::SessionConfig;
pub use controller::{Action, InteractionController};
pub use scheduler::{RedrawScheduler, SchedulerState};
pub use session::Session;
