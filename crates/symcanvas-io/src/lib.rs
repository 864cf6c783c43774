//! # SymCanvas I/O
//!
//! JSON project files (session config plus the initial symbols) and timed
//! input-event scripts that replay a user's drags and resizes against a
//! session.

pub mod error;
pub mod project;
pub mod script;

pub use error::ProjectError;
pub use project::CanvasProject;
pub use script::{EventScript, InputEvent, TimedEvent};
