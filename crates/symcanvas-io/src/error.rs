use std::io;

use symcanvas_core::RegistryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Script event {index} at {at} ms is earlier than the previous event at {previous} ms")]
    UnsortedScript { index: usize, at: u64, previous: u64 },
}
