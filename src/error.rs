//! Error taxonomy at the orchestrator boundary.
//!
//! Ports report failures as boxed errors, matching their transport-level
//! nature; the orchestrator converts them here. A backend-reported render
//! failure is not an error value at all: it is the terminal
//! `JobState::Failed` carrying the backend's message.

use crate::domain::storyboard::InvalidStoryboard;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    InvalidStoryboard(#[from] InvalidStoryboard),

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("could not apply that edit: {0}")]
    EditRejected(String),

    #[error("at least one source media file is required")]
    NoSourceMedia,

    #[error("a render is already in flight for this project")]
    RenderInFlight,

    #[error("no storyboard loaded; analyze footage first")]
    NoStoryboard,

    #[error("session store failure: {0}")]
    Session(#[source] BoxError),
}

impl StudioError {
    pub fn transport(operation: &'static str, source: BoxError) -> Self {
        StudioError::Transport { operation, source }
    }
}
