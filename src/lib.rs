//! Avea Studio - AI Video Editing Client Library
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (storyboard, jobs, conversation, session)
//! - ports/: Trait definitions
//! - adapters/: Concrete implementations (HTTP backend, local stores)
//! - application/: Generic services
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use application::{StudioOrchestrator, StudioSnapshot};
pub use config::{PollPolicy, StudioConfig};
pub use domain::jobs::JobState;
pub use domain::storyboard::Storyboard;
pub use error::StudioError;
