//! Application services - generic over ports.

pub mod orchestrator;

pub use orchestrator::{StudioOrchestrator, StudioSnapshot};
