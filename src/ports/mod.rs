//! Ports - Trait definitions for the external collaborators.

pub mod planner;
pub mod renderer;
pub mod session;
