//! HTTP adapters for the remote studio backend.

pub mod planner;
pub mod renderer;

pub use planner::HttpPlanner;
pub use renderer::HttpRenderer;
