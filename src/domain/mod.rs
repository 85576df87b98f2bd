//! Domain layer - Pure data and validation.

pub mod conversation;
pub mod jobs;
pub mod session;
pub mod storyboard;
