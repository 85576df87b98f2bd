//! Local adapters: durable and in-memory session stores.

pub mod fs;
pub mod memory;

pub use fs::FsSessionStore;
pub use memory::MemorySessionStore;
