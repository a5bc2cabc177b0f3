//! In-memory store used for development, demos and tests.

pub mod seed;
pub mod store;

pub use seed::{GroupSeed, Seed};
pub use store::MemoryStore;
