//! Resource kinds and references shared by every hierarchy entity.

pub mod kind;

pub use kind::{ResourceRef, ResourceType};
