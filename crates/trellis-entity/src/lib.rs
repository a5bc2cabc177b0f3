//! # trellis-entity
//!
//! Domain entity models for Trellis. Every struct in this crate represents a
//! database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`; all of them derive `Serialize`/`Deserialize` so the
//! in-memory store can be seeded from JSON.

pub mod application;
pub mod cluster;
pub mod group;
pub mod identity;
pub mod member;
pub mod pipelinerun;
pub mod resource;
pub mod template;

pub use identity::UserIdentity;
pub use resource::{ResourceRef, ResourceType};
