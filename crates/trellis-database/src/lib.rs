//! # trellis-database
//!
//! Lookup stores for the resource hierarchy and role bindings. The
//! [`ResourceStore`] and [`MemberStore`] traits are what the authorizer
//! consumes; [`PgStore`] serves them from PostgreSQL and [`MemoryStore`]
//! from process memory.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::PgStore;
pub use store::{MemberStore, ResourceStore};
