//! Group domain entities.

pub mod model;

pub use model::{Group, ROOT_GROUP_ID};
