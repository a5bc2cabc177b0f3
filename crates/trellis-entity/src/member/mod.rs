//! Role binding entities.

pub mod model;

pub use model::{Member, MemberType};
