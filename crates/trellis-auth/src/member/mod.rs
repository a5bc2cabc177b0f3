//! Resource ancestry and role binding resolution.

pub mod hierarchy;
pub mod resolver;

pub use hierarchy::HierarchyResolver;
pub use resolver::{MemberResolver, ResolvedRole, RoleSource};
