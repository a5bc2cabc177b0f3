//! Role-based access control: role definitions, rule matching, and decisions.

pub mod authorizer;
pub mod matcher;
pub mod role;
pub mod store;

pub use authorizer::{Authorizer, Decision};
pub use matcher::{ResourceKey, role_allows, rule_allows};
pub use role::{ADMIN_ROLE, PolicyRule, Role, RoleDefinition};
pub use store::RoleStore;
