//! # trellis-auth
//!
//! Role-based access control and batch access review for Trellis.
//!
//! ## Modules
//!
//! - `rbac`: role definitions, the role store, rule matching, and the authorizer
//! - `member`: resource ancestry and nearest-wins role binding resolution
//! - `request`: request attributes, URL-to-attributes parsing, and the skip-list
//! - `review`: the batch access reviewer
//! - `jwt`: bearer token validation

pub mod jwt;
pub mod member;
pub mod rbac;
pub mod request;
pub mod review;

pub use jwt::{Claims, JwtDecoder};
pub use member::{HierarchyResolver, MemberResolver, ResolvedRole, RoleSource};
pub use rbac::{Authorizer, Decision, PolicyRule, Role, RoleStore};
pub use request::{AttributesRecord, RequestInfoResolver, SkipList};
pub use review::{AccessReviewer, Api, ReviewResult, ReviewResults};
