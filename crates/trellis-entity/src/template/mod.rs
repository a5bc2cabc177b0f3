//! Template and template release entities.

pub mod model;

pub use model::{Template, TemplateRelease};
