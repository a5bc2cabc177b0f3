//! Request attributes and the parsing that produces them.

pub mod attributes;
pub mod info;
pub mod skipper;

pub use attributes::AttributesRecord;
pub use info::RequestInfoResolver;
pub use skipper::SkipList;
