//! Batch access review.

pub mod reviewer;
pub mod types;

pub use reviewer::AccessReviewer;
pub use types::{Api, ReviewResult, ReviewResults};
