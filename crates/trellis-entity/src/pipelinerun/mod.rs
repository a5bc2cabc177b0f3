//! Pipeline run entities.

pub mod model;

pub use model::PipelineRun;
