//! Cluster domain entities.

pub mod model;

pub use model::Cluster;
