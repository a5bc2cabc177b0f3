//! HTTP handlers.

pub mod access;
pub mod health;
