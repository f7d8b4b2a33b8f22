//! Custom Axum extractors.

pub mod callable;

pub use callable::CallableJson;
