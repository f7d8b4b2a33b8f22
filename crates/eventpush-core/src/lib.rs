//! # eventpush-core
//!
//! Core crate for the EventPush relay. Contains the notification data
//! model, the [`DeliveryProvider`](traits::DeliveryProvider) capability,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other EventPush crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
