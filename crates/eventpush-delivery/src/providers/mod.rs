//! Delivery provider implementations.

pub mod fcm;
pub mod log;
