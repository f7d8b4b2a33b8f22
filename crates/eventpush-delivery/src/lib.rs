//! # eventpush-delivery
//!
//! Concrete [`DeliveryProvider`](eventpush_core::traits::DeliveryProvider)
//! implementations and the factory that selects one from configuration.

pub mod factory;
pub mod providers;

pub use factory::build_provider;
pub use providers::fcm::FcmDeliveryProvider;
pub use providers::log::LogDeliveryProvider;
