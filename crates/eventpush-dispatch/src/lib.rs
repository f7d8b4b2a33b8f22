//! # eventpush-dispatch
//!
//! The two callable entry points of the relay as plain async services:
//! [`SingleNotificationDispatcher`] and [`BulkNotificationDispatcher`].
//! Both are stateless and share one [`DeliveryProvider`](eventpush_core::traits::DeliveryProvider).

pub mod bulk;
pub mod message;
pub mod single;

#[cfg(test)]
mod testing;

pub use bulk::BulkNotificationDispatcher;
pub use single::SingleNotificationDispatcher;
