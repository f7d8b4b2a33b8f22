//! Core traits defined in `eventpush-core` and implemented by other crates.

pub mod delivery;

pub use delivery::{DeliveryProvider, ProviderError, RecipientError, RecipientOutcome};
