//! Firebase Cloud Messaging (HTTP v1) provider.

pub mod credentials;
pub mod errors;
pub mod provider;
pub mod token;
pub mod wire;

pub use credentials::ServiceAccountKey;
pub use provider::FcmDeliveryProvider;
pub use token::{AccessTokenSource, ServiceAccountTokenSource, StaticTokenSource};
