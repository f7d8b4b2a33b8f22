//! # eventpush-api
//!
//! HTTP layer for the EventPush relay: Axum router, handlers for the two
//! callable endpoints and health, the request extractor, and the mapping
//! from [`AppError`](eventpush_core::AppError) to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
