//! Convenience result type alias for EventPush.

use crate::error::AppError;

/// A specialized `Result` type for EventPush operations.
pub type AppResult<T> = Result<T, AppError>;
