//! Callable notification endpoints.

use axum::Json;
use axum::extract::State;

use eventpush_core::types::notification::{
    BulkDispatchResult, BulkNotificationRequest, DispatchResult, NotificationRequest,
};

use crate::error::ApiError;
use crate::extractors::CallableJson;
use crate::state::AppState;

/// POST /api/sendNotification
pub async fn send_notification(
    State(state): State<AppState>,
    CallableJson(req): CallableJson<NotificationRequest>,
) -> Result<Json<DispatchResult>, ApiError> {
    let result = state.single.dispatch(&req).await?;
    Ok(Json(result))
}

/// POST /api/sendBulkNotification
pub async fn send_bulk_notification(
    State(state): State<AppState>,
    CallableJson(req): CallableJson<BulkNotificationRequest>,
) -> Result<Json<BulkDispatchResult>, ApiError> {
    let result = state.bulk.dispatch(&req).await?;
    Ok(Json(result))
}
