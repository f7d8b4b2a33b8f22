//! Shared domain types.

pub mod notification;

pub use notification::{
    AndroidHints, AndroidPriority, BulkDispatchResult, BulkNotificationRequest, DispatchResult,
    EventId, MessageData, NotificationContent, NotificationRequest, OutboundMessage, Recipient,
};
