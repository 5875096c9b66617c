use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::notification::{NotificationKind, SendNotificationParams},
};
use test_utils::{builder::TestBuilder, factory};

mod list_for_user;
mod mark_read;

fn params(user_id: i32) -> SendNotificationParams {
    SendNotificationParams {
        user_id,
        kind: NotificationKind::Follow,
        title: "New follower".to_string(),
        message: "Someone followed you".to_string(),
        data: serde_json::json!({ "follower_id": 1 }),
    }
}
