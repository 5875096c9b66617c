//! Notification service.
//!
//! Other services call `notify` after their primary write has committed. A failed
//! notification is logged and swallowed so it can never undo the operation that
//! triggered it.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::notification::NotificationRepository,
    error::AppError,
    model::{
        notification::{Notification, SendNotificationParams},
        pagination::Page,
    },
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a notification for `params.user_id`.
    pub async fn send(&self, params: SendNotificationParams) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db).create(params).await
    }

    /// Sends a notification, logging instead of returning a failure.
    pub async fn notify(&self, params: SendNotificationParams) {
        let user_id = params.user_id;
        let kind = params.kind;

        if let Err(e) = self.send(params).await {
            tracing::warn!(
                "Failed to send {} notification to user {}: {}",
                kind.as_str(),
                user_id,
                e
            );
        }
    }

    pub async fn list(
        &self,
        user_id: i32,
        unread_only: bool,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Notification>, AppError> {
        let (notifications, total) = NotificationRepository::new(self.db)
            .list_for_user(user_id, unread_only, page, per_page)
            .await?;

        Ok(Page::new(notifications, total, page, per_page))
    }

    pub async fn unread_count(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// # Returns
    /// - `Err(AppError::NotFound)` - No notification with this id belongs to the user
    pub async fn mark_read(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .mark_read(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: i32) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db)
            .delete(id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }

        Ok(())
    }
}
