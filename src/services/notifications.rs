//! Notification endpoints

use crate::models::{Ack, Notification};
use crate::services::client::{segment, ApiClient};
use crate::services::query::QueryBuilder;
use crate::utils::errors::Result;

/// Service for `/notifications`
#[derive(Clone, Debug)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, unread_only: bool) -> Result<Vec<Notification>> {
        let query = QueryBuilder::new()
            .push("unreadOnly", unread_only.then_some(true))
            .finish();
        self.client.get_with_query("notifications", &query).await
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<Notification> {
        self.client
            .post_empty(&format!("notifications/{}/read", segment(notification_id)))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<Ack> {
        self.client.post_empty("notifications/read-all").await
    }
}
