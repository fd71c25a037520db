//! Notifications page

use chrono::{DateTime, Utc};

use crate::domain::time::format_relative;
use crate::handlers::Screen;
use crate::models::notification::unread_count;
use crate::models::Notification;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

pub async fn handle_list(services: &ServiceFactory, unread_only: bool) -> Result<String> {
    services.session.require_user().await?;
    let notifications = services.notifications.list(unread_only).await?;
    Ok(render_notifications(&notifications, Utc::now()))
}

pub async fn handle_mark_read(services: &ServiceFactory, notification_id: Option<&str>) -> Result<String> {
    services.session.require_user().await?;
    match notification_id {
        Some(id) => {
            let notification = services.notifications.mark_read(id).await?;
            Ok(format!("Marked \"{}\" as read.", notification.title))
        }
        None => {
            services.notifications.mark_all_read().await?;
            Ok("All notifications marked as read.".to_string())
        }
    }
}

pub fn render_notifications(notifications: &[Notification], now: DateTime<Utc>) -> String {
    let rows: Vec<String> = notifications
        .iter()
        .flat_map(|n| {
            let marker = if n.read { " " } else { "*" };
            let mut lines = vec![
                format!("{} [{}] {} ({})", marker, n.id, n.title, format_relative(n.created_at, now)),
                format!("    {}", n.message),
            ];
            if let Some(link) = &n.link {
                lines.push(format!("    {}", link));
            }
            lines
        })
        .collect();

    Screen::new(format!("Notifications ({} unread)", unread_count(notifications)))
        .lines_or(rows, "You're all caught up")
        .finish()
}
