//! Worker and client dashboards

use chrono::{DateTime, Utc};

use crate::domain::stats::{ClientSummary, WorkerSummary};
use crate::domain::time::{format_relative, format_time_remaining};
use crate::handlers::{require_role, Screen};
use crate::models::{
    Assignment, AssignmentStatus, ClientStats, Notification, Task, TaskStatus, UserProfile, UserRole, WorkerStats,
};
use crate::services::TaskQuery;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_currency, format_stars, truncate_text};

const RECENT_LIMIT: usize = 5;

pub async fn worker_dashboard(services: &ServiceFactory) -> Result<String> {
    let user = require_role(services, &[UserRole::Worker]).await?;
    let (stats, assignments, submissions) = tokio::try_join!(
        services.stats.worker(),
        services.assignments.mine(None),
        services.submissions.mine(),
    )?;

    let summary = WorkerSummary::from_activity(&assignments, &submissions);
    Ok(render_worker_dashboard(&user, &stats, &summary, &assignments, Utc::now()))
}

pub async fn client_dashboard(services: &ServiceFactory) -> Result<String> {
    let user = require_role(services, &[UserRole::Client]).await?;
    let query = TaskQuery::default().with_page(1, 100);
    let (stats, tasks) = tokio::try_join!(services.stats.client(), services.tasks.my_tasks(&query))?;

    let summary = ClientSummary::from_tasks(&tasks.items, services.settings.fees.platform_fee_rate);
    Ok(render_client_dashboard(&user, &stats, &summary, &tasks.items, Utc::now()))
}

/// Activity feed refreshed by the watch loop
pub async fn activity_feed(services: &ServiceFactory) -> Result<String> {
    services.session.require_user().await?;
    let notifications = services.notifications.list(false).await?;
    Ok(render_activity(&notifications, Utc::now()))
}

pub fn render_worker_dashboard(
    user: &UserProfile,
    stats: &WorkerStats,
    summary: &WorkerSummary,
    assignments: &[Assignment],
    now: DateTime<Utc>,
) -> String {
    let approval = summary
        .approval_rate
        .map(|rate| format!("{:.0}%", rate))
        .unwrap_or_else(|| "n/a".to_string());
    let rating = stats
        .average_rating
        .map(format_stars)
        .unwrap_or_else(|| "no ratings yet".to_string());

    let active: Vec<String> = assignments
        .iter()
        .filter(|a| a.status == AssignmentStatus::InProgress)
        .take(RECENT_LIMIT)
        .map(|a| {
            let title = a.task.as_ref().map(|t| t.title.as_str()).unwrap_or(a.task_id.as_str());
            let due = a
                .expires_at
                .map(|at| format_time_remaining(at, now))
                .unwrap_or_else(|| "no time limit".to_string());
            format!("  [{}] {} ({})", a.id, truncate_text(title, 40), due)
        })
        .collect();

    Screen::new(format!("Worker dashboard: {}", user.name))
        .field("Total earnings", format_currency(stats.total_earnings, "USD"))
        .field("Pending earnings", format_currency(stats.pending_earnings, "USD"))
        .field("Tasks completed", stats.tasks_completed)
        .field("Rating", rating)
        .section("My work")
        .field("In progress", summary.count(AssignmentStatus::InProgress))
        .field("Awaiting review", summary.pending_submissions)
        .field("Approved", summary.approved_submissions)
        .field("Rejected", summary.rejected_submissions)
        .field("Approval rate", approval)
        .field("Earned (listed)", format_currency(summary.earnings, "USD"))
        .section("Active assignments")
        .lines_or(active, "Nothing in progress. Browse tasks with `paytask tasks list`.")
        .finish()
}

pub fn render_client_dashboard(
    user: &UserProfile,
    stats: &ClientStats,
    summary: &ClientSummary,
    tasks: &[Task],
    now: DateTime<Utc>,
) -> String {
    let mut recent: Vec<&Task> = tasks.iter().collect();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let recent: Vec<String> = recent
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|t| {
            format!(
                "  [{}] {} {}/{} done, {} ({})",
                t.id,
                truncate_text(&t.title, 40),
                t.completed_count,
                t.quantity,
                t.status,
                format_relative(t.created_at, now)
            )
        })
        .collect();

    Screen::new(format!("Client dashboard: {}", user.name))
        .field("Total spent", format_currency(stats.total_spent, "USD"))
        .field("In escrow", format_currency(stats.escrow_balance, "USD"))
        .field("Pending reviews", stats.pending_reviews)
        .section("My tasks")
        .field("Active", summary.count(TaskStatus::Active))
        .field("Paused", summary.count(TaskStatus::Paused))
        .field("Drafts", summary.count(TaskStatus::Draft))
        .field("Completed", summary.count(TaskStatus::Completed))
        .field(
            "Units done",
            format!(
                "{}/{} ({:.0}%)",
                summary.units_completed,
                summary.units_total,
                summary.completion_percent()
            ),
        )
        .field("Committed budget", format_currency(summary.committed_budget, "USD"))
        .field("Paid to workers", format_currency(summary.spent, "USD"))
        .section("Recent tasks")
        .lines_or(recent, "No tasks yet. Create one with `paytask tasks create`.")
        .finish()
}

pub fn render_activity(notifications: &[Notification], now: DateTime<Utc>) -> String {
    let unread = crate::models::notification::unread_count(notifications);
    let items: Vec<String> = notifications
        .iter()
        .take(10)
        .map(|n| {
            let marker = if n.read { " " } else { "*" };
            format!("{} {} ({})", marker, n.title, format_relative(n.created_at, now))
        })
        .collect();

    Screen::new(format!("Activity ({} unread)", unread))
        .lines_or(items, "No activity yet")
        .finish()
}
