//! Admin pages: platform statistics, error logs and dispute review

use chrono::{DateTime, Utc};
use tracing::info;

use crate::catalog::{Dispute, DisputeDesk, DisputeOutcome, DisputeStatus};
use crate::domain::stats::ErrorLogSummary;
use crate::domain::time::{format_datetime, format_relative};
use crate::handlers::{require_role, Screen};
use crate::models::{ErrorLog, LogLevel, PlatformStats, UserRole};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_currency, truncate_text};
use crate::utils::logging::log_user_action;

pub async fn handle_stats(services: &ServiceFactory) -> Result<String> {
    require_role(services, &[UserRole::Admin]).await?;
    let stats = services.stats.platform().await?;
    Ok(render_platform_stats(&stats))
}

pub async fn handle_error_logs(
    services: &ServiceFactory,
    level: Option<LogLevel>,
    page: u32,
    limit: u32,
) -> Result<String> {
    require_role(services, &[UserRole::Admin]).await?;
    let logs = services.error_logs.list(level, page, limit).await?;
    Ok(render_error_logs(&logs.items, Utc::now()))
}

pub async fn handle_disputes(services: &ServiceFactory, desk: &DisputeDesk, include_resolved: bool) -> Result<String> {
    require_role(services, &[UserRole::Admin]).await?;
    Ok(render_dispute_list(&desk.list(include_resolved), Utc::now()))
}

pub async fn handle_dispute(services: &ServiceFactory, desk: &DisputeDesk, dispute_id: &str) -> Result<String> {
    require_role(services, &[UserRole::Admin]).await?;
    Ok(render_dispute(desk.get(dispute_id)?, Utc::now()))
}

pub async fn handle_resolve(
    services: &ServiceFactory,
    desk: &DisputeDesk,
    dispute_id: &str,
    outcome: DisputeOutcome,
    note: &str,
) -> Result<String> {
    let admin = require_role(services, &[UserRole::Admin]).await?;
    let resolution = desk.resolve(dispute_id, outcome, note)?;
    log_user_action(Some(&admin.id), "resolve_dispute", Some(dispute_id));
    info!(dispute_id = dispute_id, outcome = %outcome, "Dispute resolution recorded locally");
    Ok(format!("{}\nNote: {}", resolution, resolution.note))
}

pub fn render_platform_stats(stats: &PlatformStats) -> String {
    Screen::new("Platform statistics")
        .field("Users", stats.total_users)
        .field("Workers", stats.total_workers)
        .field("Clients", stats.total_clients)
        .field("Tasks", format!("{} ({} active)", stats.total_tasks, stats.active_tasks))
        .field("Volume", format_currency(stats.total_volume, "USD"))
        .field("Revenue", format_currency(stats.platform_revenue, "USD"))
        .field("Open disputes", stats.open_disputes)
        .finish()
}

pub fn render_error_logs(logs: &[ErrorLog], now: DateTime<Utc>) -> String {
    let summary = ErrorLogSummary::from_logs(logs);
    let levels = summary
        .by_level
        .iter()
        .map(|(level, count)| format!("{} {}", count, level))
        .collect::<Vec<_>>()
        .join(", ");

    let rows: Vec<String> = logs
        .iter()
        .map(|log| {
            format!(
                "  {:<5} {} {}",
                log.level.as_str(),
                format_relative(log.created_at, now),
                truncate_text(&log.message, 80)
            )
        })
        .collect();

    let latest = summary
        .latest
        .map(|at| format_relative(at, now))
        .unwrap_or_else(|| "never".to_string());

    Screen::new("Error logs")
        .field("Shown", summary.total)
        .field("By level", if levels.is_empty() { "-".to_string() } else { levels })
        .field("Error or worse", summary.severe())
        .field("Latest", latest)
        .blank()
        .lines_or(rows, "No errors reported")
        .finish()
}

pub fn render_dispute_list(disputes: &[&Dispute], now: DateTime<Utc>) -> String {
    let rows: Vec<String> = disputes
        .iter()
        .map(|d| {
            format!(
                "  [{}] {} {} vs {} {} ({}, {})",
                d.id,
                truncate_text(&d.task_title, 36),
                d.worker_name,
                d.client_name,
                format_currency(d.amount, "USD"),
                d.status,
                format_relative(d.opened_at, now)
            )
        })
        .collect();

    Screen::new("Disputes").lines_or(rows, "No open disputes").finish()
}

pub fn render_dispute(dispute: &Dispute, now: DateTime<Utc>) -> String {
    let evidence = dispute.evidence.iter().flat_map(|e| {
        vec![
            format!("  {} ({})", e.from, format_relative(e.submitted_at, now)),
            format!("    {}", e.text),
        ]
    });

    let mut screen = Screen::new(format!("Dispute {}", dispute.id))
        .field("Task", format!("{} ({})", dispute.task_title, dispute.task_id))
        .field("Worker", &dispute.worker_name)
        .field("Client", &dispute.client_name)
        .field("Amount", format_currency(dispute.amount, "USD"))
        .field("Status", dispute.status)
        .field("Opened", format_datetime(dispute.opened_at))
        .section("Reason")
        .line(dispute.reason.clone())
        .section("Evidence")
        .lines_or(evidence, "No evidence submitted");

    if dispute.status != DisputeStatus::Resolved {
        screen = screen.blank().line(format!(
            "Resolve with `paytask admin resolve {} <worker|client|split> --note ...`",
            dispute.id
        ));
    }
    screen.finish()
}
