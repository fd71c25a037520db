//! Worker task flow: claim, submit, release

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::listing::filter_items;
use crate::domain::time::{format_relative, format_time_remaining};
use crate::handlers::{require_role, Screen};
use crate::models::{Assignment, AssignmentStatus, CreateSubmissionRequest, UserRole};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_bytes, format_currency};
use crate::utils::logging::log_user_action;

pub async fn handle_claim(services: &ServiceFactory, task_id: &str) -> Result<String> {
    let user = require_role(services, &[UserRole::Worker]).await?;
    let assignment = services.assignments.claim(task_id).await?;
    log_user_action(Some(&user.id), "claim", Some(task_id));

    let due = assignment
        .expires_at
        .map(|at| format_time_remaining(at, Utc::now()))
        .unwrap_or_else(|| "no time limit".to_string());
    Ok(format!(
        "Claimed task {}. Assignment {} ({}). Submit with `paytask flow submit {} --content ...`.",
        task_id, assignment.id, due, assignment.id
    ))
}

pub async fn handle_my_assignments(
    services: &ServiceFactory,
    status: Option<AssignmentStatus>,
    search: Option<&str>,
) -> Result<String> {
    require_role(services, &[UserRole::Worker]).await?;
    let assignments = services.assignments.mine(status).await?;
    let shown: Vec<Assignment> = match search {
        Some(search) => filter_items(&assignments, search).into_iter().cloned().collect(),
        None => assignments,
    };
    Ok(render_assignments(&shown, Utc::now()))
}

/// Upload any files, then submit content and attachment URLs
pub async fn handle_submit(
    services: &ServiceFactory,
    assignment_id: &str,
    content: String,
    files: &[PathBuf],
) -> Result<String> {
    let user = require_role(services, &[UserRole::Worker]).await?;

    let mut attachments = Vec::with_capacity(files.len());
    let mut uploaded_lines = Vec::with_capacity(files.len());
    for path in files {
        let uploaded = services.uploads.upload_file(path).await?;
        uploaded_lines.push(format!("  {} ({})", uploaded.filename, format_bytes(uploaded.size)));
        attachments.push(uploaded.url);
    }

    let request = CreateSubmissionRequest {
        assignment_id: assignment_id.to_string(),
        content,
        attachments,
    };
    let submission = services.submissions.submit(&request).await?;
    log_user_action(Some(&user.id), "submit", Some(assignment_id));

    let mut screen = Screen::new("Submission sent")
        .field("Submission", &submission.id)
        .field("Status", submission.status);
    if !uploaded_lines.is_empty() {
        screen = screen.section("Uploaded").lines(uploaded_lines);
    }
    Ok(screen.finish())
}

pub async fn handle_release(services: &ServiceFactory, assignment_id: &str) -> Result<String> {
    let user = require_role(services, &[UserRole::Worker]).await?;
    let assignment = services.assignments.release(assignment_id).await?;
    log_user_action(Some(&user.id), "release", Some(assignment_id));
    Ok(format!(
        "Released assignment {} ({}). The unit is open to other workers again.",
        assignment.id, assignment.status
    ))
}

pub fn render_assignments(assignments: &[Assignment], now: DateTime<Utc>) -> String {
    let rows: Vec<String> = assignments
        .iter()
        .map(|a| {
            let (title, reward) = match &a.task {
                Some(task) => (task.title.as_str(), format_currency(task.reward, "USD")),
                None => (a.task_id.as_str(), "-".to_string()),
            };
            let timing = match (a.status, a.expires_at) {
                (AssignmentStatus::InProgress, Some(at)) => format_time_remaining(at, now),
                _ => format!("claimed {}", format_relative(a.assigned_at, now)),
            };
            format!("  [{}] {} {} {} ({})", a.id, title, reward, a.status, timing)
        })
        .collect();

    Screen::new(format!("My assignments ({})", assignments.len()))
        .lines_or(rows, "No assignments")
        .finish()
}
