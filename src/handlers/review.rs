//! Review queue for clients: approve, reject and rate submissions

use chrono::{DateTime, Utc};

use crate::domain::time::format_relative;
use crate::handlers::{require_role, Screen};
use crate::models::{CreateRatingRequest, CreateReviewRequest, Submission, SubmissionStatus, UserRole};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_user_action;

pub async fn handle_queue(services: &ServiceFactory, task_id: &str, all: bool) -> Result<String> {
    require_role(services, &[UserRole::Client]).await?;
    let status = if all { None } else { Some(SubmissionStatus::Pending) };
    let submissions = services.submissions.list_for_task(task_id, status).await?;
    Ok(render_queue(task_id, &submissions, Utc::now()))
}

pub async fn handle_approve(services: &ServiceFactory, submission_id: &str, feedback: Option<String>) -> Result<String> {
    let user = require_role(services, &[UserRole::Client]).await?;
    let submission = services.submissions.approve(submission_id, feedback).await?;
    log_user_action(Some(&user.id), "approve", Some(submission_id));
    Ok(format!(
        "Approved submission {}. The worker is paid from escrow. Rate them with `paytask review rate {} <1-5>`.",
        submission.id, submission.id
    ))
}

pub async fn handle_reject(services: &ServiceFactory, submission_id: &str, reason: &str) -> Result<String> {
    let user = require_role(services, &[UserRole::Client]).await?;
    let submission = services.submissions.reject(submission_id, reason).await?;
    log_user_action(Some(&user.id), "reject", Some(submission_id));
    Ok(format!("Rejected submission {} ({}).", submission.id, submission.status))
}

pub async fn handle_rate(
    services: &ServiceFactory,
    submission_id: &str,
    score: u8,
    comment: Option<String>,
) -> Result<String> {
    let user = require_role(services, &[UserRole::Client]).await?;
    let rating = services
        .ratings
        .create(&CreateRatingRequest {
            submission_id: submission_id.to_string(),
            score,
            comment,
        })
        .await?;
    log_user_action(Some(&user.id), "rate", Some(submission_id));
    Ok(format!("Rated {}/5 for submission {}.", rating.score, rating.submission_id))
}

/// Review the other party once a task is done
pub async fn handle_review(
    services: &ServiceFactory,
    task_id: &str,
    reviewee_id: &str,
    rating: u8,
    comment: Option<String>,
) -> Result<String> {
    let user = services.session.require_user().await?;
    let review = services
        .reviews
        .create(&CreateReviewRequest {
            task_id: task_id.to_string(),
            reviewee_id: reviewee_id.to_string(),
            rating,
            comment,
        })
        .await?;
    log_user_action(Some(&user.id), "review", Some(task_id));
    Ok(format!("Review {} saved ({}/5).", review.id, review.rating))
}

pub fn render_queue(task_id: &str, submissions: &[Submission], now: DateTime<Utc>) -> String {
    let rows: Vec<String> = submissions
        .iter()
        .map(|s| {
            let attachments = if s.attachments.is_empty() {
                String::new()
            } else {
                format!(" +{} file(s)", s.attachments.len())
            };
            format!(
                "  [{}] {} by {} {}{}: {}",
                s.id,
                s.status,
                s.worker_id,
                format_relative(s.submitted_at, now),
                attachments,
                truncate_text(&s.content, 60)
            )
        })
        .collect();

    Screen::new(format!("Submissions for task {}", task_id))
        .lines_or(rows, "Nothing waiting for review")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_render_queue() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let submission = Submission {
            id: "s-1".to_string(),
            assignment_id: "a-1".to_string(),
            task_id: "t-1".to_string(),
            worker_id: "w-7".to_string(),
            content: "All 20 images labeled".to_string(),
            attachments: vec!["https://cdn.example.com/labels.csv".to_string()],
            status: SubmissionStatus::Pending,
            feedback: None,
            submitted_at: now - Duration::days(1),
            reviewed_at: None,
        };

        let text = render_queue("t-1", &[submission], now);
        assert!(text.contains("[s-1] pending by w-7 1 day ago +1 file(s): All 20 images labeled"));
        assert!(render_queue("t-1", &[], now).contains("Nothing waiting for review"));
    }
}
