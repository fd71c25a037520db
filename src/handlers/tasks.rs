//! Task discovery, detail, creation and lifecycle pages

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::draft::{validate_edit, TaskDraft};
use crate::domain::listing::{filter_items, paginate, Page};
use crate::domain::pricing::{calculate_fees, FeeBreakdown};
use crate::domain::time::{format_datetime, format_relative, format_time_remaining};
use crate::handlers::{require_role, Screen};
use crate::models::{Review, Task, UpdateTaskRequest, UserRole};
use crate::services::{ServiceFactory, TaskQuery};
use crate::utils::errors::{PayTaskError, Result};
use crate::utils::helpers::{format_currency, truncate_text};
use crate::utils::logging::log_user_action;

/// Fetch size for client-side search and paging
const FETCH_LIMIT: u32 = 100;

/// Client-side view options for the task list
#[derive(Debug, Clone)]
pub struct ListView {
    pub search: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            page_size: 10,
        }
    }
}

/// Lifecycle actions a client can take on an own task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Publish,
    Pause,
    Cancel,
    Delete,
}

pub async fn handle_list(services: &ServiceFactory, query: TaskQuery, view: &ListView) -> Result<String> {
    let query = TaskQuery {
        limit: query.limit.or(Some(FETCH_LIMIT)),
        ..query
    };
    let fetched = services.tasks.list(&query).await?;
    debug!(fetched = fetched.items.len(), total = fetched.total, "Tasks fetched");

    let matching: Vec<Task> = match view.search.as_deref() {
        Some(search) => filter_items(&fetched.items, search).into_iter().cloned().collect(),
        None => fetched.items,
    };
    let page = paginate(&matching, view.page, view.page_size);
    Ok(render_task_list(&page, view.search.as_deref(), Utc::now()))
}

pub async fn handle_detail(services: &ServiceFactory, task_id: &str) -> Result<String> {
    let (task, reviews) = tokio::try_join!(services.tasks.get(task_id), services.reviews.for_task(task_id))?;
    let fees = calculate_fees(task.reward, task.quantity, services.settings.fees.platform_fee_rate);
    Ok(render_task_detail(&task, &fees, &reviews, Utc::now()))
}

/// Validate a draft, show the budget and create it unless `dry_run`
pub async fn handle_create(services: &ServiceFactory, draft: TaskDraft, dry_run: bool) -> Result<String> {
    let now = Utc::now();
    let fees = draft.fees(services.settings.fees.platform_fee_rate);

    if dry_run {
        return Ok(render_create_preview(&draft, &fees, draft.validate(now).err().as_ref()));
    }

    let user = require_role(services, &[UserRole::Client]).await?;
    let request = draft.into_request(now)?;
    let task = services.tasks.create(&request).await?;
    log_user_action(Some(&user.id), "create_task", Some(&task.id));

    Ok(Screen::new("Task created")
        .field("Id", &task.id)
        .field("Status", task.status)
        .line(fees.to_string())
        .blank()
        .line(format!("Publish it with `paytask tasks publish {}`.", task.id))
        .finish())
}

/// Resubmit an edited copy of an own task
pub async fn handle_update(services: &ServiceFactory, task_id: &str, changes: UpdateTaskRequest) -> Result<String> {
    require_role(services, &[UserRole::Client]).await?;
    let current = services.tasks.get(task_id).await?;
    let mut request = current.to_update();
    merge_update(&mut request, changes.clone());
    validate_edit(&request, &changes, Utc::now())?;

    let task = services.tasks.update(task_id, &request).await?;
    Ok(format!("Task {} updated: {} ({})", task.id, task.title, task.status))
}

pub async fn handle_action(services: &ServiceFactory, task_id: &str, action: TaskAction) -> Result<String> {
    let user = require_role(services, &[UserRole::Client]).await?;
    let message = match action {
        TaskAction::Publish => {
            let task = services.tasks.publish(task_id).await?;
            format!("Task {} is now {}. Its budget is held in escrow.", task.id, task.status)
        }
        TaskAction::Pause => {
            let task = services.tasks.pause(task_id).await?;
            format!("Task {} is now {}.", task.id, task.status)
        }
        TaskAction::Cancel => {
            let task = services.tasks.cancel(task_id).await?;
            format!("Task {} is now {}. Unused budget returns to your wallet.", task.id, task.status)
        }
        TaskAction::Delete => {
            services.tasks.delete(task_id).await?;
            format!("Task {} deleted.", task_id)
        }
    };
    log_user_action(Some(&user.id), &format!("{:?}", action).to_lowercase(), Some(task_id));
    Ok(message)
}

/// Standalone fee calculator
pub fn handle_fees(reward: f64, quantity: u32, fee_rate: f64) -> Result<String> {
    if !reward.is_finite() || reward <= 0.0 || quantity == 0 {
        return Err(PayTaskError::InvalidInput(
            "Reward must be positive and quantity at least 1".to_string(),
        ));
    }
    Ok(Screen::new("Fee calculator")
        .line(calculate_fees(reward, quantity, fee_rate).to_string())
        .finish())
}

fn merge_update(base: &mut UpdateTaskRequest, changes: UpdateTaskRequest) {
    if changes.title.is_some() {
        base.title = changes.title;
    }
    if changes.description.is_some() {
        base.description = changes.description;
    }
    if changes.category.is_some() {
        base.category = changes.category;
    }
    if changes.reward.is_some() {
        base.reward = changes.reward;
    }
    if changes.quantity.is_some() {
        base.quantity = changes.quantity;
    }
    if changes.deadline.is_some() {
        base.deadline = changes.deadline;
    }
    if changes.instructions.is_some() {
        base.instructions = changes.instructions;
    }
    if changes.tags.is_some() {
        base.tags = changes.tags;
    }
}

pub fn render_task_list(page: &Page<Task>, search: Option<&str>, now: DateTime<Utc>) -> String {
    let title = match search {
        Some(search) => format!("Tasks matching \"{}\"", search),
        None => "Available tasks".to_string(),
    };

    let rows: Vec<String> = page
        .items
        .iter()
        .map(|task| {
            format!(
                "  [{}] {:<42} {:>9}  {:>5} left  {}",
                task.id,
                truncate_text(&task.title, 42),
                format_currency(task.reward, "USD"),
                task.remaining(),
                format_time_remaining(task.deadline, now)
            )
        })
        .collect();

    let mut screen = Screen::new(title).lines_or(rows, "No tasks found").blank().line(page.label());
    if page.has_next() {
        screen = screen.line(format!("Next page: --page {}", page.page + 1));
    }
    screen.finish()
}

pub fn render_task_detail(task: &Task, fees: &FeeBreakdown, reviews: &[Review], now: DateTime<Utc>) -> String {
    let mut screen = Screen::new(task.title.clone())
        .field("Id", &task.id)
        .field("Category", &task.category)
        .field("Status", task.status)
        .field("Reward", format!("{} per unit", format_currency(task.reward, "USD")))
        .field(
            "Progress",
            format!(
                "{}/{} units ({:.0}%)",
                task.completed_count,
                task.quantity,
                task.progress_percent()
            ),
        )
        .field(
            "Deadline",
            format!("{} ({})", format_datetime(task.deadline), format_time_remaining(task.deadline, now)),
        )
        .field("Posted", format_relative(task.created_at, now));

    if !task.tags.is_empty() {
        screen = screen.field("Tags", task.tags.join(", "));
    }

    screen = screen.section("Description").line(task.description.clone());

    if let Some(instructions) = &task.instructions {
        screen = screen.section("Instructions").line(instructions.clone());
    }
    if !task.attachments.is_empty() {
        screen = screen.section("Attachments").lines(task.attachments.iter().map(|a| format!("  {}", a)));
    }

    let review_lines: Vec<String> = reviews
        .iter()
        .map(|r| {
            format!(
                "  {}/5 {}",
                r.rating,
                r.comment.as_deref().unwrap_or("(no comment)")
            )
        })
        .collect();

    screen = screen
        .section("Budget")
        .line(fees.to_string())
        .section("Reviews")
        .lines_or(review_lines, "No reviews yet");

    if task.status.is_open() && task.remaining() > 0 {
        screen = screen.blank().line(format!("Claim a unit with `paytask flow claim {}`.", task.id));
    }
    screen.finish()
}

pub fn render_create_preview(draft: &TaskDraft, fees: &FeeBreakdown, error: Option<&PayTaskError>) -> String {
    let screen = Screen::new(format!("New task: {}", draft.title))
        .field("Category", &draft.category)
        .field("Deadline", format_datetime(draft.deadline))
        .line(fees.to_string())
        .blank();

    match error {
        Some(PayTaskError::Validation(errors)) => screen
            .line("Fix these before creating the task:")
            .lines(errors.errors.iter().map(|e| format!("  {}: {}", e.field, e.message)))
            .finish(),
        Some(other) => screen.line(other.user_message()).finish(),
        None => screen.line("Dry run: the task looks valid and was not created.").finish(),
    }
}
