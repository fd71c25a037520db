//! Task creation form
//!
//! A [`TaskDraft`] is what the creation page collects before anything is
//! sent. Validation reports every failing field, not just the first.

use chrono::{DateTime, Duration, Utc};

use crate::domain::pricing::{calculate_fees, FeeBreakdown};
use crate::models::{CreateTaskRequest, UpdateTaskRequest, TASK_CATEGORIES};
use crate::utils::errors::{Result, ValidationErrors};
use crate::utils::helpers::{format_currency, normalize_whitespace};

pub const MIN_REWARD: f64 = 0.10;
pub const MAX_REWARD: f64 = 1000.0;
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10_000;
pub const TITLE_LENGTH: (usize, usize) = (5, 100);
pub const DESCRIPTION_LENGTH: (usize, usize) = (20, 5000);

/// Deadlines must fall after this much time from now
pub fn min_deadline_lead() -> Duration {
    Duration::hours(1)
}

/// Latest allowed deadline, relative to now
pub fn max_deadline_lead() -> Duration {
    Duration::days(90)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub reward: f64,
    pub quantity: u32,
    pub deadline: DateTime<Utc>,
    pub instructions: Option<String>,
    pub tags: Vec<String>,
    pub attachments: Vec<String>,
}

impl TaskDraft {
    /// Check every field against the form rules, with `now` as the reference time
    pub fn validate(&self, now: DateTime<Utc>) -> Result<()> {
        let mut errors = ValidationErrors::new();

        check_length(&mut errors, "title", &normalize_whitespace(&self.title), TITLE_LENGTH);
        check_length(&mut errors, "description", self.description.trim(), DESCRIPTION_LENGTH);

        if self.category.trim().is_empty() {
            errors.add("category", "Category is required");
        } else if !TASK_CATEGORIES.contains(&self.category.as_str()) {
            errors.add("category", format!("Unknown category '{}'", self.category));
        }

        check_reward(&mut errors, self.reward);
        check_quantity(&mut errors, self.quantity);
        check_deadline(&mut errors, self.deadline, now);

        errors.into_result()
    }

    /// Budget preview at the given fee rate
    pub fn fees(&self, fee_rate: f64) -> FeeBreakdown {
        calculate_fees(self.reward, self.quantity, fee_rate)
    }

    /// Validate and build the create request
    pub fn into_request(self, now: DateTime<Utc>) -> Result<CreateTaskRequest> {
        self.validate(now)?;

        Ok(CreateTaskRequest {
            title: normalize_whitespace(&self.title),
            description: self.description.trim().to_string(),
            category: self.category,
            reward: self.reward,
            quantity: self.quantity,
            deadline: self.deadline,
            instructions: self.instructions.filter(|text| !text.trim().is_empty()),
            tags: self
                .tags
                .into_iter()
                .map(|tag| tag.trim().to_lowercase())
                .filter(|tag| !tag.is_empty())
                .collect(),
            attachments: self.attachments,
        })
    }
}

fn check_reward(errors: &mut ValidationErrors, reward: f64) {
    if !reward.is_finite() || !(MIN_REWARD..=MAX_REWARD).contains(&reward) {
        errors.add(
            "reward",
            format!(
                "Reward must be between {} and {}",
                format_currency(MIN_REWARD, "USD"),
                format_currency(MAX_REWARD, "USD")
            ),
        );
    }
}

fn check_quantity(errors: &mut ValidationErrors, quantity: u32) {
    if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
        errors.add(
            "quantity",
            format!("Quantity must be between {} and {}", MIN_QUANTITY, MAX_QUANTITY),
        );
    }
}

fn check_deadline(errors: &mut ValidationErrors, deadline: DateTime<Utc>, now: DateTime<Utc>) {
    if deadline <= now + min_deadline_lead() {
        errors.add("deadline", "Deadline must be more than 1 hour from now");
    } else if deadline > now + max_deadline_lead() {
        errors.add("deadline", "Deadline must be within 90 days");
    }
}

/// Check an edited copy of a task before it is resubmitted.
///
/// Reward and quantity are checked on the merged copy. Text fields and the
/// deadline are checked only when `changes` sets them, so a task already
/// close to its deadline can still be edited.
pub fn validate_edit(merged: &UpdateTaskRequest, changes: &UpdateTaskRequest, now: DateTime<Utc>) -> Result<()> {
    let mut errors = ValidationErrors::new();

    if let Some(title) = &changes.title {
        check_length(&mut errors, "title", &normalize_whitespace(title), TITLE_LENGTH);
    }
    if let Some(description) = &changes.description {
        check_length(&mut errors, "description", description.trim(), DESCRIPTION_LENGTH);
    }
    if let Some(reward) = merged.reward {
        check_reward(&mut errors, reward);
    }
    if let Some(quantity) = merged.quantity {
        check_quantity(&mut errors, quantity);
    }
    if let Some(deadline) = changes.deadline {
        check_deadline(&mut errors, deadline, now);
    }

    errors.into_result()
}

fn check_length(errors: &mut ValidationErrors, field: &'static str, value: &str, (min, max): (usize, usize)) {
    let length = value.chars().count();
    if length < min || length > max {
        errors.add(field, format!("Must be between {} and {} characters", min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::PayTaskError;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "Label street signs".to_string(),
            description: "Draw a box around every street sign in the photo.".to_string(),
            category: "image-labeling".to_string(),
            reward: 2.0,
            quantity: 10,
            deadline: now() + Duration::days(7),
            instructions: None,
            tags: vec![" Vision ".to_string(), "".to_string()],
            attachments: vec![],
        }
    }

    fn failing_fields(draft: &TaskDraft) -> Vec<&'static str> {
        match draft.validate(now()) {
            Ok(()) => vec![],
            Err(PayTaskError::Validation(errors)) => errors.errors.iter().map(|e| e.field).collect(),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(draft().validate(now()).is_ok());
        assert_eq!(draft().fees(0.05).total_budget(), 21.0);
    }

    #[test]
    fn test_reward_boundaries() {
        let mut d = draft();
        d.reward = 0.09;
        assert_eq!(failing_fields(&d), vec!["reward"]);
        d.reward = 0.10;
        assert!(failing_fields(&d).is_empty());
        d.reward = 1000.0;
        assert!(failing_fields(&d).is_empty());
        d.reward = 1000.01;
        assert_eq!(failing_fields(&d), vec!["reward"]);
        d.reward = 0.099;
        assert_eq!(failing_fields(&d), vec!["reward"]);
        d.reward = 1000.004;
        assert_eq!(failing_fields(&d), vec!["reward"]);
        d.reward = f64::NAN;
        assert_eq!(failing_fields(&d), vec!["reward"]);
    }

    #[test]
    fn test_quantity_boundaries() {
        let mut d = draft();
        d.quantity = 0;
        assert_eq!(failing_fields(&d), vec!["quantity"]);
        d.quantity = 1;
        assert!(failing_fields(&d).is_empty());
        d.quantity = 10_000;
        assert!(failing_fields(&d).is_empty());
        d.quantity = 10_001;
        assert_eq!(failing_fields(&d), vec!["quantity"]);
    }

    #[test]
    fn test_deadline_boundaries() {
        let mut d = draft();
        d.deadline = now() + Duration::minutes(59);
        assert_eq!(failing_fields(&d), vec!["deadline"]);
        d.deadline = now() + Duration::hours(1);
        assert_eq!(failing_fields(&d), vec!["deadline"]);
        d.deadline = now() + Duration::minutes(61);
        assert!(failing_fields(&d).is_empty());
        d.deadline = now() + Duration::days(90);
        assert!(failing_fields(&d).is_empty());
        d.deadline = now() + Duration::days(90) + Duration::minutes(1);
        assert_eq!(failing_fields(&d), vec!["deadline"]);
    }

    #[test]
    fn test_reports_every_failing_field() {
        let d = TaskDraft {
            title: "Hi".to_string(),
            description: "short".to_string(),
            category: String::new(),
            reward: 0.0,
            quantity: 0,
            deadline: now(),
            ..draft()
        };
        assert_eq!(
            failing_fields(&d),
            vec!["title", "description", "category", "reward", "quantity", "deadline"]
        );
    }

    #[test]
    fn test_into_request_normalizes() {
        let mut d = draft();
        d.title = "  Label   street signs ".to_string();
        d.instructions = Some("   ".to_string());
        let request = d.into_request(now()).unwrap();
        assert_eq!(request.title, "Label street signs");
        assert_eq!(request.tags, vec!["vision".to_string()]);
        assert!(request.instructions.is_none());
    }

    #[test]
    fn test_title_length_counts_collapsed_whitespace() {
        let mut d = draft();
        d.title = "a        b".to_string();
        assert_eq!(failing_fields(&d), vec!["title"]);
        assert_matches!(d.into_request(now()), Err(PayTaskError::Validation(_)));

        let mut d = draft();
        d.title = "  ab   cd  ".to_string();
        assert!(failing_fields(&d).is_empty());
        assert_eq!(d.into_request(now()).unwrap().title, "ab cd");
    }

    #[test]
    fn test_edit_rules() {
        let merged = UpdateTaskRequest {
            reward: Some(0.01),
            quantity: Some(10),
            deadline: Some(now() + Duration::minutes(30)),
            ..Default::default()
        };
        let changes = UpdateTaskRequest {
            reward: Some(0.01),
            ..Default::default()
        };
        match validate_edit(&merged, &changes, now()) {
            Err(PayTaskError::Validation(errors)) => {
                assert!(errors.has("reward"));
                assert!(!errors.has("deadline"));
            }
            other => panic!("expected validation errors, got {:?}", other),
        }

        let merged = UpdateTaskRequest {
            reward: Some(2.0),
            quantity: Some(20_000),
            ..Default::default()
        };
        let changes = UpdateTaskRequest {
            title: Some("a     b".to_string()),
            deadline: Some(now() + Duration::days(120)),
            ..Default::default()
        };
        match validate_edit(&merged, &changes, now()) {
            Err(PayTaskError::Validation(errors)) => {
                let fields: Vec<_> = errors.errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["title", "quantity", "deadline"]);
            }
            other => panic!("expected validation errors, got {:?}", other),
        }

        let merged = UpdateTaskRequest {
            reward: Some(2.0),
            quantity: Some(25),
            deadline: Some(now() + Duration::minutes(10)),
            ..Default::default()
        };
        let changes = UpdateTaskRequest {
            quantity: Some(25),
            ..Default::default()
        };
        assert!(validate_edit(&merged, &changes, now()).is_ok());
    }

    #[test]
    fn test_into_request_rejects_invalid() {
        let mut d = draft();
        d.category = "gardening".to_string();
        assert_matches!(d.into_request(now()), Err(PayTaskError::Validation(_)));
    }
}
