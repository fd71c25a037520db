//! Dashboard aggregates computed from fetched lists

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::domain::pricing::{calculate_fees, from_cents, to_cents};
use crate::models::{
    Assignment, AssignmentStatus, ErrorLog, LogLevel, Submission, SubmissionStatus, Task, TaskStatus,
    Transaction, TransactionKind, TransactionStatus,
};

/// Worker dashboard numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerSummary {
    pub assignments_by_status: HashMap<AssignmentStatus, usize>,
    pub pending_submissions: usize,
    pub approved_submissions: usize,
    pub rejected_submissions: usize,
    /// Approved over reviewed submissions, `None` before the first review
    pub approval_rate: Option<f64>,
    pub earnings: f64,
    /// Reward of submissions still waiting for review
    pub pending_earnings: f64,
}

impl WorkerSummary {
    pub fn from_activity(assignments: &[Assignment], submissions: &[Submission]) -> Self {
        let mut summary = WorkerSummary::default();
        let mut rewards: HashMap<&str, f64> = HashMap::new();

        for assignment in assignments {
            *summary.assignments_by_status.entry(assignment.status).or_insert(0) += 1;
            if let Some(task) = &assignment.task {
                rewards.insert(assignment.task_id.as_str(), task.reward);
            }
        }

        let mut earned_cents = 0;
        let mut pending_cents = 0;
        for submission in submissions {
            let reward_cents = rewards.get(submission.task_id.as_str()).copied().map(to_cents).unwrap_or(0);
            match submission.status {
                SubmissionStatus::Pending => {
                    summary.pending_submissions += 1;
                    pending_cents += reward_cents;
                }
                SubmissionStatus::Approved => {
                    summary.approved_submissions += 1;
                    earned_cents += reward_cents;
                }
                SubmissionStatus::Rejected => summary.rejected_submissions += 1,
            }
        }

        let reviewed = summary.approved_submissions + summary.rejected_submissions;
        if reviewed > 0 {
            summary.approval_rate = Some(summary.approved_submissions as f64 * 100.0 / reviewed as f64);
        }
        summary.earnings = from_cents(earned_cents);
        summary.pending_earnings = from_cents(pending_cents);
        summary
    }

    pub fn count(&self, status: AssignmentStatus) -> usize {
        self.assignments_by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Client dashboard numbers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientSummary {
    pub tasks_by_status: HashMap<TaskStatus, usize>,
    pub units_total: u64,
    pub units_completed: u64,
    /// Budget including platform fee for tasks that are not drafts or cancelled
    pub committed_budget: f64,
    /// Rewards paid out for completed units
    pub spent: f64,
}

impl ClientSummary {
    pub fn from_tasks(tasks: &[Task], fee_rate: f64) -> Self {
        let mut summary = ClientSummary::default();
        let mut committed_cents = 0;
        let mut spent_cents = 0;

        for task in tasks {
            *summary.tasks_by_status.entry(task.status).or_insert(0) += 1;
            summary.units_total += task.quantity as u64;
            summary.units_completed += task.completed_count.min(task.quantity) as u64;

            if !matches!(task.status, TaskStatus::Draft | TaskStatus::Cancelled) {
                committed_cents += calculate_fees(task.reward, task.quantity, fee_rate).total_budget_cents;
            }
            spent_cents += to_cents(task.reward) * task.completed_count.min(task.quantity) as i64;
        }

        summary.committed_budget = from_cents(committed_cents);
        summary.spent = from_cents(spent_cents);
        summary
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        self.tasks_by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn completion_percent(&self) -> f64 {
        if self.units_total == 0 {
            return 0.0;
        }
        self.units_completed as f64 * 100.0 / self.units_total as f64
    }
}

/// Wallet page totals, over completed transactions only
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSummary {
    pub totals: BTreeMap<TransactionKind, f64>,
    pub credits: f64,
    pub debits: f64,
    pub pending: usize,
}

impl WalletSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut cents: BTreeMap<TransactionKind, i64> = BTreeMap::new();
        let mut credits = 0;
        let mut debits = 0;
        let mut pending = 0;

        for tx in transactions {
            match tx.status {
                TransactionStatus::Completed => {}
                TransactionStatus::Pending => {
                    pending += 1;
                    continue;
                }
                TransactionStatus::Failed => continue,
            }

            let amount = to_cents(tx.amount.abs());
            *cents.entry(tx.kind).or_insert(0) += amount;
            if tx.kind.is_credit() {
                credits += amount;
            } else {
                debits += amount;
            }
        }

        WalletSummary {
            totals: cents.into_iter().map(|(kind, c)| (kind, from_cents(c))).collect(),
            credits: from_cents(credits),
            debits: from_cents(debits),
            pending,
        }
    }

    pub fn net_flow(&self) -> f64 {
        from_cents(to_cents(self.credits) - to_cents(self.debits))
    }
}

/// Admin overview of reported errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorLogSummary {
    pub by_level: BTreeMap<LogLevel, usize>,
    pub total: usize,
    pub latest: Option<DateTime<Utc>>,
}

impl ErrorLogSummary {
    pub fn from_logs(logs: &[ErrorLog]) -> Self {
        let mut by_level = BTreeMap::new();
        for log in logs {
            *by_level.entry(log.level).or_insert(0) += 1;
        }

        ErrorLogSummary {
            by_level,
            total: logs.len(),
            latest: logs.iter().map(|log| log.created_at).max(),
        }
    }

    /// Errors at `error` level or above
    pub fn severe(&self) -> usize {
        self.by_level.range(LogLevel::Error..).map(|(_, count)| count).sum()
    }
}
