//! Dispute review desk
//!
//! Disputes are read from a fixed in-memory set. Resolving one produces a
//! notice for the admin and is logged; nothing is sent to the backend and
//! the stored dispute is left untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::catalog::seeded_at;
use crate::domain::pricing::{from_cents, to_cents};
use crate::utils::errors::{PayTaskError, Result, ValidationErrors};
use crate::utils::helpers::format_currency;
use crate::utils::logging::log_simulated_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisputeStatus {
    Open,
    UnderReview,
    Resolved,
}

impl DisputeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeStatus::Open => "open",
            DisputeStatus::UnderReview => "under_review",
            DisputeStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for DisputeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who the disputed amount goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisputeOutcome {
    Worker,
    Client,
    Split,
}

impl DisputeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisputeOutcome::Worker => "worker",
            DisputeOutcome::Client => "client",
            DisputeOutcome::Split => "split",
        }
    }
}

impl fmt::Display for DisputeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisputeOutcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "worker" => Ok(DisputeOutcome::Worker),
            "client" => Ok(DisputeOutcome::Client),
            "split" => Ok(DisputeOutcome::Split),
            other => Err(format!("unknown outcome '{}', expected worker, client or split", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    pub from: String,
    pub text: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dispute {
    pub id: String,
    pub task_id: String,
    pub task_title: String,
    pub worker_name: String,
    pub client_name: String,
    pub amount: f64,
    pub reason: String,
    pub status: DisputeStatus,
    pub opened_at: DateTime<Utc>,
    pub evidence: Vec<Evidence>,
}

/// Notice shown after a resolution is recorded
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub dispute_id: String,
    pub outcome: DisputeOutcome,
    pub worker_amount: f64,
    pub client_amount: f64,
    pub note: String,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dispute {} resolved in favour of {}: worker receives {}, client receives {}",
            self.dispute_id,
            self.outcome,
            format_currency(self.worker_amount, "USD"),
            format_currency(self.client_amount, "USD")
        )
    }
}

#[derive(Debug, Clone)]
pub struct DisputeDesk {
    disputes: Vec<Dispute>,
}

impl DisputeDesk {
    pub fn new(disputes: Vec<Dispute>) -> Self {
        Self { disputes }
    }

    pub fn seeded() -> Self {
        Self::new(seed_disputes())
    }

    /// Disputes still waiting for a decision come first, newest first
    pub fn list(&self, include_resolved: bool) -> Vec<&Dispute> {
        let mut disputes: Vec<&Dispute> = self
            .disputes
            .iter()
            .filter(|d| include_resolved || d.status != DisputeStatus::Resolved)
            .collect();
        disputes.sort_by(|a, b| {
            (a.status == DisputeStatus::Resolved)
                .cmp(&(b.status == DisputeStatus::Resolved))
                .then(b.opened_at.cmp(&a.opened_at))
        });
        disputes
    }

    pub fn get(&self, id: &str) -> Result<&Dispute> {
        self.disputes
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| PayTaskError::NotFound {
                resource: "Dispute",
                id: id.to_string(),
            })
    }

    pub fn resolve(&self, id: &str, outcome: DisputeOutcome, note: &str) -> Result<Resolution> {
        let dispute = self.get(id)?;
        if dispute.status == DisputeStatus::Resolved {
            return Err(PayTaskError::InvalidInput(format!("Dispute {} is already resolved", id)));
        }

        let mut errors = ValidationErrors::new();
        if note.trim().len() < 10 {
            errors.add("note", "Resolution note must be at least 10 characters");
        }
        errors.into_result()?;

        let amount_cents = to_cents(dispute.amount);
        let worker_cents = match outcome {
            DisputeOutcome::Worker => amount_cents,
            DisputeOutcome::Client => 0,
            DisputeOutcome::Split => amount_cents / 2,
        };

        log_simulated_action("disputes", "resolve", id);

        Ok(Resolution {
            dispute_id: dispute.id.clone(),
            outcome,
            worker_amount: from_cents(worker_cents),
            client_amount: from_cents(amount_cents - worker_cents),
            note: note.trim().to_string(),
        })
    }
}

fn seed_disputes() -> Vec<Dispute> {
    vec![
        Dispute {
            id: "DSP-1001".to_string(),
            task_id: "task-2041".to_string(),
            task_title: "Transcribe 10 minute customer interview".to_string(),
            worker_name: "Amara Okafor".to_string(),
            client_name: "Northwind Research".to_string(),
            amount: 12.5,
            reason: "Client rejected the transcript as incomplete; worker says the audio cut off.".to_string(),
            status: DisputeStatus::Open,
            opened_at: seeded_at(2026, 10, 14, 9),
            evidence: vec![
                Evidence {
                    from: "Amara Okafor".to_string(),
                    text: "The recording ends at 8:42, everything before that is transcribed.".to_string(),
                    submitted_at: seeded_at(2026, 10, 14, 10),
                },
                Evidence {
                    from: "Northwind Research".to_string(),
                    text: "We expected the full 10 minutes as listed in the task.".to_string(),
                    submitted_at: seeded_at(2026, 10, 14, 15),
                },
            ],
        },
        Dispute {
            id: "DSP-1002".to_string(),
            task_id: "task-1988".to_string(),
            task_title: "Label 200 product photos".to_string(),
            worker_name: "Diego Fernandez".to_string(),
            client_name: "ShopLens".to_string(),
            amount: 7.25,
            reason: "Labels use a different category scheme than the instructions.".to_string(),
            status: DisputeStatus::UnderReview,
            opened_at: seeded_at(2026, 10, 11, 13),
            evidence: vec![Evidence {
                from: "ShopLens".to_string(),
                text: "About 40% of the labels use the old taxonomy.".to_string(),
                submitted_at: seeded_at(2026, 10, 11, 14),
            }],
        },
        Dispute {
            id: "DSP-0987".to_string(),
            task_id: "task-1730".to_string(),
            task_title: "Translate onboarding emails to Spanish".to_string(),
            worker_name: "Lena Hoffmann".to_string(),
            client_name: "Brightpath".to_string(),
            amount: 30.0,
            reason: "Submission was late by two hours.".to_string(),
            status: DisputeStatus::Resolved,
            opened_at: seeded_at(2026, 9, 28, 8),
            evidence: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_list_orders_open_first() {
        let desk = DisputeDesk::seeded();
        let ids: Vec<&str> = desk.list(true).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["DSP-1001", "DSP-1002", "DSP-0987"]);
        assert_eq!(desk.list(false).len(), 2);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let desk = DisputeDesk::seeded();
        assert_matches!(
            desk.get("DSP-9999"),
            Err(PayTaskError::NotFound { resource: "Dispute", .. })
        );
    }

    #[test]
    fn test_resolve_split() {
        let desk = DisputeDesk::seeded();
        let resolution = desk
            .resolve("DSP-1002", DisputeOutcome::Split, "Half the labels are usable")
            .unwrap();
        assert_eq!(resolution.worker_amount, 3.62);
        assert_eq!(resolution.client_amount, 3.63);
        assert!(resolution.to_string().contains("worker receives $3.62"));

        // simulated only
        assert_eq!(desk.get("DSP-1002").unwrap().status, DisputeStatus::UnderReview);
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        let desk = DisputeDesk::seeded();
        assert_matches!(
            desk.resolve("DSP-1001", DisputeOutcome::Worker, "ok"),
            Err(PayTaskError::Validation(_))
        );
        assert_matches!(
            desk.resolve("DSP-0987", DisputeOutcome::Client, "Late delivery confirmed"),
            Err(PayTaskError::InvalidInput(_))
        );
    }

    #[test]
    fn test_outcome_parse() {
        assert_eq!("Worker".parse::<DisputeOutcome>().unwrap(), DisputeOutcome::Worker);
        assert!("refund".parse::<DisputeOutcome>().is_err());
    }
}
