//! Support tickets
//!
//! The ticket list is a fixed in-memory set. Submitting a ticket validates
//! the form, assigns a local id and logs the action.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::catalog::seeded_at;
use crate::utils::errors::{PayTaskError, Result, ValidationErrors};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::log_simulated_action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketCategory {
    Account,
    Payment,
    Task,
    Technical,
    Other,
}

impl TicketCategory {
    pub const ALL: [TicketCategory; 5] = [
        TicketCategory::Account,
        TicketCategory::Payment,
        TicketCategory::Task,
        TicketCategory::Technical,
        TicketCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Account => "account",
            TicketCategory::Payment => "payment",
            TicketCategory::Task => "task",
            TicketCategory::Technical => "technical",
            TicketCategory::Other => "other",
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TicketCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown ticket category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketPriority {
    Low,
    Normal,
    High,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TicketPriority::Low => "low",
            TicketPriority::Normal => "normal",
            TicketPriority::High => "high",
        })
    }
}

impl FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "normal" => Ok(TicketPriority::Normal),
            "high" => Ok(TicketPriority::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    Open,
    AwaitingReply,
    Closed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TicketStatus::Open => "open",
            TicketStatus::AwaitingReply => "awaiting_reply",
            TicketStatus::Closed => "closed",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TicketMessage {
    pub author: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupportTicket {
    pub id: String,
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<TicketMessage>,
}

/// Contents of the "new ticket" form
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SupportDesk {
    tickets: Vec<SupportTicket>,
}

impl SupportDesk {
    pub fn new(tickets: Vec<SupportTicket>) -> Self {
        Self { tickets }
    }

    pub fn seeded() -> Self {
        Self::new(seed_tickets())
    }

    /// Newest first
    pub fn list(&self) -> Vec<&SupportTicket> {
        let mut tickets: Vec<&SupportTicket> = self.tickets.iter().collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tickets
    }

    pub fn get(&self, id: &str) -> Result<&SupportTicket> {
        self.tickets
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| PayTaskError::NotFound {
                resource: "Support ticket",
                id: id.to_string(),
            })
    }

    /// Build the ticket the form would have created
    pub fn submit(&self, form: NewTicket, author: &str, now: DateTime<Utc>) -> Result<SupportTicket> {
        let subject = normalize_whitespace(&form.subject);
        let body = form.message.trim().to_string();

        let mut errors = ValidationErrors::new();
        if !(5..=120).contains(&subject.chars().count()) {
            errors.add("subject", "Subject must be between 5 and 120 characters");
        }
        if !(20..=2000).contains(&body.chars().count()) {
            errors.add("message", "Message must be between 20 and 2000 characters");
        }
        errors.into_result()?;

        let id = format!("TKT-{}", &Uuid::new_v4().simple().to_string()[..8].to_uppercase());
        log_simulated_action("support", "submit", &id);

        Ok(SupportTicket {
            id,
            subject,
            category: form.category,
            priority: form.priority,
            status: TicketStatus::Open,
            created_at: now,
            messages: vec![TicketMessage {
                author: author.to_string(),
                body,
                sent_at: now,
            }],
        })
    }
}

fn seed_tickets() -> Vec<SupportTicket> {
    vec![
        SupportTicket {
            id: "TKT-4F2A91C0".to_string(),
            subject: "Withdrawal stuck in pending".to_string(),
            category: TicketCategory::Payment,
            priority: TicketPriority::High,
            status: TicketStatus::AwaitingReply,
            created_at: seeded_at(2026, 10, 16, 18),
            messages: vec![
                TicketMessage {
                    author: "You".to_string(),
                    body: "My withdrawal from Friday still shows as pending.".to_string(),
                    sent_at: seeded_at(2026, 10, 16, 18),
                },
                TicketMessage {
                    author: "PayTask Support".to_string(),
                    body: "Thanks, we are checking with the payment provider and will update you.".to_string(),
                    sent_at: seeded_at(2026, 10, 17, 9),
                },
            ],
        },
        SupportTicket {
            id: "TKT-19BB7E03".to_string(),
            subject: "Cannot upload attachment to submission".to_string(),
            category: TicketCategory::Technical,
            priority: TicketPriority::Normal,
            status: TicketStatus::Closed,
            created_at: seeded_at(2026, 10, 2, 11),
            messages: vec![TicketMessage {
                author: "You".to_string(),
                body: "Uploading a 12 MB PDF fails with an error.".to_string(),
                sent_at: seeded_at(2026, 10, 2, 11),
            }],
        },
    ]
}
