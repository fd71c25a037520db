//! Mock catalog module
//!
//! Disputes, support tickets and public profiles have no backing API. They
//! are served from fixed in-memory data keyed by id.

pub mod disputes;
pub mod support;
pub mod profiles;

pub use disputes::{Dispute, DisputeDesk, DisputeOutcome, DisputeStatus, Resolution};
pub use support::{NewTicket, SupportDesk, SupportTicket, TicketCategory, TicketPriority, TicketStatus};
pub use profiles::{ProfileDirectory, ProfileReview, PublicProfile};

use chrono::{DateTime, TimeZone, Utc};

/// All mock pages together
#[derive(Debug, Clone)]
pub struct MockCatalog {
    pub disputes: DisputeDesk,
    pub support: SupportDesk,
    pub profiles: ProfileDirectory,
}

impl MockCatalog {
    pub fn seeded() -> Self {
        Self {
            disputes: DisputeDesk::seeded(),
            support: SupportDesk::seeded(),
            profiles: ProfileDirectory::seeded(),
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

pub(crate) fn seeded_at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}
