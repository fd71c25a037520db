//! Domain module
//!
//! Pure calculations behind the pages: fees, draft validation, search and
//! pagination, dashboard aggregates and time formatting. Nothing here does I/O.

pub mod pricing;
pub mod draft;
pub mod listing;
pub mod stats;
pub mod time;

pub use pricing::{calculate_fees, FeeBreakdown, DEFAULT_PLATFORM_FEE_RATE};
pub use draft::TaskDraft;
pub use listing::{filter_items, paginate, Page, Searchable};
pub use stats::{ClientSummary, ErrorLogSummary, WalletSummary, WorkerSummary};
pub use time::{format_date, format_datetime, format_relative, format_time_remaining};
