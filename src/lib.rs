//! PayTask client
//!
//! A typed client for the PayTask task marketplace backend. This library
//! provides the REST services, the authenticated session, client-side fee
//! and validation logic, dashboard aggregates and the text pages used by the
//! `paytask` command-line front end.

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod domain;
pub mod catalog;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PayTaskError, Result};

// Re-export main components for easy access
pub use catalog::MockCatalog;
pub use services::ServiceFactory;
pub use state::{Session, TokenStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
