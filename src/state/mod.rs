//! State management module
//!
//! This module holds the only shared mutable state of the client: the
//! bearer token and the current user profile.

pub mod session;
pub mod token;

// Re-export commonly used state components
pub use session::Session;
pub use token::{token_expiry, StoredToken, TokenStorage};
