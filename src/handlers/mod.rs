//! Page handlers module
//!
//! Each page of the product is a handler that loads what it needs through
//! the [`ServiceFactory`](crate::services::ServiceFactory) and renders it as
//! text. Rendering is split into plain `render_*` functions so screens can be
//! checked without a backend.

pub mod auth;
pub mod dashboard;
pub mod tasks;
pub mod flow;
pub mod review;
pub mod wallet;
pub mod notifications;
pub mod profile;
pub mod support;
pub mod admin;
pub mod health;

use crate::models::{UserProfile, UserRole};
use crate::services::ServiceFactory;
use crate::utils::errors::{PayTaskError, Result};

/// Text screen builder
#[derive(Debug, Default)]
pub struct Screen {
    lines: Vec<String>,
}

impl Screen {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let underline = "=".repeat(title.chars().count());
        Self {
            lines: vec![title, underline],
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn field(self, label: &str, value: impl std::fmt::Display) -> Self {
        self.line(format!("{:<18}{}", format!("{}:", label), value))
    }

    pub fn section(self, heading: &str) -> Self {
        self.blank().line(heading.to_string()).line("-".repeat(heading.chars().count()))
    }

    pub fn blank(self) -> Self {
        self.line(String::new())
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Add `empty` instead when `lines` yields nothing
    pub fn lines_or<I, S>(self, lines: I, empty: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            self.line(format!("  {}", empty))
        } else {
            self.lines(lines)
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Logged-in user with one of `roles`
pub(crate) async fn require_role(services: &ServiceFactory, roles: &[UserRole]) -> Result<UserProfile> {
    let user = services.session.require_user().await?;
    if roles.contains(&user.role) || user.is_admin() {
        Ok(user)
    } else {
        Err(PayTaskError::Forbidden(format!(
            "This page is for {} accounts",
            roles.iter().map(UserRole::as_str).collect::<Vec<_>>().join(" or ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout() {
        let text = Screen::new("Wallet")
            .field("Balance", "$10.00")
            .section("Recent")
            .lines_or(Vec::<String>::new(), "No transactions yet")
            .finish();

        assert_eq!(
            text,
            "Wallet\n======\nBalance:          $10.00\n\nRecent\n------\n  No transactions yet"
        );
    }
}
