//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the client.

use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

/// Generate a new request id
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format an amount of money for display
pub fn format_currency(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    match currency {
        "USD" | "" => format!("{}${:.2}", sign, amount.abs()),
        other => format!("{}{:.2} {}", sign, amount.abs(), other),
    }
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Create a pagination info string
pub fn create_pagination_info(current_page: usize, total_pages: usize, total_items: usize) -> String {
    if total_pages <= 1 {
        format!("Total: {}", total_items)
    } else {
        format!("Page {} of {} (Total: {})", current_page, total_pages, total_items)
    }
}

/// Calculate pagination offset
pub fn calculate_offset(page: usize, page_size: usize) -> usize {
    page.saturating_sub(1) * page_size
}

/// Convert bytes to human readable format
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a 1..=5 score as stars
pub fn format_stars(score: f64) -> String {
    let full = score.round().clamp(0.0, 5.0) as usize;
    format!("{}{} ({:.1})", "*".repeat(full), ".".repeat(5 - full), score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 8), "hello...");
        assert_eq!(truncate_text("привет мир", 7), "прив...");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(21.0, "USD"), "$21.00");
        assert_eq!(format_currency(-3.5, "USD"), "-$3.50");
        assert_eq!(format_currency(10.0, "EUR"), "10.00 EUR");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("worker@paytask.io"));
        assert!(!is_valid_email("worker@paytask"));
        assert!(!is_valid_email("no spaces@paytask.io"));
    }

    #[test]
    fn test_pagination_helpers() {
        assert_eq!(calculate_offset(1, 20), 0);
        assert_eq!(calculate_offset(3, 20), 40);
        assert_eq!(calculate_offset(0, 20), 0);
        assert_eq!(create_pagination_info(1, 1, 7), "Total: 7");
        assert_eq!(create_pagination_info(2, 5, 93), "Page 2 of 5 (Total: 93)");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(500), "500 B");
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(4.4), "****. (4.4)");
        assert_eq!(format_stars(5.0), "***** (5.0)");
    }
}
