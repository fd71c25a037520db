//! Support page

use chrono::{DateTime, Utc};

use crate::catalog::{NewTicket, SupportDesk, SupportTicket};
use crate::domain::time::{format_datetime, format_relative};
use crate::handlers::Screen;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

pub fn handle_list(desk: &SupportDesk) -> String {
    let now = Utc::now();
    let rows: Vec<String> = desk
        .list()
        .into_iter()
        .map(|t| {
            format!(
                "  [{}] {} ({}, {}, {})",
                t.id,
                t.subject,
                t.category,
                t.status,
                format_relative(t.created_at, now)
            )
        })
        .collect();

    Screen::new("Support tickets").lines_or(rows, "No tickets").finish()
}

pub fn handle_show(desk: &SupportDesk, ticket_id: &str) -> Result<String> {
    Ok(render_ticket(desk.get(ticket_id)?, Utc::now()))
}

/// Submit the support form. The signed-in user's name is used as author when available.
pub async fn handle_submit(services: &ServiceFactory, desk: &SupportDesk, form: NewTicket) -> Result<String> {
    let author = match services.session.current_user().await {
        Ok(Some(user)) => user.name,
        _ => "You".to_string(),
    };
    let ticket = desk.submit(form, &author, Utc::now())?;

    Ok(format!(
        "{}\n\nThanks! Ticket {} was recorded. Our team usually replies within one business day.",
        render_ticket(&ticket, Utc::now()),
        ticket.id
    ))
}

pub fn render_ticket(ticket: &SupportTicket, now: DateTime<Utc>) -> String {
    let messages = ticket.messages.iter().flat_map(|m| {
        vec![
            format!("  {} ({})", m.author, format_relative(m.sent_at, now)),
            format!("    {}", m.body),
        ]
    });

    Screen::new(format!("{} {}", ticket.id, ticket.subject))
        .field("Category", ticket.category)
        .field("Priority", ticket.priority)
        .field("Status", ticket.status)
        .field("Opened", format_datetime(ticket.created_at))
        .section("Conversation")
        .lines(messages)
        .finish()
}
