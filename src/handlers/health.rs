//! Backend health check

use crate::handlers::Screen;
use crate::services::{HealthReport, ServiceFactory};
use crate::utils::errors::Result;

pub async fn handle_health(services: &ServiceFactory) -> Result<String> {
    let report = services.health.check().await?;
    Ok(render_health(services.settings.api.base_url.as_str(), &report))
}

pub fn render_health(target: &str, report: &HealthReport) -> String {
    let status = &report.status;
    let mut screen = Screen::new("Backend health")
        .field("Endpoint", target)
        .field("Status", if status.is_healthy() { "healthy" } else { status.status.as_str() })
        .field("Latency", format!("{} ms", report.latency_ms));
    if let Some(version) = &status.version {
        screen = screen.field("Version", version);
    }
    if let Some(uptime) = status.uptime {
        screen = screen.field("Uptime", format!("{:.0} s", uptime));
    }
    if let Some(database) = &status.database {
        screen = screen.field("Database", database);
    }
    screen.finish()
}
