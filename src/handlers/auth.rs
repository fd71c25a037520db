//! Login, registration and logout

use tracing::info;

use crate::models::{RegisterRequest, UserProfile};
use crate::services::ServiceFactory;
use crate::utils::errors::{PayTaskError, Result};
use crate::utils::helpers::is_valid_email;
use crate::utils::logging::log_user_action;

pub async fn handle_login(services: &ServiceFactory, email: &str, password: &str) -> Result<String> {
    let user = services.session.login(email, password).await?;
    log_user_action(Some(&user.id), "login", None);
    Ok(render_welcome(&user))
}

pub async fn handle_register(services: &ServiceFactory, request: RegisterRequest) -> Result<String> {
    if !is_valid_email(&request.email) {
        return Err(PayTaskError::InvalidInput(format!("'{}' is not a valid email", request.email)));
    }
    if request.name.trim().is_empty() {
        return Err(PayTaskError::InvalidInput("Name is required".to_string()));
    }

    let user = services.session.register(&request).await?;
    log_user_action(Some(&user.id), "register", Some(user.role.as_str()));
    Ok(render_welcome(&user))
}

pub async fn handle_logout(services: &ServiceFactory) -> Result<String> {
    services.session.logout().await?;
    Ok("Logged out.".to_string())
}

pub async fn handle_whoami(services: &ServiceFactory) -> Result<String> {
    match services.session.refetch().await? {
        Some(user) => Ok(format!("{} <{}> ({})", user.name, user.email, user.role)),
        None => {
            info!("No active session");
            Ok("Not logged in.".to_string())
        }
    }
}

pub fn render_welcome(user: &UserProfile) -> String {
    format!("Welcome, {}! You are signed in as a {}.", user.name, user.role)
}
