//! Own profile, public profiles and profile settings

use chrono::{DateTime, Utc};

use crate::catalog::{ProfileDirectory, PublicProfile};
use crate::domain::time::{format_date, format_relative};
use crate::handlers::Screen;
use crate::models::feedback::average_score;
use crate::models::{Rating, UpdateUserRequest, UserProfile};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::format_stars;
use crate::utils::logging::log_user_action;

pub async fn handle_me(services: &ServiceFactory) -> Result<String> {
    let user = services.session.require_user().await?;
    let ratings = services.ratings.for_user(&user.id).await?;
    Ok(render_own_profile(&user, &ratings))
}

/// Public profile page, served from the local profile directory
pub fn handle_public(directory: &ProfileDirectory, profile_id: &str) -> Result<String> {
    let profile = directory.get(profile_id)?;
    Ok(render_public_profile(profile, Utc::now()))
}

/// Settings page: resubmit an edited copy of the own profile
pub async fn handle_settings(services: &ServiceFactory, changes: UpdateUserRequest) -> Result<String> {
    let user = services.session.require_user().await?;
    let mut request = user.to_update();
    if changes.name.is_some() {
        request.name = changes.name;
    }
    if changes.bio.is_some() {
        request.bio = changes.bio;
    }
    if changes.avatar.is_some() {
        request.avatar = changes.avatar;
    }
    if changes.skills.is_some() {
        request.skills = changes.skills;
    }

    let updated = services.users.update_me(&request).await?;
    services.session.refetch().await?;
    log_user_action(Some(&updated.id), "update_profile", None);
    Ok(format!("Profile saved.\n\n{}", render_own_profile(&updated, &[])))
}

pub fn render_own_profile(user: &UserProfile, ratings: &[Rating]) -> String {
    let rating = user
        .rating
        .or_else(|| average_score(ratings.iter().map(|r| r.score)))
        .map(format_stars)
        .unwrap_or_else(|| "no ratings yet".to_string());

    let mut screen = Screen::new(user.name.clone())
        .field("Email", &user.email)
        .field("Role", user.role)
        .field("Rating", rating)
        .field("Tasks completed", user.completed_tasks)
        .field("Member since", format_date(user.created_at));
    if let Some(bio) = &user.bio {
        screen = screen.field("Bio", bio);
    }
    if !user.skills.is_empty() {
        screen = screen.field("Skills", user.skills.join(", "));
    }
    screen.finish()
}

pub fn render_public_profile(profile: &PublicProfile, now: DateTime<Utc>) -> String {
    let rating = profile
        .average_rating()
        .map(|avg| format!("{} from {} review(s)", format_stars(avg), profile.reviews.len()))
        .unwrap_or_else(|| "no reviews yet".to_string());

    let reviews: Vec<String> = profile
        .recent_reviews(5)
        .into_iter()
        .map(|r| format!("  {}/5 {} ({}): {}", r.rating, r.author, format_relative(r.created_at, now), r.comment))
        .collect();

    let mut screen = Screen::new(profile.name.clone())
        .field("Role", profile.role)
        .field("Rating", rating)
        .field("Tasks completed", profile.completed_tasks)
        .field("Member since", format_date(profile.member_since))
        .line(profile.bio.clone());
    if !profile.skills.is_empty() {
        screen = screen.field("Skills", profile.skills.join(", "));
    }
    screen.section("Reviews").lines_or(reviews, "No reviews yet").finish()
}
