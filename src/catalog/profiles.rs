//! Public worker and client profiles

use chrono::{DateTime, Utc};

use crate::catalog::seeded_at;
use crate::models::feedback::average_score;
use crate::models::UserRole;
use crate::utils::errors::{PayTaskError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReview {
    pub author: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublicProfile {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub bio: String,
    pub skills: Vec<String>,
    pub completed_tasks: u32,
    pub member_since: DateTime<Utc>,
    pub reviews: Vec<ProfileReview>,
}

impl PublicProfile {
    pub fn average_rating(&self) -> Option<f64> {
        average_score(self.reviews.iter().map(|review| review.rating))
    }

    /// Reviews, newest first
    pub fn recent_reviews(&self, limit: usize) -> Vec<&ProfileReview> {
        let mut reviews: Vec<&ProfileReview> = self.reviews.iter().collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        reviews
    }
}

#[derive(Debug, Clone)]
pub struct ProfileDirectory {
    profiles: Vec<PublicProfile>,
}

impl ProfileDirectory {
    pub fn new(profiles: Vec<PublicProfile>) -> Self {
        Self { profiles }
    }

    pub fn seeded() -> Self {
        Self::new(seed_profiles())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Result<&PublicProfile> {
        self.profiles
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PayTaskError::NotFound {
                resource: "Profile",
                id: id.to_string(),
            })
    }
}

fn review(author: &str, rating: u8, comment: &str, created_at: DateTime<Utc>) -> ProfileReview {
    ProfileReview {
        author: author.to_string(),
        rating,
        comment: comment.to_string(),
        created_at,
    }
}

fn seed_profiles() -> Vec<PublicProfile> {
    vec![
        PublicProfile {
            id: "amara-okafor".to_string(),
            name: "Amara Okafor".to_string(),
            role: UserRole::Worker,
            bio: "Transcription and translation, English and Yoruba.".to_string(),
            skills: vec!["transcription".to_string(), "translation".to_string(), "proofreading".to_string()],
            completed_tasks: 342,
            member_since: seeded_at(2025, 3, 2, 12),
            reviews: vec![
                review("Northwind Research", 5, "Accurate and fast, even with noisy audio.", seeded_at(2026, 9, 20, 10)),
                review("Brightpath", 4, "Good work, one missed deadline.", seeded_at(2026, 8, 11, 16)),
                review("ShopLens", 5, "Followed the style guide exactly.", seeded_at(2026, 10, 5, 9)),
            ],
        },
        PublicProfile {
            id: "diego-fernandez".to_string(),
            name: "Diego Fernandez".to_string(),
            role: UserRole::Worker,
            bio: "Image labeling and data entry.".to_string(),
            skills: vec!["image-labeling".to_string(), "data-entry".to_string()],
            completed_tasks: 1208,
            member_since: seeded_at(2024, 11, 19, 12),
            reviews: vec![review("ShopLens", 3, "Quick, but check the category list.", seeded_at(2026, 10, 12, 8))],
        },
        PublicProfile {
            id: "northwind-research".to_string(),
            name: "Northwind Research".to_string(),
            role: UserRole::Client,
            bio: "User research studio posting transcription and survey work.".to_string(),
            skills: vec![],
            completed_tasks: 57,
            member_since: seeded_at(2025, 6, 30, 12),
            reviews: vec![],
        },
    ]
}
