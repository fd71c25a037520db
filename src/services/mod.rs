//! Services module
//!
//! This module contains the typed REST client layer: one service per
//! backend resource, all sharing a single [`ApiClient`].

pub mod client;
pub mod query;
pub mod poller;
pub mod auth;
pub mod tasks;
pub mod assignments;
pub mod submissions;
pub mod ratings;
pub mod reviews;
pub mod wallets;
pub mod users;
pub mod stats;
pub mod error_logs;
pub mod health;
pub mod uploads;
pub mod notifications;

// Re-export commonly used services
pub use client::{Access, ApiClient};
pub use query::{build_task_query, decode_task_query, QueryBuilder, SortField, SortOrder, TaskQuery};
pub use poller::{poll, PollUpdate};
pub use auth::AuthService;
pub use tasks::TaskService;
pub use assignments::AssignmentService;
pub use submissions::SubmissionService;
pub use ratings::RatingService;
pub use reviews::ReviewService;
pub use wallets::WalletService;
pub use users::UserService;
pub use stats::StatsService;
pub use error_logs::ErrorLogService;
pub use health::{HealthReport, HealthService, HealthStatus};
pub use uploads::{UploadService, UploadedFile};
pub use notifications::NotificationService;

use crate::config::settings::Settings;
use crate::state::{Session, TokenStorage};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone, Debug)]
pub struct ServiceFactory {
    pub settings: Settings,
    pub session: Session,
    pub auth: AuthService,
    pub tasks: TaskService,
    pub assignments: AssignmentService,
    pub submissions: SubmissionService,
    pub ratings: RatingService,
    pub reviews: ReviewService,
    pub wallets: WalletService,
    pub users: UserService,
    pub stats: StatsService,
    pub error_logs: ErrorLogService,
    pub health: HealthService,
    pub uploads: UploadService,
    pub notifications: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with token storage chosen from settings
    pub fn new(settings: Settings) -> Result<Self> {
        let tokens = TokenStorage::from_settings(&settings);
        Self::with_tokens(settings, tokens)
    }

    /// Create a new ServiceFactory with the given token storage
    pub fn with_tokens(settings: Settings, tokens: TokenStorage) -> Result<Self> {
        let client = ApiClient::new(&settings, tokens.clone())?;
        let auth = AuthService::new(client.clone());

        Ok(Self {
            session: Session::new(auth.clone(), tokens),
            auth,
            tasks: TaskService::new(client.clone()),
            assignments: AssignmentService::new(client.clone()),
            submissions: SubmissionService::new(client.clone()),
            ratings: RatingService::new(client.clone()),
            reviews: ReviewService::new(client.clone()),
            wallets: WalletService::new(client.clone()),
            users: UserService::new(client.clone()),
            stats: StatsService::new(client.clone()),
            error_logs: ErrorLogService::new(client.clone()),
            health: HealthService::new(client.clone()),
            uploads: UploadService::new(client.clone()),
            notifications: NotificationService::new(client),
            settings,
        })
    }
}
