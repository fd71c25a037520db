//! Data models module
//!
//! DTO shapes mirrored from the PayTask backend API. Field names are
//! camelCase on the wire.

pub mod common;
pub mod task;
pub mod assignment;
pub mod feedback;
pub mod wallet;
pub mod notification;
pub mod user;
pub mod stats;
pub mod error_log;

// Re-export commonly used models
pub use common::{Envelope, Paginated, Ack};
pub use task::{Task, TaskStatus, CreateTaskRequest, UpdateTaskRequest, TASK_CATEGORIES};
pub use assignment::{Assignment, AssignmentStatus, TaskSummary, ClaimTaskRequest, Submission, SubmissionStatus, CreateSubmissionRequest, ApproveSubmissionRequest, RejectSubmissionRequest};
pub use feedback::{Rating, CreateRatingRequest, Review, CreateReviewRequest};
pub use wallet::{Wallet, Transaction, TransactionKind, TransactionStatus, DepositRequest, WithdrawRequest};
pub use notification::Notification;
pub use user::{UserProfile, UserRole, LoginRequest, RegisterRequest, AuthResponse, UpdateUserRequest};
pub use stats::{WorkerStats, ClientStats, PlatformStats};
pub use error_log::{ErrorLog, LogLevel, CreateErrorLogRequest};
