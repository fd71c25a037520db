//! PayTask command-line client
//!
//! Main application entry point

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use tracing::{debug, info, warn};

use paytask::{
    catalog::{DisputeOutcome, MockCatalog, NewTicket, TicketCategory, TicketPriority},
    config::Settings,
    domain::draft::TaskDraft,
    handlers::{self, tasks::{ListView, TaskAction}},
    models::{AssignmentStatus, LogLevel, RegisterRequest, TransactionKind, UpdateTaskRequest, UpdateUserRequest, UserRole},
    services::{decode_task_query, poll, ServiceFactory, SortField, SortOrder, TaskQuery},
    utils::logging,
    PayTaskError,
};

#[derive(Parser)]
#[command(name = "paytask")]
#[command(version, about = "PayTask task marketplace client", long_about = None)]
struct Cli {
    /// Configuration file (without extension)
    #[arg(short, long, value_name = "FILE", default_value = "paytask", env = "PAYTASK_CONFIG")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAYTASK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PAYTASK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        name: String,
        /// worker or client
        #[arg(long, default_value = "worker")]
        role: UserRole,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Dashboard for the signed-in user's role
    Dashboard {
        /// Refresh on the dashboard polling interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Recent activity feed
    Activity {
        /// Refresh on the activity polling interval until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
    /// Browse, create and manage tasks
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
    /// Budget for a reward and quantity, including the platform fee
    Fees {
        #[arg(long)]
        reward: f64,
        #[arg(long)]
        quantity: u32,
    },
    /// Worker task flow
    Flow {
        #[command(subcommand)]
        command: FlowCommand,
    },
    /// Review submissions on your tasks
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Wallet balance and transfers
    Wallet {
        #[command(subcommand)]
        command: WalletCommand,
    },
    /// Notifications
    Notifications {
        #[command(subcommand)]
        command: NotificationCommand,
    },
    /// Own and public profiles, profile settings
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Support tickets
    Support {
        #[command(subcommand)]
        command: SupportCommand,
    },
    /// Admin pages
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Check the backend health endpoint
    Health,
    /// Print the effective configuration
    Config,
}

#[derive(Subcommand)]
enum TaskCommand {
    /// List tasks with server filters, client-side search and paging
    List {
        #[arg(long)]
        status: Option<paytask::models::TaskStatus>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_reward: Option<f64>,
        #[arg(long)]
        max_reward: Option<f64>,
        #[arg(long)]
        sort_by: Option<SortField>,
        #[arg(long)]
        sort_order: Option<SortOrder>,
        /// Raw filter query string, e.g. "status=active&minReward=1"
        #[arg(long, conflicts_with_all = ["status", "category", "min_reward", "max_reward", "sort_by", "sort_order"])]
        query: Option<String>,
        /// Words that must all appear in title, description, category or tags
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Tasks you posted
    Mine {
        #[arg(long, short)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Task detail
    Show { task_id: String },
    /// Create a draft task
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// Reward per unit in USD
        #[arg(long)]
        reward: f64,
        #[arg(long)]
        quantity: u32,
        /// RFC 3339 timestamp or a duration from now such as 36h or 7d
        #[arg(long, value_parser = parse_deadline)]
        deadline: DateTime<Utc>,
        #[arg(long)]
        instructions: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Validate and show the budget without creating the task
        #[arg(long)]
        dry_run: bool,
    },
    /// Edit an own task
    Update {
        task_id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        reward: Option<f64>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long, value_parser = parse_deadline)]
        deadline: Option<DateTime<Utc>>,
    },
    Publish { task_id: String },
    Pause { task_id: String },
    Cancel { task_id: String },
    Delete { task_id: String },
}

#[derive(Subcommand)]
enum FlowCommand {
    /// Claim one unit of a task
    Claim { task_id: String },
    /// Your assignments
    Mine {
        #[arg(long)]
        status: Option<AssignmentStatus>,
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Submit work for an assignment
    Submit {
        assignment_id: String,
        #[arg(long, default_value = "")]
        content: String,
        /// File to upload and attach (repeatable)
        #[arg(long = "file")]
        files: Vec<PathBuf>,
    },
    /// Give an assignment back
    Release { assignment_id: String },
}

#[derive(Subcommand)]
enum ReviewCommand {
    /// Submissions waiting for review on a task
    Queue {
        task_id: String,
        /// Include already reviewed submissions
        #[arg(long)]
        all: bool,
    },
    Approve {
        submission_id: String,
        #[arg(long)]
        feedback: Option<String>,
    },
    Reject {
        submission_id: String,
        #[arg(long)]
        reason: String,
    },
    /// Rate the worker of a submission (1-5)
    Rate {
        submission_id: String,
        score: u8,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Review the other party of a finished task (1-5)
    Leave {
        task_id: String,
        reviewee_id: String,
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Subcommand)]
enum WalletCommand {
    Show {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        #[arg(long = "type")]
        kind: Option<TransactionKind>,
    },
    Deposit { amount: f64 },
    Withdraw {
        amount: f64,
        #[arg(long)]
        destination: String,
    },
}

#[derive(Subcommand)]
enum NotificationCommand {
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification, or all when no id is given, as read
    Read { notification_id: Option<String> },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Your profile
    Me,
    /// Someone's public profile
    Show { profile_id: String },
    /// Update your profile settings
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        /// Replaces the skill list (repeatable)
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
}

#[derive(Subcommand)]
enum SupportCommand {
    List,
    Show { ticket_id: String },
    /// Open a new ticket
    New {
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "other")]
        category: TicketCategory,
        #[arg(long, default_value = "normal")]
        priority: TicketPriority,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Platform statistics
    Stats,
    /// Reported client errors
    Errors {
        #[arg(long)]
        level: Option<LogLevel>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Disputes waiting for review
    Disputes {
        #[arg(long)]
        all: bool,
    },
    Dispute { dispute_id: String },
    /// Record a dispute decision
    Resolve {
        dispute_id: String,
        outcome: DisputeOutcome,
        #[arg(long)]
        note: String,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Register { .. } => "register",
            Command::Logout => "logout",
            Command::Whoami => "whoami",
            Command::Dashboard { .. } => "dashboard",
            Command::Activity { .. } => "activity",
            Command::Tasks { .. } => "tasks",
            Command::Fees { .. } => "fees",
            Command::Flow { .. } => "flow",
            Command::Review { .. } => "review",
            Command::Wallet { .. } => "wallet",
            Command::Notifications { .. } => "notifications",
            Command::Profile { .. } => "profile",
            Command::Support { .. } => "support",
            Command::Admin { .. } => "admin",
            Command::Health => "health",
            Command::Config => "config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_file(&cli.config).context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let log_guard = logging::init_logging(&settings.logging)?;
    debug!(version = paytask::VERSION, command = cli.command.name(), "Starting PayTask client");

    let report_errors = settings.features.report_errors;
    let services = ServiceFactory::new(settings).context("Failed to create services")?;
    let catalog = MockCatalog::seeded();
    let command_name = cli.command.name();

    match run(cli.command, &services, &catalog).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            Ok(())
        }
        Err(e) => {
            logging::log_api_error(command_name, &e);
            if report_errors && e.is_recoverable() {
                if let Err(report_err) = services.error_logs.report_error(&e, command_name).await {
                    warn!(error = %report_err, "Failed to report error");
                }
            }
            eprintln!("Error: {}", e.user_message());
            drop(log_guard);
            std::process::exit(1);
        }
    }
}

async fn run(command: Command, services: &ServiceFactory, catalog: &MockCatalog) -> paytask::Result<String> {
    use paytask::handlers::*;

    match command {
        Command::Login { email, password } => auth::handle_login(services, &email, &password).await,
        Command::Register { email, password, name, role } => {
            auth::handle_register(services, RegisterRequest { email, password, name, role }).await
        }
        Command::Logout => auth::handle_logout(services).await,
        Command::Whoami => auth::handle_whoami(services).await,
        Command::Dashboard { watch: false } => role_dashboard(services).await,
        Command::Dashboard { watch: true } => {
            let interval = Duration::from_secs(services.settings.polling.dashboard_seconds);
            watch(interval, || role_dashboard(services)).await
        }
        Command::Activity { watch: false } => dashboard::activity_feed(services).await,
        Command::Activity { watch: true } => {
            let interval = Duration::from_secs(services.settings.polling.activity_seconds);
            watch(interval, || dashboard::activity_feed(services)).await
        }
        Command::Tasks { command } => run_tasks(command, services).await,
        Command::Fees { reward, quantity } => {
            tasks::handle_fees(reward, quantity, services.settings.fees.platform_fee_rate)
        }
        Command::Flow { command } => match command {
            FlowCommand::Claim { task_id } => flow::handle_claim(services, &task_id).await,
            FlowCommand::Mine { status, search } => flow::handle_my_assignments(services, status, search.as_deref()).await,
            FlowCommand::Submit { assignment_id, content, files } => {
                flow::handle_submit(services, &assignment_id, content, &files).await
            }
            FlowCommand::Release { assignment_id } => flow::handle_release(services, &assignment_id).await,
        },
        Command::Review { command } => match command {
            ReviewCommand::Queue { task_id, all } => review::handle_queue(services, &task_id, all).await,
            ReviewCommand::Approve { submission_id, feedback } => {
                review::handle_approve(services, &submission_id, feedback).await
            }
            ReviewCommand::Reject { submission_id, reason } => review::handle_reject(services, &submission_id, &reason).await,
            ReviewCommand::Rate { submission_id, score, comment } => {
                review::handle_rate(services, &submission_id, score, comment).await
            }
            ReviewCommand::Leave { task_id, reviewee_id, rating, comment } => {
                review::handle_review(services, &task_id, &reviewee_id, rating, comment).await
            }
        },
        Command::Wallet { command } => match command {
            WalletCommand::Show { page, limit, kind } => wallet::handle_overview(services, page, limit, kind).await,
            WalletCommand::Deposit { amount } => wallet::handle_deposit(services, amount).await,
            WalletCommand::Withdraw { amount, destination } => wallet::handle_withdraw(services, amount, &destination).await,
        },
        Command::Notifications { command } => match command {
            NotificationCommand::List { unread } => notifications::handle_list(services, unread).await,
            NotificationCommand::Read { notification_id } => {
                notifications::handle_mark_read(services, notification_id.as_deref()).await
            }
        },
        Command::Profile { command } => match command {
            ProfileCommand::Me => profile::handle_me(services).await,
            ProfileCommand::Show { profile_id } => profile::handle_public(&catalog.profiles, &profile_id),
            ProfileCommand::Update { name, bio, avatar, skills } => {
                let changes = UpdateUserRequest {
                    name,
                    bio,
                    avatar,
                    skills: if skills.is_empty() { None } else { Some(skills) },
                };
                profile::handle_settings(services, changes).await
            }
        },
        Command::Support { command } => match command {
            SupportCommand::List => Ok(support::handle_list(&catalog.support)),
            SupportCommand::Show { ticket_id } => support::handle_show(&catalog.support, &ticket_id),
            SupportCommand::New { subject, category, priority, message } => {
                let form = NewTicket { subject, category, priority, message };
                support::handle_submit(services, &catalog.support, form).await
            }
        },
        Command::Admin { command } => match command {
            AdminCommand::Stats => admin::handle_stats(services).await,
            AdminCommand::Errors { level, page, limit } => admin::handle_error_logs(services, level, page, limit).await,
            AdminCommand::Disputes { all } => admin::handle_disputes(services, &catalog.disputes, all).await,
            AdminCommand::Dispute { dispute_id } => admin::handle_dispute(services, &catalog.disputes, &dispute_id).await,
            AdminCommand::Resolve { dispute_id, outcome, note } => {
                admin::handle_resolve(services, &catalog.disputes, &dispute_id, outcome, &note).await
            }
        },
        Command::Health => health::handle_health(services).await,
        Command::Config => toml::to_string_pretty(&services.settings)
            .map_err(|e| PayTaskError::Config(format!("Failed to render settings: {}", e))),
    }
}

async fn run_tasks(command: TaskCommand, services: &ServiceFactory) -> paytask::Result<String> {
    use paytask::handlers::tasks;

    match command {
        TaskCommand::List {
            status,
            category,
            min_reward,
            max_reward,
            sort_by,
            sort_order,
            query,
            search,
            page,
            page_size,
        } => {
            let query = match query {
                Some(raw) => decode_task_query(&raw)?,
                None => TaskQuery {
                    status,
                    category,
                    min_reward,
                    max_reward,
                    sort_by,
                    sort_order,
                    ..Default::default()
                },
            };
            let view = ListView { search, page, page_size };
            tasks::handle_list(services, query, &view).await
        }
        TaskCommand::Mine { search, page } => {
            let user = services.session.require_user().await?;
            let query = TaskQuery {
                created_by: Some(user.id),
                ..Default::default()
            };
            let view = ListView {
                search,
                page,
                ..Default::default()
            };
            tasks::handle_list(services, query, &view).await
        }
        TaskCommand::Show { task_id } => tasks::handle_detail(services, &task_id).await,
        TaskCommand::Create {
            title,
            description,
            category,
            reward,
            quantity,
            deadline,
            instructions,
            tags,
            dry_run,
        } => {
            let draft = TaskDraft {
                title,
                description,
                category,
                reward,
                quantity,
                deadline,
                instructions,
                tags,
                attachments: Vec::new(),
            };
            tasks::handle_create(services, draft, dry_run).await
        }
        TaskCommand::Update { task_id, title, description, reward, quantity, deadline } => {
            let changes = UpdateTaskRequest {
                title,
                description,
                reward,
                quantity,
                deadline,
                ..Default::default()
            };
            tasks::handle_update(services, &task_id, changes).await
        }
        TaskCommand::Publish { task_id } => tasks::handle_action(services, &task_id, TaskAction::Publish).await,
        TaskCommand::Pause { task_id } => tasks::handle_action(services, &task_id, TaskAction::Pause).await,
        TaskCommand::Cancel { task_id } => tasks::handle_action(services, &task_id, TaskAction::Cancel).await,
        TaskCommand::Delete { task_id } => tasks::handle_action(services, &task_id, TaskAction::Delete).await,
    }
}

/// Worker, client or admin dashboard depending on who is signed in
async fn role_dashboard(services: &ServiceFactory) -> paytask::Result<String> {
    let user = services.session.require_user().await?;
    match user.role {
        UserRole::Worker => handlers::dashboard::worker_dashboard(services).await,
        UserRole::Client => handlers::dashboard::client_dashboard(services).await,
        UserRole::Admin => handlers::admin::handle_stats(services).await,
    }
}

/// Re-render a page every `interval` until Ctrl-C
async fn watch<F, Fut>(interval: Duration, render: F) -> paytask::Result<String>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = paytask::Result<String>>,
{
    info!(interval_secs = interval.as_secs(), "Watching, press Ctrl-C to stop");
    let updates = poll(interval, render);
    futures::pin_mut!(updates);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching");
                return Ok(String::new());
            }
            update = updates.next() => {
                let Some(update) = update else {
                    return Ok(String::new());
                };
                match update.result {
                    Ok(screen) => println!("{}\n\n(updated {}, refresh #{})\n", screen, update.fetched_at.format("%H:%M:%S"), update.tick),
                    Err(e @ (PayTaskError::Unauthorized(_) | PayTaskError::Forbidden(_))) => return Err(e),
                    Err(e) => {
                        logging::log_api_error("watch", &e);
                        eprintln!("Refresh failed: {}", e.user_message());
                    }
                }
            }
        }
    }
}

fn parse_deadline(input: &str) -> std::result::Result<DateTime<Utc>, String> {
    paytask::domain::time::parse_deadline(input, Utc::now())
}
