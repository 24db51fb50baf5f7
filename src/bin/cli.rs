//! ServiceBay CLI
//!
//! Command-line front end for the booking platform:
//! - Log in and out, register accounts
//! - Watch and manage notifications
//! - Talk to the booking assistant
//! - Browse vehicles, customers, employees, services and leave requests

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use servicebay::api::dto::*;
use servicebay::chat::{ChatMessage, ChatService, Sender};
use servicebay::config::{generate_default_config, Config, LoggingConfig};
use servicebay::guard::{self, decode_claims, GuardDecision};
use servicebay::listing::{
    ColumnInfo, ListView, Listable, SortDirection, SortState, UnknownColumn, DEFAULT_PAGE_SIZE,
};
use servicebay::notifications::NotificationPoller;
use servicebay::{ApiClient, AuthService, FileStorage};

#[derive(Parser)]
#[command(name = "servicebay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the ServiceBay vehicle service platform")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login {
        username: String,
        /// Password (prompted on stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, default_value = "CUSTOMER")]
        role: Role,
    },

    /// Show the logged-in user
    Whoami,

    /// Show your profile, or update it when any field is given
    Profile {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Check the booking assistant's health endpoint
    Health,

    /// Notifications for your role
    Notifications {
        #[command(subcommand)]
        action: NotificationCommand,
    },

    /// Talk to the booking assistant (interactive without a message)
    Chat { message: Option<String> },

    /// List vehicles
    Vehicles(ListArgs),

    /// Register a vehicle
    AddVehicle {
        make: String,
        model: String,
        year: i32,
        license_plate: String,
        #[arg(long)]
        vin: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Owner (staff only; customers register their own)
        #[arg(long)]
        customer_id: Option<i64>,
    },

    /// Remove a vehicle
    RemoveVehicle { id: i64 },

    /// List customers
    Customers(ListArgs),

    /// List employees
    Employees(ListArgs),

    /// List the service catalogue
    Services(ListArgs),

    /// Leave requests
    Leaves {
        #[command(subcommand)]
        action: LeaveCommand,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum NotificationCommand {
    /// Unread notifications
    List,
    /// Every notification for your role
    All(ListArgs),
    /// Unread count
    Count,
    /// Mark one notification read
    Read { id: i64 },
    /// Mark all notifications read
    ReadAll,
    /// Send a notification to a role
    Create {
        title: String,
        message: String,
        #[arg(long = "type", default_value = "INFO")]
        kind: NotificationType,
        #[arg(long)]
        role: Role,
    },
    /// Delete a notification
    Delete { id: i64 },
    /// Poll the unread count until interrupted
    Watch,
}

#[derive(Subcommand)]
pub enum LeaveCommand {
    /// List leave requests
    List(ListArgs),
    /// Apply for leave
    Apply {
        #[arg(long = "type", default_value = "ANNUAL")]
        leave_type: String,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Approve a leave request
    Approve { id: i64 },
    /// Reject a leave request
    Reject { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive search text
    #[arg(long)]
    pub filter: Option<String>,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);

    let client = ApiClient::new(config.client_config())?;
    let storage = FileStorage::in_dir(&config.session.dir);
    let mut auth = AuthService::restore(client, storage);
    let format = cli.format;

    match cli.command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt("Password: ").await?,
            };

            let outcome = auth.login(&username, &password).await;
            if !outcome.success {
                bail!(outcome.message);
            }
            if let Some(session) = auth.session() {
                println!(
                    "{} Logged in as {} ({})",
                    outcome.message, session.user.username, session.user.role
                );
            }
        }

        Commands::Logout => {
            auth.logout();
            println!("Logged out");
        }

        Commands::Register {
            username,
            email,
            password,
            first_name,
            last_name,
            phone,
            role,
        } => {
            let request = RegisterRequest {
                username,
                email,
                password,
                first_name,
                last_name,
                phone_number: phone,
                role,
            };
            let outcome = auth.register(&request).await;
            if !outcome.success {
                bail!(outcome.message);
            }
            println!("{}", outcome.message);
        }

        Commands::Whoami => {
            let Some(session) = auth.session() else {
                println!("Not logged in");
                return Ok(());
            };

            let user = &session.user;
            println!("{:<10} {}", "User", user.username);
            println!("{:<10} {}", "Email", user.email);
            println!("{:<10} {}", "Role", user.role);
            println!("{:<10} {}", "Home", user.role.landing_path());

            if let Ok(claims) = decode_claims(&session.token) {
                let expiry = claims
                    .exp
                    .and_then(|exp| chrono::DateTime::from_timestamp(exp, 0))
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!("{:<10} {}", "Expires", expiry);
            }
        }

        Commands::Profile {
            email,
            first_name,
            last_name,
            phone,
        } => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            let user_id = auth.session().map(|s| s.user_id()).context("No stored user")?;

            let update = ProfileUpdate {
                email,
                first_name,
                last_name,
                phone_number: phone,
            };
            let profile = if update.is_empty() {
                client.profile(user_id).await?
            } else {
                client.update_profile(user_id, &update).await?
            };

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                println!("{:<10} {}", "User", profile.username);
                println!("{:<10} {}", "Email", profile.email);
                println!(
                    "{:<10} {}",
                    "Name",
                    opt(servicebay::listing::full_name(
                        profile.first_name.as_deref(),
                        profile.last_name.as_deref()
                    ))
                );
                println!("{:<10} {}", "Phone", opt(profile.phone_number.as_deref()));
            }
        }

        Commands::Health => {
            let client = match auth.authorized_client() {
                Ok(client) => client,
                Err(_) => ApiClient::new(config.client_config())?,
            };
            match client.chat_health().await {
                Ok(body) => println!("Assistant: {}", body.trim()),
                Err(e) => bail!("Cannot reach the booking assistant at {}: {}", config.api.base_url, e),
            }
        }

        Commands::Notifications { action } => {
            let (client, role) = require_role(&mut auth, guard::ANY_ROLE)?;
            run_notifications(client, role, action, format, &config).await?;
        }

        Commands::Chat { message } => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            let user_id = auth.session().map(|s| s.user_id());
            let mut chat = ChatService::new(client, user_id);

            match message {
                Some(text) => {
                    if let Some(reply) = chat.send_message(&text).await {
                        print_chat_message(reply);
                    }
                }
                None => run_chat(&mut chat).await?,
            }
        }

        Commands::Vehicles(args) => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            show_list(client.vehicles().await?, &args, format)?;
        }

        Commands::AddVehicle {
            make,
            model,
            year,
            license_plate,
            vin,
            color,
            customer_id,
        } => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            let vehicle = client
                .create_vehicle(&NewVehicle {
                    make,
                    model,
                    year,
                    license_plate,
                    vin,
                    color,
                    customer_id,
                })
                .await?;
            println!(
                "Vehicle #{} registered: {} {} ({})",
                vehicle.id, vehicle.make, vehicle.model, vehicle.license_plate
            );
        }

        Commands::RemoveVehicle { id } => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            client.delete_vehicle(id).await?;
            println!("Vehicle #{} removed", id);
        }

        Commands::Customers(args) => {
            let (client, _) = require_role(&mut auth, guard::STAFF)?;
            show_list(client.customers().await?, &args, format)?;
        }

        Commands::Employees(args) => {
            let (client, _) = require_role(&mut auth, guard::ADMIN_ONLY)?;
            show_list(client.employees().await?, &args, format)?;
        }

        Commands::Services(args) => {
            let (client, _) = require_role(&mut auth, guard::ANY_ROLE)?;
            show_list(client.services().await?, &args, format)?;
        }

        Commands::Leaves { action } => match action {
            LeaveCommand::List(args) => {
                let (client, _) = require_role(&mut auth, guard::STAFF)?;
                show_list(client.leaves().await?, &args, format)?;
            }
            LeaveCommand::Apply {
                leave_type,
                from,
                to,
                reason,
            } => {
                if to < from {
                    bail!("Leave cannot end before it starts");
                }
                let (client, _) = require_role(&mut auth, guard::EMPLOYEE_ONLY)?;
                let leave = client
                    .apply_leave(&NewLeave {
                        leave_type,
                        start_date: from,
                        end_date: to,
                        reason,
                    })
                    .await?;
                println!("Leave request #{} submitted ({})", leave.id, leave.status.as_str());
            }
            LeaveCommand::Approve { id } => {
                let (client, _) = require_role(&mut auth, guard::ADMIN_ONLY)?;
                client.approve_leave(id).await?;
                println!("Leave request #{} {}", id, LeaveStatus::Approved.as_str());
            }
            LeaveCommand::Reject { id } => {
                let (client, _) = require_role(&mut auth, guard::ADMIN_ONLY)?;
                client.reject_leave(id).await?;
                println!("Leave request #{} {}", id, LeaveStatus::Rejected.as_str());
            }
        },

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("servicebay={}", logging.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Run the route guard for a command, the way the UI guards its pages
fn require_role(
    auth: &mut AuthService<FileStorage>,
    allowed: &[Role],
) -> anyhow::Result<(ApiClient, Role)> {
    let token = auth.context().token().map(str::to_string);

    match guard::check_access_now(token.as_deref(), allowed) {
        GuardDecision::Allow(role) => Ok((auth.authorized_client()?, role)),
        GuardDecision::Redirect { logout: true, .. } => {
            auth.logout();
            bail!("Session expired. Run `servicebay login` again.")
        }
        GuardDecision::Redirect { .. } if token.is_none() => {
            bail!("Not logged in. Run `servicebay login` first.")
        }
        GuardDecision::Redirect { .. } => {
            let role = auth
                .session()
                .map(|s| s.role().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            bail!("This command is not available to the {} role", role)
        }
    }
}

// ============================================
// NOTIFICATIONS
// ============================================

async fn run_notifications(
    client: ApiClient,
    role: Role,
    action: NotificationCommand,
    format: OutputFormat,
    config: &Config,
) -> anyhow::Result<()> {
    match action {
        NotificationCommand::List => {
            let unread = client.unread_notifications(role).await?;
            let args = ListArgs {
                filter: None,
                sort: Some("created_at".to_string()),
                desc: true,
                page: 1,
                page_size: unread.len().max(1),
            };
            show_list(unread, &args, format)?;
        }
        NotificationCommand::All(args) => {
            show_list(client.notifications_for(role).await?, &args, format)?;
        }
        NotificationCommand::Count => {
            println!("{}", client.unread_count(role).await?);
        }
        NotificationCommand::Read { id } => {
            client.mark_notification_read(id).await?;
            println!("Notification #{} marked read", id);
        }
        NotificationCommand::ReadAll => {
            client.mark_all_notifications_read(role).await?;
            println!("All {} notifications marked read", role);
        }
        NotificationCommand::Create {
            title,
            message,
            kind,
            role: target_role,
        } => {
            let created = client
                .create_notification(&NewNotification {
                    title,
                    message,
                    kind,
                    target_role,
                })
                .await?;
            println!("Notification #{} sent to {}", created.id, target_role);
        }
        NotificationCommand::Delete { id } => {
            client.delete_notification(id).await?;
            println!("Notification #{} deleted", id);
        }
        NotificationCommand::Watch => {
            watch_notifications(client, role, config).await;
        }
    }

    Ok(())
}

async fn watch_notifications(client: ApiClient, role: Role, config: &Config) {
    let interval = config.notifications.poll_interval();
    let mut poller = NotificationPoller::new(client, role, interval);
    poller.mount().await;

    let state = poller.snapshot().await;
    for n in state.unread() {
        println!("[{}] {}: {}", n.kind.as_str(), n.title, n.message);
    }
    let mut last = state.unread_count();
    println!("{} unread (polling every {}s, Ctrl-C to stop)", last, interval.as_secs());

    let mut ticker = tokio::time::interval(interval);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let count = poller.snapshot().await.unread_count();
                if count != last {
                    println!("{} unread", count);
                    last = count;
                }
            }
        }
    }

    poller.stop().await;
}

// ============================================
// CHAT
// ============================================

fn print_chat_message(message: &ChatMessage) {
    let who = match message.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    println!("{}> {}", who, message.text);

    for (i, card) in message.slot_cards().iter().enumerate() {
        println!(
            "  [{}] {} {}  {:<12} {}",
            i + 1,
            card.start_label,
            card.end_label,
            card.status_label,
            card.staffing_label
        );
    }
}

async fn run_chat(chat: &mut ChatService) -> anyhow::Result<()> {
    if let Some(greeting) = chat.session().messages().first() {
        print_chat_message(greeting);
    }
    println!("(type /book N to request slot N, /quit to leave)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == "/quit" {
            break;
        }

        let text = match line.strip_prefix("/book") {
            Some(n) => match pick_slot(chat, n.trim()) {
                Some(text) => text,
                None => {
                    println!("No such slot");
                    continue;
                }
            },
            None => line.to_string(),
        };

        if let Some(reply) = chat.send_message(&text).await {
            print_chat_message(reply);
        }
    }

    Ok(())
}

/// Fill the input from slot `n` of the latest bot reply
fn pick_slot(chat: &mut ChatService, n: &str) -> Option<String> {
    let index = n.parse::<usize>().ok()?.checked_sub(1)?;
    let data = chat
        .session()
        .messages()
        .iter()
        .rev()
        .find(|m| m.sender == Sender::Bot && m.slots.is_some())?
        .slots
        .clone()?;
    let slot = data.available_slots.get(index)?;

    let session = chat.session_mut();
    session.select_slot(slot, data.date.as_deref());
    println!("you> {}", session.input());
    Some(session.input().to_string())
}

// ============================================
// LISTS
// ============================================

/// A record the CLI can print as a table row
trait Row: Listable + Serialize + Clone {
    fn cells(&self) -> Vec<String>;
}

fn opt(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

impl Row for Vehicle {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.make.clone(),
            self.model.clone(),
            self.year.to_string(),
            self.license_plate.clone(),
            opt(self.customer_name.as_deref()),
            opt(self.created_at.map(|d| d.format("%Y-%m-%d"))),
        ]
    }
}

impl Row for Customer {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            opt(self.full_name()),
            self.email.clone(),
            opt(self.phone_number.as_deref()),
            opt(self.created_at.map(|d| d.format("%Y-%m-%d"))),
        ]
    }
}

impl Row for Employee {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.username.clone(),
            opt(self.full_name()),
            self.email.clone(),
            opt(self.specialization.as_deref()),
            opt(self.created_at.map(|d| d.format("%Y-%m-%d"))),
        ]
    }
}

impl Row for ServiceOffering {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format!("{:.2}", self.price),
            opt(self.duration_minutes.map(|m| format!("{} min", m))),
        ]
    }
}

impl Row for Leave {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            opt(self.employee_name.as_deref()),
            self.leave_type.clone(),
            self.start_date.to_string(),
            self.end_date.to_string(),
            self.status.as_str().to_string(),
            opt(self.created_at.map(|d| d.format("%Y-%m-%d"))),
        ]
    }
}

impl Row for Notification {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.title.clone(),
            self.kind.as_str().to_string(),
            self.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]
    }
}

fn show_list<T>(items: Vec<T>, args: &ListArgs, format: OutputFormat) -> anyhow::Result<()>
where
    T: Row,
    T::Column: ColumnInfo + FromStr<Err = UnknownColumn>,
{
    let mut view = ListView::new(items).with_page_size(args.page_size);

    if let Some(filter) = &args.filter {
        view.set_query(filter.as_str());
    }
    if let Some(name) = &args.sort {
        let column: T::Column = name.parse().map_err(|e: UnknownColumn| {
            let known: Vec<&str> = <T::Column as ColumnInfo>::ALL.iter().map(|(_, key, _)| *key).collect();
            anyhow::anyhow!("{} (expected one of: {})", e, known.join(", "))
        })?;
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        view.set_sort(SortState::by(column, direction));
    }
    view.set_page(args.page);

    let rows = view.visible();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No records");
                return Ok(());
            }
            print_table(&rows, view.sort());
            println!();
            println!(
                "Page {} of {} ({} matching)",
                view.page(),
                view.page_count(),
                view.filtered_count()
            );
        }
    }

    Ok(())
}

fn print_table<T>(rows: &[T], sort: &SortState<T::Column>)
where
    T: Row,
    T::Column: ColumnInfo,
{
    let headers: Vec<String> = <T::Column as ColumnInfo>::ALL
        .iter()
        .map(|(column, _, label)| match sort.indicator(*column) {
            Some(arrow) => format!("{} {}", label, arrow),
            None => label.to_string(),
        })
        .collect();
    let cells: Vec<Vec<String>> = rows.iter().map(Row::cells).collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .filter_map(|row| row.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |values: &[String]| {
        values
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{:<width$}", v, width = *w))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    println!("{}", line(&headers));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));
    for row in &cells {
        println!("{}", line(row));
    }
}

fn print_csv<T>(rows: &[T]) -> anyhow::Result<()>
where
    T: Row,
    T::Column: ColumnInfo,
{
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(<T::Column as ColumnInfo>::ALL.iter().map(|(_, key, _)| *key))?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}
