//! Storedash CLI - operate the marketplace admin from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept in $HOME/.storedash)
//! storedash login -e admin@shop.example -p 'secret'
//!
//! # Pending orders placed in March
//! storedash orders list --status pending --from 2024-03-01 --to 2024-03-31
//!
//! # Look up the order behind a scanned QR code
//! storedash orders lookup 'https://admin.shop.example/orders?orderId=42'
//!
//! # Ship it
//! storedash orders set-status 42 shipped
//! ```
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.
//!
//! # Environment Variables
//!
//! - `STOREDASH_API_URL` - Base URL of the marketplace REST API (required)
//! - `STOREDASH_LOG_JSON` - Emit logs as JSON lines when set
//! - `RUST_LOG` - Log filter (default: `storedash_admin=info,storedash_cli=info`)
//!
//! See [`storedash_admin::config`] for the remaining settings.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use storedash_admin::{ApiClient, DashboardConfig, SessionListener};
use storedash_core::{NotificationId, NotificationKind, OrderId, OrderStatus};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "storedash")]
#[command(author, version, about = "Storedash marketplace admin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check that the backend is up
    Health,
    /// Browse and update orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Browse products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Browse stores
    Stores {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Browse categories
    Categories {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Browse users
    Users {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Browse reviews
    Reviews {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Browse and check discount codes
    Discounts {
        #[command(subcommand)]
        action: DiscountsAction,
    },
    /// Read and send notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
    /// Show the analytics dashboard
    Analytics,
    /// Search products, stores and users
    Search {
        /// Text to search for
        query: String,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List everything
    List,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders, optionally filtered
    List {
        /// Only orders in this status (e.g. pending, shipped)
        #[arg(short, long)]
        status: Option<OrderStatus>,

        /// Only orders created on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only orders created on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Show one order
    Show {
        /// Order ID
        id: OrderId,
    },
    /// Find the order behind a scanned QR payload
    Lookup {
        /// Scanned text: a URL, an order ID or an order number
        payload: String,
    },
    /// Move an order to a new status
    SetStatus {
        /// Order ID
        id: OrderId,

        /// New status
        status: OrderStatus,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List one page of products
    List {
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Products per page
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
}

#[derive(Subcommand)]
enum DiscountsAction {
    /// List discount codes
    List,
    /// Check whether a code is usable
    Validate {
        /// Discount code
        code: String,
    },
}

#[derive(Subcommand)]
enum NotificationsAction {
    /// List notifications
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: NotificationId,
    },
    /// Mark every notification as read
    ReadAll,
    /// Send a notification to every user
    Broadcast {
        /// Notification title
        #[arg(short, long)]
        title: String,

        /// Notification body
        #[arg(short, long)]
        message: String,

        /// Notification type (info, order, review, system, promotion)
        #[arg(short, long, default_value = "system")]
        kind: NotificationKind,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DashboardConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storedash_admin=info,storedash_cli=info".into());

    // Logs go to stderr so stdout stays parseable JSON
    let json = std::env::var_os("STOREDASH_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

/// Tells the operator to sign in again after the backend ends the session.
struct LoginHint;

impl SessionListener for LoginHint {
    fn on_session_expired(&self) {
        tracing::warn!("Session expired or was revoked. Run `storedash login` to sign in again.");
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = DashboardConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(CommandError::from(e)),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &DashboardConfig) -> Result<(), CommandError> {
    let client = ApiClient::from_config(config, Some(Arc::new(LoginHint)))?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&client, &email, &password).await?;
        }
        Commands::Logout => commands::session::logout(&client).await?,
        Commands::Whoami => commands::session::whoami(&client).await?,
        Commands::Health => commands::session::health(&client).await?,
        Commands::Orders { action } => match action {
            OrdersAction::List { status, from, to } => {
                commands::orders::list(&client, status, from, to).await?;
            }
            OrdersAction::Show { id } => commands::orders::show(&client, id).await?,
            OrdersAction::Lookup { payload } => {
                commands::orders::lookup(&client, &payload).await?;
            }
            OrdersAction::SetStatus { id, status } => {
                commands::orders::set_status(&client, id, status).await?;
            }
        },
        Commands::Products { action } => match action {
            ProductsAction::List { page, size } => {
                commands::catalog::products(&client, page, size).await?;
            }
        },
        Commands::Stores {
            action: ListAction::List,
        } => commands::catalog::stores(&client).await?,
        Commands::Categories {
            action: ListAction::List,
        } => commands::catalog::categories(&client).await?,
        Commands::Users {
            action: ListAction::List,
        } => commands::catalog::users(&client).await?,
        Commands::Reviews {
            action: ListAction::List,
        } => commands::catalog::reviews(&client).await?,
        Commands::Discounts { action } => match action {
            DiscountsAction::List => commands::catalog::discounts(&client).await?,
            DiscountsAction::Validate { code } => {
                commands::catalog::validate_discount(&client, &code).await?;
            }
        },
        Commands::Notifications { action } => match action {
            NotificationsAction::List { unread } => {
                commands::notifications::list(&client, unread).await?;
            }
            NotificationsAction::Read { id } => {
                commands::notifications::mark_read(&client, id).await?;
            }
            NotificationsAction::ReadAll => commands::notifications::mark_all_read(&client).await?,
            NotificationsAction::Broadcast {
                title,
                message,
                kind,
            } => commands::notifications::broadcast(&client, title, message, kind).await?,
        },
        Commands::Analytics => commands::insights::analytics(&client).await?,
        Commands::Search { query } => commands::insights::search(&client, &query).await?,
    }
    Ok(())
}
