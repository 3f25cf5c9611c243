//! `asset-console` command: exercises the console data layer from a shell.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use asset_console::DataContext;
use asset_console::config::ConsoleSettings;
use asset_console::domain::ports::CredentialStore;
use asset_console::domain::{LoginInput, QueryOptions};
use asset_console::outbound::{
    FileCredentialStore, HistoryNavigator, ReqwestTransport, TracingNotifier,
};
use asset_console::routes::RouteTable;

/// `asset-console` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "asset-console",
    about = "Query and manage the asset management API from the command line",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Probe the API's liveness endpoint.
    Health,
    /// Exchange credentials for a token and load the profile.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Show the signed-in user's profile.
    Me,
    /// List assets.
    Assets {
        /// Filter by name.
        #[arg(long)]
        name: Option<String>,
    },
    /// List one page of categories.
    Categories {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Rows per page.
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Forget the stored token.
    Logout,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = ConsoleSettings::load().map_err(io::Error::other)?;
    let context = build_context(&settings)?;

    match args.command {
        Command::Health => {
            let status = context
                .health()
                .check()
                .await
                .map_err(|error| io::Error::other(format!("health check failed: {error}")))?;
            print_json(&json!({ "status": status }))
        }
        Command::Login { email, password } => {
            let session = context
                .session()
                .login(&LoginInput { email, password })
                .await
                .map_err(|error| io::Error::other(format!("login failed: {error}")))?;
            print_json(&session.user)
        }
        Command::Me => {
            let session = context
                .session()
                .refresh_user()
                .await
                .map_err(|error| io::Error::other(format!("load profile: {error}")))?;
            print_json(&session.user)
        }
        Command::Assets { name } => {
            let options = name.map_or_else(QueryOptions::default, |name| {
                QueryOptions::default().with_name(name)
            });
            let state = context.assets_query(options).fetch().await;
            if let Some(error) = state.error {
                return Err(io::Error::other(format!("list assets: {error}")));
            }
            print_json(&state.records)
        }
        Command::Categories { page, limit } => {
            let state = context
                .categories_query(QueryOptions::page(page, limit))
                .fetch()
                .await;
            if let Some(error) = state.error {
                return Err(io::Error::other(format!("list categories: {error}")));
            }
            print_json(&json!({
                "records": state.records,
                "paginatorInfo": state.paginator_info,
            }))
        }
        Command::Logout => context
            .session()
            .logout()
            .map_err(|error| io::Error::other(format!("logout: {error}"))),
    }
}

fn build_context(settings: &ConsoleSettings) -> io::Result<DataContext> {
    let base_url = settings.base_url().map_err(io::Error::other)?;
    let credentials: Arc<dyn CredentialStore> = Arc::new(
        FileCredentialStore::open(&settings.token_path()).map_err(io::Error::other)?,
    );
    let transport = ReqwestTransport::new(
        base_url,
        settings.timeout(),
        &settings.user_agent(),
        Arc::clone(&credentials),
    )
    .map_err(|error| io::Error::other(format!("create HTTP client: {error}")))?;

    Ok(DataContext::new(
        Arc::new(transport),
        credentials,
        Arc::new(TracingNotifier),
        Arc::new(HistoryNavigator::new(RouteTable::console())),
    ))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{rendered}");
    Ok(())
}
