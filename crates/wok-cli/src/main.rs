//! wok CLI entry point.
//!
//! This file is intentionally thin: it loads the dev env file, sets up
//! tracing and dispatches to `commands/`. Endpoint configuration comes from
//! `WOK_ORDERS_URL`, `WOK_EMPLOYEES_URL` and `WOK_NOTIFY_URL`; the customer
//! identity from `--email` / `WOK_USER_EMAIL` and `WOK_AUTH_TOKEN`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wok")]
#[command(about = "China Wok storefront client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Follow an order's live status (Ctrl-C to stop)
    Track {
        /// Store id (local)
        #[arg(long)]
        store: String,

        /// Order id
        #[arg(long)]
        order: String,

        /// Customer email; falls back to WOK_USER_EMAIL
        #[arg(long)]
        email: Option<String>,

        /// Confirm receipt automatically when the backend asks for it
        #[arg(long, default_value_t = false)]
        auto_confirm: bool,
    },

    /// Confirm receipt of a delivered order
    Confirm {
        #[arg(long)]
        store: String,

        #[arg(long)]
        order: String,

        #[arg(long)]
        email: Option<String>,
    },

    /// Order commands
    Order {
        #[command(subcommand)]
        cmd: commands::order::OrderCmd,
    },

    /// Review commands
    Review {
        #[command(subcommand)]
        cmd: commands::review::ReviewCmd,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience); production sets real
    // environment variables.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Track {
            store,
            order,
            email,
            auto_confirm,
        } => commands::track::run(store, order, email, auto_confirm).await,
        Commands::Confirm {
            store,
            order,
            email,
        } => commands::confirm::run(store, order, email).await,
        Commands::Order { cmd } => commands::order::run(cmd).await,
        Commands::Review { cmd } => commands::review::run(cmd).await,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
