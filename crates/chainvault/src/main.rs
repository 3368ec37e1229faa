// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chainvault - an encrypted credential vault indexed by a ledger.
//!
//! This is the binary entry point for the `chainvault` CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod context;
mod credentials;
mod deploy;
mod status;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Chainvault - an encrypted credential vault indexed by a ledger.
#[derive(Parser, Debug)]
#[command(name = "chainvault", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check the wallet, database, ledger and vault.
    Status {
        /// Output structured JSON.
        #[arg(long)]
        json: bool,
    },
    /// Register the ledger for the active network in the local database.
    Deploy,
    /// Store a credential. The password is read from CHAINVAULT_PASSWORD or prompted.
    Add {
        #[arg(long)]
        website: String,
        #[arg(long)]
        username: String,
    },
    /// Show the credential stored for a website.
    Get {
        website: String,
        /// Print the password in clear text.
        #[arg(long)]
        reveal: bool,
    },
    /// List every stored credential.
    List {
        /// Print passwords in clear text.
        #[arg(long)]
        reveal: bool,
    },
    /// Remove the credential stored for a website.
    Remove { website: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => chainvault_config::load_and_validate_path(path),
        None => chainvault_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            chainvault_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.log_level);

    let result = match cli.command {
        Some(Commands::Status { json }) => status::run_status(&config, json, cli.plain).await,
        Some(Commands::Deploy) => deploy::run_deploy(&config).await,
        Some(Commands::Add { website, username }) => {
            credentials::run_add(&config, &website, &username).await
        }
        Some(Commands::Get { website, reveal }) => {
            credentials::run_get(&config, &website, reveal).await
        }
        Some(Commands::List { reveal }) => {
            credentials::run_list(&config, reveal, cli.plain).await
        }
        Some(Commands::Remove { website }) => credentials::run_remove(&config, &website).await,
        None => {
            println!("chainvault: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        if e.is_transient() {
            eprintln!("  (temporary failure, retrying may succeed)");
        }
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chainvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
