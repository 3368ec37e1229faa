// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chainvault status` command implementation.
//!
//! Runs a short series of checks (wallet, database, ledger, vault) and
//! prints one line per check. Later checks are skipped once one fails.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use chainvault_config::model::ChainvaultConfig;
use chainvault_core::{LedgerAdapter, VaultError};
use serde::Serialize;

use crate::context::VaultContext;

/// Status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip)]
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, started: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: started.elapsed(),
        }
    }
}

/// Structured output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub network: String,
    pub chain_id: u64,
    pub ledger_address: String,
    pub identity: Option<String>,
    pub checks: Vec<CheckResult>,
}

/// Run the `chainvault status` command.
///
/// Returns an error only if the status itself cannot be reported; failed
/// checks are part of the output.
pub async fn run_status(
    config: &ChainvaultConfig,
    json: bool,
    plain: bool,
) -> Result<(), VaultError> {
    let (identity, checks) = collect_checks(config).await;
    let network = config.network.active_network();

    if json {
        let response = StatusResponse {
            network: config.network.active.clone(),
            chain_id: network.map(|n| n.chain_id).unwrap_or_default(),
            ledger_address: network.map(|n| n.ledger_address.clone()).unwrap_or_default(),
            identity,
            checks,
        };
        let rendered = serde_json::to_string_pretty(&response)
            .map_err(|e| VaultError::Internal(format!("failed to render status: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  chainvault status ({})", config.network.active);
    println!("  {}", "-".repeat(50));
    for check in &checks {
        println!("{}", format_check(check, use_color));
    }
    println!();
    if checks
        .iter()
        .any(|c| c.name == "ledger" && c.status == CheckStatus::Fail)
    {
        println!("  Register the ledger with: chainvault deploy");
        println!();
    }
    Ok(())
}

async fn collect_checks(config: &ChainvaultConfig) -> (Option<String>, Vec<CheckResult>) {
    let mut results = Vec::new();

    let started = Instant::now();
    let ctx = match VaultContext::open(config).await {
        Ok(ctx) => {
            results.push(CheckResult::new(
                "wallet",
                CheckStatus::Pass,
                format!("connected as {}", ctx.identity),
                started,
            ));
            ctx
        }
        Err(e) => {
            results.push(CheckResult::new("wallet", CheckStatus::Fail, e.to_string(), started));
            return (None, results);
        }
    };
    let identity = Some(ctx.identity.to_string());

    let started = Instant::now();
    match ctx.db.ping().await {
        Ok(()) => results.push(CheckResult::new(
            "database",
            CheckStatus::Pass,
            config.storage.database_path.clone(),
            started,
        )),
        Err(e) => {
            results.push(CheckResult::new("database", CheckStatus::Fail, e.to_string(), started));
            return (identity, results);
        }
    }

    let started = Instant::now();
    match ctx.ledger.verify().await {
        Ok(info) => results.push(CheckResult::new(
            "ledger",
            CheckStatus::Pass,
            format!("{} on chain {}", info.address, info.chain_id),
            started,
        )),
        Err(e) => {
            results.push(CheckResult::new("ledger", CheckStatus::Fail, e.to_string(), started));
            return (identity, results);
        }
    }

    let started = Instant::now();
    results.push(vault_check(&ctx, started).await);
    (identity, results)
}

async fn vault_check(ctx: &VaultContext, started: Instant) -> CheckResult {
    let report = match ctx.ready_session().await {
        Ok(session) => session.list_credentials().await,
        Err(e) => Err(e),
    };
    match report {
        Ok(report) if report.failure_count() == 0 => CheckResult::new(
            "vault",
            CheckStatus::Pass,
            format!("{} credential(s)", report.success_count()),
            started,
        ),
        Ok(report) => CheckResult::new(
            "vault",
            CheckStatus::Warn,
            format!(
                "{} credential(s), {} unreadable",
                report.success_count(),
                report.failure_count()
            ),
            started,
        ),
        Err(e) => CheckResult::new("vault", CheckStatus::Fail, e.to_string(), started),
    }
}

fn format_check(check: &CheckResult, use_color: bool) -> String {
    let ms = check.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let symbol = match check.status {
            CheckStatus::Pass => "✓".green(),
            CheckStatus::Warn => "!".yellow(),
            CheckStatus::Fail => "✗".red(),
        };
        format!("    {symbol} {:<10} {} ({ms}ms)", check.name, check.message)
    } else {
        let tag = match check.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!("    {tag} {:<10} {} ({ms}ms)", check.name, check.message)
    }
}
