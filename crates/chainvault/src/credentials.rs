// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chainvault add|get|list|remove` command implementations.

use std::io::IsTerminal;

use chainvault_config::model::ChainvaultConfig;
use chainvault_core::{Credential, CredentialRecord, VaultError};
use chainvault_vault::{mask_password, read_credential_password, EntryFailure, PASSWORD_MASK};
use secrecy::ExposeSecret;

use crate::context::VaultContext;

pub async fn run_add(
    config: &ChainvaultConfig,
    website: &str,
    username: &str,
) -> Result<(), VaultError> {
    if website.trim().is_empty() {
        return Err(VaultError::InvalidRecord("website must not be empty".into()));
    }
    let password = read_credential_password(website)?;
    let record = CredentialRecord {
        website: website.to_string(),
        username: username.to_string(),
        password,
    };

    let ctx = VaultContext::open(config).await?;
    let outcome = add(&ctx, &record).await;
    ctx.finish(outcome).await
}

async fn add(ctx: &VaultContext, record: &CredentialRecord) -> Result<(), VaultError> {
    ctx.ready_session().await?.add_credential(record).await?;
    println!("stored credential for {}", record.website);
    Ok(())
}

pub async fn run_get(
    config: &ChainvaultConfig,
    website: &str,
    reveal: bool,
) -> Result<(), VaultError> {
    let ctx = VaultContext::open(config).await?;
    let outcome = get(&ctx, website, reveal).await;
    ctx.finish(outcome).await
}

async fn get(ctx: &VaultContext, website: &str, reveal: bool) -> Result<(), VaultError> {
    let credential = ctx.ready_session().await?.get_credential(website).await?;
    println!("{}", format_credential(&credential, reveal));
    Ok(())
}

pub async fn run_list(config: &ChainvaultConfig, reveal: bool, plain: bool) -> Result<(), VaultError> {
    let ctx = VaultContext::open(config).await?;
    let outcome = list(&ctx, reveal, plain).await;
    ctx.finish(outcome).await
}

async fn list(ctx: &VaultContext, reveal: bool, plain: bool) -> Result<(), VaultError> {
    let report = ctx.ready_session().await?.list_credentials().await?;
    if report.is_empty() {
        println!("no credentials stored");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    for entry in report.entries() {
        match entry {
            Ok(credential) => println!("{}", format_credential(credential, reveal)),
            Err(failure) => println!("{}", format_failure(failure, use_color)),
        }
    }
    println!();
    println!(
        "{} credential(s), {} unreadable",
        report.success_count(),
        report.failure_count()
    );
    Ok(())
}

pub async fn run_remove(config: &ChainvaultConfig, website: &str) -> Result<(), VaultError> {
    let ctx = VaultContext::open(config).await?;
    let outcome = remove(&ctx, website).await;
    ctx.finish(outcome).await
}

async fn remove(ctx: &VaultContext, website: &str) -> Result<(), VaultError> {
    ctx.ready_session().await?.remove_credential(website).await?;
    println!("removed credential for {website}");
    Ok(())
}

fn format_credential(credential: &Credential, reveal: bool) -> String {
    let password = credential.password.expose_secret();
    let shown = if reveal { password } else { mask_password(password) };
    format!(
        "{:<30} {:<24} {:<20} {}",
        credential.website,
        credential.username,
        shown,
        credential.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn format_failure(failure: &EntryFailure, use_color: bool) -> String {
    let kind = failure.error.kind().to_string();
    if use_color {
        use colored::Colorize;
        format!("{:<30} {} {}", failure.website, "✗".red(), kind.red())
    } else {
        format!("{:<30} [FAIL] {}", failure.website, kind)
    }
}
