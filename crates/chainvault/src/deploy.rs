// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `chainvault deploy` command implementation.

use chainvault_config::model::ChainvaultConfig;
use chainvault_core::VaultError;
use tracing::info;

use crate::context::VaultContext;

/// Register the configured ledger address for the active network. Running it
/// again is harmless.
pub async fn run_deploy(config: &ChainvaultConfig) -> Result<(), VaultError> {
    let ctx = VaultContext::open(config).await?;
    let outcome = deploy(&ctx).await;
    ctx.finish(outcome).await
}

async fn deploy(ctx: &VaultContext) -> Result<(), VaultError> {
    let info = ctx
        .ledger
        .deploy()
        .await
        .map_err(|e| VaultError::LedgerUnavailable(e.to_string()))?;
    info!(chain_id = info.chain_id, address = %info.address, "ledger deployed");
    println!(
        "ledger ready on {} (chain {}) at {}",
        ctx.network.name, info.chain_id, info.address
    );
    Ok(())
}
