// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ledger collaborator: the authoritative website -> blob reference index.

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{LedgerEntry, LedgerInfo};

/// A tamper-evident ledger keyed by website.
///
/// All calls are scoped to the identity the adapter was built for. The
/// ledger enforces one entry per website and rejects duplicates with
/// [`LedgerError::AlreadyExists`]; the vault relies on that instead of
/// locking.
#[async_trait]
pub trait LedgerAdapter: PluginAdapter {
    /// Confirms the ledger is reachable and deployed at the expected address
    /// on the current network.
    async fn verify(&self) -> Result<LedgerInfo, LedgerError>;

    /// Records `website -> blob_ref`. This is the durability point of an add.
    async fn add(&self, website: &str, blob_ref: &str) -> Result<(), LedgerError>;

    /// Removes the entry for `website`.
    async fn remove(&self, website: &str) -> Result<(), LedgerError>;

    /// Fetches the entry for `website`.
    async fn get(&self, website: &str) -> Result<LedgerEntry, LedgerError>;

    /// Lists every entry visible to this identity, in ledger order.
    async fn list(&self) -> Result<Vec<LedgerEntry>, LedgerError>;
}
