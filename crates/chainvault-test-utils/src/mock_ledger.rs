// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock ledger adapter for deterministic testing.
//!
//! `MockLedger` keeps entries in insertion order and lets tests make
//! verification, reads, or writes fail on demand.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use chainvault_core::{
    AdapterType, HealthStatus, LedgerAdapter, LedgerEntry, LedgerError, LedgerInfo, PluginAdapter,
};

/// Starting value of the mock clock, in Unix seconds.
pub const MOCK_EPOCH: u64 = 1_700_000_000;

/// An in-memory ledger for one owner.
///
/// Each successful `add` stamps the entry with the mock clock and then
/// advances it by one second, so timestamps are unique and predictable.
pub struct MockLedger {
    info: LedgerInfo,
    entries: Mutex<Vec<LedgerEntry>>,
    deployed: AtomicBool,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    clock: AtomicU64,
}

impl MockLedger {
    /// A deployed ledger on chain 31337.
    pub fn new() -> Self {
        Self {
            info: LedgerInfo {
                chain_id: 31337,
                address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            },
            entries: Mutex::new(Vec::new()),
            deployed: AtomicBool::new(true),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            clock: AtomicU64::new(MOCK_EPOCH),
        }
    }

    /// A ledger whose `verify` fails as if nothing were deployed.
    pub fn undeployed() -> Self {
        let ledger = Self::new();
        ledger.deployed.store(false, Ordering::SeqCst);
        ledger
    }

    /// Make `list` and `get` fail with `Unavailable`.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make `add` and `remove` fail with `Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Append an entry directly, bypassing duplicate checks and failures.
    /// Used to plant corrupt or dangling blob references.
    pub async fn insert_raw(&self, website: &str, blob_ref: &str) {
        let timestamp = self.tick();
        self.entries.lock().await.push(LedgerEntry {
            website: website.to_string(),
            blob_ref: blob_ref.to_string(),
            timestamp,
        });
    }

    /// Snapshot of all entries in ledger order.
    pub async fn entries(&self) -> Vec<LedgerEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::SeqCst)
    }

    fn check_writes(&self) -> Result<(), LedgerError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::unavailable("mock ledger: transaction rejected"));
        }
        Ok(())
    }

    fn check_reads(&self) -> Result<(), LedgerError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(LedgerError::unavailable("mock ledger: node unreachable"));
        }
        Ok(())
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockLedger {
    fn name(&self) -> &str {
        "mock-ledger"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Ledger
    }

    async fn health_check(&self) -> HealthStatus {
        if self.deployed.load(Ordering::SeqCst) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy("no ledger deployed".to_string())
        }
    }
}

#[async_trait]
impl LedgerAdapter for MockLedger {
    async fn verify(&self) -> Result<LedgerInfo, LedgerError> {
        if !self.deployed.load(Ordering::SeqCst) {
            return Err(LedgerError::unavailable(format!(
                "no ledger deployed at {} on chain {}",
                self.info.address, self.info.chain_id
            )));
        }
        Ok(self.info.clone())
    }

    async fn add(&self, website: &str, blob_ref: &str) -> Result<(), LedgerError> {
        self.check_writes()?;
        let mut entries = self.entries.lock().await;
        if entries.iter().any(|e| e.website == website) {
            return Err(LedgerError::AlreadyExists {
                website: website.to_string(),
            });
        }
        entries.push(LedgerEntry {
            website: website.to_string(),
            blob_ref: blob_ref.to_string(),
            timestamp: self.tick(),
        });
        Ok(())
    }

    async fn remove(&self, website: &str) -> Result<(), LedgerError> {
        self.check_writes()?;
        let mut entries = self.entries.lock().await;
        let Some(pos) = entries.iter().position(|e| e.website == website) else {
            return Err(LedgerError::NotFound {
                website: website.to_string(),
            });
        };
        entries.remove(pos);
        Ok(())
    }

    async fn get(&self, website: &str) -> Result<LedgerEntry, LedgerError> {
        self.check_reads()?;
        self.entries
            .lock()
            .await
            .iter()
            .find(|e| e.website == website)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                website: website.to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        self.check_reads()?;
        Ok(self.entries.lock().await.clone())
    }
}
