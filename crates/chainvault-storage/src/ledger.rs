// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the LedgerAdapter trait.
//!
//! Entries are scoped to one deployment `(chain_id, address)` and one owner.
//! `(owner, website)` is unique per deployment; listing follows insertion order.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use chainvault_core::{
    AdapterType, HealthStatus, Identity, LedgerAdapter, LedgerEntry, LedgerError, LedgerInfo,
    PluginAdapter,
};

use crate::database::Database;

fn unavailable(e: tokio_rusqlite::Error<rusqlite::Error>) -> LedgerError {
    LedgerError::Unavailable {
        message: format!("ledger database error: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Maps `SELECT website, blob_ref, created_at`. A negative `created_at` is
/// corrupt data and fails the read.
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<LedgerEntry> {
    let created_at: i64 = row.get(2)?;
    let timestamp = u64::try_from(created_at)
        .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(2, created_at))?;
    Ok(LedgerEntry {
        website: row.get(0)?,
        blob_ref: row.get(1)?,
        timestamp,
    })
}

/// Local SQLite-backed ledger for one owner on one deployment.
pub struct SqliteLedger {
    db: Database,
    owner: String,
    chain_id: u64,
    address: String,
}

impl SqliteLedger {
    pub fn new(db: Database, owner: &Identity, chain_id: u64, address: impl Into<String>) -> Self {
        Self {
            db,
            owner: owner.as_str().to_string(),
            chain_id,
            address: address.into(),
        }
    }

    /// Register this ledger's deployment so that [`LedgerAdapter::verify`]
    /// succeeds. Deploying twice is a no-op.
    pub async fn deploy(&self) -> Result<LedgerInfo, LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let address = self.address.clone();
        let now = chrono::Utc::now().timestamp();
        let inserted = self
            .db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO ledger_deployments (chain_id, address, deployed_at)
                     VALUES (?1, ?2, ?3)",
                    params![chain_id, address, now],
                )
            })
            .await
            .map_err(unavailable)?;
        debug!(chain_id = self.chain_id, address = %self.address, new = inserted > 0, "ledger deployed");
        Ok(LedgerInfo {
            chain_id: self.chain_id,
            address: self.address.clone(),
        })
    }
}

/// SQLite integers are signed; chain ids above `i64::MAX` cannot be stored.
fn chain_id_to_sql(chain_id: u64) -> Result<i64, LedgerError> {
    i64::try_from(chain_id)
        .map_err(|_| LedgerError::unavailable(format!("chain id {chain_id} is out of range")))
}

#[async_trait]
impl PluginAdapter for SqliteLedger {
    fn name(&self) -> &str {
        "sqlite-ledger"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Ledger
    }

    async fn health_check(&self) -> HealthStatus {
        match self.db.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

#[async_trait]
impl LedgerAdapter for SqliteLedger {
    async fn verify(&self) -> Result<LedgerInfo, LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let address = self.address.clone();
        let found = self
            .db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT 1 FROM ledger_deployments WHERE chain_id = ?1 AND address = ?2",
                    params![chain_id, address],
                    |_| Ok(()),
                )
                .optional()
            })
            .await
            .map_err(unavailable)?;

        match found {
            Some(()) => Ok(LedgerInfo {
                chain_id: self.chain_id,
                address: self.address.clone(),
            }),
            None => Err(LedgerError::unavailable(format!(
                "no ledger deployed at {} on chain {}",
                self.address, self.chain_id
            ))),
        }
    }

    async fn add(&self, website: &str, blob_ref: &str) -> Result<(), LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let (address, owner) = (self.address.clone(), self.owner.clone());
        let (site, reference) = (website.to_string(), blob_ref.to_string());
        let now = chrono::Utc::now().timestamp();

        let inserted = self
            .db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO ledger_entries
                     (chain_id, address, owner, website, blob_ref, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![chain_id, address, owner, site, reference, now],
                )
            })
            .await
            .map_err(unavailable)?;

        if inserted == 0 {
            return Err(LedgerError::AlreadyExists {
                website: website.to_string(),
            });
        }
        Ok(())
    }

    async fn remove(&self, website: &str) -> Result<(), LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let (address, owner, site) = (
            self.address.clone(),
            self.owner.clone(),
            website.to_string(),
        );
        let deleted = self
            .db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "DELETE FROM ledger_entries
                     WHERE chain_id = ?1 AND address = ?2 AND owner = ?3 AND website = ?4",
                    params![chain_id, address, owner, site],
                )
            })
            .await
            .map_err(unavailable)?;

        if deleted == 0 {
            return Err(LedgerError::NotFound {
                website: website.to_string(),
            });
        }
        Ok(())
    }

    async fn get(&self, website: &str) -> Result<LedgerEntry, LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let (address, owner, site) = (
            self.address.clone(),
            self.owner.clone(),
            website.to_string(),
        );
        let entry = self
            .db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT website, blob_ref, created_at FROM ledger_entries
                     WHERE chain_id = ?1 AND address = ?2 AND owner = ?3 AND website = ?4",
                    params![chain_id, address, owner, site],
                    row_to_entry,
                )
                .optional()
            })
            .await
            .map_err(unavailable)?;

        entry.ok_or_else(|| LedgerError::NotFound {
            website: website.to_string(),
        })
    }

    async fn list(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        let chain_id = chain_id_to_sql(self.chain_id)?;
        let (address, owner) = (self.address.clone(), self.owner.clone());
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT website, blob_ref, created_at FROM ledger_entries
                     WHERE chain_id = ?1 AND address = ?2 AND owner = ?3
                     ORDER BY id ASC",
                )?;
                let rows = stmt.query_map(params![chain_id, address, owner], row_to_entry)?;
                rows.collect::<Result<Vec<_>, _>>()
            })
            .await
            .map_err(unavailable)
    }
}
