// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-addressed blob store on SQLite.
//!
//! A blob's reference is `sha256:<hex digest>` of its bytes, so identical
//! content maps to one row and concurrent puts never conflict.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::debug;

use chainvault_core::{
    AdapterType, BlobRef, BlobStoreAdapter, BlobStoreError, HealthStatus, PluginAdapter,
};

use crate::database::Database;

const REF_PREFIX: &str = "sha256:";

fn unavailable(e: tokio_rusqlite::Error<rusqlite::Error>) -> BlobStoreError {
    BlobStoreError::Unavailable {
        message: format!("blob database error: {e}"),
        source: Some(Box::new(e)),
    }
}

/// Reference for `bytes` under this store's addressing scheme.
pub fn content_ref(bytes: &[u8]) -> String {
    format!("{REF_PREFIX}{}", hex::encode(Sha256::digest(bytes)))
}

pub struct SqliteBlobStore {
    db: Database,
}

impl SqliteBlobStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PluginAdapter for SqliteBlobStore {
    fn name(&self) -> &str {
        "sqlite-blobs"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::BlobStore
    }

    async fn health_check(&self) -> HealthStatus {
        match self.db.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

#[async_trait]
impl BlobStoreAdapter for SqliteBlobStore {
    async fn put(&self, bytes: &[u8]) -> Result<BlobRef, BlobStoreError> {
        let reference = content_ref(bytes);
        let blob_ref = BlobRef::parse(&reference)
            .map_err(|e| BlobStoreError::unavailable(format!("bad content reference: {e}")))?;

        let content = bytes.to_vec();
        let now = chrono::Utc::now().timestamp();
        let inserted = self
            .db
            .connection()
            .call(move |conn| {
                conn.execute(
                    "INSERT OR IGNORE INTO blobs (reference, content, stored_at) VALUES (?1, ?2, ?3)",
                    params![reference, content, now],
                )
            })
            .await
            .map_err(unavailable)?;

        debug!(reference = %blob_ref, size = bytes.len(), new = inserted > 0, "blob stored");
        Ok(blob_ref)
    }

    async fn get(&self, reference: &BlobRef) -> Result<Vec<u8>, BlobStoreError> {
        let key = reference.as_str().to_string();
        let content = self
            .db
            .connection()
            .call(move |conn| {
                conn.query_row(
                    "SELECT content FROM blobs WHERE reference = ?1",
                    params![key],
                    |row| row.get::<_, Vec<u8>>(0),
                )
                .optional()
            })
            .await
            .map_err(unavailable)?;

        content.ok_or_else(|| BlobStoreError::NotFound {
            reference: reference.to_string(),
        })
    }
}
