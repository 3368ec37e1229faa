// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock blob store adapter for deterministic testing.
//!
//! References are `sha256:<hex>` of the stored bytes, the same scheme the
//! SQLite store uses, so identical uploads share one reference.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use chainvault_core::{
    AdapterType, BlobRef, BlobStoreAdapter, BlobStoreError, HealthStatus, PluginAdapter,
};

/// An in-memory content-addressed blob store.
pub struct MockBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    puts: AtomicUsize,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: Mutex::new(HashMap::new()),
            fail_puts: AtomicBool::new(false),
            fail_gets: AtomicBool::new(false),
            puts: AtomicUsize::new(0),
        }
    }

    /// Make `put` fail with `Unavailable`.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Make `get` fail with `Unavailable`.
    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `put` calls, including repeats of the same bytes.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// Number of distinct blobs held.
    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.lock().await.is_empty()
    }

    pub async fn contains(&self, reference: &str) -> bool {
        self.blobs.lock().await.contains_key(reference)
    }

    /// Overwrite the stored bytes for `reference` in place. Returns false
    /// if there is no such blob.
    pub async fn replace(&self, reference: &str, bytes: Vec<u8>) -> bool {
        match self.blobs.lock().await.get_mut(reference) {
            Some(slot) => {
                *slot = bytes;
                true
            }
            None => false,
        }
    }

    /// Drop a blob, leaving any ledger entry that points at it dangling.
    pub async fn delete(&self, reference: &str) -> bool {
        self.blobs.lock().await.remove(reference).is_some()
    }

    fn content_ref(bytes: &[u8]) -> String {
        format!("sha256:{}", hex::encode(Sha256::digest(bytes)))
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockBlobStore {
    fn name(&self) -> &str {
        "mock-blob-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::BlobStore
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

#[async_trait]
impl BlobStoreAdapter for MockBlobStore {
    async fn put(&self, bytes: &[u8]) -> Result<BlobRef, BlobStoreError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(BlobStoreError::unavailable("mock blob store: upload refused"));
        }
        let reference = Self::content_ref(bytes);
        self.blobs
            .lock()
            .await
            .entry(reference.clone())
            .or_insert_with(|| bytes.to_vec());
        self.puts.fetch_add(1, Ordering::SeqCst);
        BlobRef::parse(&reference)
            .map_err(|e| BlobStoreError::unavailable(format!("mock blob store: {e}")))
    }

    async fn get(&self, reference: &BlobRef) -> Result<Vec<u8>, BlobStoreError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(BlobStoreError::unavailable("mock blob store: gateway timeout"));
        }
        self.blobs
            .lock()
            .await
            .get(reference.as_str())
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound {
                reference: reference.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_bytes_share_a_reference() {
        let store = MockBlobStore::new();
        let a = store.put(b"payload").await.unwrap();
        let b = store.put(b"payload").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.put_count(), 2);
        assert!(a.as_str().starts_with("sha256:"));
    }

    #[tokio::test]
    async fn delete_makes_get_not_found() {
        let store = MockBlobStore::new();
        let r = store.put(b"x").await.unwrap();
        assert!(store.delete(r.as_str()).await);
        assert!(matches!(
            store.get(&r).await,
            Err(BlobStoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn failing_puts_do_not_count() {
        let store = MockBlobStore::new();
        store.fail_puts(true);
        assert!(store.put(b"x").await.is_err());
        assert_eq!(store.put_count(), 0);
        assert!(store.is_empty().await);
    }
}
