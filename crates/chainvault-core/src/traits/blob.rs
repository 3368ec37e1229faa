// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-addressed blob store collaborator.

use async_trait::async_trait;

use crate::error::BlobStoreError;
use crate::traits::adapter::PluginAdapter;
use crate::types::BlobRef;

/// Append-only, content-addressed byte storage.
///
/// Identical bytes yield the same reference and distinct bytes yield
/// distinct references, so concurrent puts commute. Nothing is ever deleted.
#[async_trait]
pub trait BlobStoreAdapter: PluginAdapter {
    /// Stores `bytes` and returns their reference.
    async fn put(&self, bytes: &[u8]) -> Result<BlobRef, BlobStoreError>;

    /// Fetches the bytes stored under `reference`.
    async fn get(&self, reference: &BlobRef) -> Result<Vec<u8>, BlobStoreError>;
}
