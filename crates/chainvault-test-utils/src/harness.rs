// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for vault integration testing.
//!
//! `TestHarness` wires a [`MockLedger`] and a [`MockBlobStore`] into a
//! [`VaultSession`] with a cheap KDF. Tests keep handles to both mocks to
//! inject faults and inspect what the session wrote.

use std::sync::Arc;

use chainvault_core::{CredentialRecord, Identity, VaultError, WalletAdapter};
use chainvault_vault::{KdfParams, KeyBinding, VaultSession};

use crate::mock_blob_store::MockBlobStore;
use crate::mock_ledger::MockLedger;

/// Default identity for harness sessions.
pub const TEST_IDENTITY: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";

/// Iteration count low enough for tests, high enough to exercise PBKDF2.
pub const TEST_KDF_ITERATIONS: u32 = 1_000;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    identity: String,
    ledger: Option<Arc<MockLedger>>,
    blobs: Option<Arc<MockBlobStore>>,
    wallet: Option<Arc<dyn WalletAdapter>>,
    key_binding: KeyBinding,
    initialize: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            identity: TEST_IDENTITY.to_string(),
            ledger: None,
            blobs: None,
            wallet: None,
            key_binding: KeyBinding::Address,
            initialize: true,
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    /// Share an existing ledger, e.g. to open a second session on it.
    pub fn with_ledger(mut self, ledger: Arc<MockLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn with_blob_store(mut self, blobs: Arc<MockBlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    /// Derive the key from a wallet signature instead of the address.
    pub fn with_wallet_signature(mut self, wallet: Arc<dyn WalletAdapter>) -> Self {
        self.wallet = Some(wallet);
        self.key_binding = KeyBinding::WalletSignature;
        self
    }

    /// Leave the session `Uninitialized`.
    pub fn uninitialized(mut self) -> Self {
        self.initialize = false;
        self
    }

    /// Build the harness, initializing the session unless told otherwise.
    pub async fn build(self) -> Result<TestHarness, VaultError> {
        let ledger = self.ledger.unwrap_or_default();
        let blobs = self.blobs.unwrap_or_default();

        let mut builder = VaultSession::builder(
            Identity::new(self.identity)?,
            ledger.clone(),
            blobs.clone(),
        )
        .kdf(KdfParams::Pbkdf2Sha256 {
            iterations: TEST_KDF_ITERATIONS,
        })
        .key_binding(self.key_binding);
        if let Some(wallet) = self.wallet {
            builder = builder.wallet(wallet);
        }
        let session = builder.build()?;

        if self.initialize {
            session.initialize().await?;
        }

        Ok(TestHarness {
            session,
            ledger,
            blobs,
        })
    }
}

/// A vault session over in-memory collaborators.
pub struct TestHarness {
    /// The session under test.
    pub session: VaultSession,
    /// The ledger the session writes to.
    pub ledger: Arc<MockLedger>,
    /// The blob store the session uploads to.
    pub blobs: Arc<MockBlobStore>,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A ready session with fresh mocks.
    pub async fn ready() -> Result<Self, VaultError> {
        Self::builder().build().await
    }

    /// Add a credential built from plain strings.
    pub async fn add(&self, website: &str, username: &str, password: &str) -> Result<(), VaultError> {
        let record = CredentialRecord::new(website, username, password)?;
        self.session.add_credential(&record).await
    }
}
