// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault session lifecycle and credential operations.
//!
//! A [`VaultSession`] is built once per connected identity and owns the
//! derived key and the collaborator handles:
//! - `initialize()` verifies the ledger, derives the key, and moves the
//!   session `Uninitialized -> LedgerVerified -> Ready`.
//! - A failed transition is terminal (`Failed`); later `initialize()` calls
//!   replay the original failure instead of retrying.
//! - Writes go blob store first, ledger second. The ledger write is the
//!   durability point; a blob orphaned by a failed ledger write is left in place.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use chainvault_core::{
    AccountEvent, BlobRef, BlobStoreAdapter, BlobStoreError, CodecError, Credential,
    CredentialRecord, Identity, LedgerAdapter, LedgerEntry, LedgerError, VaultError,
    WalletAdapter,
};
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::codec;
use crate::crypto::CipherBox;
use crate::kdf::{self, KdfParams, KeyBinding};
use crate::record;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    Uninitialized,
    LedgerVerified,
    Ready,
    Failed,
}

/// The failure that moved a session to `Failed`, kept so it can be replayed.
#[derive(Debug, Clone)]
enum InitFailure {
    LedgerUnavailable(String),
    KeyDerivation(String),
}

impl InitFailure {
    fn to_error(&self) -> VaultError {
        match self {
            InitFailure::LedgerUnavailable(msg) => VaultError::LedgerUnavailable(msg.clone()),
            InitFailure::KeyDerivation(msg) => VaultError::KeyDerivation(msg.clone()),
        }
    }
}

#[derive(Debug)]
struct Lifecycle {
    state: SessionState,
    failure: Option<InitFailure>,
}

/// One ledger entry that could not be turned into a [`Credential`].
#[derive(Debug, Error)]
#[error("credential for `{website}` is unreadable: {error}")]
pub struct EntryFailure {
    pub website: String,
    #[source]
    pub error: VaultError,
}

/// Result of listing credentials: one slot per ledger entry, in ledger order.
#[derive(Debug, Default)]
pub struct ListReport {
    entries: Vec<Result<Credential, EntryFailure>>,
}

impl ListReport {
    pub fn entries(&self) -> &[Result<Credential, EntryFailure>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Result<Credential, EntryFailure>> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn credentials(&self) -> impl Iterator<Item = &Credential> {
        self.entries.iter().filter_map(|e| e.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryFailure> {
        self.entries.iter().filter_map(|e| e.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.credentials().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Builder for [`VaultSession`].
pub struct VaultSessionBuilder {
    identity: Identity,
    ledger: Arc<dyn LedgerAdapter>,
    blobs: Arc<dyn BlobStoreAdapter>,
    wallet: Option<Arc<dyn WalletAdapter>>,
    kdf: KdfParams,
    key_binding: KeyBinding,
}

impl VaultSessionBuilder {
    pub fn kdf(mut self, params: KdfParams) -> Self {
        self.kdf = params;
        self
    }

    pub fn key_binding(mut self, binding: KeyBinding) -> Self {
        self.key_binding = binding;
        self
    }

    pub fn wallet(mut self, wallet: Arc<dyn WalletAdapter>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn build(self) -> Result<VaultSession, VaultError> {
        if self.key_binding == KeyBinding::WalletSignature && self.wallet.is_none() {
            return Err(VaultError::Config(
                "wallet-signature key binding requires a wallet".to_string(),
            ));
        }
        Ok(VaultSession {
            identity: self.identity,
            ledger: self.ledger,
            blobs: self.blobs,
            wallet: self.wallet,
            kdf: self.kdf,
            key_binding: self.key_binding,
            lifecycle: Mutex::new(Lifecycle {
                state: SessionState::Uninitialized,
                failure: None,
            }),
            cipher: OnceLock::new(),
        })
    }
}

/// An encrypted credential vault bound to one identity.
pub struct VaultSession {
    identity: Identity,
    ledger: Arc<dyn LedgerAdapter>,
    blobs: Arc<dyn BlobStoreAdapter>,
    wallet: Option<Arc<dyn WalletAdapter>>,
    kdf: KdfParams,
    key_binding: KeyBinding,
    lifecycle: Mutex<Lifecycle>,
    cipher: OnceLock<CipherBox>,
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("identity", &self.identity)
            .field("state", &self.state())
            .field("kdf", &self.kdf)
            .field("key_binding", &self.key_binding)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl VaultSession {
    pub fn builder(
        identity: Identity,
        ledger: Arc<dyn LedgerAdapter>,
        blobs: Arc<dyn BlobStoreAdapter>,
    ) -> VaultSessionBuilder {
        VaultSessionBuilder {
            identity,
            ledger,
            blobs,
            wallet: None,
            kdf: KdfParams::default(),
            key_binding: KeyBinding::default(),
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn state(&self) -> SessionState {
        self.lifecycle().state
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Verify the ledger and derive the session key.
    ///
    /// Idempotent once `Ready`. After a failure the session stays `Failed`
    /// and every call returns the same error kind.
    pub async fn initialize(&self) -> Result<(), VaultError> {
        {
            let lifecycle = self.lifecycle();
            match lifecycle.state {
                SessionState::Ready => return Ok(()),
                SessionState::Failed => {
                    return Err(lifecycle
                        .failure
                        .as_ref()
                        .map(InitFailure::to_error)
                        .unwrap_or(VaultError::NotInitialized));
                }
                SessionState::Uninitialized | SessionState::LedgerVerified => {}
            }
        }

        let info = match self.ledger.verify().await {
            Ok(info) => info,
            Err(e) => return Err(self.fail(InitFailure::LedgerUnavailable(e.to_string()))),
        };
        self.advance(SessionState::LedgerVerified);
        debug!(
            chain_id = info.chain_id,
            address = %info.address,
            "ledger verified"
        );

        let secret = match self.key_material().await {
            Ok(secret) => secret,
            Err(msg) => return Err(self.fail(InitFailure::KeyDerivation(msg))),
        };
        let cipher = match kdf::derive_key_blocking(secret, self.kdf.clone())
            .await
            .and_then(|key| CipherBox::new(&key))
        {
            Ok(cipher) => cipher,
            Err(e) => return Err(self.fail(InitFailure::KeyDerivation(e.to_string()))),
        };
        // A concurrent initialize may have won the race; its key is identical.
        let _ = self.cipher.set(cipher);
        self.advance(SessionState::Ready);

        info!(identity = %self.identity, "vault session ready");
        Ok(())
    }

    /// Encrypt `record` and register it on the ledger under its website.
    pub async fn add_credential(&self, record: &CredentialRecord) -> Result<(), VaultError> {
        let cipher = self.cipher()?;

        let plaintext = record::serialize(record)?;
        let payload = cipher.encrypt(&plaintext)?;
        let frame = codec::encode(&payload);

        let blob_ref = self
            .blobs
            .put(frame.as_bytes())
            .await
            .map_err(map_blob_err)?;
        debug!(website = %record.website, blob_ref = %blob_ref, "payload stored");

        match self.ledger.add(&record.website, blob_ref.as_str()).await {
            Ok(()) => {
                info!(website = %record.website, "credential added");
                Ok(())
            }
            Err(LedgerError::AlreadyExists { website }) => {
                debug!(website = %website, blob_ref = %blob_ref, "duplicate website, blob orphaned");
                Err(VaultError::DuplicateWebsite { website })
            }
            Err(e) => {
                warn!(website = %record.website, blob_ref = %blob_ref, error = %e, "ledger write failed, blob orphaned");
                Err(map_ledger_write_err(e))
            }
        }
    }

    /// Remove the ledger entry for `website`. The blob is kept.
    pub async fn remove_credential(&self, website: &str) -> Result<(), VaultError> {
        self.cipher()?;
        self.ledger
            .remove(website)
            .await
            .map_err(map_ledger_write_err)?;
        info!(website = %website, "credential removed");
        Ok(())
    }

    /// Resolve every ledger entry. Per-entry failures are reported in their
    /// slot; only a failure to read the ledger itself fails the call.
    pub async fn list_credentials(&self) -> Result<ListReport, VaultError> {
        let cipher = self.cipher()?;
        let entries = self.ledger.list().await.map_err(map_ledger_read_err)?;

        let resolved = join_all(entries.iter().map(|entry| self.resolve(cipher, entry))).await;

        let entries = entries
            .into_iter()
            .zip(resolved)
            .map(|(entry, result)| {
                result.map_err(|error| {
                    warn!(website = %entry.website, kind = %error.kind(), "unreadable ledger entry");
                    EntryFailure {
                        website: entry.website,
                        error,
                    }
                })
            })
            .collect::<Vec<_>>();

        let report = ListReport { entries };
        debug!(
            ok = report.success_count(),
            failed = report.failure_count(),
            "credentials listed"
        );
        Ok(report)
    }

    /// Fetch and decrypt the credential stored for `website`.
    pub async fn get_credential(&self, website: &str) -> Result<Credential, VaultError> {
        let cipher = self.cipher()?;
        let entry = self
            .ledger
            .get(website)
            .await
            .map_err(map_ledger_read_err)?;
        self.resolve(cipher, &entry).await
    }

    /// Whether `event` means this session no longer matches the wallet and
    /// should be dropped.
    pub fn invalidated_by(&self, event: &AccountEvent) -> bool {
        match event {
            AccountEvent::AccountsChanged(accounts) => accounts
                .first()
                .is_none_or(|active| !active.eq_ignore_ascii_case(self.identity.as_str())),
            AccountEvent::NetworkChanged(_) | AccountEvent::Disconnected => true,
        }
    }

    async fn resolve(
        &self,
        cipher: &CipherBox,
        entry: &LedgerEntry,
    ) -> Result<Credential, VaultError> {
        let blob_ref = BlobRef::parse(&entry.blob_ref)?;
        let bytes = self.blobs.get(&blob_ref).await.map_err(map_blob_err)?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| CodecError::malformed("blob is not a UTF-8 text frame"))?;
        let payload = codec::decode(text)?;
        let plaintext = cipher.decrypt(&payload)?;
        let (username, password) = record::deserialize(&plaintext)?;
        Credential::from_entry(entry, username, password)
    }

    async fn key_material(&self) -> Result<Zeroizing<Vec<u8>>, String> {
        match self.key_binding {
            KeyBinding::Address => Ok(Zeroizing::new(self.identity.as_bytes().to_vec())),
            KeyBinding::WalletSignature => {
                let wallet = self
                    .wallet
                    .as_ref()
                    .ok_or_else(|| "wallet-signature key binding requires a wallet".to_string())?;
                let challenge = kdf::binding_challenge(&self.identity);
                wallet
                    .sign_message(&challenge)
                    .await
                    .map(Zeroizing::new)
                    .map_err(|e| format!("wallet could not sign key binding challenge: {e}"))
            }
        }
    }

    fn cipher(&self) -> Result<&CipherBox, VaultError> {
        if !self.is_ready() {
            return Err(VaultError::NotInitialized);
        }
        self.cipher.get().ok_or(VaultError::NotInitialized)
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn advance(&self, next: SessionState) {
        let mut lifecycle = self.lifecycle();
        if matches!(lifecycle.state, SessionState::Ready | SessionState::Failed) {
            return;
        }
        debug!(from = %lifecycle.state, to = %next, "session transition");
        lifecycle.state = next;
    }

    fn fail(&self, failure: InitFailure) -> VaultError {
        let err = failure.to_error();
        let mut lifecycle = self.lifecycle();
        if lifecycle.state != SessionState::Ready {
            warn!(identity = %self.identity, error = %err, "vault session failed");
            lifecycle.state = SessionState::Failed;
            lifecycle.failure = Some(failure);
        }
        err
    }
}

fn map_blob_err(e: BlobStoreError) -> VaultError {
    match e {
        BlobStoreError::NotFound { reference } => VaultError::BlobNotFound { reference },
        BlobStoreError::Unavailable { message, source } => {
            VaultError::BlobStoreUnavailable { message, source }
        }
    }
}

fn map_ledger_write_err(e: LedgerError) -> VaultError {
    match e {
        LedgerError::AlreadyExists { website } => VaultError::DuplicateWebsite { website },
        LedgerError::NotFound { website } => VaultError::NotFound { website },
        LedgerError::Unavailable { message, source } => {
            VaultError::LedgerWriteFailed { message, source }
        }
    }
}

fn map_ledger_read_err(e: LedgerError) -> VaultError {
    match e {
        LedgerError::NotFound { website } => VaultError::NotFound { website },
        LedgerError::AlreadyExists { website } => {
            VaultError::Internal(format!("ledger reported a conflict for `{website}` on read"))
        }
        LedgerError::Unavailable { message, .. } => VaultError::LedgerUnavailable(message),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use chainvault_core::{
        AdapterType, DecryptionError, ErrorKind, HealthStatus, LedgerInfo, PluginAdapter,
    };
    use secrecy::ExposeSecret;

    use super::*;

    /// Minimal in-memory collaborators; the full fault-injecting mocks live in
    /// `chainvault-test-utils`.
    #[derive(Default)]
    struct MemLedger {
        entries: Mutex<Vec<LedgerEntry>>,
        deployed: bool,
    }

    #[async_trait]
    impl PluginAdapter for MemLedger {
        fn name(&self) -> &str {
            "mem-ledger"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::Ledger
        }
        async fn health_check(&self) -> HealthStatus {
            HealthStatus::Healthy
        }
    }

    #[async_trait]
    impl LedgerAdapter for MemLedger {
        async fn verify(&self) -> Result<LedgerInfo, LedgerError> {
            if self.deployed {
                Ok(LedgerInfo {
                    chain_id: 31337,
                    address: "0xledger".into(),
                })
            } else {
                Err(LedgerError::unavailable("no ledger at 0xledger"))
            }
        }
        async fn add(&self, website: &str, blob_ref: &str) -> Result<(), LedgerError> {
            let mut entries = self.entries.lock().unwrap();
            if entries.iter().any(|e| e.website == website) {
                return Err(LedgerError::AlreadyExists {
                    website: website.into(),
                });
            }
            let n = entries.len() as u64;
            entries.push(LedgerEntry {
                website: website.into(),
                blob_ref: blob_ref.into(),
                timestamp: 1_700_000_000 + n,
            });
            Ok(())
        }
        async fn remove(&self, website: &str) -> Result<(), LedgerError> {
            let mut entries = self.entries.lock().unwrap();
            let before = entries.len();
            entries.retain(|e| e.website != website);
            if entries.len() == before {
                return Err(LedgerError::NotFound {
                    website: website.into(),
                });
            }
            Ok(())
        }
        async fn get(&self, website: &str) -> Result<LedgerEntry, LedgerError> {
            self.entries
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.website == website)
                .cloned()
                .ok_or_else(|| LedgerError::NotFound {
                    website: website.into(),
                })
        }
        async fn list(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
            Ok(self.entries.lock().unwrap().clone())
        }
    }

    #[derive(Default)]
    struct MemBlobs {
        blobs: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl PluginAdapter for MemBlobs {
        fn name(&self) -> &str {
            "mem-blobs"
        }
        fn version(&self) -> semver::Version {
            semver::Version::new(0, 0, 0)
        }
        fn adapter_type(&self) -> AdapterType {
            AdapterType::BlobStore
        }
        async fn health_check(&self) -> HealthStatus {
            HealthStatus::Healthy
        }
    }

    #[async_trait]
    impl BlobStoreAdapter for MemBlobs {
        async fn put(&self, bytes: &[u8]) -> Result<BlobRef, BlobStoreError> {
            let mut blobs = self.blobs.lock().unwrap();
            let reference = format!("mem:{}", blobs.len());
            blobs.insert(reference.clone(), bytes.to_vec());
            Ok(BlobRef::parse(&reference).unwrap())
        }
        async fn get(&self, reference: &BlobRef) -> Result<Vec<u8>, BlobStoreError> {
            self.blobs
                .lock()
                .unwrap()
                .get(reference.as_str())
                .cloned()
                .ok_or_else(|| BlobStoreError::NotFound {
                    reference: reference.to_string(),
                })
        }
    }

    fn fast_kdf() -> KdfParams {
        KdfParams::Pbkdf2Sha256 { iterations: 1000 }
    }

    fn session_with(ledger: Arc<MemLedger>, blobs: Arc<MemBlobs>, identity: &str) -> VaultSession {
        VaultSession::builder(Identity::new(identity).unwrap(), ledger, blobs)
            .kdf(fast_kdf())
            .build()
            .unwrap()
    }

    fn deployed() -> Arc<MemLedger> {
        Arc::new(MemLedger {
            deployed: true,
            ..MemLedger::default()
        })
    }

    #[tokio::test]
    async fn lifecycle_reaches_ready() {
        let session = session_with(deployed(), Arc::default(), "0xabc");
        assert_eq!(session.state(), SessionState::Uninitialized);
        assert!(!session.is_ready());
        session.initialize().await.unwrap();
        assert!(session.is_ready());
        session.initialize().await.unwrap();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let session = session_with(deployed(), Arc::default(), "0xabc");
        let record = CredentialRecord::new("a.com", "u", "p").unwrap();
        assert!(matches!(
            session.add_credential(&record).await,
            Err(VaultError::NotInitialized)
        ));
        assert!(matches!(
            session.get_credential("a.com").await,
            Err(VaultError::NotInitialized)
        ));
        assert!(matches!(
            session.list_credentials().await,
            Err(VaultError::NotInitialized)
        ));
        assert!(matches!(
            session.remove_credential("a.com").await,
            Err(VaultError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn missing_ledger_is_terminal() {
        let session = session_with(Arc::default(), Arc::default(), "0xabc");
        let err = session.initialize().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerUnavailable);
        assert_eq!(session.state(), SessionState::Failed);

        let again = session.initialize().await.unwrap_err();
        assert_eq!(again.kind(), ErrorKind::LedgerUnavailable);
        assert!(matches!(
            session.list_credentials().await,
            Err(VaultError::NotInitialized)
        ));
    }

    #[tokio::test]
    async fn bad_kdf_params_are_terminal() {
        let session = VaultSession::builder(
            Identity::new("0xabc").unwrap(),
            deployed(),
            Arc::new(MemBlobs::default()),
        )
        .kdf(KdfParams::Pbkdf2Sha256 { iterations: 0 })
        .build()
        .unwrap();
        let err = session.initialize().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyDerivation);
        assert_eq!(session.state(), SessionState::Failed);
        assert_eq!(
            session.initialize().await.unwrap_err().kind(),
            ErrorKind::KeyDerivation
        );
    }

    #[test]
    fn wallet_binding_requires_wallet() {
        let err = VaultSession::builder(
            Identity::new("0xabc").unwrap(),
            deployed(),
            Arc::new(MemBlobs::default()),
        )
        .key_binding(KeyBinding::WalletSignature)
        .build()
        .unwrap_err();
        assert!(matches!(err, VaultError::Config(_)));
    }

    #[tokio::test]
    async fn add_then_get_roundtrips() {
        let ledger = deployed();
        let session = session_with(ledger.clone(), Arc::default(), "0xabc");
        session.initialize().await.unwrap();

        let record = CredentialRecord::new("a.com", "u", "p").unwrap();
        session.add_credential(&record).await.unwrap();

        let credential = session.get_credential("a.com").await.unwrap();
        assert_eq!(credential.record(), record);
        assert_eq!(credential.id, "a.com");
        let entry = ledger.get("a.com").await.unwrap();
        assert_eq!(credential.created_at.timestamp() as u64, entry.timestamp);
    }

    #[tokio::test]
    async fn foreign_identity_cannot_decrypt() {
        let ledger = deployed();
        let blobs = Arc::new(MemBlobs::default());
        let owner = session_with(ledger.clone(), blobs.clone(), "0xabc");
        owner.initialize().await.unwrap();
        owner
            .add_credential(&CredentialRecord::new("a.com", "u", "p").unwrap())
            .await
            .unwrap();

        let stranger = session_with(ledger, blobs, "0xdef");
        stranger.initialize().await.unwrap();
        let err = stranger.get_credential("a.com").await.unwrap_err();
        assert!(matches!(
            err,
            VaultError::Decryption(DecryptionError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn list_keeps_ledger_order_and_isolates_failures() {
        let ledger = deployed();
        let session = session_with(ledger.clone(), Arc::default(), "0xabc");
        session.initialize().await.unwrap();
        for site in ["a.com", "b.com", "c.com"] {
            session
                .add_credential(&CredentialRecord::new(site, "u", "p").unwrap())
                .await
                .unwrap();
        }
        ledger.entries.lock().unwrap()[1].blob_ref = "not a ref".into();

        let report = session.list_credentials().await.unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.success_count(), 2);
        let entries = report.entries();
        assert_eq!(entries[0].as_ref().unwrap().website, "a.com");
        let failure = entries[1].as_ref().unwrap_err();
        assert_eq!(failure.website, "b.com");
        assert_eq!(failure.error.kind(), ErrorKind::Codec);
        assert_eq!(entries[2].as_ref().unwrap().website, "c.com");
        assert_eq!(
            entries[2].as_ref().unwrap().password.expose_secret(),
            "p"
        );
    }

    #[tokio::test]
    async fn invalidation_follows_wallet_events() {
        let session = session_with(deployed(), Arc::default(), "0xAbC");
        assert!(!session.invalidated_by(&AccountEvent::AccountsChanged(vec!["0xabc".into()])));
        assert!(session.invalidated_by(&AccountEvent::AccountsChanged(vec!["0xdef".into()])));
        assert!(session.invalidated_by(&AccountEvent::AccountsChanged(vec![])));
        assert!(session.invalidated_by(&AccountEvent::Disconnected));
    }

    #[test]
    fn debug_hides_key() {
        let session = session_with(deployed(), Arc::default(), "0xabc");
        let debug = format!("{session:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("Uninitialized"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn logs_name_the_website_but_never_the_secret() {
        let session = session_with(deployed(), Arc::default(), "0xabc");
        session.initialize().await.unwrap();
        let record = CredentialRecord::new("a.com", "alice", "s3cret-passphrase").unwrap();
        session.add_credential(&record).await.unwrap();
        session.get_credential("a.com").await.unwrap();

        assert!(logs_contain("credential added"));
        assert!(logs_contain("a.com"));
        assert!(!logs_contain("s3cret-passphrase"));
    }
}
