// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the vault, its collaborators, and the CLI.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{CodecError, VaultError};

/// Longest blob reference accepted from a blob store or the ledger.
pub const MAX_BLOB_REF_LEN: usize = 512;

/// The vault owner's public identifier (a wallet address).
///
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    /// Wrap an address. Surrounding whitespace is trimmed; an empty address
    /// is rejected.
    pub fn new(address: impl Into<String>) -> Result<Self, VaultError> {
        let address = address.into();
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(VaultError::Config("identity address must not be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plaintext `{website, username, password}` supplied by the caller.
///
/// The password is held as a [`SecretString`] so it never shows up in
/// `Debug` output.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub website: String,
    pub username: String,
    pub password: SecretString,
}

impl CredentialRecord {
    /// Build a record, rejecting an empty website (the uniqueness key).
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, VaultError> {
        let website = website.into();
        if website.trim().is_empty() {
            return Err(VaultError::InvalidRecord("website must not be empty".into()));
        }
        Ok(Self {
            website,
            username: username.into(),
            password: SecretString::from(password.into()),
        })
    }
}

impl PartialEq for CredentialRecord {
    fn eq(&self, other: &Self) -> bool {
        self.website == other.website
            && self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Eq for CredentialRecord {}

/// A decrypted credential joined with its ledger timestamp.
///
/// Reconstructed on every read, never stored as such.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Same as `website`; the ledger key doubles as the id.
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: SecretString,
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Join a ledger entry's timestamp with decrypted fields.
    pub fn from_entry(
        entry: &LedgerEntry,
        username: String,
        password: SecretString,
    ) -> Result<Self, VaultError> {
        let created_at = entry.created_at().ok_or_else(|| {
            VaultError::Internal(format!(
                "ledger timestamp {} for `{}` is out of range",
                entry.timestamp, entry.website
            ))
        })?;
        Ok(Self {
            id: entry.website.clone(),
            website: entry.website.clone(),
            username,
            password,
            created_at,
        })
    }

    /// The `{website, username, password}` part of this credential.
    pub fn record(&self) -> CredentialRecord {
        CredentialRecord {
            website: self.website.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

/// One row of the ledger: website key, blob reference, and the ledger's
/// own timestamp in unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub website: String,
    pub blob_ref: String,
    pub timestamp: u64,
}

impl LedgerEntry {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.timestamp).ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

/// What a ledger reports about itself when verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub chain_id: u64,
    pub address: String,
}

/// Opaque pointer to a ciphertext blob in content-addressed storage.
///
/// Validated on construction: 1 to [`MAX_BLOB_REF_LEN`] printable ASCII
/// characters with no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobRef(String);

impl BlobRef {
    pub fn parse(reference: &str) -> Result<Self, CodecError> {
        if reference.is_empty() {
            return Err(CodecError::malformed("blob reference is empty"));
        }
        if reference.len() > MAX_BLOB_REF_LEN {
            return Err(CodecError::malformed(format!(
                "blob reference is {} bytes, limit is {MAX_BLOB_REF_LEN}",
                reference.len()
            )));
        }
        if !reference.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(CodecError::malformed(
                "blob reference contains whitespace or non-printable characters",
            ));
        }
        Ok(Self(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BlobRef {
    type Error = CodecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        BlobRef::parse(&value)
    }
}

impl From<BlobRef> for String {
    fn from(value: BlobRef) -> Self {
        value.0
    }
}

/// A blockchain network the wallet can be connected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
}

/// Result of connecting a wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: String,
    pub network: NetworkInfo,
}

/// Change notifications emitted by a wallet backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    /// The set of exposed accounts changed. The first entry is active.
    AccountsChanged(Vec<String>),
    /// The wallet switched networks.
    NetworkChanged(NetworkInfo),
    /// The wallet disconnected; sessions bound to it should be dropped.
    Disconnected,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Identifies the kind of collaborator behind an adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Ledger,
    BlobStore,
    Wallet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_trims_and_rejects_empty() {
        let id = Identity::new("  0xabc  ").unwrap();
        assert_eq!(id.as_str(), "0xabc");
        assert!(Identity::new("   ").is_err());
    }

    #[test]
    fn record_rejects_empty_website() {
        let err = CredentialRecord::new("", "u", "p").unwrap_err();
        assert!(matches!(err, VaultError::InvalidRecord(_)));
    }

    #[test]
    fn record_debug_hides_password() {
        let record = CredentialRecord::new("a.com", "alice", "hunter2-secret").unwrap();
        let debug = format!("{record:?}");
        assert!(!debug.contains("hunter2-secret"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn record_equality_compares_password() {
        let a = CredentialRecord::new("a.com", "u", "p1").unwrap();
        let b = CredentialRecord::new("a.com", "u", "p1").unwrap();
        let c = CredentialRecord::new("a.com", "u", "p2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn blob_ref_validation() {
        assert!(BlobRef::parse("sha256:abcdef").is_ok());
        assert!(BlobRef::parse("").is_err());
        assert!(BlobRef::parse("has space").is_err());
        assert!(BlobRef::parse("tab\there").is_err());
        assert!(BlobRef::parse("naïve").is_err());
        assert!(BlobRef::parse(&"x".repeat(MAX_BLOB_REF_LEN)).is_ok());
        assert!(BlobRef::parse(&"x".repeat(MAX_BLOB_REF_LEN + 1)).is_err());
    }

    #[test]
    fn blob_ref_serde_validates() {
        let ok: BlobRef = serde_json::from_str("\"sha256:00ff\"").unwrap();
        assert_eq!(ok.as_str(), "sha256:00ff");
        assert!(serde_json::from_str::<BlobRef>("\"bad ref\"").is_err());
    }

    #[test]
    fn credential_takes_ledger_timestamp() {
        let entry = LedgerEntry {
            website: "a.com".into(),
            blob_ref: "sha256:00".into(),
            timestamp: 1_700_000_000,
        };
        let cred = Credential::from_entry(&entry, "u".into(), SecretString::from("p".to_string())).unwrap();
        assert_eq!(cred.id, "a.com");
        assert_eq!(cred.created_at.timestamp(), 1_700_000_000);
        assert_eq!(cred.record().website, "a.com");
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;
        for variant in [AdapterType::Ledger, AdapterType::BlobStore, AdapterType::Wallet] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(parsed, variant);
        }
    }
}
