// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error taxonomy for the chainvault credential vault.
//!
//! [`VaultError`] is what every vault operation returns. The collaborator
//! traits (ledger, blob store, wallet) return their own narrower errors,
//! which the session maps into [`VaultError`] at the boundary.

use strum::Display;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type returned by vault sessions and their components.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The ledger could not be reached or has nothing deployed at the
    /// configured address. Fatal for the session.
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// Key derivation failed. Fatal for the session.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// An operation was called before the session reached `Ready`.
    #[error("vault session not initialized")]
    NotInitialized,

    /// The ledger already holds an entry for this website.
    #[error("a credential for `{website}` already exists")]
    DuplicateWebsite { website: String },

    /// The ledger holds no entry for this website.
    #[error("no credential stored for `{website}`")]
    NotFound { website: String },

    /// The ledger write did not complete (network, timeout, rejected tx).
    #[error("ledger write failed: {message}")]
    LedgerWriteFailed {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The blob store could not be reached.
    #[error("blob store unavailable: {message}")]
    BlobStoreUnavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The ledger points at a blob the blob store does not have.
    #[error("blob `{reference}` not found in blob store")]
    BlobNotFound { reference: String },

    /// A blob reference or payload frame could not be parsed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// A well-formed payload failed to decrypt.
    #[error(transparent)]
    Decryption(#[from] DecryptionError),

    /// The credential record supplied by the caller is not acceptable.
    #[error("invalid credential record: {0}")]
    InvalidRecord(String),

    /// Configuration errors.
    #[error("configuration error: {0}")]
    Config(String),

    /// Local storage backend errors (database connection, query failure).
    #[error("storage error: {source}")]
    Storage {
        #[source]
        source: BoxError,
    },

    /// Wallet capability errors.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`VaultError`], used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    LedgerUnavailable,
    KeyDerivation,
    NotInitialized,
    DuplicateWebsite,
    NotFound,
    LedgerWriteFailed,
    BlobStoreUnavailable,
    BlobNotFound,
    Codec,
    Decryption,
    InvalidRecord,
    Config,
    Storage,
    Wallet,
    Internal,
}

impl VaultError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VaultError::LedgerUnavailable(_) => ErrorKind::LedgerUnavailable,
            VaultError::KeyDerivation(_) => ErrorKind::KeyDerivation,
            VaultError::NotInitialized => ErrorKind::NotInitialized,
            VaultError::DuplicateWebsite { .. } => ErrorKind::DuplicateWebsite,
            VaultError::NotFound { .. } => ErrorKind::NotFound,
            VaultError::LedgerWriteFailed { .. } => ErrorKind::LedgerWriteFailed,
            VaultError::BlobStoreUnavailable { .. } => ErrorKind::BlobStoreUnavailable,
            VaultError::BlobNotFound { .. } => ErrorKind::BlobNotFound,
            VaultError::Codec(_) => ErrorKind::Codec,
            VaultError::Decryption(_) => ErrorKind::Decryption,
            VaultError::InvalidRecord(_) => ErrorKind::InvalidRecord,
            VaultError::Config(_) => ErrorKind::Config,
            VaultError::Storage { .. } => ErrorKind::Storage,
            VaultError::Wallet(_) => ErrorKind::Wallet,
            VaultError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Whether retrying the whole high-level operation is safe and may succeed.
    ///
    /// Only infrastructure failures qualify. Semantic conflicts and data
    /// integrity errors never do.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            VaultError::LedgerWriteFailed { .. } | VaultError::BlobStoreUnavailable { .. }
        )
    }
}

/// A blob reference or payload frame that does not parse.
///
/// Raised before any decryption is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("malformed blob data: {reason}")]
    Malformed { reason: String },
}

impl CodecError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        CodecError::Malformed {
            reason: reason.into(),
        }
    }
}

/// Decryption failure. Never accompanied by partial plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionError {
    /// Tag mismatch: tampered data or the wrong key.
    #[error("decryption failed: authentication tag mismatch (wrong key or tampered data)")]
    AuthenticationFailed,
    /// The payload is structurally unusable (truncated ciphertext, or the
    /// authenticated plaintext is not a credential record).
    #[error("decryption failed: malformed payload")]
    Malformed,
}

/// Errors reported by a ledger collaborator.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger entry for `{website}` already exists")]
    AlreadyExists { website: String },

    #[error("no ledger entry for `{website}`")]
    NotFound { website: String },

    #[error("ledger unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl LedgerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        LedgerError::Unavailable {
            message: message.into(),
            source: None,
        }
    }
}

/// Errors reported by a blob-store collaborator.
#[derive(Debug, Error)]
pub enum BlobStoreError {
    #[error("blob `{reference}` not found")]
    NotFound { reference: String },

    #[error("blob store unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl BlobStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        BlobStoreError::Unavailable {
            message: message.into(),
            source: None,
        }
    }
}

/// Errors reported by a wallet backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("wallet not connected")]
    NotConnected,

    #[error("wallet rejected the request: {0}")]
    Rejected(String),

    #[error("unsupported network: chain id {chain_id}")]
    UnsupportedNetwork { chain_id: u64 },

    #[error("wallet backend error: {0}")]
    Backend(String),
}
