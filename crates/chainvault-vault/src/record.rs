// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plaintext form of a sealed credential.
//!
//! Only `{username, password}` is sealed; the website travels as the ledger
//! key. Bytes that authenticate but do not parse as a known record version
//! are reported as [`DecryptionError::Malformed`].

use chainvault_core::{CredentialRecord, DecryptionError, VaultError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

const RECORD_VERSION: u8 = 1;

#[derive(Serialize)]
struct SealedRecordRef<'a> {
    v: u8,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SealedRecord {
    v: u8,
    username: String,
    password: String,
}

/// Serialize the sealed part of `record` as JSON.
pub fn serialize(record: &CredentialRecord) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let sealed = SealedRecordRef {
        v: RECORD_VERSION,
        username: &record.username,
        password: record.password.expose_secret(),
    };
    serde_json::to_vec(&sealed)
        .map(Zeroizing::new)
        .map_err(|e| VaultError::Internal(format!("failed to serialize credential: {e}")))
}

/// Parse decrypted bytes back into `(username, password)`.
pub fn deserialize(plaintext: &[u8]) -> Result<(String, SecretString), DecryptionError> {
    let sealed: SealedRecord =
        serde_json::from_slice(plaintext).map_err(|_| DecryptionError::Malformed)?;
    if sealed.v != RECORD_VERSION {
        return Err(DecryptionError::Malformed);
    }
    Ok((sealed.username, SecretString::from(sealed.password)))
}
