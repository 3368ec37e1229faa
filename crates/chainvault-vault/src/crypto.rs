// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM seal/open bound to a session key.
//!
//! Every call to [`CipherBox::encrypt`] generates a fresh random 96-bit nonce
//! via the system CSPRNG. Callers cannot supply a nonce.

use chainvault_core::{DecryptionError, VaultError};
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::kdf::DerivedKey;

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Nonce plus ciphertext with the GCM tag appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
}

/// Authenticated encryption under one [`DerivedKey`].
pub struct CipherBox {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl std::fmt::Debug for CipherBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherBox")
            .field("algorithm", &"AES-256-GCM")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl CipherBox {
    pub fn new(key: &DerivedKey) -> Result<Self, VaultError> {
        let unbound = UnboundKey::new(&AES_256_GCM, key.expose())
            .map_err(|_| VaultError::KeyDerivation("failed to create AES-256-GCM key".to_string()))?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    /// Encrypt `plaintext` under a fresh random nonce.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptedPayload, VaultError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| VaultError::Internal("failed to generate random nonce".to_string()))?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // Seal in place: the buffer is extended with the authentication tag.
        let mut in_out = plaintext.to_vec();
        self.key
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| VaultError::Internal("AES-256-GCM encryption failed".to_string()))?;

        Ok(EncryptedPayload {
            nonce: nonce_bytes,
            ciphertext: in_out,
        })
    }

    /// Decrypt and authenticate `payload`.
    ///
    /// Ciphertext too short to hold a tag is `Malformed`; any tag mismatch is
    /// `AuthenticationFailed`. No plaintext is returned on failure.
    pub fn decrypt(
        &self,
        payload: &EncryptedPayload,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptionError> {
        if payload.ciphertext.len() < TAG_LEN {
            return Err(DecryptionError::Malformed);
        }
        let nonce = Nonce::assume_unique_for_key(payload.nonce);

        let mut in_out = Zeroizing::new(payload.ciphertext.clone());
        let plaintext_len = self
            .key
            .open_in_place(nonce, Aad::empty(), in_out.as_mut_slice())
            .map_err(|_| DecryptionError::AuthenticationFailed)?
            .len();
        in_out.truncate(plaintext_len);

        Ok(in_out)
    }
}
