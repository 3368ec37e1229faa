// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key derivation from the vault owner's identity.
//!
//! Derives a 32-byte AES key from the key material chosen by the session's
//! [`KeyBinding`], using PBKDF2-HMAC-SHA256 (`ring`) or Argon2id (v0x13).
//! The salt is a fixed, versioned domain-separation constant so the same
//! identity always yields the same key.

use std::num::NonZeroU32;

use chainvault_config::model::{KdfAlgorithm, KeyBindingMode, VaultConfig};
use chainvault_core::{Identity, VaultError};
use ring::pbkdf2;
use zeroize::Zeroizing;

/// Domain-separation salt. Changing it changes every derived key.
pub const KDF_SALT: &[u8] = b"chainvault/credential-key/v1";

/// Prefix of the message a wallet signs under [`KeyBinding::WalletSignature`].
pub const BINDING_CHALLENGE_PREFIX: &str = "chainvault key binding v1:";

const KEY_LEN: usize = 32;

/// Key-stretching function and its cost parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdfParams {
    Pbkdf2Sha256 {
        iterations: u32,
    },
    Argon2id {
        memory_cost: u32,
        iterations: u32,
        parallelism: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        KdfParams::Pbkdf2Sha256 {
            iterations: 600_000,
        }
    }
}

impl From<&VaultConfig> for KdfParams {
    fn from(config: &VaultConfig) -> Self {
        match config.kdf {
            KdfAlgorithm::Pbkdf2Sha256 => KdfParams::Pbkdf2Sha256 {
                iterations: config.kdf_iterations,
            },
            KdfAlgorithm::Argon2id => KdfParams::Argon2id {
                memory_cost: config.argon2_memory_cost,
                iterations: config.argon2_iterations,
                parallelism: config.argon2_parallelism,
            },
        }
    }
}

/// What the vault key is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyBinding {
    /// The identity address itself. Public, so the KDF is defense in depth only.
    #[default]
    Address,
    /// A wallet signature over [`binding_challenge`]. Requires a wallet that
    /// signs deterministically.
    WalletSignature,
}

impl From<KeyBindingMode> for KeyBinding {
    fn from(mode: KeyBindingMode) -> Self {
        match mode {
            KeyBindingMode::Address => KeyBinding::Address,
            KeyBindingMode::WalletSignature => KeyBinding::WalletSignature,
        }
    }
}

/// The fixed message a wallet signs to bind the vault key to a secret.
pub fn binding_challenge(identity: &Identity) -> Vec<u8> {
    format!("{BINDING_CHALLENGE_PREFIX}{identity}").into_bytes()
}

/// 256-bit symmetric key. Zeroed on drop; `Debug` never prints it.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub(crate) fn expose(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl Eq for DerivedKey {}

/// Derive the vault key from `secret`.
///
/// CPU-bound; async callers should use [`derive_key_blocking`].
pub fn derive_key(secret: &[u8], params: &KdfParams) -> Result<DerivedKey, VaultError> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);

    match *params {
        KdfParams::Pbkdf2Sha256 { iterations } => {
            let iterations = NonZeroU32::new(iterations).ok_or_else(|| {
                VaultError::KeyDerivation("PBKDF2 iteration count must be non-zero".to_string())
            })?;
            pbkdf2::derive(
                pbkdf2::PBKDF2_HMAC_SHA256,
                iterations,
                KDF_SALT,
                secret,
                output.as_mut(),
            );
        }
        KdfParams::Argon2id {
            memory_cost,
            iterations,
            parallelism,
        } => {
            let params = argon2::Params::new(memory_cost, iterations, parallelism, Some(KEY_LEN))
                .map_err(|e| VaultError::KeyDerivation(format!("invalid Argon2id parameters: {e}")))?;
            let argon2 =
                argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
            argon2
                .hash_password_into(secret, KDF_SALT, output.as_mut())
                .map_err(|e| VaultError::KeyDerivation(format!("Argon2id key derivation failed: {e}")))?;
        }
    }

    Ok(DerivedKey(output))
}

/// Run [`derive_key`] on the blocking thread pool.
pub async fn derive_key_blocking(
    secret: Zeroizing<Vec<u8>>,
    params: KdfParams,
) -> Result<DerivedKey, VaultError> {
    tokio::task::spawn_blocking(move || derive_key(&secret, &params))
        .await
        .map_err(|e| VaultError::KeyDerivation(format!("key derivation task failed: {e}")))?
}
