// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 device keypair: generation, key file persistence, signing.

use std::path::Path;

use chainvault_core::WalletError;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use tracing::info;
use zeroize::Zeroizing;

/// Bytes of the public-key digest used as the account address.
const ADDRESS_LEN: usize = 20;

/// An Ed25519 device keypair backing the local wallet.
///
/// The address is `0x` followed by the hex of the first 20 bytes of
/// SHA-256 over the public key.
pub struct DeviceKeypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl std::fmt::Debug for DeviceKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceKeypair")
            .field("address", &self.address())
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

impl DeviceKeypair {
    /// Generate a new random Ed25519 keypair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Reconstruct a keypair from private key bytes.
    pub fn from_bytes(private_bytes: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(private_bytes))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = VerifyingKey::from(&signing_key);
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Load the key stored hex-encoded at `path`, or generate one and write it.
    pub fn load_or_generate(path: &Path) -> Result<Self, WalletError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_hex(contents.trim()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let keypair = Self::generate();
                keypair.write_to(path)?;
                info!(path = %path.display(), address = %keypair.address(), "generated device wallet key");
                Ok(keypair)
            }
            Err(e) => Err(WalletError::Backend(format!(
                "failed to read key file {}: {e}",
                path.display()
            ))),
        }
    }

    fn from_hex(encoded: &str) -> Result<Self, WalletError> {
        let bytes = Zeroizing::new(
            hex::decode(encoded)
                .map_err(|e| WalletError::Backend(format!("key file is not valid hex: {e}")))?,
        );
        let private: &[u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            WalletError::Backend(format!("key file holds {} bytes, expected 32", bytes.len()))
        })?;
        Ok(Self::from_bytes(private))
    }

    fn write_to(&self, path: &Path) -> Result<(), WalletError> {
        let io_err =
            |e: std::io::Error| WalletError::Backend(format!("failed to write key file {}: {e}", path.display()));
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let encoded = Zeroizing::new(hex::encode(self.private_bytes().as_slice()));
        std::fs::write(path, encoded.as_bytes()).map_err(io_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(io_err)?;
        }
        Ok(())
    }

    /// Get the private key bytes, zeroed on drop.
    pub fn private_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.signing_key.to_bytes())
    }

    /// Get the public key bytes.
    pub fn public_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// The account address derived from the public key.
    pub fn address(&self) -> String {
        let digest = Sha256::digest(self.public_bytes());
        format!("0x{}", hex::encode(&digest[..ADDRESS_LEN]))
    }

    /// Sign arbitrary bytes. Ed25519 signatures are deterministic.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Verify a signature against this keypair's public key using strict mode.
    ///
    /// Strict verification rejects weak public keys.
    pub fn verify_strict(&self, message: &[u8], signature: &Signature) -> Result<(), WalletError> {
        self.verifying_key
            .verify_strict(message, signature)
            .map_err(|e| WalletError::Rejected(format!("Ed25519 signature verification failed: {e}")))
    }
}
