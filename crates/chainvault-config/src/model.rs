// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for chainvault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level chainvault configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChainvaultConfig {
    /// Key derivation and key binding settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Local SQLite ledger and blob store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Networks and the ledger deployed on each.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Local device wallet settings.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Key-stretching function used to derive the vault key from the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KdfAlgorithm {
    /// PBKDF2-HMAC-SHA256.
    #[default]
    Pbkdf2Sha256,
    /// Argon2id (v0x13).
    Argon2id,
}

/// What secret the vault key is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyBindingMode {
    /// The public wallet address.
    #[default]
    Address,
    /// A wallet signature over a fixed challenge.
    WalletSignature,
}

/// Key derivation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Key-stretching function (default: pbkdf2-sha256).
    #[serde(default)]
    pub kdf: KdfAlgorithm,

    /// PBKDF2 iteration count (default: 600000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,

    /// Argon2id memory cost in KiB (default: 65536 = 64 MiB).
    #[serde(default = "default_argon2_memory_cost")]
    pub argon2_memory_cost: u32,

    /// Argon2id iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2id parallelism lanes (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,

    /// Key binding (default: address).
    #[serde(default)]
    pub key_binding: KeyBindingMode,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf: KdfAlgorithm::default(),
            kdf_iterations: default_kdf_iterations(),
            argon2_memory_cost: default_argon2_memory_cost(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            key_binding: KeyBindingMode::default(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    600_000
}

fn default_argon2_memory_cost() -> u32 {
    65536
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding the local ledger and blobs.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("chainvault").join("chainvault.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("chainvault.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Network selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    /// Name of the network to use (must match an entry in `networks`).
    #[serde(default = "default_active_network")]
    pub active: String,

    /// Known networks and their ledger deployments.
    #[serde(default = "default_networks")]
    pub networks: Vec<NetworkEntry>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            active: default_active_network(),
            networks: default_networks(),
        }
    }
}

impl NetworkConfig {
    /// The entry named by `active`, if present.
    pub fn active_network(&self) -> Option<&NetworkEntry> {
        self.networks.iter().find(|n| n.name == self.active)
    }
}

/// One network the ledger is deployed on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkEntry {
    pub name: String,
    pub chain_id: u64,
    /// Ledger deployment address. Empty means not deployed yet.
    #[serde(default)]
    pub ledger_address: String,
}

fn default_active_network() -> String {
    "localhost".to_string()
}

fn default_networks() -> Vec<NetworkEntry> {
    vec![
        NetworkEntry {
            name: "localhost".to_string(),
            chain_id: 31337,
            ledger_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
        },
        NetworkEntry {
            name: "sepolia".to_string(),
            chain_id: 11155111,
            ledger_address: String::new(),
        },
    ]
}

/// Local device wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WalletConfig {
    /// File holding the hex-encoded Ed25519 device key. Created on first use.
    #[serde(default = "default_key_path")]
    pub key_path: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            key_path: default_key_path(),
        }
    }
}

fn default_key_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("chainvault").join("wallet.key"))
        .unwrap_or_else(|| std::path::PathBuf::from("wallet.key"))
        .to_string_lossy()
        .into_owned()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
