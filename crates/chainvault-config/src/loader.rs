// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./chainvault.toml` > `~/.config/chainvault/chainvault.toml`
//! > `/etc/chainvault/chainvault.toml` with environment variable overrides via the
//! `CHAINVAULT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ChainvaultConfig;

pub(crate) const SYSTEM_CONFIG_FILE: &str = "/etc/chainvault/chainvault.toml";
pub(crate) const LOCAL_CONFIG_FILE: &str = "chainvault.toml";

/// Env vars that are read directly by the CLI and are not config keys.
const NON_CONFIG_VARS: &[&str] = &["password"];

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chainvault").join("chainvault.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/chainvault/chainvault.toml` (system-wide)
/// 3. `~/.config/chainvault/chainvault.toml` (user XDG config)
/// 4. `./chainvault.toml` (local directory)
/// 5. `CHAINVAULT_*` environment variables
pub fn load_config() -> Result<ChainvaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing.
pub fn load_config_from_str(toml_content: &str) -> Result<ChainvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChainvaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ChainvaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ChainvaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ChainvaultConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_FILE))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that underscore-containing
/// key names survive: `CHAINVAULT_VAULT_KDF_ITERATIONS` maps to
/// `vault.kdf_iterations`, not `vault.kdf.iterations`.
fn env_provider() -> Env {
    Env::prefixed("CHAINVAULT_")
        .ignore(NON_CONFIG_VARS)
        .map(|key| map_env_key(&key.as_str().to_ascii_lowercase()).into())
}

/// `vault_kdf_iterations` -> `vault.kdf_iterations`. Expects a lowercased key.
fn map_env_key(key: &str) -> String {
    key.replacen("vault_", "vault.", 1)
        .replacen("storage_", "storage.", 1)
        .replacen("network_", "network.", 1)
        .replacen("wallet_", "wallet.", 1)
        .replacen("logging_", "logging.", 1)
}
