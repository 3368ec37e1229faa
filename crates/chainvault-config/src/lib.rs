// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the chainvault credential vault.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and Elm-style diagnostic
//! error rendering with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use chainvault_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Active network: {}", config.network.active);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};

use tracing::debug;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    ChainvaultConfig, KdfAlgorithm, KeyBindingMode, NetworkConfig, NetworkEntry, VaultConfig,
};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
/// 3. On Figment error: converts to rich miette diagnostics with typo suggestions
pub fn load_and_validate() -> Result<ChainvaultConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => checked(config),
        Err(err) => {
            let toml_sources = collect_toml_sources(None);
            Err(diagnostic::diagnose(err, &toml_sources))
        }
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(
    path: &std::path::Path,
) -> Result<ChainvaultConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => checked(config),
        Err(err) => {
            let toml_sources = collect_toml_sources(Some(path));
            Err(diagnostic::diagnose(err, &toml_sources))
        }
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<ChainvaultConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => checked(config),
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::diagnose(err, &sources))
        }
    }
}

fn checked(config: ChainvaultConfig) -> Result<ChainvaultConfig, Vec<ConfigError>> {
    if let Err(errors) = validation::validate_config(&config) {
        debug!(errors = errors.len(), "configuration failed validation");
        return Err(errors);
    }
    debug!(
        network = %config.network.active,
        database = %config.storage.database_path,
        kdf = ?config.vault.kdf,
        "configuration loaded"
    );
    Ok(config)
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources(explicit: Option<&std::path::Path>) -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Some(path) = explicit {
        if let Ok(content) = std::fs::read_to_string(path) {
            sources.push((path.display().to_string(), content));
        }
        return sources;
    }

    if let Ok(content) = std::fs::read_to_string(loader::LOCAL_CONFIG_FILE) {
        let path = std::env::current_dir()
            .map(|d| d.join(loader::LOCAL_CONFIG_FILE).display().to_string())
            .unwrap_or_else(|_| loader::LOCAL_CONFIG_FILE.to_string());
        sources.push((path, content));
    }

    if let Some(path) = loader::user_config_path() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = std::path::Path::new(loader::SYSTEM_CONFIG_FILE);
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    sources
}
