// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as KDF cost floors, the active network, and non-empty paths.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::{ChainvaultConfig, KdfAlgorithm};

/// Lowest PBKDF2 iteration count accepted.
pub const MIN_PBKDF2_ITERATIONS: u32 = 100_000;

/// Lowest Argon2id memory cost accepted, in KiB.
pub const MIN_ARGON2_MEMORY_COST: u32 = 32768;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ChainvaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // KDF parameters: only the selected algorithm's knobs are checked.
    match config.vault.kdf {
        KdfAlgorithm::Pbkdf2Sha256 => {
            if config.vault.kdf_iterations < MIN_PBKDF2_ITERATIONS {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "vault.kdf_iterations must be at least {MIN_PBKDF2_ITERATIONS}, got {}",
                        config.vault.kdf_iterations
                    ),
                });
            }
        }
        KdfAlgorithm::Argon2id => {
            if config.vault.argon2_memory_cost < MIN_ARGON2_MEMORY_COST {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "vault.argon2_memory_cost must be at least {MIN_ARGON2_MEMORY_COST} (32 MiB), got {}",
                        config.vault.argon2_memory_cost
                    ),
                });
            }
            if config.vault.argon2_iterations < 2 {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "vault.argon2_iterations must be at least 2, got {}",
                        config.vault.argon2_iterations
                    ),
                });
            }
            if config.vault.argon2_parallelism < 1 {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "vault.argon2_parallelism must be at least 1, got {}",
                        config.vault.argon2_parallelism
                    ),
                });
            }
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.wallet.key_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "wallet.key_path must not be empty".to_string(),
        });
    }

    let mut seen_names = HashSet::new();
    for (i, network) in config.network.networks.iter().enumerate() {
        if network.name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("network.networks[{i}].name must not be empty"),
            });
        } else if !seen_names.insert(network.name.as_str()) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "duplicate network name `{}` in [[network.networks]] array",
                    network.name
                ),
            });
        }
    }

    match config.network.active_network() {
        None => {
            let known: Vec<&str> = config
                .network
                .networks
                .iter()
                .map(|n| n.name.as_str())
                .collect();
            errors.push(ConfigError::Validation {
                message: format!(
                    "network.active `{}` does not name a configured network (known: {})",
                    config.network.active,
                    known.join(", ")
                ),
            });
        }
        Some(active) if active.ledger_address.trim().is_empty() => {
            errors.push(ConfigError::Validation {
                message: format!(
                    "network `{}` has no ledger_address; deploy the ledger and set it",
                    active.name
                ),
            });
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
