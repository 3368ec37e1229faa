// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential password acquisition via TTY prompt or the CHAINVAULT_PASSWORD
//! environment variable.

use chainvault_core::VaultError;
use secrecy::SecretString;

/// The environment variable name for providing a credential password.
pub const PASSWORD_ENV_VAR: &str = "CHAINVAULT_PASSWORD";

/// Get the password to store for `website`.
///
/// Priority:
/// 1. `CHAINVAULT_PASSWORD` environment variable (for scripts)
/// 2. Interactive hidden TTY prompt via `rpassword`
pub fn read_credential_password(website: &str) -> Result<SecretString, VaultError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        eprint!("Password for {website}: ");
        let password = rpassword::read_password()
            .map_err(|e| VaultError::InvalidRecord(format!("failed to read password: {e}")))?;
        if password.is_empty() {
            return Err(VaultError::InvalidRecord("empty password not allowed".to_string()));
        }
        return Ok(SecretString::from(password));
    }

    Err(VaultError::InvalidRecord(
        "No password provided. Set CHAINVAULT_PASSWORD or run interactively.".to_string(),
    ))
}
