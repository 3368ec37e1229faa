// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

/// What a listing shows in place of a stored password.
pub const PASSWORD_MASK: &str = "********";

/// Hide a password for display.
///
/// The mask has a fixed width, so neither characters nor length leak.
pub fn mask_password(_password: &str) -> &'static str {
    PASSWORD_MASK
}
