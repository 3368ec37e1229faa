// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted credential vault.
//!
//! Credentials are sealed with AES-256-GCM under a key derived from the
//! owner's identity, stored as text frames in a content-addressed blob store,
//! and indexed by website on an external ledger.

pub mod codec;
pub mod crypto;
pub mod kdf;
pub mod mask;
pub mod prompt;
pub mod record;
pub mod session;

pub use crypto::{CipherBox, EncryptedPayload};
pub use kdf::{derive_key, DerivedKey, KdfParams, KeyBinding};
pub use mask::{mask_password, PASSWORD_MASK};
pub use prompt::read_credential_password;
pub use session::{EntryFailure, ListReport, SessionState, VaultSession, VaultSessionBuilder};
