// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The vault never talks to a concrete ledger, blob store, or wallet. Every
//! collaborator extends [`PluginAdapter`] and uses `#[async_trait]` so it can
//! be held as `Arc<dyn ...>`.

pub mod adapter;
pub mod blob;
pub mod ledger;
pub mod wallet;

pub use adapter::PluginAdapter;
pub use blob::BlobStoreAdapter;
pub use ledger::LedgerAdapter;
pub use wallet::{AccountSubscription, WalletAdapter};
