// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the chainvault credential vault.
//!
//! Holds the error taxonomy, the data model shared by every crate, and the
//! traits for the three external collaborators: the ledger, the
//! content-addressed blob store, and the wallet.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{
    BlobStoreError, CodecError, DecryptionError, ErrorKind, LedgerError, VaultError, WalletError,
};
pub use types::{
    AccountEvent, AdapterType, BlobRef, Credential, CredentialRecord, HealthStatus, Identity,
    LedgerEntry, LedgerInfo, NetworkInfo, WalletInfo,
};

pub use traits::{
    AccountSubscription, BlobStoreAdapter, LedgerAdapter, PluginAdapter, WalletAdapter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_collaborator_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_ledger_adapter<T: LedgerAdapter>() {}
        fn _assert_blob_store_adapter<T: BlobStoreAdapter>() {}
        fn _assert_wallet_adapter<T: WalletAdapter>() {}
    }

    #[test]
    fn collaborator_traits_are_object_safe() {
        fn _ledger(_: std::sync::Arc<dyn LedgerAdapter>) {}
        fn _blobs(_: std::sync::Arc<dyn BlobStoreAdapter>) {}
        fn _wallet(_: std::sync::Arc<dyn WalletAdapter>) {}
    }

    #[test]
    fn health_status_variants() {
        assert_eq!(HealthStatus::Healthy, HealthStatus::Healthy);
        assert_ne!(HealthStatus::Degraded("slow".into()), HealthStatus::Healthy);
        assert_ne!(HealthStatus::Unhealthy("down".into()), HealthStatus::Healthy);
    }
}
