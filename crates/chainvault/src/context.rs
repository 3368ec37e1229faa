// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires configuration into the wallet, local storage and a vault session.

use std::path::Path;
use std::sync::Arc;

use chainvault_config::model::{ChainvaultConfig, NetworkEntry};
use chainvault_core::{Identity, NetworkInfo, VaultError, WalletAdapter};
use chainvault_storage::{Database, SqliteBlobStore, SqliteLedger};
use chainvault_vault::{KdfParams, KeyBinding, VaultSession};
use chainvault_wallet::{DeviceKeypair, LocalWallet};
use tracing::{debug, warn};

/// Everything a command needs, opened for the active network.
pub struct VaultContext {
    pub network: NetworkEntry,
    pub identity: Identity,
    pub db: Database,
    pub wallet: Arc<LocalWallet>,
    pub ledger: Arc<SqliteLedger>,
    pub blobs: Arc<SqliteBlobStore>,
    kdf: KdfParams,
    key_binding: KeyBinding,
    wal_mode: bool,
}

impl VaultContext {
    /// Load the device wallet, connect it, and open the database.
    pub async fn open(config: &ChainvaultConfig) -> Result<Self, VaultError> {
        let network = config.network.active_network().cloned().ok_or_else(|| {
            VaultError::Config(format!("unknown active network `{}`", config.network.active))
        })?;

        let keypair = DeviceKeypair::load_or_generate(Path::new(&config.wallet.key_path))?;
        let networks = config
            .network
            .networks
            .iter()
            .map(|n| NetworkInfo {
                name: n.name.clone(),
                chain_id: n.chain_id,
            })
            .collect();
        let wallet = Arc::new(LocalWallet::new(keypair, networks, network.chain_id)?);
        let info = wallet.connect().await?;
        let identity = Identity::new(info.address)?;

        let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
        let ledger = Arc::new(SqliteLedger::new(
            db.clone(),
            &identity,
            network.chain_id,
            network.ledger_address.clone(),
        ));
        let blobs = Arc::new(SqliteBlobStore::new(db.clone()));
        debug!(network = %network.name, identity = %identity, "vault context opened");

        Ok(Self {
            network,
            identity,
            db,
            wallet,
            ledger,
            blobs,
            kdf: KdfParams::from(&config.vault),
            key_binding: config.vault.key_binding.into(),
            wal_mode: config.storage.wal_mode,
        })
    }

    /// Build a session for this context without initializing it.
    pub fn session(&self) -> Result<VaultSession, VaultError> {
        let mut builder =
            VaultSession::builder(self.identity.clone(), self.ledger.clone(), self.blobs.clone())
                .kdf(self.kdf.clone())
                .key_binding(self.key_binding);
        if self.key_binding == KeyBinding::WalletSignature {
            let wallet: Arc<dyn WalletAdapter> = self.wallet.clone();
            builder = builder.wallet(wallet);
        }
        builder.build()
    }

    /// Build and initialize a session.
    pub async fn ready_session(&self) -> Result<VaultSession, VaultError> {
        let session = self.session()?;
        session.initialize().await?;
        Ok(session)
    }

    /// Fold the WAL back into the database file before the process exits.
    pub async fn close(self) -> Result<(), VaultError> {
        if self.wal_mode {
            self.db.checkpoint().await?;
        }
        Ok(())
    }

    /// Close the context after a command ran, whatever its outcome. The
    /// command's own error wins over a checkpoint failure.
    pub async fn finish<T>(self, outcome: Result<T, VaultError>) -> Result<T, VaultError> {
        let closed = self.close().await;
        if let (Err(e), Err(_)) = (&closed, &outcome) {
            warn!(error = %e, "checkpoint failed after command error");
        }
        let value = outcome?;
        closed?;
        Ok(value)
    }
}
