// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local device wallet.
//!
//! Implements `WalletAdapter` with an Ed25519 keypair kept in a key file.
//! Account and network changes are broadcast to every subscriber.

pub mod keypair;

pub use ed25519_dalek::Signature;
pub use keypair::DeviceKeypair;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, info};

use chainvault_core::{
    AccountEvent, AccountSubscription, AdapterType, HealthStatus, NetworkInfo, PluginAdapter,
    WalletAdapter, WalletError, WalletInfo,
};

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 16;

/// Wallet backed by a local [`DeviceKeypair`].
pub struct LocalWallet {
    keypair: DeviceKeypair,
    networks: Vec<NetworkInfo>,
    active: Mutex<NetworkInfo>,
    connected: AtomicBool,
    events: broadcast::Sender<AccountEvent>,
}

impl LocalWallet {
    /// Create a wallet on `networks`, starting on the one with `active_chain_id`.
    pub fn new(
        keypair: DeviceKeypair,
        networks: Vec<NetworkInfo>,
        active_chain_id: u64,
    ) -> Result<Self, WalletError> {
        let active = networks
            .iter()
            .find(|n| n.chain_id == active_chain_id)
            .cloned()
            .ok_or(WalletError::UnsupportedNetwork {
                chain_id: active_chain_id,
            })?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            keypair,
            networks,
            active: Mutex::new(active),
            connected: AtomicBool::new(false),
            events,
        })
    }

    pub fn address(&self) -> String {
        self.keypair.address()
    }

    pub fn keypair(&self) -> &DeviceKeypair {
        &self.keypair
    }

    pub fn active_network(&self) -> NetworkInfo {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Disconnect and notify subscribers. No-op when already disconnected.
    pub fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            info!(address = %self.address(), "wallet disconnected");
            self.emit(AccountEvent::Disconnected);
        }
    }

    fn emit(&self, event: AccountEvent) {
        // No receivers is not an error.
        let receivers = self.events.send(event).unwrap_or(0);
        debug!(receivers, "account event emitted");
    }

    fn ensure_connected(&self) -> Result<(), WalletError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(WalletError::NotConnected)
        }
    }
}

#[async_trait]
impl PluginAdapter for LocalWallet {
    fn name(&self) -> &str {
        "local-wallet"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Wallet
    }

    async fn health_check(&self) -> HealthStatus {
        if self.is_connected() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded("wallet not connected".to_string())
        }
    }
}

#[async_trait]
impl WalletAdapter for LocalWallet {
    async fn connect(&self) -> Result<WalletInfo, WalletError> {
        let address = self.address();
        if !self.connected.swap(true, Ordering::SeqCst) {
            info!(address = %address, "wallet connected");
            self.emit(AccountEvent::AccountsChanged(vec![address.clone()]));
        }
        Ok(WalletInfo {
            address,
            network: self.active_network(),
        })
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError> {
        self.ensure_connected()?;
        Ok(self.keypair.sign(message).to_bytes().to_vec())
    }

    async fn switch_network(&self, chain_id: u64) -> Result<(), WalletError> {
        self.ensure_connected()?;
        let network = self
            .networks
            .iter()
            .find(|n| n.chain_id == chain_id)
            .cloned()
            .ok_or(WalletError::UnsupportedNetwork { chain_id })?;

        let changed = {
            let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
            if active.chain_id == chain_id {
                false
            } else {
                *active = network.clone();
                true
            }
        };
        if changed {
            info!(chain_id, name = %network.name, "wallet switched network");
            self.emit(AccountEvent::NetworkChanged(network));
        }
        Ok(())
    }

    fn subscribe(&self) -> AccountSubscription {
        AccountSubscription::new(self.events.subscribe())
    }
}
