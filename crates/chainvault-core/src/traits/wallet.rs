// SPDX-FileCopyrightText: 2026 Chainvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wallet capability interface and account-change subscriptions.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::warn;

use crate::error::WalletError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{AccountEvent, WalletInfo};

/// One capability interface per network backend.
///
/// The vault depends on this trait only. Change notifications go through
/// [`WalletAdapter::subscribe`], which can be called any number of times;
/// each subscriber gets its own independent stream.
#[async_trait]
pub trait WalletAdapter: PluginAdapter {
    /// Connects (or reconnects) and reports the active account and network.
    async fn connect(&self) -> Result<WalletInfo, WalletError>;

    /// Signs `message` with the active account's key.
    async fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, WalletError>;

    /// Switches the wallet to the network with `chain_id`.
    async fn switch_network(&self, chain_id: u64) -> Result<(), WalletError>;

    /// Opens a new subscription to account and network changes.
    fn subscribe(&self) -> AccountSubscription;
}

/// A cancelable stream of [`AccountEvent`]s.
///
/// Dropping the subscription (or calling [`cancel`](Self::cancel))
/// unsubscribes. A subscriber that falls behind skips the events it missed
/// rather than erroring.
#[derive(Debug)]
pub struct AccountSubscription {
    rx: Option<broadcast::Receiver<AccountEvent>>,
}

impl AccountSubscription {
    pub fn new(rx: broadcast::Receiver<AccountEvent>) -> Self {
        Self { rx: Some(rx) }
    }

    /// Waits for the next event. Returns `None` once the wallet is gone or
    /// the subscription was canceled.
    pub async fn recv(&mut self) -> Option<AccountEvent> {
        loop {
            let rx = self.rx.as_mut()?;
            match rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "account subscriber lagged, skipping missed events");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }

    /// Stops receiving events. Further `recv` calls return `None`.
    pub fn cancel(&mut self) {
        self.rx = None;
    }

    pub fn is_canceled(&self) -> bool {
        self.rx.is_none()
    }
}
