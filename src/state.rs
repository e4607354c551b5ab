// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::config::AppConfig;
use crate::invoke::{CommandRunner, InvokeDefaults, ProcessRunner};
use crate::stellar::types::{network_by_name, TESTNET};
use crate::stellar::{
    ContractClient, HorizonClient, Ledger, LedgerError, NetworkConfig, PaymentBuilder,
};
use crate::store::InMemoryStore;
use crate::upload::{PinningError, PinningService, UploadStore, Web3StorageClient};
use crate::wallet::WalletSession;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to build ledger client: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Failed to build pinning client: {0}")]
    Pinning(#[from] PinningError),
}

/// Shared handler state. Cloning is cheap; every component sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub config: Arc<AppConfig>,
    pub uploads: UploadStore,
    /// `None` when no pinning credential is configured.
    pub pinning: Option<Arc<dyn PinningService>>,
    pub runner: Arc<dyn CommandRunner>,
    pub wallet: Arc<WalletSession>,
    pub ledger: Arc<dyn Ledger>,
    pub network: NetworkConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: InMemoryStore,
        wallet: Arc<WalletSession>,
        ledger: Arc<dyn Ledger>,
    ) -> Self {
        let network = network_by_name(&config.invoke_default_network).unwrap_or_else(|| {
            warn!(
                network = %config.invoke_default_network,
                "Unknown network name, payments use testnet"
            );
            TESTNET
        });
        Self {
            store: Arc::new(RwLock::new(store)),
            uploads: UploadStore::new(config.uploads_dir.clone()),
            pinning: None,
            runner: Arc::new(ProcessRunner::new(config.invoke_max_output_bytes)),
            wallet,
            ledger,
            network,
            config: Arc::new(config),
        }
    }

    /// Build the production clients (Horizon, pinning service) from `config`.
    pub fn from_config(
        config: AppConfig,
        store: InMemoryStore,
        wallet: Arc<WalletSession>,
    ) -> Result<Self, StateError> {
        let ledger = Arc::new(HorizonClient::new(config.horizon_url.clone())?);
        let pinning = match &config.pinning {
            Some(pinning) => Some(Arc::new(Web3StorageClient::new(pinning)?) as Arc<dyn PinningService>),
            None => None,
        };
        Ok(Self::new(config, store, wallet, ledger).with_pinning(pinning))
    }

    pub fn with_pinning(mut self, pinning: Option<Arc<dyn PinningService>>) -> Self {
        self.pinning = pinning;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn invoke_defaults(&self) -> InvokeDefaults {
        InvokeDefaults {
            source: self.config.invoke_default_source.clone(),
            network: self.config.invoke_default_network.clone(),
        }
    }

    pub fn payments(&self) -> PaymentBuilder {
        PaymentBuilder::new(self.wallet.clone(), self.ledger.clone(), self.network)
    }

    /// Contract client for the configured candidate, job and verification contracts.
    pub fn contracts(&self) -> ContractClient {
        ContractClient::new(
            self.wallet.clone(),
            self.ledger.clone(),
            self.network,
            self.config.contracts.clone(),
        )
    }
}

#[cfg(test)]
impl Default for AppState {
    /// No wallet provider, no ledger accounts, no pinning, and a private
    /// uploads directory under the system temp dir.
    fn default() -> Self {
        use crate::stellar::testing::MockLedger;
        use crate::wallet::{FixedLocator, MemorySessionStore};

        let config = AppConfig {
            uploads_dir: std::env::temp_dir().join(format!("blockhire-test-{}", uuid::Uuid::new_v4())),
            ..AppConfig::default()
        };
        let wallet = Arc::new(WalletSession::new(
            Arc::new(FixedLocator::empty()),
            Arc::new(MemorySessionStore::new()),
        ));
        Self::new(
            config,
            InMemoryStore::new(),
            wallet,
            Arc::new(MockLedger::without_accounts()),
        )
    }
}

#[cfg(test)]
impl AppState {
    pub fn with_uploads_dir(mut self, dir: impl Into<std::path::PathBuf>) -> Self {
        let dir = dir.into();
        self.uploads = UploadStore::new(dir.clone());
        let mut config = (*self.config).clone();
        config.uploads_dir = dir;
        self.config = Arc::new(config);
        self
    }

    pub fn with_contracts(mut self, contracts: crate::config::ContractIds) -> Self {
        let mut config = (*self.config).clone();
        config.contracts = contracts;
        self.config = Arc::new(config);
        self
    }

    pub fn with_wallet(mut self, wallet: Arc<WalletSession>, ledger: Arc<dyn Ledger>) -> Self {
        self.wallet = wallet;
        self.ledger = ledger;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stellar::types::PUBLIC;

    #[test]
    fn network_follows_configured_name() {
        let state = AppState::default();
        assert_eq!(state.network, TESTNET);

        let config = AppConfig {
            invoke_default_network: "mainnet".into(),
            ..AppConfig::default()
        };
        let state = AppState::new(
            config,
            InMemoryStore::new(),
            AppState::default().wallet,
            AppState::default().ledger,
        );
        assert_eq!(state.network, PUBLIC);
    }

    #[test]
    fn production_clients_build_from_config() {
        let config = AppConfig {
            pinning: Some(crate::config::PinningConfig {
                token: "token".into(),
                api_url: "https://pin.example/upload".into(),
            }),
            ..AppConfig::default()
        };
        let state =
            AppState::from_config(config, InMemoryStore::new(), AppState::default().wallet).unwrap();
        assert!(state.pinning.is_some());
        assert_eq!(state.invoke_defaults().source, "blockhire-deployer");
    }
}
