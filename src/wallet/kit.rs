// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet-selection kit.
//!
//! Several wallet backends are registered as modules; the user picks one
//! through a [`WalletChooser`] and the choice is persisted under
//! `selectedWalletId`. Later sessions reuse the stored choice without asking
//! again until a disconnect clears it. The kit is itself a
//! [`ProviderLocator`] that yields the selected module's handle.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use super::locator::ProviderLocator;
use super::persist::{SessionStore, SELECTED_WALLET_ID_KEY};
use super::provider::WalletHandle;

/// Module selected when nothing has been chosen yet.
pub const FREIGHTER_ID: &str = "freighter";

pub struct WalletModule {
    pub id: String,
    pub name: String,
    pub handle: Arc<dyn WalletHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct WalletOption {
    pub id: String,
    pub name: String,
}

/// Picks one of the offered wallets, or `None` if the user backs out.
#[async_trait]
pub trait WalletChooser: Send + Sync {
    async fn choose(&self, options: &[WalletOption]) -> Option<String>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KitError {
    #[error("Unknown wallet module: {0}")]
    UnknownWallet(String),

    #[error("Wallet selection was cancelled")]
    SelectionCancelled,
}

pub struct WalletKit {
    modules: Vec<WalletModule>,
    persist: Arc<dyn SessionStore>,
}

impl WalletKit {
    pub fn new(modules: Vec<WalletModule>, persist: Arc<dyn SessionStore>) -> Self {
        Self { modules, persist }
    }

    pub fn options(&self) -> Vec<WalletOption> {
        self.modules
            .iter()
            .map(|m| WalletOption {
                id: m.id.clone(),
                name: m.name.clone(),
            })
            .collect()
    }

    /// The persisted choice, or [`FREIGHTER_ID`].
    pub fn selected_id(&self) -> String {
        self.persist
            .get(SELECTED_WALLET_ID_KEY)
            .unwrap_or_else(|| FREIGHTER_ID.to_string())
    }

    pub fn has_persisted_selection(&self) -> bool {
        self.persist.get(SELECTED_WALLET_ID_KEY).is_some()
    }

    pub fn set_wallet(&self, id: &str) -> Result<(), KitError> {
        if !self.modules.iter().any(|m| m.id == id) {
            return Err(KitError::UnknownWallet(id.to_string()));
        }
        if let Err(e) = self.persist.set(SELECTED_WALLET_ID_KEY, id) {
            warn!(wallet_id = id, error = %e, "Failed to persist wallet selection");
        }
        info!(wallet_id = id, "Wallet module selected");
        Ok(())
    }

    /// Prompt through the chooser and persist the answer.
    pub async fn open_modal(&self, chooser: &dyn WalletChooser) -> Result<String, KitError> {
        let id = chooser
            .choose(&self.options())
            .await
            .ok_or(KitError::SelectionCancelled)?;
        self.set_wallet(&id)?;
        Ok(id)
    }

    /// Reuse the persisted selection, prompting only when there is none.
    pub async fn ensure_selected(&self, chooser: &dyn WalletChooser) -> Result<String, KitError> {
        if self.has_persisted_selection() {
            return Ok(self.selected_id());
        }
        self.open_modal(chooser).await
    }

    pub fn clear_selection(&self) {
        if let Err(e) = self.persist.remove(SELECTED_WALLET_ID_KEY) {
            warn!(error = %e, "Failed to clear wallet selection");
        }
    }
}

impl ProviderLocator for WalletKit {
    fn find_provider(&self) -> Option<Arc<dyn WalletHandle>> {
        let selected = self.selected_id();
        self.modules
            .iter()
            .find(|m| m.id == selected)
            .map(|m| Arc::clone(&m.handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::persist::MemorySessionStore;
    use crate::wallet::session::WalletSession;
    use crate::wallet::testing::ScriptedWallet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingChooser {
        pick: Option<&'static str>,
        prompts: AtomicUsize,
    }

    impl CountingChooser {
        fn picking(pick: Option<&'static str>) -> Self {
            Self {
                pick,
                prompts: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WalletChooser for CountingChooser {
        async fn choose(&self, _options: &[WalletOption]) -> Option<String> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.pick.map(str::to_string)
        }
    }

    fn kit(persist: Arc<MemorySessionStore>) -> WalletKit {
        WalletKit::new(
            vec![
                WalletModule {
                    id: FREIGHTER_ID.into(),
                    name: "Freighter".into(),
                    handle: Arc::new(ScriptedWallet::signer("GFREIGHTER")),
                },
                WalletModule {
                    id: "xbull".into(),
                    name: "xBull".into(),
                    handle: Arc::new(ScriptedWallet::signer("GXBULL")),
                },
            ],
            persist,
        )
    }

    #[tokio::test]
    async fn selection_is_persisted_and_reused_without_prompt() {
        let persist = Arc::new(MemorySessionStore::new());
        let chooser = CountingChooser::picking(Some("xbull"));

        let first = kit(persist.clone());
        assert_eq!(first.ensure_selected(&chooser).await.unwrap(), "xbull");

        // A fresh kit over the same persistence picks up the stored choice.
        let second = kit(persist);
        assert_eq!(second.ensure_selected(&chooser).await.unwrap(), "xbull");
        assert_eq!(chooser.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancelled_or_unknown_selection_fails() {
        let persist = Arc::new(MemorySessionStore::new());
        let kit = kit(persist);

        let cancel = CountingChooser::picking(None);
        assert_eq!(
            kit.open_modal(&cancel).await,
            Err(KitError::SelectionCancelled)
        );
        let unknown = CountingChooser::picking(Some("ledger"));
        assert_eq!(
            kit.open_modal(&unknown).await,
            Err(KitError::UnknownWallet("ledger".into()))
        );
        assert_eq!(kit.selected_id(), FREIGHTER_ID);
    }

    #[tokio::test]
    async fn kit_drives_a_session_and_disconnect_resets_selection() {
        let persist = Arc::new(MemorySessionStore::new());
        let kit = Arc::new(kit(persist.clone()));
        kit.set_wallet("xbull").unwrap();

        let session = WalletSession::new(kit.clone(), persist);
        assert_eq!(session.connect().await.unwrap(), "GXBULL");

        session.disconnect().await;
        assert!(!kit.has_persisted_selection());
        assert_eq!(kit.selected_id(), FREIGHTER_ID);
    }
}
