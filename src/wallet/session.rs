// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet session: one normalized interface over heterogeneous providers.
//!
//! The provider's call shape is resolved once into a [`ProviderApi`] when the
//! session connects, and reused for key lookups and signing afterwards.
//! Sessions are explicit objects; whoever needs one is handed an `Arc`.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::locator::ProviderLocator;
use super::persist::{SessionStore, PUBLIC_KEY_KEY, SELECTED_WALLET_ID_KEY};
use super::provider::{
    extract_public_key, unwrap_signed_payload, Capabilities, ProviderError, ProviderRequest,
    WalletHandle,
};
use super::WalletError;
use crate::stellar::envelope::{SignedEnvelope, UnsignedEnvelope};
use crate::stellar::types::NetworkConfig;

/// How the public key is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyApi {
    GetPublicKey,
    Request,
}

/// A signing path, tried in the order listed in [`ProviderApi::sign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignApi {
    SignTransaction,
    Request,
}

/// Provider call shape, resolved from its capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderApi {
    /// Call `connect()` before asking for the key.
    pub connect_first: bool,
    pub key: Option<KeyApi>,
    pub sign: Vec<SignApi>,
}

impl ProviderApi {
    pub fn resolve(caps: Capabilities) -> Self {
        let key = if caps.get_public_key {
            Some(KeyApi::GetPublicKey)
        } else if caps.request {
            Some(KeyApi::Request)
        } else {
            None
        };

        let mut sign = Vec::new();
        if caps.sign_transaction {
            sign.push(SignApi::SignTransaction);
        }
        if caps.request {
            sign.push(SignApi::Request);
        }

        Self {
            connect_first: caps.connect,
            key,
            sign,
        }
    }
}

#[derive(Debug, Default)]
struct SessionState {
    public_key: Option<String>,
    api: Option<ProviderApi>,
}

pub struct WalletSession {
    locator: Arc<dyn ProviderLocator>,
    persist: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl WalletSession {
    pub fn new(locator: Arc<dyn ProviderLocator>, persist: Arc<dyn SessionStore>) -> Self {
        Self {
            locator,
            persist,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Re-read the last connected key from persistence.
    ///
    /// The key is trusted as-is; the provider is not consulted.
    pub async fn restore(&self) -> Option<String> {
        let key = self.persist.get(PUBLIC_KEY_KEY);
        self.state.write().await.public_key = key.clone();
        key
    }

    pub async fn current_public_key(&self) -> Option<String> {
        self.state.read().await.public_key.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.state.read().await.public_key.is_some()
    }

    pub fn is_provider_available(&self) -> bool {
        self.locator.is_provider_available()
    }

    /// Connect to the provider and return its public key.
    pub async fn connect(&self) -> Result<String, WalletError> {
        let handle = self
            .locator
            .find_provider()
            .ok_or(WalletError::ProviderUnavailable)?;
        let api = ProviderApi::resolve(handle.capabilities());
        let key_api = api.key.ok_or(WalletError::UnsupportedProviderApi)?;

        if api.connect_first {
            handle.connect().await?;
        }
        let public_key = fetch_public_key(handle.as_ref(), key_api).await?;

        if let Err(e) = self.persist.set(PUBLIC_KEY_KEY, &public_key) {
            warn!(error = %e, "Failed to persist wallet public key");
        }

        let mut state = self.state.write().await;
        state.public_key = Some(public_key.clone());
        state.api = Some(api);

        info!(public_key = %public_key, "Wallet connected");
        Ok(public_key)
    }

    /// Ask the provider for its current public key.
    pub async fn public_key(&self) -> Result<String, WalletError> {
        let (handle, api) = self.attach().await?;
        let key_api = api.key.ok_or(WalletError::UnsupportedProviderApi)?;
        fetch_public_key(handle.as_ref(), key_api).await
    }

    /// Sign an envelope, returning the signed XDR.
    ///
    /// `signTransaction` is tried before `request`. A decline reported by the
    /// provider stops immediately; anything else falls through to the next
    /// path and finally to [`WalletError::SigningUnavailable`].
    pub async fn sign(
        &self,
        envelope_xdr: &str,
        network_passphrase: &str,
    ) -> Result<String, WalletError> {
        let (handle, api) = self.attach().await?;

        for method in &api.sign {
            let outcome = match method {
                SignApi::SignTransaction => {
                    handle
                        .sign_transaction(envelope_xdr, network_passphrase)
                        .await
                }
                SignApi::Request => {
                    handle
                        .request(ProviderRequest::SignTransaction {
                            transaction_xdr: envelope_xdr.to_string(),
                            network_passphrase: network_passphrase.to_string(),
                        })
                        .await
                }
            };

            match outcome {
                Ok(value) => match unwrap_signed_payload(&value) {
                    Some(signed) => return Ok(signed),
                    None => debug!(?method, "Provider returned no signed payload"),
                },
                Err(ProviderError::Declined) => return Err(WalletError::SigningDeclined),
                Err(e) => warn!(?method, error = %e, "Signing attempt failed"),
            }
        }

        Err(WalletError::SigningUnavailable)
    }

    pub async fn sign_envelope(
        &self,
        envelope: &UnsignedEnvelope,
        network: &NetworkConfig,
    ) -> Result<SignedEnvelope, WalletError> {
        let signed = self.sign(envelope.xdr(), network.passphrase).await?;
        Ok(SignedEnvelope::from_wallet(signed))
    }

    /// Forget the key and the selected wallet, in memory and on disk.
    pub async fn disconnect(&self) {
        {
            let mut state = self.state.write().await;
            state.public_key = None;
            state.api = None;
        }
        for key in [PUBLIC_KEY_KEY, SELECTED_WALLET_ID_KEY] {
            if let Err(e) = self.persist.remove(key) {
                warn!(key, error = %e, "Failed to clear persisted wallet state");
            }
        }
        info!("Wallet disconnected");
    }

    async fn attach(&self) -> Result<(Arc<dyn WalletHandle>, ProviderApi), WalletError> {
        let handle = self
            .locator
            .find_provider()
            .ok_or(WalletError::ProviderUnavailable)?;
        let cached = self.state.read().await.api.clone();
        let api = cached.unwrap_or_else(|| ProviderApi::resolve(handle.capabilities()));
        Ok((handle, api))
    }
}

async fn fetch_public_key(handle: &dyn WalletHandle, api: KeyApi) -> Result<String, WalletError> {
    let key = match api {
        KeyApi::GetPublicKey => {
            let key = handle.get_public_key().await?;
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        }
        KeyApi::Request => {
            let value = handle.request(ProviderRequest::GetPublicKey).await?;
            extract_public_key(&value)
        }
    };
    key.ok_or_else(|| {
        WalletError::Provider(ProviderError::Failed(
            "provider returned no public key".to_string(),
        ))
    })
}
