// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider capability surface.
//!
//! Injected wallet providers differ in which of `connect`, `getPublicKey`,
//! `request` and `signTransaction` they implement. A [`WalletHandle`]
//! advertises its subset through [`Capabilities`]; methods outside that
//! subset answer [`ProviderError::MethodMissing`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Which provider methods a handle implements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub connect: bool,
    pub get_public_key: bool,
    pub request: bool,
    pub sign_transaction: bool,
}

impl Capabilities {
    /// True when the handle exposes at least one of the discovery methods
    /// (`getPublicKey`, `connect`, `request`).
    pub fn looks_like_wallet(&self) -> bool {
        self.get_public_key || self.connect || self.request
    }
}

/// Generic request-shaped call, serialized as `{"method": ..., "params": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum ProviderRequest {
    GetPublicKey,
    SignTransaction {
        #[serde(rename = "transactionXDR")]
        transaction_xdr: String,
        #[serde(rename = "networkPassphrase")]
        network_passphrase: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider does not implement `{0}`")]
    MethodMissing(&'static str),

    /// The wallet user rejected the prompt.
    #[error("request was declined in the wallet")]
    Declined,

    #[error("provider call failed: {0}")]
    Failed(String),
}

/// An injected wallet provider.
///
/// Handles are owned by whatever injected them; the application only holds
/// shared references for the lifetime of the scope they were found in.
#[async_trait]
pub trait WalletHandle: Send + Sync {
    fn capabilities(&self) -> Capabilities;

    async fn connect(&self) -> Result<(), ProviderError> {
        Err(ProviderError::MethodMissing("connect"))
    }

    async fn get_public_key(&self) -> Result<String, ProviderError> {
        Err(ProviderError::MethodMissing("getPublicKey"))
    }

    async fn request(&self, _request: ProviderRequest) -> Result<Value, ProviderError> {
        Err(ProviderError::MethodMissing("request"))
    }

    /// Returns whatever the provider produced: a bare XDR string or an
    /// object wrapping it.
    async fn sign_transaction(
        &self,
        _envelope_xdr: &str,
        _network_passphrase: &str,
    ) -> Result<Value, ProviderError> {
        Err(ProviderError::MethodMissing("signTransaction"))
    }
}

/// Pull a public key out of a `request({method:'getPublicKey'})` response.
pub fn extract_public_key(value: &Value) -> Option<String> {
    let key = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["publicKey", "address"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str)),
        _ => None,
    }?;
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Pull the signed envelope out of a provider signing response.
///
/// Accepts a bare string, or an object carrying `signedTransaction`,
/// `signedTxXdr` or `tx`.
pub fn unwrap_signed_payload(value: &Value) -> Option<String> {
    let xdr = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => ["signedTransaction", "signedTxXdr", "tx"]
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str)),
        _ => None,
    }?;
    (!xdr.trim().is_empty()).then(|| xdr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn provider_request_wire_shape() {
        assert_eq!(
            serde_json::to_value(ProviderRequest::GetPublicKey).unwrap(),
            json!({"method": "getPublicKey"})
        );
        assert_eq!(
            serde_json::to_value(ProviderRequest::SignTransaction {
                transaction_xdr: "AAAA".into(),
                network_passphrase: "Test SDF Network ; September 2015".into(),
            })
            .unwrap(),
            json!({
                "method": "signTransaction",
                "params": {
                    "transactionXDR": "AAAA",
                    "networkPassphrase": "Test SDF Network ; September 2015"
                }
            })
        );
    }

    #[test]
    fn signed_payload_shapes() {
        assert_eq!(unwrap_signed_payload(&json!("XDR")).as_deref(), Some("XDR"));
        assert_eq!(
            unwrap_signed_payload(&json!({"signedTransaction": "X"})).as_deref(),
            Some("X")
        );
        assert_eq!(
            unwrap_signed_payload(&json!({"signedTxXdr": "Y"})).as_deref(),
            Some("Y")
        );
        assert_eq!(unwrap_signed_payload(&json!({"tx": "Z"})).as_deref(), Some("Z"));
        assert_eq!(unwrap_signed_payload(&json!({"other": "Z"})), None);
        assert_eq!(unwrap_signed_payload(&json!("")), None);
        assert_eq!(unwrap_signed_payload(&Value::Null), None);
    }

    #[test]
    fn public_key_shapes() {
        assert_eq!(extract_public_key(&json!("GABC")).as_deref(), Some("GABC"));
        assert_eq!(
            extract_public_key(&json!({"address": "GDEF"})).as_deref(),
            Some("GDEF")
        );
        assert_eq!(extract_public_key(&json!(42)), None);
    }
}
