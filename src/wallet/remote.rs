// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-shaped wallet provider reached over HTTP.
//!
//! The endpoint receives the same `{"method", "params"}` body an injected
//! provider's `request()` gets, and answers `{"result": ...}` or
//! `{"error": {"code", "message"}}`. Error code `declined` means the user
//! rejected the prompt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::provider::{Capabilities, ProviderError, ProviderRequest, WalletHandle};

/// Signing may wait on a person approving in their wallet.
const REMOTE_WALLET_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct RemoteWalletHandle {
    url: String,
    http: Client,
}

impl RemoteWalletHandle {
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(REMOTE_WALLET_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Failed(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WalletHandle for RemoteWalletHandle {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            request: true,
            ..Capabilities::default()
        }
    }

    async fn request(&self, request: ProviderRequest) -> Result<Value, ProviderError> {
        debug!(url = %self.url, ?request, "Calling remote wallet provider");
        let response = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Failed(format!("remote wallet unreachable: {e}")))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::Failed(format!("remote wallet returned {status}: {e}")))?;
        interpret_reply(status, body)
    }
}

/// A non-success status is always a failure, keeping the body's error when
/// it carries one.
fn interpret_reply(status: StatusCode, body: Value) -> Result<Value, ProviderError> {
    let result = interpret_response(body);
    if status.is_success() {
        return result;
    }
    match result {
        Err(err) => Err(err),
        Ok(_) => Err(ProviderError::Failed(format!("remote wallet returned {status}"))),
    }
}

fn interpret_response(body: Value) -> Result<Value, ProviderError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_str).unwrap_or_default();
        if code.eq_ignore_ascii_case("declined") {
            return Err(ProviderError::Declined);
        }
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(ProviderError::Failed(message));
    }

    match body {
        Value::Object(mut map) => Ok(map.remove("result").unwrap_or(Value::Null)),
        other => Ok(other),
    }
}
