// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Scripted wallet provider shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::provider::{Capabilities, ProviderError, ProviderRequest, WalletHandle};

#[derive(Debug, Clone)]
pub enum SignBehavior {
    /// Hand back the unsigned XDR as if it had been signed.
    Echo,
    Respond(Value),
    Fail(ProviderError),
}

pub struct ScriptedWallet {
    caps: Capabilities,
    public_key: String,
    sign: SignBehavior,
    request_sign: SignBehavior,
    calls: Mutex<Vec<&'static str>>,
}

impl ScriptedWallet {
    pub fn new(caps: Capabilities, public_key: &str) -> Self {
        Self {
            caps,
            public_key: public_key.to_string(),
            sign: SignBehavior::Echo,
            request_sign: SignBehavior::Echo,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider implementing `getPublicKey` and `signTransaction`, echoing
    /// envelopes back unchanged.
    pub fn signer(public_key: &str) -> Self {
        Self::new(
            Capabilities {
                get_public_key: true,
                sign_transaction: true,
                ..Capabilities::default()
            },
            public_key,
        )
    }

    pub fn with_sign(mut self, behavior: SignBehavior) -> Self {
        self.sign = behavior;
        self
    }

    pub fn with_request_sign(mut self, behavior: SignBehavior) -> Self {
        self.request_sign = behavior;
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

fn respond(behavior: &SignBehavior, xdr: &str) -> Result<Value, ProviderError> {
    match behavior {
        SignBehavior::Echo => Ok(Value::String(xdr.to_string())),
        SignBehavior::Respond(value) => Ok(value.clone()),
        SignBehavior::Fail(e) => Err(e.clone()),
    }
}

#[async_trait]
impl WalletHandle for ScriptedWallet {
    fn capabilities(&self) -> Capabilities {
        self.caps
    }

    async fn connect(&self) -> Result<(), ProviderError> {
        self.record("connect");
        Ok(())
    }

    async fn get_public_key(&self) -> Result<String, ProviderError> {
        self.record("getPublicKey");
        Ok(self.public_key.clone())
    }

    async fn request(&self, request: ProviderRequest) -> Result<Value, ProviderError> {
        match request {
            ProviderRequest::GetPublicKey => {
                self.record("request:getPublicKey");
                Ok(Value::String(self.public_key.clone()))
            }
            ProviderRequest::SignTransaction {
                transaction_xdr, ..
            } => {
                self.record("request:signTransaction");
                respond(&self.request_sign, &transaction_xdr)
            }
        }
    }

    async fn sign_transaction(
        &self,
        envelope_xdr: &str,
        _network_passphrase: &str,
    ) -> Result<Value, ProviderError> {
        self.record("signTransaction");
        respond(&self.sign, envelope_xdr)
    }
}
