// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Horizon ledger access: account snapshots and envelope submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::envelope::SignedEnvelope;
use super::types::Account;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Horizon request failed: {0}")]
    Request(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Horizon submit failed: {0}")]
    Submit(String),

    #[error("Horizon response was invalid: {0}")]
    InvalidResponse(String),
}

/// Read and write access to the ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn load_account(&self, account_id: &str) -> Result<Account, LedgerError>;

    /// Submit a signed envelope and return the transaction hash.
    async fn submit_transaction(&self, envelope: &SignedEnvelope) -> Result<String, LedgerError>;
}

#[derive(Debug, Clone)]
pub struct HorizonClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    account_id: String,
    sequence: String,
    #[serde(default)]
    balances: Vec<BalanceLine>,
}

#[derive(Debug, Deserialize)]
struct BalanceLine {
    asset_type: String,
    balance: String,
}

impl HorizonClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LedgerError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| LedgerError::Request(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Ledger for HorizonClient {
    async fn load_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        let response = self
            .http
            .get(self.url(&format!("/accounts/{account_id}")))
            .send()
            .await
            .map_err(|e| LedgerError::Request(format!("GET account failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LedgerError::AccountNotFound(account_id.to_string()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Request(format!(
                "GET account returned {status}: {body}"
            )));
        }

        let body: AccountResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("account JSON: {e}")))?;
        let account = account_from_response(body)?;
        debug!(account_id = %account.account_id, sequence = account.sequence, "Loaded account");
        Ok(account)
    }

    async fn submit_transaction(&self, envelope: &SignedEnvelope) -> Result<String, LedgerError> {
        let response = self
            .http
            .post(self.url("/transactions"))
            .form(&[("tx", envelope.xdr())])
            .send()
            .await
            .map_err(|e| LedgerError::Request(format!("POST transaction failed: {e}")))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Submit(body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::InvalidResponse(format!("submit JSON: {e}")))?;
        let hash = hash_from_submit_response(&body)?;
        info!(hash = %hash, "Transaction submitted");
        Ok(hash)
    }
}

fn account_from_response(body: AccountResponse) -> Result<Account, LedgerError> {
    let sequence = body.sequence.parse::<i64>().map_err(|_| {
        LedgerError::InvalidResponse(format!("sequence is not a number: {}", body.sequence))
    })?;
    let native_balance = body
        .balances
        .into_iter()
        .find(|line| line.asset_type == "native")
        .map(|line| line.balance);

    Ok(Account {
        account_id: body.account_id,
        sequence,
        native_balance,
    })
}

fn hash_from_submit_response(body: &Value) -> Result<String, LedgerError> {
    body.get("hash")
        .and_then(Value::as_str)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LedgerError::InvalidResponse("missing hash in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_snapshot_from_horizon_json() {
        let body: AccountResponse = serde_json::from_value(json!({
            "id": "GABC",
            "account_id": "GABC",
            "sequence": "4113874144002048",
            "balances": [
                {"asset_type": "credit_alphanum4", "asset_code": "USDC", "balance": "5.0000000"},
                {"asset_type": "native", "balance": "9999.9999900"}
            ]
        }))
        .unwrap();

        let account = account_from_response(body).unwrap();
        assert_eq!(account.account_id, "GABC");
        assert_eq!(account.sequence, 4_113_874_144_002_048);
        assert_eq!(account.native_balance.as_deref(), Some("9999.9999900"));
    }

    #[test]
    fn non_numeric_sequence_is_rejected() {
        let body: AccountResponse = serde_json::from_value(json!({
            "account_id": "GABC",
            "sequence": "abc"
        }))
        .unwrap();
        assert!(matches!(
            account_from_response(body),
            Err(LedgerError::InvalidResponse(_))
        ));
    }

    #[test]
    fn submit_hash_is_required() {
        assert_eq!(
            hash_from_submit_response(&json!({"hash": "deadbeef", "successful": true})).unwrap(),
            "deadbeef"
        );
        assert!(hash_from_submit_response(&json!({"successful": true})).is_err());
    }

    #[test]
    fn submit_failure_surfaces_body() {
        let err = LedgerError::Submit(r#"{"title":"Transaction Failed"}"#.into());
        assert_eq!(
            err.to_string(),
            r#"Horizon submit failed: {"title":"Transaction Failed"}"#
        );
    }
}
