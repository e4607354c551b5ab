// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory ledger double shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::envelope::SignedEnvelope;
use super::horizon::{Ledger, LedgerError};
use super::types::Account;

#[derive(Default)]
pub struct MockLedger {
    account: Option<Account>,
    submit_error: Option<String>,
    loads: Mutex<Vec<String>>,
    submitted: Mutex<Vec<String>>,
}

impl MockLedger {
    pub fn with_account(account: Account) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }

    /// Every account lookup fails.
    pub fn without_accounts() -> Self {
        Self::default()
    }

    pub fn failing_submit(mut self, body: &str) -> Self {
        self.submit_error = Some(body.to_string());
        self
    }

    pub fn loads(&self) -> Vec<String> {
        self.loads.lock().unwrap().clone()
    }

    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn load_account(&self, account_id: &str) -> Result<Account, LedgerError> {
        self.loads.lock().unwrap().push(account_id.to_string());
        match &self.account {
            Some(account) => Ok(Account {
                account_id: account_id.to_string(),
                ..account.clone()
            }),
            None => Err(LedgerError::AccountNotFound(account_id.to_string())),
        }
    }

    async fn submit_transaction(&self, envelope: &SignedEnvelope) -> Result<String, LedgerError> {
        if let Some(body) = &self.submit_error {
            return Err(LedgerError::Submit(body.clone()));
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(envelope.xdr().to_string());
        Ok(format!("hash-{}", submitted.len()))
    }
}
