// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed calls into the candidate, job and document-verification contracts.
//!
//! Each call loads the caller's account, builds a single `InvokeHostFunction`
//! envelope, has the wallet sign it and submits it. Footprint simulation is
//! not performed; the envelope goes out as built.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use super::envelope::{build_contract_call, ContractArg};
use super::horizon::Ledger;
use super::types::NetworkConfig;
use super::{now_unix, sign_and_submit, TxError};
use crate::config::ContractIds;
use crate::upload::{hash_document, pin_then, PinningService};
use crate::wallet::WalletSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationAction {
    Verify,
    Reject,
    Accept,
}

/// A fully-typed contract invocation, ready to be built into an envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract_id: String,
    pub function: &'static str,
    pub args: Vec<ContractArg>,
}

pub struct ContractClient {
    session: Arc<WalletSession>,
    ledger: Arc<dyn Ledger>,
    network: NetworkConfig,
    contracts: ContractIds,
}

impl ContractClient {
    pub fn new(
        session: Arc<WalletSession>,
        ledger: Arc<dyn Ledger>,
        network: NetworkConfig,
        contracts: ContractIds,
    ) -> Self {
        Self {
            session,
            ledger,
            network,
            contracts,
        }
    }

    pub fn register_profile_call(
        &self,
        wallet: &str,
        profile_cid: &str,
        skills_hash: &str,
    ) -> Result<ContractCall, TxError> {
        Ok(ContractCall {
            contract_id: configured(&self.contracts.candidate, "candidate")?,
            function: "register_profile",
            args: vec![
                ContractArg::Address(wallet.to_string()),
                ContractArg::String(profile_cid.to_string()),
                hex_bytes(skills_hash)?,
            ],
        })
    }

    pub fn add_document_call(
        &self,
        wallet: &str,
        doc_hash: &str,
        doc_type: &str,
        cid: &str,
    ) -> Result<ContractCall, TxError> {
        Ok(ContractCall {
            contract_id: configured(&self.contracts.candidate, "candidate")?,
            function: "add_document",
            args: vec![
                ContractArg::Address(wallet.to_string()),
                hex_bytes(doc_hash)?,
                ContractArg::String(doc_type.to_string()),
                ContractArg::String(cid.to_string()),
            ],
        })
    }

    pub fn post_job_call(
        &self,
        employer: &str,
        title: &str,
        details_cid: &str,
        salary_range: &str,
    ) -> Result<ContractCall, TxError> {
        Ok(ContractCall {
            contract_id: configured(&self.contracts.job, "job")?,
            function: "post_job",
            args: vec![
                ContractArg::Address(employer.to_string()),
                ContractArg::String(title.to_string()),
                ContractArg::String(details_cid.to_string()),
                ContractArg::String(salary_range.to_string()),
            ],
        })
    }

    pub fn apply_to_job_call(
        &self,
        candidate: &str,
        job_id: u64,
        profile_cid: &str,
        cover_letter_cid: &str,
    ) -> Result<ContractCall, TxError> {
        Ok(ContractCall {
            contract_id: configured(&self.contracts.job, "job")?,
            function: "apply_to_job",
            args: vec![
                ContractArg::Address(candidate.to_string()),
                ContractArg::U64(job_id),
                ContractArg::String(profile_cid.to_string()),
                ContractArg::String(cover_letter_cid.to_string()),
            ],
        })
    }

    pub fn verify_document_call(
        &self,
        employer: &str,
        candidate: &str,
        doc_hash: &str,
        doc_type: &str,
        is_valid: bool,
        notes: &str,
    ) -> Result<ContractCall, TxError> {
        Ok(ContractCall {
            contract_id: configured(&self.contracts.doc_verification, "document verification")?,
            function: "verify_document",
            args: vec![
                ContractArg::Address(employer.to_string()),
                ContractArg::Address(candidate.to_string()),
                hex_bytes(doc_hash)?,
                ContractArg::String(doc_type.to_string()),
                ContractArg::Bool(is_valid),
                ContractArg::String(notes.to_string()),
            ],
        })
    }

    pub fn update_application_status_call(
        &self,
        employer: &str,
        application_id: u64,
        action: ApplicationAction,
        notes: Option<&str>,
    ) -> Result<ContractCall, TxError> {
        let mut args = vec![
            ContractArg::Address(employer.to_string()),
            ContractArg::U64(application_id),
        ];
        let function = match action {
            ApplicationAction::Verify => {
                args.push(ContractArg::String(notes.unwrap_or("Verified").to_string()));
                "verify_application"
            }
            ApplicationAction::Reject => {
                args.push(ContractArg::String(notes.unwrap_or("Rejected").to_string()));
                "reject_application"
            }
            ApplicationAction::Accept => "accept_application",
        };
        Ok(ContractCall {
            contract_id: configured(&self.contracts.job, "job")?,
            function,
            args,
        })
    }

    /// Build, sign and submit `call` from `caller`'s account.
    pub async fn submit(&self, caller: &str, call: ContractCall) -> Result<String, TxError> {
        let account = self.ledger.load_account(caller).await?;
        let unsigned = build_contract_call(
            &account,
            &call.contract_id,
            call.function,
            &call.args,
            now_unix(),
        )?;
        let hash =
            sign_and_submit(&self.session, self.ledger.as_ref(), &self.network, &unsigned).await?;
        info!(
            hash = %hash,
            contract_id = %call.contract_id,
            function = call.function,
            "Contract call submitted"
        );
        Ok(hash)
    }

    pub async fn register_profile(
        &self,
        wallet: &str,
        profile_cid: &str,
        skills_hash: &str,
    ) -> Result<String, TxError> {
        let call = self.register_profile_call(wallet, profile_cid, skills_hash)?;
        self.submit(wallet, call).await
    }

    pub async fn add_document(
        &self,
        wallet: &str,
        doc_hash: &str,
        doc_type: &str,
        cid: &str,
    ) -> Result<String, TxError> {
        let call = self.add_document_call(wallet, doc_hash, doc_type, cid)?;
        self.submit(wallet, call).await
    }

    pub async fn post_job(
        &self,
        employer: &str,
        title: &str,
        details_cid: &str,
        salary_range: &str,
    ) -> Result<String, TxError> {
        let call = self.post_job_call(employer, title, details_cid, salary_range)?;
        self.submit(employer, call).await
    }

    pub async fn apply_to_job(
        &self,
        candidate: &str,
        job_id: u64,
        profile_cid: &str,
        cover_letter_cid: &str,
    ) -> Result<String, TxError> {
        let call = self.apply_to_job_call(candidate, job_id, profile_cid, cover_letter_cid)?;
        self.submit(candidate, call).await
    }

    pub async fn verify_document(
        &self,
        employer: &str,
        candidate: &str,
        doc_hash: &str,
        doc_type: &str,
        is_valid: bool,
        notes: &str,
    ) -> Result<String, TxError> {
        let call =
            self.verify_document_call(employer, candidate, doc_hash, doc_type, is_valid, notes)?;
        self.submit(employer, call).await
    }

    pub async fn update_application_status(
        &self,
        employer: &str,
        application_id: u64,
        action: ApplicationAction,
        notes: Option<&str>,
    ) -> Result<String, TxError> {
        let call = self.update_application_status_call(employer, application_id, action, notes)?;
        self.submit(employer, call).await
    }

    /// Pin a document and anchor its hash on-chain. The pin is removed if
    /// the ledger step fails. Returns `(cid, transaction hash)`.
    pub async fn add_document_from_upload(
        &self,
        pinning: &dyn PinningService,
        wallet: &str,
        filename: &str,
        doc_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(String, String), TxError> {
        let doc_hash = hash_document(&bytes);
        pin_then(pinning, filename, bytes, |cid| async move {
            self.add_document(wallet, &doc_hash, doc_type, &cid).await
        })
        .await
    }
}

fn configured(contract_id: &str, name: &str) -> Result<String, TxError> {
    let id = contract_id.trim();
    if id.is_empty() {
        return Err(TxError::InvalidRequest(format!(
            "{name} contract id is not configured"
        )));
    }
    Ok(id.to_string())
}

fn hex_bytes(value: &str) -> Result<ContractArg, TxError> {
    hex::decode(value.trim())
        .map(ContractArg::Bytes)
        .map_err(|_| TxError::InvalidRequest(format!("not a hex digest: {value}")))
}
