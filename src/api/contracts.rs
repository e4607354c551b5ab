// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contract calls signed by the connected wallet.
//!
//! The caller is always the wallet's current public key. Every handler
//! answers with the submitted transaction hash.

use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    api::upload::FILE_FIELD,
    error::ApiError,
    state::AppState,
    stellar::ApplicationAction,
    upload::{gateway_url, hash_document, UploadError},
};

/// Multipart field naming the document kind.
pub const DOC_TYPE_FIELD: &str = "docType";

const DEFAULT_DOC_TYPE: &str = "document";

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct ContractTxResponse {
    pub hash: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnchoredDocumentResponse {
    pub ok: bool,
    pub cid: String,
    pub gateway: String,
    /// Lowercase hex SHA-256 anchored on-chain
    pub sha256: String,
    /// Transaction hash of the `add_document` call
    pub hash: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileRequest {
    pub profile_cid: String,
    /// Hex SHA-256 of the skills list
    pub skills_hash: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostJobRequest {
    pub title: String,
    pub details_cid: String,
    pub salary_range: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyToJobRequest {
    pub profile_cid: String,
    pub cover_letter_cid: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDocumentOnChainRequest {
    /// Candidate account (`G...`)
    pub candidate: String,
    pub doc_hash: String,
    pub doc_type: String,
    pub is_valid: bool,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ApplicationStatusRequest {
    pub action: ApplicationAction,
    pub notes: Option<String>,
}

#[utoipa::path(
    post,
    path = "/contracts/profile",
    request_body = RegisterProfileRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = ContractTxResponse),
        (status = 400, description = "Contract not configured or invalid hash"),
        (status = 502, description = "Wallet or ledger failure"),
        (status = 503, description = "No wallet provider found")
    )
)]
pub async fn register_profile(
    State(state): State<AppState>,
    Json(request): Json<RegisterProfileRequest>,
) -> Result<Json<ContractTxResponse>, ApiError> {
    let wallet = state.wallet.public_key().await?;
    let hash = state
        .contracts()
        .register_profile(&wallet, &request.profile_cid, &request.skills_hash)
        .await?;
    Ok(Json(ContractTxResponse { hash }))
}

#[utoipa::path(
    post,
    path = "/contracts/jobs",
    request_body = PostJobRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = ContractTxResponse),
        (status = 400, description = "Contract not configured"),
        (status = 502, description = "Wallet or ledger failure")
    )
)]
pub async fn post_job(
    State(state): State<AppState>,
    Json(request): Json<PostJobRequest>,
) -> Result<Json<ContractTxResponse>, ApiError> {
    let employer = state.wallet.public_key().await?;
    let hash = state
        .contracts()
        .post_job(&employer, &request.title, &request.details_cid, &request.salary_range)
        .await?;
    Ok(Json(ContractTxResponse { hash }))
}

#[utoipa::path(
    post,
    path = "/contracts/jobs/{id}/apply",
    params(("id" = u64, Path, description = "On-chain job id")),
    request_body = ApplyToJobRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = ContractTxResponse),
        (status = 400, description = "Contract not configured"),
        (status = 502, description = "Wallet or ledger failure")
    )
)]
pub async fn apply_to_job(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
    Json(request): Json<ApplyToJobRequest>,
) -> Result<Json<ContractTxResponse>, ApiError> {
    let candidate = state.wallet.public_key().await?;
    let hash = state
        .contracts()
        .apply_to_job(&candidate, job_id, &request.profile_cid, &request.cover_letter_cid)
        .await?;
    Ok(Json(ContractTxResponse { hash }))
}

#[utoipa::path(
    post,
    path = "/contracts/documents/verify",
    request_body = VerifyDocumentOnChainRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = ContractTxResponse),
        (status = 400, description = "Contract not configured or invalid hash"),
        (status = 502, description = "Wallet or ledger failure")
    )
)]
pub async fn verify_document_on_chain(
    State(state): State<AppState>,
    Json(request): Json<VerifyDocumentOnChainRequest>,
) -> Result<Json<ContractTxResponse>, ApiError> {
    let employer = state.wallet.public_key().await?;
    let hash = state
        .contracts()
        .verify_document(
            &employer,
            &request.candidate,
            &request.doc_hash,
            &request.doc_type,
            request.is_valid,
            &request.notes,
        )
        .await?;
    Ok(Json(ContractTxResponse { hash }))
}

#[utoipa::path(
    post,
    path = "/contracts/applications/{id}/status",
    params(("id" = u64, Path, description = "On-chain application id")),
    request_body = ApplicationStatusRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = ContractTxResponse),
        (status = 400, description = "Contract not configured"),
        (status = 502, description = "Wallet or ledger failure")
    )
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(application_id): Path<u64>,
    Json(request): Json<ApplicationStatusRequest>,
) -> Result<Json<ContractTxResponse>, ApiError> {
    let employer = state.wallet.public_key().await?;
    let hash = state
        .contracts()
        .update_application_status(&employer, application_id, request.action, request.notes.as_deref())
        .await?;
    Ok(Json(ContractTxResponse { hash }))
}

/// The `file` part plus an optional `docType` text part, in any order.
async fn read_document_form(multipart: &mut Multipart) -> Result<(String, Bytes, String), ApiError> {
    let mut file = None;
    let mut doc_type = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some(FILE_FIELD) if file.is_none() => {
                let Some(name) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                file = Some((name, bytes));
            }
            Some(DOC_TYPE_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.body_text()))?;
                doc_type = Some(text.trim().to_string()).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }
    let (name, bytes) = file.ok_or(UploadError::MissingFile)?;
    Ok((name, bytes, doc_type.unwrap_or_else(|| DEFAULT_DOC_TYPE.to_string())))
}

/// Pin a document and record its hash on the candidate contract.
///
/// If the contract call fails the pin is removed again, so no unanchored
/// pin is left behind.
#[utoipa::path(
    post,
    path = "/contracts/documents",
    request_body(content_type = "multipart/form-data", description = "`file` part and optional `docType`"),
    tag = "Contracts",
    responses(
        (status = 200, body = AnchoredDocumentResponse),
        (status = 400, description = "no file uploaded, or contract not configured"),
        (status = 502, description = "Pinning, wallet or ledger failure"),
        (status = 503, description = "Pinning not configured or no wallet provider")
    )
)]
pub async fn anchor_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnchoredDocumentResponse>, ApiError> {
    let (name, bytes, doc_type) = read_document_form(&mut multipart).await?;
    let Some(pinning) = state.pinning.as_ref() else {
        return Err(ApiError::service_unavailable(
            "IPFS pinning is not configured (WEB3_STORAGE_TOKEN missing)",
        ));
    };
    let wallet = state.wallet.public_key().await?;
    let sha256 = hash_document(&bytes);

    let (cid, hash) = state
        .contracts()
        .add_document_from_upload(pinning.as_ref(), &wallet, &name, &doc_type, bytes.to_vec())
        .await
        .inspect_err(|e| warn!(error = %e, filename = %name, "Document anchoring failed"))?;
    info!(cid = %cid, hash = %hash, doc_type = %doc_type, "Document anchored");

    Ok(Json(AnchoredDocumentResponse {
        ok: true,
        gateway: gateway_url(&state.config.gateway_url, &cid),
        cid,
        sha256,
        hash,
    }))
}
