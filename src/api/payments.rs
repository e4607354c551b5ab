// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaymentRequest {
    /// Decimal lumens, up to 7 fractional digits
    pub amount: String,
    /// Destination account (`G...`)
    pub destination: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct PaymentResponse {
    pub hash: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct PaymentXdrResponse {
    pub xdr: String,
}

/// Build a payment from the connected wallet, have it signed, and submit it.
#[utoipa::path(
    post,
    path = "/payments",
    request_body = PaymentRequest,
    tag = "Payments",
    responses(
        (status = 200, body = PaymentResponse),
        (status = 400, description = "Invalid amount or destination"),
        (status = 403, description = "Signature declined in the wallet"),
        (status = 502, description = "Wallet or ledger failure"),
        (status = 503, description = "No wallet provider found")
    )
)]
pub async fn submit_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let hash = state
        .payments()
        .build_and_submit_payment(&request.amount, &request.destination)
        .await
        .inspect_err(|e| warn!(error = %e, destination = %request.destination, "Payment failed"))?;
    Ok(Json(PaymentResponse { hash }))
}

/// Build the unsigned payment envelope without signing or submitting it.
#[utoipa::path(
    post,
    path = "/payments/xdr",
    request_body = PaymentRequest,
    tag = "Payments",
    responses(
        (status = 200, body = PaymentXdrResponse),
        (status = 400, description = "Invalid amount or destination"),
        (status = 502, description = "Ledger failure")
    )
)]
pub async fn build_payment_xdr(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentXdrResponse>, ApiError> {
    let unsigned = state
        .payments()
        .build_payment_xdr(&request.amount, &request.destination)
        .await?;
    Ok(Json(PaymentXdrResponse {
        xdr: unsigned.xdr().to_string(),
    }))
}
