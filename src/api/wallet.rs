// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub public_key: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletStatus {
    pub connected: bool,
    pub public_key: Option<String>,
    /// Whether a wallet provider can currently be located.
    pub provider_available: bool,
}

#[utoipa::path(
    post,
    path = "/wallet/connect",
    tag = "Wallet",
    responses(
        (status = 200, body = ConnectResponse),
        (status = 502, description = "Provider exposes no usable key method"),
        (status = 503, description = "No wallet provider found")
    )
)]
pub async fn connect_wallet(
    State(state): State<AppState>,
) -> Result<Json<ConnectResponse>, ApiError> {
    let public_key = state.wallet.connect().await?;
    Ok(Json(ConnectResponse { public_key }))
}

#[utoipa::path(
    get,
    path = "/wallet",
    tag = "Wallet",
    responses((status = 200, body = WalletStatus))
)]
pub async fn wallet_status(State(state): State<AppState>) -> Json<WalletStatus> {
    let public_key = state.wallet.current_public_key().await;
    Json(WalletStatus {
        connected: public_key.is_some(),
        public_key,
        provider_available: state.wallet.is_provider_available(),
    })
}

#[utoipa::path(
    post,
    path = "/wallet/disconnect",
    tag = "Wallet",
    responses((status = 204))
)]
pub async fn disconnect_wallet(State(state): State<AppState>) -> StatusCode {
    state.wallet.disconnect().await;
    StatusCode::NO_CONTENT
}
