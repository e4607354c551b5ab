// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::state::AppState;

/// Whether the Stellar CLI used by `/invoke` can be run.
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct CliStatus {
    pub ok: bool,
    /// `--version` output when reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stellar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Runs `<cli> --version`. Always answers 200; `ok` carries the result.
#[utoipa::path(
    get,
    path = "/status",
    tag = "Health",
    responses((status = 200, body = CliStatus))
)]
pub async fn cli_status(State(state): State<AppState>) -> Json<CliStatus> {
    let program = &state.config.stellar_cli;
    let status = match state.runner.run(program, &["--version".to_string()]).await {
        Ok(output) if output.success => CliStatus {
            ok: true,
            stellar: Some(output.stdout.trim().to_string()),
            error: None,
        },
        Ok(output) => CliStatus {
            ok: false,
            stellar: None,
            error: Some(if output.stderr.trim().is_empty() {
                format!("{program} --version exited with {:?}", output.code)
            } else {
                output.stderr
            }),
        },
        Err(e) => CliStatus {
            ok: false,
            stellar: None,
            error: Some(e.to_string()),
        },
    };
    debug!(ok = status.ok, "CLI status checked");
    Json(status)
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
