// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    invoke::{InvocationRequest, InvokeRequest},
    state::AppState,
};

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct InvokeSuccess {
    pub ok: bool,
    /// CLI standard output
    pub out: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct InvokeFailure {
    pub ok: bool,
    /// CLI standard error, or the failure reason when it is empty
    pub error: String,
    /// The command line that was run, for display
    pub cmd: String,
}

#[derive(Debug)]
pub enum InvokeRejection {
    Invalid(ApiError),
    Failed(InvokeFailure),
}

impl IntoResponse for InvokeRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(err) => err.into_response(),
            Self::Failed(body) => (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response(),
        }
    }
}

/// Run `contract invoke` through the Stellar CLI.
#[utoipa::path(
    post,
    path = "/invoke",
    request_body = InvokeRequest,
    tag = "Contracts",
    responses(
        (status = 200, body = InvokeSuccess),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, body = InvokeFailure)
    )
)]
pub async fn invoke_contract(
    State(state): State<AppState>,
    Json(body): Json<InvokeRequest>,
) -> Result<Json<InvokeSuccess>, InvokeRejection> {
    let request = InvocationRequest::from_body(body, &state.invoke_defaults())
        .map_err(|e| InvokeRejection::Invalid(ApiError::bad_request(e.to_string())))?;
    let cli = request.to_cli(&state.config.stellar_cli);

    let failure = |error: String| {
        warn!(cmd = %cli.display, error = %error, "Contract invocation failed");
        InvokeRejection::Failed(InvokeFailure {
            ok: false,
            error,
            cmd: cli.display.clone(),
        })
    };

    let output = match state.runner.run(&cli.program, &cli.args).await {
        Ok(output) => output,
        Err(e) => return Err(failure(e.to_string())),
    };
    if !output.success {
        let error = if output.stderr.trim().is_empty() {
            match output.code {
                Some(code) => format!("Command failed with exit code {code}"),
                None => "Command terminated by signal".to_string(),
            }
        } else {
            output.stderr
        };
        return Err(failure(error));
    }

    info!(
        contract = %request.contract_id,
        function = %request.function_name,
        "Contract invoked"
    );
    Ok(Json(InvokeSuccess {
        ok: true,
        out: output.stdout,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::invoke::testing::CannedRunner;
    use crate::invoke::InvokeError;
    use serde_json::json;

    fn body(value: serde_json::Value) -> InvokeRequest {
        serde_json::from_value(value).unwrap()
    }

    fn state(runner: Arc<CannedRunner>) -> AppState {
        AppState::default().with_runner(runner)
    }

    #[tokio::test]
    async fn success_returns_stdout() {
        let runner = Arc::new(CannedRunner::succeeding("\"ok\"\n"));
        let Json(response) = invoke_contract(
            State(state(runner.clone())),
            Json(body(json!({"contractId": "C123", "functionName": "hello"}))),
        )
        .await
        .expect("invoke succeeds");

        assert_eq!(
            response,
            InvokeSuccess {
                ok: true,
                out: "\"ok\"\n".into()
            }
        );
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].0, "stellar");
        assert_eq!(&calls[0].1[..2], ["contract", "invoke"]);
    }

    #[tokio::test]
    async fn failure_reports_stderr_and_escaped_command() {
        let runner = Arc::new(CannedRunner::failing("error: contract not found"));
        let rejection = invoke_contract(
            State(state(runner.clone())),
            Json(body(json!({
                "contractId": "C123",
                "functionName": "hello",
                "args": [{"name": "to/", "value": "a\"b"}]
            }))),
        )
        .await
        .unwrap_err();

        let InvokeRejection::Failed(failure) = rejection else {
            panic!("expected a CLI failure");
        };
        assert!(!failure.ok);
        assert_eq!(failure.error, "error: contract not found");
        assert_eq!(
            failure.cmd,
            r#"stellar contract invoke --id C123 --source blockhire-deployer -n testnet -- hello --to "a\"b""#
        );
        // The process itself received the raw value.
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].1.last().map(String::as_str), Some("a\"b"));
    }

    #[tokio::test]
    async fn missing_fields_never_run_the_cli() {
        let runner = Arc::new(CannedRunner::succeeding(""));
        let rejection = invoke_contract(
            State(state(runner.clone())),
            Json(body(json!({"contractId": "C123"}))),
        )
        .await
        .unwrap_err();

        let InvokeRejection::Invalid(err) = rejection else {
            panic!("expected a validation error");
        };
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "missing contractId or functionName");
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn runner_errors_become_500() {
        let runner = Arc::new(CannedRunner::with(Err(InvokeError::OutputLimit(16))));
        let response = invoke_contract(
            State(state(runner)),
            Json(body(json!({"contractId": "C1", "functionName": "f"}))),
        )
        .await
        .unwrap_err()
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
