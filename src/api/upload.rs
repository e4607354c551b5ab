// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Multipart upload endpoints.
//!
//! Both endpoints write the file to the local uploads directory first.
//! `/upload-ipfs` then forwards the bytes to the pinning service and, once
//! pinned, deletes the local copy. There is exactly one pinning attempt per
//! request.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{
    error::ApiError,
    state::AppState,
    upload::{gateway_url, StoredFile, UploadError},
};

/// Multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub ok: bool,
    pub file: StoredFile,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PinnedUploadResponse {
    pub ok: bool,
    pub cid: String,
    /// Public gateway URL for the CID
    pub gateway: String,
    /// Lowercase hex SHA-256 of the pinned bytes
    pub sha256: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadFailure {
    pub ok: bool,
    pub error: String,
    /// Local copy left on disk, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug)]
pub enum UploadRejection {
    Invalid(ApiError),
    Failed(StatusCode, UploadFailure),
}

impl IntoResponse for UploadRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Invalid(err) => err.into_response(),
            Self::Failed(status, body) => (status, Json(body)).into_response(),
        }
    }
}

impl From<ApiError> for UploadRejection {
    fn from(err: ApiError) -> Self {
        Self::Invalid(err)
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile => ApiError::bad_request(err.to_string()),
            UploadError::Io(_) => ApiError::internal(err.to_string()),
        }
    }
}

/// First part named `file` that carries a filename.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        return Ok((name, bytes));
    }
    Err(UploadError::MissingFile.into())
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "multipart/form-data", description = "Single `file` part"),
    tag = "Uploads",
    responses(
        (status = 200, body = UploadResponse),
        (status = 400, description = "no file uploaded")
    )
)]
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (name, bytes) = read_file_field(&mut multipart).await?;
    let file = state.uploads.store(&name, &bytes).await?;
    info!(filename = %file.filename, size = file.size, "File uploaded");
    Ok(Json(UploadResponse { ok: true, file }))
}

#[utoipa::path(
    post,
    path = "/upload-ipfs",
    request_body(content_type = "multipart/form-data", description = "Single `file` part"),
    tag = "Uploads",
    responses(
        (status = 200, body = PinnedUploadResponse),
        (status = 400, description = "no file uploaded"),
        (status = 500, description = "Pinning not configured; the local copy is kept", body = UploadFailure),
        (status = 502, description = "Pinning service failed; the local copy is kept", body = UploadFailure)
    )
)]
pub async fn upload_to_ipfs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PinnedUploadResponse>, UploadRejection> {
    let (name, bytes) = read_file_field(&mut multipart).await?;
    let file = state.uploads.store(&name, &bytes).await.map_err(ApiError::from)?;

    let Some(pinning) = state.pinning.as_ref() else {
        warn!(path = %file.path, "Pinning requested but no pinning credential is configured");
        return Err(UploadRejection::Failed(
            StatusCode::INTERNAL_SERVER_ERROR,
            UploadFailure {
                ok: false,
                error: "IPFS pinning is not configured (WEB3_STORAGE_TOKEN missing)".to_string(),
                path: Some(file.path),
            },
        ));
    };

    let cid = match pinning.pin(&file.filename, bytes.to_vec()).await {
        Ok(cid) => cid,
        Err(e) => {
            warn!(path = %file.path, error = %e, "Pinning failed");
            return Err(UploadRejection::Failed(
                StatusCode::BAD_GATEWAY,
                UploadFailure {
                    ok: false,
                    error: e.to_string(),
                    path: Some(file.path),
                },
            ));
        }
    };

    if let Err(e) = state.uploads.remove(&file).await {
        warn!(path = %file.path, error = %e, "Failed to remove local copy after pinning");
    }
    info!(cid = %cid, filename = %file.filename, "File pinned");

    Ok(Json(PinnedUploadResponse {
        ok: true,
        gateway: gateway_url(&state.config.gateway_url, &cid),
        cid,
        sha256: file.sha256,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::api::router;
    use crate::upload::pinning::tests::{RecordingPinning, TEST_CID};

    const BOUNDARY: &str = "blockhire-test-boundary";

    fn multipart_request(uri: &str, field: &str, filename: Option<&str>, content: &[u8]) -> Request<Body> {
        let disposition = match filename {
            Some(filename) => format!("form-data; name=\"{field}\"; filename=\"{filename}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// `<digits>-<digits>-<rest>` with a non-empty rest.
    fn is_randomized_name(name: &str) -> bool {
        let mut parts = name.splitn(3, '-');
        let numeric = |p: Option<&str>| p.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        numeric(parts.next()) && numeric(parts.next()) && parts.next().is_some_and(|rest| !rest.is_empty())
    }

    #[tokio::test]
    async fn upload_stores_file_under_randomized_name() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::default().with_uploads_dir(dir.path());

        let (status, body) = send(
            state,
            multipart_request("/upload", "file", Some("resume.pdf"), b"0123456789"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        let filename = body["file"]["filename"].as_str().unwrap();
        assert!(is_randomized_name(filename), "unexpected name {filename}");
        assert!(filename.ends_with("-resume.pdf"));
        assert_eq!(body["file"]["url"], format!("/uploads/{filename}"));

        let path = body["file"]["path"].as_str().unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"0123456789");
    }

    #[tokio::test]
    async fn upload_without_file_is_400() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::default().with_uploads_dir(dir.path());

        let (status, body) = send(
            state,
            multipart_request("/upload", "note", None, b"not a file"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "no file uploaded");
    }

    #[tokio::test]
    async fn ipfs_upload_without_credential_keeps_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::default().with_uploads_dir(dir.path());

        let (status, body) = send(
            state,
            multipart_request("/upload-ipfs", "file", Some("cv.txt"), b"hello"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        let path = body["path"].as_str().unwrap();
        assert!(Path::new(path).exists());
    }

    #[tokio::test]
    async fn pinned_upload_deletes_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let pinning = Arc::new(RecordingPinning::default());
        let state = AppState::default()
            .with_uploads_dir(dir.path())
            .with_pinning(Some(pinning.clone()));

        let (status, body) = send(
            state,
            multipart_request("/upload-ipfs", "file", Some("cv.txt"), b"hello"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cid"], TEST_CID);
        assert_eq!(body["gateway"], format!("https://w3s.link/ipfs/{TEST_CID}"));
        assert_eq!(pinning.pinned.lock().unwrap()[0].1, 5);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn pinning_failure_is_502_and_keeps_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let pinning = Arc::new(RecordingPinning {
            fail_pin: true,
            ..RecordingPinning::default()
        });
        let state = AppState::default()
            .with_uploads_dir(dir.path())
            .with_pinning(Some(pinning));

        let (status, body) = send(
            state,
            multipart_request("/upload-ipfs", "file", Some("cv.txt"), b"hello"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("bad token"));
        assert!(Path::new(body["path"].as_str().unwrap()).exists());
    }
}
