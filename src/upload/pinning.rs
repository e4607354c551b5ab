// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Content pinning (IPFS) and the pin-then-act compensation flow.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use crate::config::PinningConfig;

#[derive(Debug, thiserror::Error)]
pub enum PinningError {
    #[error("Pinning request failed: {0}")]
    Request(String),

    #[error("Pinning service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Pinning response was invalid: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait PinningService: Send + Sync {
    /// Upload `bytes` and return the content identifier.
    async fn pin(&self, filename: &str, bytes: Vec<u8>) -> Result<String, PinningError>;

    async fn unpin(&self, cid: &str) -> Result<(), PinningError>;
}

/// web3.storage HTTP API.
#[derive(Debug, Clone)]
pub struct Web3StorageClient {
    upload_url: Url,
    token: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

impl Web3StorageClient {
    pub fn new(config: &PinningConfig) -> Result<Self, PinningError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| PinningError::Request(format!("failed to build HTTP client: {e}")))?;
        let upload_url = Url::parse(&config.api_url)
            .map_err(|e| PinningError::Request(format!("invalid pinning URL {}: {e}", config.api_url)))?;
        Ok(Self {
            upload_url,
            token: config.token.clone(),
            http,
        })
    }

    /// `DELETE {origin}/user/uploads/{cid}`, next to the upload endpoint.
    fn unpin_url(&self, cid: &str) -> String {
        let mut url = self.upload_url.clone();
        let path = url.path().trim_end_matches('/');
        let base = path.strip_suffix("/upload").unwrap_or(path).to_string();
        url.set_path(&format!("{base}/user/uploads/{cid}"));
        url.into()
    }
}

#[async_trait]
impl PinningService for Web3StorageClient {
    async fn pin(&self, filename: &str, bytes: Vec<u8>) -> Result<String, PinningError> {
        let size = bytes.len();
        let response = self
            .http
            .post(self.upload_url.clone())
            .bearer_auth(&self.token)
            .header("X-Name", filename)
            .body(bytes)
            .send()
            .await
            .map_err(|e| PinningError::Request(format!("POST upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Upstream { status, body });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| PinningError::InvalidResponse(e.to_string()))?;
        info!(cid = %body.cid, size, "Pinned upload");
        Ok(body.cid)
    }

    async fn unpin(&self, cid: &str) -> Result<(), PinningError> {
        let response = self
            .http
            .delete(self.unpin_url(cid))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| PinningError::Request(format!("DELETE upload failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PinningError::Upstream { status, body });
        }
        info!(cid, "Unpinned upload");
        Ok(())
    }
}

/// Public gateway URL for a content identifier.
pub fn gateway_url(gateway_base: &str, cid: &str) -> String {
    format!("{}/{cid}", gateway_base.trim_end_matches('/'))
}

/// Pin `bytes`, then run `step` with the resulting CID.
///
/// If `step` fails the pin is removed again and the step's error is
/// returned. A failed unpin is logged; it never replaces the step's error.
pub async fn pin_then<F, Fut, T, E>(
    pinning: &dyn PinningService,
    filename: &str,
    bytes: Vec<u8>,
    step: F,
) -> Result<(String, T), E>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<PinningError>,
{
    let cid = pinning.pin(filename, bytes).await?;
    match step(cid.clone()).await {
        Ok(value) => Ok((cid, value)),
        Err(err) => {
            if let Err(unpin_err) = pinning.unpin(&cid).await {
                warn!(cid = %cid, error = %unpin_err, "Failed to remove orphaned pin");
            } else {
                info!(cid = %cid, "Removed pin after dependent step failed");
            }
            Err(err)
        }
    }
}
