// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local uploads directory.

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use utoipa::ToSchema;

/// URL prefix under which the uploads directory is served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,

    #[error("Failed to store upload: {0}")]
    Io(#[from] io::Error),
}

/// A file written to the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoredFile {
    /// Location on disk
    pub path: String,
    pub filename: String,
    /// Path under which the server serves the file
    pub url: String,
    pub size: u64,
    /// Lowercase hex SHA-256 of the contents
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Write `bytes` under a randomized name derived from `original_name`.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile, UploadError> {
        self.ensure_dir().await?;
        let filename = randomized_filename(original_name);
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(StoredFile {
            path: path.to_string_lossy().into_owned(),
            url: format!("{UPLOADS_URL_PREFIX}/{filename}"),
            filename,
            size: bytes.len() as u64,
            sha256: hash_document(bytes),
        })
    }

    pub async fn remove(&self, file: &StoredFile) -> Result<(), UploadError> {
        tokio::fs::remove_file(&file.path).await?;
        Ok(())
    }
}

/// `<unix millis>-<random>-<name>`, with path components stripped from the
/// client-supplied name.
pub fn randomized_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..=1_000_000_000);
    format!("{millis}-{nonce}-{}", safe_name(original_name))
}

fn safe_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    match cleaned.as_str() {
        "" | "." | ".." => "file".to_string(),
        _ => cleaned,
    }
}

/// Lowercase hex SHA-256 digest.
pub fn hash_document(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// True when `bytes` no longer hash to `original_hash`.
pub fn detect_tampering(original_hash: &str, bytes: &[u8]) -> bool {
    !original_hash.trim().eq_ignore_ascii_case(&hash_document(bytes))
}
