// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! File uploads: local storage and IPFS pinning.

pub mod pinning;
pub mod storage;

pub use pinning::{gateway_url, pin_then, PinningError, PinningService, Web3StorageClient};
pub use storage::{
    detect_tampering, hash_document, randomized_filename, StoredFile, UploadError, UploadStore,
};
