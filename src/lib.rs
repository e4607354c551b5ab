// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BlockHire Server - Recruitment Backend with Stellar Wallet Integration
//!
//! HTTP backend for the BlockHire dashboards: a local upload and IPFS pinning
//! proxy, a contract invocation proxy over the Stellar CLI, a wallet session
//! that signs payments and contract calls, and mock recruitment resources.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `wallet` - Wallet provider lookup, session and selection kit
//! - `stellar` - Ledger client, envelope building, payments, contract calls
//! - `invoke` - Stellar CLI invocation
//! - `upload` - Uploads directory and pinning service
//! - `store` - In-memory resource stores

pub mod api;
pub mod config;
pub mod error;
pub mod invoke;
pub mod models;
pub mod state;
pub mod stellar;
pub mod store;
pub mod upload;
pub mod wallet;
