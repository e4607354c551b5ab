// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup into an [`AppConfig`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `4000` |
//! | `UPLOADS_DIR` | Local directory for uploaded files | `./uploads` |
//! | `UPLOAD_MAX_BYTES` | Multipart body limit | `26214400` |
//! | `WEB3_STORAGE_TOKEN` | Pinning service credential | Optional (pinning disabled) |
//! | `PINNING_API_URL` | Pinning upload endpoint | `https://api.web3.storage/upload` |
//! | `IPFS_GATEWAY_URL` | Public gateway base URL | `https://w3s.link/ipfs` |
//! | `STELLAR_CLI` | CLI binary used for contract invocation | `stellar` |
//! | `INVOKE_DEFAULT_SOURCE` | Default source identity | `blockhire-deployer` |
//! | `INVOKE_DEFAULT_NETWORK` | Default network | `testnet` |
//! | `INVOKE_MAX_OUTPUT_BYTES` | Bound on captured CLI output | `10485760` |
//! | `HORIZON_URL` | Ledger query / submission endpoint | `https://horizon-testnet.stellar.org` |
//! | `CANDIDATE_CONTRACT_ID` | Candidate registry contract | empty |
//! | `JOB_CONTRACT_ID` | Job board contract | empty |
//! | `DOC_VERIFICATION_CONTRACT_ID` | Document verification contract | empty |
//! | `WALLET_RPC_URL` | Remote wallet provider endpoint | Optional |
//! | `WALLET_STATE_PATH` | Persisted wallet selection file | `./wallet-state.json` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files enabling HTTPS | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Blank values are treated as unset.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const UPLOADS_DIR_ENV: &str = "UPLOADS_DIR";
pub const UPLOAD_MAX_BYTES_ENV: &str = "UPLOAD_MAX_BYTES";

/// Pinning service credential. When absent, `/upload-ipfs` answers 500 after
/// storing the file locally.
pub const PINNING_TOKEN_ENV: &str = "WEB3_STORAGE_TOKEN";
pub const PINNING_API_URL_ENV: &str = "PINNING_API_URL";
pub const IPFS_GATEWAY_URL_ENV: &str = "IPFS_GATEWAY_URL";

pub const STELLAR_CLI_ENV: &str = "STELLAR_CLI";
pub const INVOKE_DEFAULT_SOURCE_ENV: &str = "INVOKE_DEFAULT_SOURCE";
pub const INVOKE_DEFAULT_NETWORK_ENV: &str = "INVOKE_DEFAULT_NETWORK";
pub const INVOKE_MAX_OUTPUT_BYTES_ENV: &str = "INVOKE_MAX_OUTPUT_BYTES";

pub const HORIZON_URL_ENV: &str = "HORIZON_URL";
pub const CANDIDATE_CONTRACT_ID_ENV: &str = "CANDIDATE_CONTRACT_ID";
pub const JOB_CONTRACT_ID_ENV: &str = "JOB_CONTRACT_ID";
pub const DOC_VERIFICATION_CONTRACT_ID_ENV: &str = "DOC_VERIFICATION_CONTRACT_ID";

pub const WALLET_RPC_URL_ENV: &str = "WALLET_RPC_URL";
pub const WALLET_STATE_PATH_ENV: &str = "WALLET_STATE_PATH";

pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";

pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_UPLOADS_DIR: &str = "./uploads";
const DEFAULT_UPLOAD_MAX_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_PINNING_API_URL: &str = "https://api.web3.storage/upload";
const DEFAULT_IPFS_GATEWAY_URL: &str = "https://w3s.link/ipfs";
const DEFAULT_STELLAR_CLI: &str = "stellar";
const DEFAULT_INVOKE_SOURCE: &str = "blockhire-deployer";
const DEFAULT_INVOKE_NETWORK: &str = "testnet";
const DEFAULT_INVOKE_MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";
const DEFAULT_WALLET_STATE_PATH: &str = "./wallet-state.json";

/// Identifiers of the three deployed Soroban contracts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractIds {
    pub candidate: String,
    pub job: String,
    pub doc_verification: String,
}

#[derive(Debug, Clone)]
pub struct PinningConfig {
    pub token: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub upload_max_bytes: usize,
    /// `None` when no pinning credential is configured.
    pub pinning: Option<PinningConfig>,
    pub gateway_url: String,
    pub stellar_cli: String,
    pub invoke_default_source: String,
    pub invoke_default_network: String,
    pub invoke_max_output_bytes: usize,
    pub horizon_url: String,
    pub contracts: ContractIds,
    pub wallet_rpc_url: Option<String>,
    pub wallet_state_path: PathBuf,
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
            upload_max_bytes: DEFAULT_UPLOAD_MAX_BYTES,
            pinning: None,
            gateway_url: DEFAULT_IPFS_GATEWAY_URL.to_string(),
            stellar_cli: DEFAULT_STELLAR_CLI.to_string(),
            invoke_default_source: DEFAULT_INVOKE_SOURCE.to_string(),
            invoke_default_network: DEFAULT_INVOKE_NETWORK.to_string(),
            invoke_max_output_bytes: DEFAULT_INVOKE_MAX_OUTPUT_BYTES,
            horizon_url: DEFAULT_HORIZON_URL.to_string(),
            contracts: ContractIds::default(),
            wallet_rpc_url: None,
            wallet_state_path: PathBuf::from(DEFAULT_WALLET_STATE_PATH),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let pinning = get(PINNING_TOKEN_ENV).map(|token| PinningConfig {
            token,
            api_url: or_default(PINNING_API_URL_ENV, DEFAULT_PINNING_API_URL),
        });

        Self {
            host: or_default(HOST_ENV, DEFAULT_HOST),
            port: get(PORT_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            uploads_dir: PathBuf::from(or_default(UPLOADS_DIR_ENV, DEFAULT_UPLOADS_DIR)),
            upload_max_bytes: get(UPLOAD_MAX_BYTES_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UPLOAD_MAX_BYTES),
            pinning,
            gateway_url: or_default(IPFS_GATEWAY_URL_ENV, DEFAULT_IPFS_GATEWAY_URL),
            stellar_cli: or_default(STELLAR_CLI_ENV, DEFAULT_STELLAR_CLI),
            invoke_default_source: or_default(INVOKE_DEFAULT_SOURCE_ENV, DEFAULT_INVOKE_SOURCE),
            invoke_default_network: or_default(INVOKE_DEFAULT_NETWORK_ENV, DEFAULT_INVOKE_NETWORK),
            invoke_max_output_bytes: get(INVOKE_MAX_OUTPUT_BYTES_ENV)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_INVOKE_MAX_OUTPUT_BYTES),
            horizon_url: or_default(HORIZON_URL_ENV, DEFAULT_HORIZON_URL),
            contracts: ContractIds {
                candidate: get(CANDIDATE_CONTRACT_ID_ENV).unwrap_or_default(),
                job: get(JOB_CONTRACT_ID_ENV).unwrap_or_default(),
                doc_verification: get(DOC_VERIFICATION_CONTRACT_ID_ENV).unwrap_or_default(),
            },
            wallet_rpc_url: get(WALLET_RPC_URL_ENV),
            wallet_state_path: PathBuf::from(or_default(
                WALLET_STATE_PATH_ENV,
                DEFAULT_WALLET_STATE_PATH,
            )),
            tls_cert_path: get(TLS_CERT_PATH_ENV).map(PathBuf::from),
            tls_key_path: get(TLS_KEY_PATH_ENV).map(PathBuf::from),
        }
    }

    /// Listen address; `HOST` is a bare IPv4 or IPv6 address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        Ok(SocketAddr::new(self.host.trim().parse::<IpAddr>()?, self.port))
    }

    /// Both TLS paths must be present for HTTPS.
    pub fn tls_paths(&self) -> Option<(PathBuf, PathBuf)> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some((cert.clone(), key.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.port, 4000);
        assert_eq!(config.stellar_cli, "stellar");
        assert_eq!(config.invoke_default_source, "blockhire-deployer");
        assert_eq!(config.invoke_default_network, "testnet");
        assert!(config.pinning.is_none());
        assert!(config.tls_paths().is_none());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[
            (PINNING_TOKEN_ENV, "   "),
            (PORT_ENV, ""),
            (HORIZON_URL_ENV, " "),
        ]));
        assert!(config.pinning.is_none());
        assert_eq!(config.port, 4000);
        assert_eq!(config.horizon_url, "https://horizon-testnet.stellar.org");
    }

    #[test]
    fn pinning_and_contracts_are_read() {
        let config = AppConfig::from_lookup(lookup(&[
            (PINNING_TOKEN_ENV, "secret"),
            (CANDIDATE_CONTRACT_ID_ENV, "CCAND"),
            (PORT_ENV, "8081"),
            (TLS_CERT_PATH_ENV, "/tls/cert.pem"),
        ]));
        let pinning = config.pinning.as_ref().expect("pinning configured");
        assert_eq!(pinning.token, "secret");
        assert_eq!(pinning.api_url, "https://api.web3.storage/upload");
        assert_eq!(config.contracts.candidate, "CCAND");
        assert_eq!(config.port, 8081);
        // Only one of the two TLS paths is set.
        assert!(config.tls_paths().is_none());
    }

    #[test]
    fn bind_addr_accepts_ipv4_and_ipv6_hosts() {
        let config = AppConfig::from_lookup(lookup(&[(HOST_ENV, "::"), (PORT_ENV, "8080")]));
        assert_eq!(config.bind_addr().unwrap().to_string(), "[::]:8080");

        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config.bind_addr().unwrap().to_string(), "0.0.0.0:4000");

        let config = AppConfig::from_lookup(lookup(&[(HOST_ENV, "localhost")]));
        assert!(config.bind_addr().is_err());
    }
}
