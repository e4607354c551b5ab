// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stellar network constants, account snapshots and amounts.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stellar network configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Short name accepted by the CLI (`--network`)
    pub name: &'static str,
    /// Passphrase mixed into transaction hashes and signatures
    pub passphrase: &'static str,
    /// Default Horizon endpoint
    pub horizon_url: &'static str,
}

pub const TESTNET: NetworkConfig = NetworkConfig {
    name: "testnet",
    passphrase: "Test SDF Network ; September 2015",
    horizon_url: "https://horizon-testnet.stellar.org",
};

pub const PUBLIC: NetworkConfig = NetworkConfig {
    name: "mainnet",
    passphrase: "Public Global Stellar Network ; September 2015",
    horizon_url: "https://horizon.stellar.org",
};

/// Per-operation fee in stroops.
pub const BASE_FEE: u32 = 100;

/// Validity window baked into every envelope, measured by the ledger.
pub const TX_TIMEOUT_SECS: u64 = 30;

/// Stroops per lumen.
pub const AMOUNT_DECIMALS: u32 = 7;

/// Look up a network by the name used in configuration.
pub fn network_by_name(name: &str) -> Option<NetworkConfig> {
    match name.trim().to_ascii_lowercase().as_str() {
        "testnet" | "test" => Some(TESTNET),
        "mainnet" | "public" | "pubnet" => Some(PUBLIC),
        _ => None,
    }
}

/// Account state fetched right before a transaction is built.
///
/// Never cached: a snapshot is only good for the one envelope built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: String,
    pub sequence: i64,
    /// Native balance as reported by Horizon (e.g. "100.0000000")
    pub native_balance: Option<String>,
}

impl Account {
    /// Sequence number the next transaction must carry.
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Invalid amount format")]
    Format,

    #[error("Too many decimal places (max {AMOUNT_DECIMALS})")]
    Precision,

    #[error("Amount must be positive")]
    NotPositive,

    #[error("Amount overflow")]
    Overflow,
}

/// Parse a decimal lumen amount into stroops.
pub fn parse_amount(amount: &str) -> Result<i64, AmountError> {
    let amount = amount.trim();
    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::Format);
    }
    if fraction.len() > AMOUNT_DECIMALS as usize {
        return Err(AmountError::Precision);
    }

    let whole: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| AmountError::Overflow)?
    };
    let padded = format!("{:0<width$}", fraction, width = AMOUNT_DECIMALS as usize);
    let fraction: i64 = padded.parse().map_err(|_| AmountError::Format)?;

    let total = whole
        .checked_mul(10i64.pow(AMOUNT_DECIMALS))
        .and_then(|w| w.checked_add(fraction))
        .ok_or(AmountError::Overflow)?;

    if total <= 0 {
        return Err(AmountError::NotPositive);
    }
    Ok(total)
}

/// Format stroops as a decimal lumen amount, trimming trailing zeros.
pub fn format_amount(stroops: i64) -> String {
    let divisor = 10i64.pow(AMOUNT_DECIMALS);
    let sign = if stroops < 0 { "-" } else { "" };
    let abs = stroops.unsigned_abs();
    let whole = abs / divisor as u64;
    let remainder = abs % divisor as u64;

    if remainder == 0 {
        return format!("{sign}{whole}");
    }
    let decimal_str = format!("{:0>width$}", remainder, width = AMOUNT_DECIMALS as usize);
    format!("{sign}{whole}.{}", decimal_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_handles_fractions() {
        assert_eq!(parse_amount("1"), Ok(10_000_000));
        assert_eq!(parse_amount("10.5"), Ok(105_000_000));
        assert_eq!(parse_amount("0.0000001"), Ok(1));
        assert_eq!(parse_amount(".25"), Ok(2_500_000));
    }

    #[test]
    fn parse_amount_rejects_bad_input() {
        assert_eq!(parse_amount("0"), Err(AmountError::NotPositive));
        assert_eq!(parse_amount("1.00000001"), Err(AmountError::Precision));
        assert_eq!(parse_amount("-1"), Err(AmountError::Format));
        assert_eq!(parse_amount("1.2.3"), Err(AmountError::Format));
        assert_eq!(parse_amount(""), Err(AmountError::Format));
        assert_eq!(parse_amount("1e5"), Err(AmountError::Format));
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn format_amount_trims_zeros() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(105_000_000), "10.5");
        assert_eq!(format_amount(1), "0.0000001");
        assert_eq!(format_amount(-20_000_000), "-2");
    }

    #[test]
    fn networks_resolve_by_name() {
        assert_eq!(network_by_name("TESTNET"), Some(TESTNET));
        assert_eq!(network_by_name("public"), Some(PUBLIC));
        assert_eq!(network_by_name("futurenet"), None);

        let account = Account {
            account_id: "G".into(),
            sequence: 41,
            native_balance: None,
        };
        assert_eq!(account.next_sequence(), 42);
    }
}
