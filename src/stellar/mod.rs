// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stellar transactions: building, wallet signing and Horizon submission.

pub mod contracts;
pub mod envelope;
pub mod horizon;
pub mod payment;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use contracts::{ApplicationAction, ContractCall, ContractClient};
pub use envelope::{ContractArg, EnvelopeError, SignedEnvelope, UnsignedEnvelope};
pub use horizon::{HorizonClient, Ledger, LedgerError};
pub use payment::PaymentBuilder;
pub use types::{Account, NetworkConfig};

use crate::error::ApiError;
use crate::upload::pinning::PinningError;
use crate::wallet::{WalletError, WalletSession};
use types::AmountError;

#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Pinning(#[from] PinningError),

    #[error("{0}")]
    InvalidRequest(String),
}

impl From<TxError> for ApiError {
    fn from(err: TxError) -> Self {
        let message = err.to_string();
        match err {
            TxError::Wallet(e) => e.into(),
            TxError::Envelope(EnvelopeError::Mismatch) => ApiError::bad_gateway(message),
            TxError::Envelope(_) | TxError::Amount(_) | TxError::InvalidRequest(_) => {
                ApiError::bad_request(message)
            }
            TxError::Ledger(_) | TxError::Pinning(_) => ApiError::bad_gateway(message),
        }
    }
}

/// Seconds since the epoch, used as the start of the validity window.
pub(crate) fn now_unix() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// Have the wallet sign `unsigned`, check it is still the same transaction,
/// and submit it. Returns the transaction hash.
pub(crate) async fn sign_and_submit(
    session: &WalletSession,
    ledger: &dyn Ledger,
    network: &NetworkConfig,
    unsigned: &UnsignedEnvelope,
) -> Result<String, TxError> {
    let signed = session.sign_envelope(unsigned, network).await?;
    signed.ensure_matches(unsigned)?;
    Ok(ledger.submit_transaction(&signed).await?)
}
