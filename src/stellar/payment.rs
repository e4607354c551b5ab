// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Native-asset payments signed by the connected wallet.

use std::sync::Arc;

use tracing::info;

use super::envelope::{build_payment, UnsignedEnvelope};
use super::horizon::Ledger;
use super::types::{parse_amount, NetworkConfig};
use super::{now_unix, sign_and_submit, TxError};
use crate::wallet::WalletSession;

/// Builds a one-operation payment from the wallet's account, has the wallet
/// sign it, and submits it.
///
/// Nothing is retried. The account snapshot can go stale while the user
/// approves in the wallet; a rejected submission means starting over.
pub struct PaymentBuilder {
    session: Arc<WalletSession>,
    ledger: Arc<dyn Ledger>,
    network: NetworkConfig,
}

impl PaymentBuilder {
    pub fn new(session: Arc<WalletSession>, ledger: Arc<dyn Ledger>, network: NetworkConfig) -> Self {
        Self {
            session,
            ledger,
            network,
        }
    }

    /// Unsigned payment envelope built from a fresh account snapshot.
    pub async fn build_payment_xdr(
        &self,
        amount: &str,
        destination: &str,
    ) -> Result<UnsignedEnvelope, TxError> {
        let stroops = parse_amount(amount)?;
        let source = self.session.public_key().await?;
        let account = self.ledger.load_account(&source).await?;
        Ok(build_payment(&account, destination, stroops, now_unix())?)
    }

    /// Returns the transaction hash.
    pub async fn build_and_submit_payment(
        &self,
        amount: &str,
        destination: &str,
    ) -> Result<String, TxError> {
        let unsigned = self.build_payment_xdr(amount, destination).await?;
        let hash =
            sign_and_submit(&self.session, self.ledger.as_ref(), &self.network, &unsigned).await?;
        info!(
            hash = %hash,
            source = %unsigned.source(),
            destination = %destination,
            amount = %amount,
            "Payment submitted"
        );
        Ok(hash)
    }
}
