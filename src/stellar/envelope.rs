// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction envelope construction.
//!
//! Envelopes are built once from a fresh [`Account`] snapshot and handed to
//! the wallet as base64 XDR. The application never signs; a
//! [`SignedEnvelope`] only comes back from the wallet session, and must still
//! reference the source account and sequence number it was built from.

use stellar_strkey::Strkey;
use stellar_xdr::curr::{
    AccountId, Asset, Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo,
    MuxedAccount, Operation, OperationBody, PaymentOp, Preconditions, PublicKey, ReadXdr,
    ScAddress, ScBytes, ScString, ScSymbol, ScVal, SequenceNumber, TimeBounds, TimePoint,
    Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope, Uint256, VecM,
    WriteXdr,
};

use super::types::{Account, BASE_FEE, TX_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("Invalid account address: {0}")]
    InvalidAccount(String),

    #[error("Invalid contract id: {0}")]
    InvalidContract(String),

    #[error("Invalid contract argument: {0}")]
    InvalidArgument(String),

    #[error("XDR encoding failed: {0}")]
    Xdr(String),

    #[error("Signed envelope does not match the transaction that was built")]
    Mismatch,
}

/// A built, not yet signed, transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedEnvelope {
    xdr: String,
    source: String,
    sequence: i64,
}

impl UnsignedEnvelope {
    pub fn xdr(&self) -> &str {
        &self.xdr
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sequence(&self) -> i64 {
        self.sequence
    }
}

/// Envelope carrying the wallet's signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    xdr: String,
}

impl SignedEnvelope {
    /// Only the wallet session produces signed envelopes.
    pub(crate) fn from_wallet(xdr: String) -> Self {
        Self { xdr }
    }

    pub fn xdr(&self) -> &str {
        &self.xdr
    }

    /// Check that the wallet signed the transaction that was built: same
    /// source account, same sequence number.
    pub fn ensure_matches(&self, unsigned: &UnsignedEnvelope) -> Result<(), EnvelopeError> {
        let envelope = TransactionEnvelope::from_xdr_base64(&self.xdr, Limits::none())
            .map_err(|_| EnvelopeError::Mismatch)?;
        let TransactionEnvelope::Tx(v1) = envelope else {
            return Err(EnvelopeError::Mismatch);
        };

        let expected = account_key(&unsigned.source)?;
        let same_source = matches!(
            v1.tx.source_account,
            MuxedAccount::Ed25519(Uint256(key)) if key == expected
        );
        if !same_source || v1.tx.seq_num.0 != unsigned.sequence {
            return Err(EnvelopeError::Mismatch);
        }
        Ok(())
    }
}

/// Typed contract-call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractArg {
    /// `G...` account or `C...` contract address
    Address(String),
    String(String),
    Bytes(Vec<u8>),
    Symbol(String),
    U32(u32),
    U64(u64),
    Bool(bool),
}

impl ContractArg {
    fn to_sc_val(&self) -> Result<ScVal, EnvelopeError> {
        let val = match self {
            ContractArg::Address(address) => ScVal::Address(sc_address(address)?),
            ContractArg::String(s) => ScVal::String(ScString(
                s.as_bytes()
                    .to_vec()
                    .try_into()
                    .map_err(|_| EnvelopeError::InvalidArgument("string too long".into()))?,
            )),
            ContractArg::Bytes(bytes) => ScVal::Bytes(ScBytes(
                bytes
                    .clone()
                    .try_into()
                    .map_err(|_| EnvelopeError::InvalidArgument("bytes too long".into()))?,
            )),
            ContractArg::Symbol(s) => ScVal::Symbol(symbol(s)?),
            ContractArg::U32(n) => ScVal::U32(*n),
            ContractArg::U64(n) => ScVal::U64(*n),
            ContractArg::Bool(b) => ScVal::Bool(*b),
        };
        Ok(val)
    }
}

/// Native-asset payment from `account` to `destination`.
pub fn build_payment(
    account: &Account,
    destination: &str,
    amount_stroops: i64,
    now_unix: u64,
) -> Result<UnsignedEnvelope, EnvelopeError> {
    let destination = MuxedAccount::Ed25519(Uint256(account_key(destination)?));
    let body = OperationBody::Payment(PaymentOp {
        destination,
        asset: Asset::Native,
        amount: amount_stroops,
    });
    build(account, body, now_unix)
}

/// Single `InvokeHostFunction` operation calling `function` on `contract_id`.
pub fn build_contract_call(
    account: &Account,
    contract_id: &str,
    function: &str,
    args: &[ContractArg],
    now_unix: u64,
) -> Result<UnsignedEnvelope, EnvelopeError> {
    let contract = match Strkey::from_string(contract_id) {
        Ok(Strkey::Contract(c)) => c.0,
        _ => return Err(EnvelopeError::InvalidContract(contract_id.to_string())),
    };
    let args = args
        .iter()
        .map(ContractArg::to_sc_val)
        .collect::<Result<Vec<_>, _>>()?;

    let body = OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
        host_function: HostFunction::InvokeContract(InvokeContractArgs {
            contract_address: ScAddress::Contract(Hash(contract)),
            function_name: symbol(function)?,
            args: VecM::try_from(args)
                .map_err(|_| EnvelopeError::InvalidArgument("too many arguments".into()))?,
        }),
        auth: VecM::default(),
    });
    build(account, body, now_unix)
}

fn build(
    account: &Account,
    body: OperationBody,
    now_unix: u64,
) -> Result<UnsignedEnvelope, EnvelopeError> {
    let source = account_key(&account.account_id)?;
    let sequence = account.next_sequence();

    let operations = VecM::try_from(vec![Operation {
        source_account: None,
        body,
    }])
    .map_err(|e| EnvelopeError::Xdr(e.to_string()))?;

    let tx = Transaction {
        source_account: MuxedAccount::Ed25519(Uint256(source)),
        fee: BASE_FEE,
        seq_num: SequenceNumber(sequence),
        cond: Preconditions::Time(TimeBounds {
            min_time: TimePoint(0),
            max_time: TimePoint(now_unix + TX_TIMEOUT_SECS),
        }),
        memo: Memo::None,
        operations,
        ext: TransactionExt::V0,
    };
    let envelope = TransactionEnvelope::Tx(TransactionV1Envelope {
        tx,
        signatures: VecM::default(),
    });
    let xdr = envelope
        .to_xdr_base64(Limits::none())
        .map_err(|e| EnvelopeError::Xdr(e.to_string()))?;

    Ok(UnsignedEnvelope {
        xdr,
        source: account.account_id.clone(),
        sequence,
    })
}

fn account_key(address: &str) -> Result<[u8; 32], EnvelopeError> {
    match Strkey::from_string(address) {
        Ok(Strkey::PublicKeyEd25519(key)) => Ok(key.0),
        _ => Err(EnvelopeError::InvalidAccount(address.to_string())),
    }
}

fn sc_address(address: &str) -> Result<ScAddress, EnvelopeError> {
    match Strkey::from_string(address) {
        Ok(Strkey::PublicKeyEd25519(key)) => Ok(ScAddress::Account(AccountId(
            PublicKey::PublicKeyTypeEd25519(Uint256(key.0)),
        ))),
        Ok(Strkey::Contract(contract)) => Ok(ScAddress::Contract(Hash(contract.0))),
        _ => Err(EnvelopeError::InvalidAccount(address.to_string())),
    }
}

fn symbol(name: &str) -> Result<ScSymbol, EnvelopeError> {
    name.as_bytes()
        .to_vec()
        .try_into()
        .map(ScSymbol)
        .map_err(|_| EnvelopeError::InvalidArgument(format!("symbol too long: {name}")))
}
