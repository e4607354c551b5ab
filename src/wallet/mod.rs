// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet discovery, selection and signing.

pub mod kit;
pub mod locator;
pub mod persist;
pub mod provider;
pub mod remote;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use kit::{WalletChooser, WalletKit, WalletModule, WalletOption};
pub use locator::{FixedLocator, GlobalScanLocator, GlobalScope, ProviderLocator};
pub use persist::{FileSessionStore, MemorySessionStore, SessionStore};
pub use provider::{Capabilities, ProviderError, ProviderRequest, WalletHandle};
pub use remote::RemoteWalletHandle;
pub use session::WalletSession;

use crate::error::ApiError;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("No wallet provider found")]
    ProviderUnavailable,

    #[error("Wallet provider exposes no supported key method")]
    UnsupportedProviderApi,

    #[error("Wallet did not produce a signed transaction")]
    SigningUnavailable,

    #[error("Signature request was declined in the wallet")]
    SigningDeclined,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl From<WalletError> for ApiError {
    fn from(err: WalletError) -> Self {
        let message = err.to_string();
        match err {
            WalletError::ProviderUnavailable => ApiError::service_unavailable(message),
            WalletError::SigningDeclined => ApiError::forbidden(message),
            WalletError::UnsupportedProviderApi
            | WalletError::SigningUnavailable
            | WalletError::Provider(_) => ApiError::bad_gateway(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn wallet_errors_map_to_http_statuses() {
        let cases = [
            (WalletError::ProviderUnavailable, StatusCode::SERVICE_UNAVAILABLE),
            (WalletError::UnsupportedProviderApi, StatusCode::BAD_GATEWAY),
            (WalletError::SigningUnavailable, StatusCode::BAD_GATEWAY),
            (WalletError::SigningDeclined, StatusCode::FORBIDDEN),
            (
                WalletError::Provider(ProviderError::Failed("x".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }
}
