// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use blockhire_server::{
    api::router,
    config::{AppConfig, DEFAULT_LOG_FILTER, LOG_FORMAT_ENV},
    state::AppState,
    store::InMemoryStore,
    wallet::{FileSessionStore, GlobalScanLocator, GlobalScope, RemoteWalletHandle, WalletSession},
};

/// Name the remote provider is registered under in the provider scope.
const REMOTE_PROVIDER_NAME: &str = "freighterApi";

/// In-flight requests get this long to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).pretty().init();
    }
}

/// The server's one wallet session, restored from the last run.
async fn wallet_session(config: &AppConfig) -> Result<Arc<WalletSession>, Box<dyn Error>> {
    let persist = Arc::new(FileSessionStore::open(&config.wallet_state_path)?);
    let scope = Arc::new(GlobalScope::new());
    if let Some(url) = &config.wallet_rpc_url {
        scope.insert(REMOTE_PROVIDER_NAME, Arc::new(RemoteWalletHandle::new(url.clone())?));
        info!(url = %url, "Remote wallet provider registered");
    }
    let locator = GlobalScanLocator::new(scope);
    if !locator.debug_provider_names().is_empty() {
        info!(names = ?locator.debug_provider_names(), "Wallet providers in scope");
    }

    let session = WalletSession::new(Arc::new(locator), persist);
    if let Some(key) = session.restore().await {
        info!(public_key = %key, "Restored wallet session");
    }
    Ok(Arc::new(session))
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("Shutdown signal received");
    shutdown.cancel();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let config = AppConfig::from_env();

    let wallet = wallet_session(&config).await?;
    let state = AppState::from_config(config.clone(), InMemoryStore::new(), wallet)?;
    state.uploads.ensure_dir().await?;
    if state.pinning.is_none() {
        warn!("WEB3_STORAGE_TOKEN not set, /upload-ipfs will keep files locally");
    }
    let app = router(state);

    let addr = config.bind_addr()?;

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));
    let handle = Handle::new();
    {
        let handle = handle.clone();
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            shutdown.cancelled().await;
            handle.graceful_shutdown(Some(SHUTDOWN_GRACE));
        });
    }

    match config.tls_paths() {
        Some((cert, key)) => {
            // The ring provider must be installed before any TLS config is built.
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "Failed to install rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&cert, &key).await?;

            info!(%addr, "BlockHire server listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!(%addr, "BlockHire server listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    info!("Server stopped");
    Ok(())
}
