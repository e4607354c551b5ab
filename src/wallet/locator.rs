// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet provider discovery.
//!
//! Discovery is best-effort compatibility probing: extension versions inject
//! their API under different names, so the locator checks a list of
//! well-known names and then scans every name in the scope for something
//! wallet-shaped. Finding a provider says nothing about who controls it; it
//! is never an authentication step.

use std::sync::{Arc, PoisonError, RwLock};

use super::provider::WalletHandle;

/// Names under which Freighter-style providers have been injected.
pub const WELL_KNOWN_PROVIDER_NAMES: [&str; 5] = [
    "freighterApi",
    "freighter",
    "Freighter",
    "__freighter",
    "stellarFreighter",
];

pub trait ProviderLocator: Send + Sync {
    fn find_provider(&self) -> Option<Arc<dyn WalletHandle>>;

    fn is_provider_available(&self) -> bool {
        self.find_provider().is_some()
    }
}

/// Named objects injected into the runtime, in injection order.
#[derive(Default)]
pub struct GlobalScope {
    entries: RwLock<Vec<(String, Arc<dyn WalletHandle>)>>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject (or replace) an object under `name`.
    pub fn insert(&self, name: impl Into<String>, handle: Arc<dyn WalletHandle>) {
        let name = name.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = handle,
            None => entries.push((name, handle)),
        }
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn WalletHandle>> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let index = entries.iter().position(|(existing, _)| existing == name)?;
        Some(entries.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn WalletHandle>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, handle)| Arc::clone(handle))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn first_wallet_like(&self) -> Option<Arc<dyn WalletHandle>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(_, handle)| handle.capabilities().looks_like_wallet())
            .map(|(_, handle)| Arc::clone(handle))
    }
}

/// Production locator: well-known names first, then a scan of every name.
///
/// A locator without a scope models a runtime with no global object at all
/// (e.g. server-side rendering); it never finds anything.
#[derive(Clone, Default)]
pub struct GlobalScanLocator {
    scope: Option<Arc<GlobalScope>>,
}

impl GlobalScanLocator {
    pub fn new(scope: Arc<GlobalScope>) -> Self {
        Self { scope: Some(scope) }
    }

    pub fn detached() -> Self {
        Self { scope: None }
    }

    /// Names in scope that mention freighter, for diagnostics.
    pub fn debug_provider_names(&self) -> Vec<String> {
        let Some(scope) = &self.scope else {
            return Vec::new();
        };
        scope
            .names()
            .into_iter()
            .filter(|name| name.to_ascii_lowercase().contains("freighter"))
            .collect()
    }
}

impl ProviderLocator for GlobalScanLocator {
    fn find_provider(&self) -> Option<Arc<dyn WalletHandle>> {
        let scope = self.scope.as_ref()?;
        WELL_KNOWN_PROVIDER_NAMES
            .iter()
            .find_map(|name| scope.get(name))
            .or_else(|| scope.first_wallet_like())
    }
}

/// Locator returning a fixed handle (or nothing).
#[derive(Clone, Default)]
pub struct FixedLocator {
    handle: Option<Arc<dyn WalletHandle>>,
}

impl FixedLocator {
    pub fn new(handle: Arc<dyn WalletHandle>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn empty() -> Self {
        Self { handle: None }
    }
}

impl ProviderLocator for FixedLocator {
    fn find_provider(&self) -> Option<Arc<dyn WalletHandle>> {
        self.handle.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::provider::{Capabilities, ProviderError};
    use async_trait::async_trait;

    struct Probe {
        key: &'static str,
        caps: Capabilities,
    }

    #[async_trait]
    impl WalletHandle for Probe {
        fn capabilities(&self) -> Capabilities {
            self.caps
        }

        async fn get_public_key(&self) -> Result<String, ProviderError> {
            Ok(self.key.to_string())
        }
    }

    fn stub_wallet(key: &'static str, caps: Capabilities) -> Arc<dyn WalletHandle> {
        Arc::new(Probe { key, caps })
    }

    fn key_only() -> Capabilities {
        Capabilities {
            get_public_key: true,
            ..Capabilities::default()
        }
    }

    async fn key_of(handle: Arc<dyn WalletHandle>) -> String {
        handle.get_public_key().await.unwrap()
    }

    #[tokio::test]
    async fn well_known_name_wins_over_scan() {
        let scope = Arc::new(GlobalScope::new());
        scope.insert("someOtherWallet", stub_wallet("GSCAN", key_only()));
        scope.insert("freighter", stub_wallet("GKNOWN", Capabilities::default()));

        let locator = GlobalScanLocator::new(scope);
        let handle = locator.find_provider().expect("provider found");
        assert_eq!(key_of(handle).await, "GKNOWN");
    }

    #[tokio::test]
    async fn scan_skips_objects_without_wallet_methods() {
        let scope = Arc::new(GlobalScope::new());
        scope.insert("document", stub_wallet("GNOPE", Capabilities::default()));
        scope.insert(
            "mysteryWallet",
            stub_wallet(
                "GFOUND",
                Capabilities {
                    request: true,
                    ..Capabilities::default()
                },
            ),
        );

        let locator = GlobalScanLocator::new(scope);
        let handle = locator.find_provider().expect("provider found");
        assert_eq!(key_of(handle).await, "GFOUND");
    }

    #[test]
    fn nothing_found_without_scope_or_match() {
        assert!(GlobalScanLocator::detached().find_provider().is_none());

        let scope = Arc::new(GlobalScope::new());
        scope.insert("location", stub_wallet("G", Capabilities::default()));
        assert!(!GlobalScanLocator::new(scope).is_provider_available());
    }

    #[test]
    fn debug_names_match_case_insensitively() {
        let scope = Arc::new(GlobalScope::new());
        scope.insert("__FREIGHTER_STATE", stub_wallet("G", Capabilities::default()));
        scope.insert("freighterApi", stub_wallet("G", key_only()));
        scope.insert("ethereum", stub_wallet("G", key_only()));

        let names = GlobalScanLocator::new(scope).debug_provider_names();
        assert_eq!(names, vec!["__FREIGHTER_STATE", "freighterApi"]);
    }

    #[test]
    fn insert_replaces_and_remove_detaches() {
        let scope = GlobalScope::new();
        scope.insert("freighter", stub_wallet("G1", key_only()));
        scope.insert("freighter", stub_wallet("G2", key_only()));
        assert_eq!(scope.names(), vec!["freighter"]);
        assert!(scope.remove("freighter").is_some());
        assert!(scope.get("freighter").is_none());
    }
}
