// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared caches: the bridge-asset map and the asset-metadata resolver.
//!
//! Both outlive any single block and may be read and updated from workers
//! processing distinct blocks concurrently, so their maps sit behind
//! mutexes with short critical sections (never held across an await).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Network-backed lookup of the denomination behind an `ibc/<hash>` asset.
#[async_trait]
pub trait AssetMetadataLookup: Send + Sync {
    async fn resolve(&self, content_hash: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct LookupError(pub String);

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("asset metadata lookup for {hash} failed: {reason}")]
    Failed { hash: String, reason: String },

    #[error("asset metadata lookup for {0} timed out")]
    TimedOut(String),
}

/// Maps bridge addresses to the asset they custody. Seeded at startup from
/// persisted bridge records and extended in place as bridges are created.
#[derive(Debug, Default)]
pub struct BridgeAssetCache {
    assets: Mutex<HashMap<String, String>>,
}

impl BridgeAssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, entries: impl IntoIterator<Item = (String, String)>) {
        let mut assets = self.assets.lock().expect("bridge asset lock poisoned");
        assets.extend(entries);
    }

    pub fn get(&self, bridge_address: &str) -> Option<String> {
        let assets = self.assets.lock().expect("bridge asset lock poisoned");
        assets.get(bridge_address).cloned()
    }

    pub fn put(&self, bridge_address: &str, asset: &str) {
        let mut assets = self.assets.lock().expect("bridge asset lock poisoned");
        assets.insert(bridge_address.to_string(), asset.to_string());
    }
}

/// Content-hash-memoized front for [`AssetMetadataLookup`], bounded by a
/// per-call timeout. Denominations without the `ibc/` prefix pass through
/// untouched and never hit the network.
pub struct AssetResolver {
    lookup: Arc<dyn AssetMetadataLookup>,
    memo: Mutex<HashMap<String, String>>,
    timeout: Duration,
}

impl AssetResolver {
    pub fn new(lookup: Arc<dyn AssetMetadataLookup>, timeout: Duration) -> Self {
        Self {
            lookup,
            memo: Mutex::new(HashMap::new()),
            timeout,
        }
    }

    pub async fn resolve(&self, denom: &str) -> Result<String, ResolveError> {
        let Some(hash) = denom.strip_prefix("ibc/") else {
            return Ok(denom.to_string());
        };

        if let Some(hit) = self
            .memo
            .lock()
            .expect("asset memo lock poisoned")
            .get(hash)
        {
            return Ok(hit.clone());
        }

        let resolved = match tokio::time::timeout(self.timeout, self.lookup.resolve(hash)).await {
            Ok(Ok(denom)) => denom,
            Ok(Err(err)) => {
                return Err(ResolveError::Failed {
                    hash: hash.to_string(),
                    reason: err.to_string(),
                });
            }
            Err(_) => return Err(ResolveError::TimedOut(hash.to_string())),
        };

        tracing::debug!(hash, resolved = %resolved, "resolved asset metadata");
        self.memo
            .lock()
            .expect("asset memo lock poisoned")
            .insert(hash.to_string(), resolved.clone());

        Ok(resolved)
    }
}
