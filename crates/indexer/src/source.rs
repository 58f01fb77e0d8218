//! External collaborator interfaces.
//!
//! The chain RPC client and the persistence layer live outside this crate;
//! blocks enter through [`BlockSource`] and nothing else. The structs here
//! are the already-fetched raw material: header fields, opaque transaction
//! bytes, execution results and side-channel events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to fetch block {height}: {reason}")]
    Fetch { height: u64, reason: String },
}

/// One side-channel event, a tag plus flat key/value attributes.
#[derive(Debug, Clone, Default)]
pub struct RawEvent {
    pub kind: String,
    pub attributes: Vec<(String, String)>,
}

impl RawEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Execution result of one transaction slot.
#[derive(Debug, Clone, Default)]
pub struct TxResult {
    pub code: u32,
    pub gas_wanted: i64,
    pub gas_used: i64,
    pub events: Vec<RawEvent>,
}

/// Header fields of a fetched block, already in chain address/hex form.
#[derive(Debug, Clone)]
pub struct RawHeader {
    pub height: u64,
    pub time: DateTime<Utc>,
    pub chain_id: String,
    pub hash: String,
    pub parent_hash: String,
    pub proposer_address: String,
    pub app_version: u64,
}

/// A fetched block: header, opaque transaction bytes in block order, one
/// result per transaction slot, and block-level events.
#[derive(Debug, Clone)]
pub struct RawBlock {
    pub header: RawHeader,
    pub transactions: Vec<Vec<u8>>,
    pub results: Vec<TxResult>,
    pub events: Vec<RawEvent>,
}

#[async_trait]
pub trait BlockSource: Send + Sync {
    async fn fetch(&self, height: u64) -> Result<RawBlock, SourceError>;
}
