//! The immutable block-result record and its transaction rows.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::action::{Action, Deposit, MarketUpdate, Price, TransferRecord};
use super::entities::{Address, Bridge, Rollup, Validator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Success,
    Failed,
}

/// One decoded transaction with its actions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedTransaction {
    /// Hex of the SHA-256 digest of the raw transaction bytes.
    pub hash: String,
    pub position: u32,
    pub signer: String,
    pub nonce: u32,
    pub status: TxStatus,
    pub code: u32,
    pub gas_wanted: i64,
    pub gas_used: i64,
    pub signature: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataItemKind {
    /// Bare 32-byte commitment root occupying an early slot (pre-v3 blocks).
    ImplicitRoot,
    RollupTransactionsRoot,
    RollupIdsRoot,
    ExtendedCommitInfo,
}

/// A non-transaction blob found in a transaction slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItemRecord {
    pub kind: DataItemKind,
    pub position: u32,
    /// Hex of the raw payload.
    pub payload: String,
}

/// Scalar counters accumulated over the block.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStats {
    pub bytes: u64,
    pub gas_wanted: i64,
    pub gas_used: i64,
    pub data_size: u64,
    #[serde(serialize_with = "super::i128_string")]
    pub supply_change: i128,
    pub tx_count: u32,
}

/// The write-once block record handed to the persistence collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u64,
    pub time: DateTime<Utc>,
    pub chain_id: String,
    pub hash: String,
    pub parent_hash: String,
    pub proposer: String,
    pub app_version: u64,
    pub transactions: Vec<DecodedTransaction>,
    pub data_items: Vec<DataItemRecord>,
    pub addresses: Vec<Address>,
    pub rollups: Vec<Rollup>,
    pub validators: Vec<Validator>,
    pub bridges: Vec<Bridge>,
    /// Named process-wide constants, e.g. the fee schedule.
    pub constants: BTreeMap<String, String>,
    pub transfers: Vec<TransferRecord>,
    pub deposits: Vec<Deposit>,
    pub prices: Vec<Price>,
    pub markets: Vec<MarketUpdate>,
    pub stats: BlockStats,
}
