//! Registry-owned entities: addresses, rollups, validators, bridges.

use serde::Serialize;

/// One balance bucket of an address. At most one entry per currency exists
/// within a block context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub currency: String,
    #[serde(serialize_with = "super::i128_string")]
    pub value: i128,
}

/// An account observed in the block, with its in-block balance deltas and
/// touch counters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub first_height: u64,
    pub balances: Vec<Balance>,
    pub actions_count: u64,
    pub signed_tx_count: u64,
    pub nonce: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_bridge: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_ibc_relayer: bool,
}

impl Address {
    pub fn new(address: String, height: u64) -> Self {
        Self {
            address,
            first_height: height,
            balances: Vec::new(),
            actions_count: 0,
            signed_tx_count: 0,
            nonce: 0,
            is_bridge: false,
            is_ibc_relayer: false,
        }
    }

    /// Add a delta to the matching currency bucket, appending a new bucket
    /// for a currency not seen before.
    pub fn apply_balance(&mut self, currency: &str, delta: i128) {
        match self.balances.iter_mut().find(|b| b.currency == currency) {
            Some(balance) => balance.value += delta,
            None => self.balances.push(Balance {
                currency: currency.to_string(),
                value: delta,
            }),
        }
    }
}

/// An external execution chain submitting data blobs. Size and counts
/// accumulate across the block's actions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup {
    /// Hex encoding of the raw 32-byte rollup id.
    pub id: String,
    pub first_height: u64,
    pub size: u64,
    pub actions_count: u64,
    pub bridge_count: u64,
}

/// A consensus validator. Power is overwritten, never summed: the last
/// update in the block wins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validator {
    /// Hex encoding of the Ed25519 verification key.
    pub pubkey: String,
    pub address: String,
    pub power: i64,
    pub name: String,
    pub height: u64,
}

/// A bridge account locking value on behalf of a rollup. Sudo and
/// withdrawer default to the bridge address itself.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bridge {
    pub address: String,
    pub rollup_id: String,
    pub asset: String,
    pub fee_asset: String,
    pub sudo_address: String,
    pub withdrawer_address: String,
    pub init_height: u64,
}
