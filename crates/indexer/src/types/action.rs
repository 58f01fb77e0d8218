//! Decoded actions and their attached sub-records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// The closed set of action kinds. Blocks produced under any protocol
/// version decode to one of these; there is no catch-all variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Transfer,
    RollupDataSubmission,
    Mint,
    InitBridgeAccount,
    BridgeLock,
    BridgeUnlock,
    BridgeSudoChange,
    BridgeTransfer,
    IbcRelay,
    Ics20Withdrawal,
    SudoAddressChange,
    ValidatorUpdate,
    IbcRelayerChange,
    FeeAssetChange,
    FeeChange,
    IbcSudoChange,
    RecoverIbcClient,
    CurrencyPairsChange,
    MarketsChange,
    AddCurrencyPairs,
    RemoveCurrencyPairs,
    UpsertMarkets,
    RemoveMarkets,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::RollupDataSubmission => "rollup_data_submission",
            Self::Mint => "mint",
            Self::InitBridgeAccount => "init_bridge_account",
            Self::BridgeLock => "bridge_lock",
            Self::BridgeUnlock => "bridge_unlock",
            Self::BridgeSudoChange => "bridge_sudo_change",
            Self::BridgeTransfer => "bridge_transfer",
            Self::IbcRelay => "ibc_relay",
            Self::Ics20Withdrawal => "ics20_withdrawal",
            Self::SudoAddressChange => "sudo_address_change",
            Self::ValidatorUpdate => "validator_update",
            Self::IbcRelayerChange => "ibc_relayer_change",
            Self::FeeAssetChange => "fee_asset_change",
            Self::FeeChange => "fee_change",
            Self::IbcSudoChange => "ibc_sudo_change",
            Self::RecoverIbcClient => "recover_ibc_client",
            Self::CurrencyPairsChange => "currency_pairs_change",
            Self::MarketsChange => "markets_change",
            Self::AddCurrencyPairs => "add_currency_pairs",
            Self::RemoveCurrencyPairs => "remove_currency_pairs",
            Self::UpsertMarkets => "upsert_markets",
            Self::RemoveMarkets => "remove_markets",
        }
    }
}

/// Link row between an action and one distinct address it touched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressAction {
    pub address: String,
}

/// Immutable balance-change log entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceUpdate {
    pub address: String,
    pub currency: String,
    #[serde(serialize_with = "super::i128_string")]
    pub update: i128,
    pub height: u64,
}

/// Fee charged for one action, reported through the `tx.fees` event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub asset: String,
    /// Decimal string as carried by the event.
    pub amount: String,
    pub payer: String,
    pub position: u32,
    pub height: u64,
}

/// A bridge-in event correlated to an action position.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deposit {
    pub bridge_address: String,
    pub rollup_id: String,
    pub amount: String,
    pub asset: String,
    pub destination_chain_address: String,
    pub source_transaction_id: String,
    pub source_action_index: u32,
    pub height: u64,
    pub time: DateTime<Utc>,
}

/// Value-movement sub-record for transfer-shaped actions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub asset: String,
    pub height: u64,
}

/// Rollup reference sub-record for data submissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupAction {
    pub rollup_id: String,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketUpdateKind {
    Create,
    Remove,
    Update,
}

/// One market-map mutation, keyed by ticker.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketUpdate {
    pub ticker: String,
    pub kind: MarketUpdateKind,
    pub market: Value,
}

/// A block-timestamped oracle price point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub pair: String,
    pub price: String,
    pub time: DateTime<Utc>,
}

/// One decoded action within a transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub kind: ActionKind,
    pub height: u64,
    pub time: DateTime<Utc>,
    pub position: u32,
    pub payload: Map<String, Value>,
    pub addresses: Vec<AddressAction>,
    pub balance_updates: Vec<BalanceUpdate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup_action: Option<RollupAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transfer: Option<TransferRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Fee>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deposits: Vec<Deposit>,
}

impl Action {
    pub fn new(kind: ActionKind, height: u64, time: DateTime<Utc>, position: u32) -> Self {
        Self {
            kind,
            height,
            time,
            position,
            payload: Map::new(),
            addresses: Vec::new(),
            balance_updates: Vec::new(),
            rollup_action: None,
            transfer: None,
            fee: None,
            deposits: Vec::new(),
        }
    }
}
