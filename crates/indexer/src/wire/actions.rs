//! The closed action union and its per-kind message bodies.
//!
//! Tags are grouped the way the chain's schema grouped them: core value
//! movement on 1-10, bridge actions on 11-20, IBC on 21-30, authority and
//! fee-schedule actions on 50-69, and the legacy oracle kinds the chain
//! shipped before the oracle consolidation on 70-79. Blocks produced under
//! any protocol version decode against this single union.

use super::{Uint128, ibc::IbcHeight};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Action {
    #[prost(
        oneof = "action::Value",
        tags = "1, 2, 3, 11, 12, 13, 14, 15, 21, 22, 50, 51, 52, 53, 55, 56, 57, 58, 59, 70, 71, 72, 73"
    )]
    pub value: Option<action::Value>,
}

pub mod action {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Transfer(super::Transfer),
        #[prost(message, tag = "2")]
        RollupDataSubmission(super::RollupDataSubmission),
        #[prost(message, tag = "3")]
        Mint(super::Mint),
        #[prost(message, tag = "11")]
        InitBridgeAccount(super::InitBridgeAccount),
        #[prost(message, tag = "12")]
        BridgeLock(super::BridgeLock),
        #[prost(message, tag = "13")]
        BridgeUnlock(super::BridgeUnlock),
        #[prost(message, tag = "14")]
        BridgeSudoChange(super::BridgeSudoChange),
        #[prost(message, tag = "15")]
        BridgeTransfer(super::BridgeTransfer),
        #[prost(message, tag = "21")]
        IbcRelay(super::IbcRelay),
        #[prost(message, tag = "22")]
        Ics20Withdrawal(super::Ics20Withdrawal),
        #[prost(message, tag = "50")]
        SudoAddressChange(super::SudoAddressChange),
        #[prost(message, tag = "51")]
        ValidatorUpdate(super::ValidatorUpdate),
        #[prost(message, tag = "52")]
        IbcRelayerChange(super::IbcRelayerChange),
        #[prost(message, tag = "53")]
        FeeAssetChange(super::FeeAssetChange),
        #[prost(message, tag = "55")]
        FeeChange(super::FeeChange),
        #[prost(message, tag = "56")]
        IbcSudoChange(super::IbcSudoChange),
        #[prost(message, tag = "57")]
        RecoverIbcClient(super::RecoverIbcClient),
        #[prost(message, tag = "58")]
        CurrencyPairsChange(super::super::oracle::CurrencyPairsChange),
        #[prost(message, tag = "59")]
        MarketsChange(super::super::oracle::MarketsChange),
        #[prost(message, tag = "70")]
        AddCurrencyPairs(super::super::oracle::AddCurrencyPairs),
        #[prost(message, tag = "71")]
        RemoveCurrencyPairs(super::super::oracle::RemoveCurrencyPairs),
        #[prost(message, tag = "72")]
        UpsertMarkets(super::super::oracle::UpsertMarkets),
        #[prost(message, tag = "73")]
        RemoveMarkets(super::super::oracle::RemoveMarkets),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transfer {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Uint128>,
    #[prost(string, tag = "3")]
    pub asset: String,
    #[prost(string, tag = "4")]
    pub fee_asset: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RollupDataSubmission {
    #[prost(bytes = "vec", tag = "1")]
    pub rollup_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
    #[prost(string, tag = "3")]
    pub fee_asset: String,
}

/// Legacy direct issuance, removed from the protocol but present in
/// early blocks.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Mint {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Uint128>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitBridgeAccount {
    #[prost(bytes = "vec", tag = "1")]
    pub rollup_id: Vec<u8>,
    #[prost(string, tag = "2")]
    pub asset: String,
    #[prost(string, tag = "3")]
    pub fee_asset: String,
    #[prost(string, tag = "4")]
    pub sudo_address: String,
    #[prost(string, tag = "5")]
    pub withdrawer_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BridgeLock {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Uint128>,
    #[prost(string, tag = "3")]
    pub asset: String,
    #[prost(string, tag = "4")]
    pub fee_asset: String,
    #[prost(string, tag = "5")]
    pub destination_chain_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BridgeUnlock {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Uint128>,
    #[prost(string, tag = "3")]
    pub fee_asset: String,
    #[prost(string, tag = "4")]
    pub memo: String,
    #[prost(string, tag = "5")]
    pub bridge_address: String,
    #[prost(uint64, tag = "6")]
    pub rollup_block_number: u64,
    #[prost(string, tag = "7")]
    pub rollup_withdrawal_event_id: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BridgeSudoChange {
    #[prost(string, tag = "1")]
    pub bridge_address: String,
    #[prost(string, tag = "2")]
    pub new_sudo_address: String,
    #[prost(string, tag = "3")]
    pub new_withdrawer_address: String,
    #[prost(string, tag = "4")]
    pub fee_asset: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BridgeTransfer {
    #[prost(string, tag = "1")]
    pub to: String,
    #[prost(message, optional, tag = "2")]
    pub amount: Option<Uint128>,
    #[prost(string, tag = "3")]
    pub fee_asset: String,
    #[prost(string, tag = "4")]
    pub bridge_address: String,
    #[prost(string, tag = "5")]
    pub destination_chain_address: String,
    #[prost(uint64, tag = "6")]
    pub rollup_block_number: u64,
    #[prost(string, tag = "7")]
    pub rollup_withdrawal_event_id: String,
}

/// An IBC message relayed verbatim; the inner message is decoded (or
/// recorded raw) by the action decoder.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IbcRelay {
    #[prost(message, optional, tag = "1")]
    pub raw_action: Option<::prost_types::Any>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Ics20Withdrawal {
    #[prost(message, optional, tag = "1")]
    pub amount: Option<Uint128>,
    #[prost(string, tag = "2")]
    pub denom: String,
    #[prost(string, tag = "3")]
    pub destination_chain_address: String,
    #[prost(string, tag = "4")]
    pub return_address: String,
    #[prost(message, optional, tag = "5")]
    pub timeout_height: Option<IbcHeight>,
    #[prost(uint64, tag = "6")]
    pub timeout_time: u64,
    #[prost(string, tag = "7")]
    pub source_channel: String,
    #[prost(string, tag = "8")]
    pub fee_asset: String,
    #[prost(string, tag = "9")]
    pub memo: String,
    #[prost(string, tag = "10")]
    pub bridge_address: String,
    #[prost(bool, tag = "11")]
    pub use_compat_address: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SudoAddressChange {
    #[prost(string, tag = "1")]
    pub new_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ValidatorUpdate {
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key: Vec<u8>,
    #[prost(int64, tag = "2")]
    pub power: i64,
    #[prost(string, tag = "3")]
    pub name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IbcRelayerChange {
    #[prost(oneof = "ibc_relayer_change::Value", tags = "1, 2")]
    pub value: Option<ibc_relayer_change::Value>,
}

pub mod ibc_relayer_change {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(string, tag = "1")]
        Addition(String),
        #[prost(string, tag = "2")]
        Removal(String),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeAssetChange {
    #[prost(oneof = "fee_asset_change::Value", tags = "1, 2")]
    pub value: Option<fee_asset_change::Value>,
}

pub mod fee_asset_change {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(string, tag = "1")]
        Addition(String),
        #[prost(string, tag = "2")]
        Removal(String),
    }
}

/// Base fee and multiplier for one fee category.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeComponents {
    #[prost(message, optional, tag = "1")]
    pub base: Option<Uint128>,
    #[prost(message, optional, tag = "2")]
    pub multiplier: Option<Uint128>,
}

/// Updates the fee schedule for exactly one category.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FeeChange {
    #[prost(
        oneof = "fee_change::Value",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18"
    )]
    pub value: Option<fee_change::Value>,
}

pub mod fee_change {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(message, tag = "1")]
        Transfer(super::FeeComponents),
        #[prost(message, tag = "2")]
        RollupDataSubmission(super::FeeComponents),
        #[prost(message, tag = "3")]
        Ics20Withdrawal(super::FeeComponents),
        #[prost(message, tag = "4")]
        InitBridgeAccount(super::FeeComponents),
        #[prost(message, tag = "5")]
        BridgeLock(super::FeeComponents),
        #[prost(message, tag = "6")]
        BridgeUnlock(super::FeeComponents),
        #[prost(message, tag = "7")]
        BridgeSudoChange(super::FeeComponents),
        #[prost(message, tag = "8")]
        BridgeTransfer(super::FeeComponents),
        #[prost(message, tag = "9")]
        IbcRelay(super::FeeComponents),
        #[prost(message, tag = "10")]
        ValidatorUpdate(super::FeeComponents),
        #[prost(message, tag = "11")]
        SudoAddressChange(super::FeeComponents),
        #[prost(message, tag = "12")]
        IbcRelayerChange(super::FeeComponents),
        #[prost(message, tag = "13")]
        FeeAssetChange(super::FeeComponents),
        #[prost(message, tag = "14")]
        FeeChange(super::FeeComponents),
        #[prost(message, tag = "15")]
        IbcSudoChange(super::FeeComponents),
        #[prost(message, tag = "16")]
        RecoverIbcClient(super::FeeComponents),
        #[prost(message, tag = "17")]
        CurrencyPairsChange(super::FeeComponents),
        #[prost(message, tag = "18")]
        MarketsChange(super::FeeComponents),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IbcSudoChange {
    #[prost(string, tag = "1")]
    pub new_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RecoverIbcClient {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(string, tag = "2")]
    pub replacement_client_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_action_round_trip() {
        let action = Action {
            value: Some(action::Value::Transfer(Transfer {
                to: "astria1wtxkappzcsrlkmgfs6g0zyct0hkhashhp4usfv".to_string(),
                amount: Some(Uint128::from_value(1_000)),
                asset: "nria".to_string(),
                fee_asset: "nria".to_string(),
            })),
        };
        let decoded = Action::decode(action.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, action);
    }

    #[test]
    fn test_unpopulated_action_decodes_to_none() {
        let decoded = Action::decode(&[][..]).unwrap();
        assert!(decoded.value.is_none());
    }

    #[test]
    fn test_fee_change_round_trip() {
        let change = FeeChange {
            value: Some(fee_change::Value::BridgeLock(FeeComponents {
                base: Some(Uint128::from_value(12)),
                multiplier: Some(Uint128::from_value(1)),
            })),
        };
        let decoded = FeeChange::decode(change.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, change);
    }
}
