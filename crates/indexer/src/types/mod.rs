//! Relational entities produced by the decode core.
//!
//! Everything here is plain owned data: the block context builds these up
//! during decoding and the assembler snapshots them into the final
//! [`Block`] record. Serialized form follows the chain's API conventions:
//! camelCase keys, 128-bit quantities as decimal strings.

mod action;
mod block;
mod entities;

pub use action::{
    Action, ActionKind, AddressAction, BalanceUpdate, Deposit, Fee, MarketUpdate,
    MarketUpdateKind, Price, RollupAction, TransferRecord,
};
pub use block::{Block, BlockStats, DataItemKind, DataItemRecord, DecodedTransaction, TxStatus};
pub use entities::{Address, Balance, Bridge, Rollup, Validator};

use serde::Serializer;

/// Serialize a signed 128-bit quantity as an exact decimal string.
pub(crate) fn i128_string<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}
