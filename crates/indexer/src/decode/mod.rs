// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! The decode-and-aggregate engine.
//!
//! [`BlockAssembler`] drives the event decoder and the transaction decoder
//! over one block in order; the transaction decoder delegates per-action
//! work to the action decoder. Everything feeds one [`crate::BlockContext`].

mod actions;
mod block;
mod events;
mod transactions;

pub use actions::{FEE_CATEGORIES, decode_action};
pub use block::BlockAssembler;
pub use events::decode_events;
pub use transactions::{BlockItem, decode_block_item};

use thiserror::Error;

use crate::codec::AddressError;
use crate::context::ResolveError;

/// Failures fatal to the enclosing transaction, and therefore to the whole
/// block: there is no partial-block success.
///
/// `Proto`, `MissingField`, `InvalidNumeric`, `AmountOverflow`, `Address`
/// and `UnclassifiableItem` are malformed input; `UnknownBridgeAsset` is a
/// reference to a bridge this indexer has never seen; `AssetLookup` wraps
/// an external lookup failure and is the one class the surrounding
/// pipeline is expected to retry at block granularity.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed protobuf payload: {0}")]
    Proto(#[from] prost::DecodeError),

    #[error("required field missing: {0}")]
    MissingField(&'static str),

    #[error("unparseable numeric string {0:?}")]
    InvalidNumeric(String),

    #[error("amount does not fit a signed 128-bit delta")]
    AmountOverflow,

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("transaction slot {0} holds neither a transaction nor a data item")]
    UnclassifiableItem(usize),

    #[error("no asset registered for bridge {0}")]
    UnknownBridgeAsset(String),

    #[error(transparent)]
    AssetLookup(#[from] ResolveError),
}
