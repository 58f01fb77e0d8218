// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transaction-slot decoding: envelope unmarshal, signer recovery and the
//! data-item reclassification heuristic.

use prost::Message;
use sha2::{Digest, Sha256};

use super::DecodeError;
use super::actions::decode_action;
use crate::codec::address_from_pubkey;
use crate::context::BlockContext;
use crate::source::TxResult;
use crate::types::{DataItemKind, DataItemRecord, DecodedTransaction, TxStatus};
use crate::wire;

/// App version from which data items are structural messages rather than
/// bare commitment roots in the first two slots.
const STRUCTURAL_DATA_ITEM_VERSION: u64 = 3;

pub enum BlockItem {
    Transaction(DecodedTransaction),
    DataItem(DataItemRecord),
}

/// Decode one transaction slot. Envelope unmarshal failure (or a body-less
/// envelope) falls through to data-item classification; bytes that are
/// neither are fatal to the whole block.
pub fn decode_block_item(
    ctx: &mut BlockContext,
    app_version: u64,
    index: usize,
    bytes: &[u8],
    result: &TxResult,
) -> Result<BlockItem, DecodeError> {
    match wire::Transaction::decode(bytes) {
        Ok(envelope) if envelope.body.is_some() => {
            decode_transaction(ctx, envelope, bytes, index, result).map(BlockItem::Transaction)
        }
        _ => classify_data_item(app_version, index, bytes).map(BlockItem::DataItem),
    }
}

fn classify_data_item(
    app_version: u64,
    index: usize,
    bytes: &[u8],
) -> Result<DataItemRecord, DecodeError> {
    if app_version < STRUCTURAL_DATA_ITEM_VERSION {
        // The first two slots hold the commitment roots, each exactly 32
        // bytes. Nothing else is a data item under these versions.
        if index < 2 && bytes.len() == 32 {
            return Ok(DataItemRecord {
                kind: DataItemKind::ImplicitRoot,
                position: index as u32,
                payload: hex::encode(bytes),
            });
        }
        return Err(DecodeError::UnclassifiableItem(index));
    }

    match wire::DataItem::decode(bytes) {
        Ok(item) => match item.value {
            Some(wire::data_item::Value::RollupTransactionsRoot(root)) => Ok(DataItemRecord {
                kind: DataItemKind::RollupTransactionsRoot,
                position: index as u32,
                payload: hex::encode(root),
            }),
            Some(wire::data_item::Value::RollupIdsRoot(root)) => Ok(DataItemRecord {
                kind: DataItemKind::RollupIdsRoot,
                position: index as u32,
                payload: hex::encode(root),
            }),
            Some(wire::data_item::Value::ExtendedCommitInfo(info)) => Ok(DataItemRecord {
                kind: DataItemKind::ExtendedCommitInfo,
                position: index as u32,
                payload: hex::encode(info),
            }),
            None => Err(DecodeError::UnclassifiableItem(index)),
        },
        Err(_) => Err(DecodeError::UnclassifiableItem(index)),
    }
}

fn decode_transaction(
    ctx: &mut BlockContext,
    envelope: wire::Transaction,
    raw_bytes: &[u8],
    index: usize,
    result: &TxResult,
) -> Result<DecodedTransaction, DecodeError> {
    let body_any = envelope
        .body
        .ok_or(DecodeError::MissingField("transaction.body"))?;

    let signer = address_from_pubkey(&envelope.public_key)?;
    let body = wire::TransactionBody::decode(body_any.value.as_slice())?;
    let params = body
        .params
        .ok_or(DecodeError::MissingField("transaction.params"))?;

    // Zero-value touch of the signer: counts the signed transaction without
    // moving value, and pins the nonce.
    ctx.addresses.set(&signer, ctx.height, 0, "", 0, 1);
    ctx.addresses.update_nonce(&signer, params.nonce);

    let mut actions = Vec::with_capacity(body.actions.len());
    for (position, wire_action) in body.actions.iter().enumerate() {
        actions.push(decode_action(ctx, wire_action, &signer, position as u32)?);
    }

    let status = if result.code == 0 {
        TxStatus::Success
    } else {
        TxStatus::Failed
    };

    Ok(DecodedTransaction {
        hash: hex::encode(Sha256::digest(raw_bytes)),
        position: index as u32,
        signer,
        nonce: params.nonce,
        status,
        code: result.code,
        gas_wanted: result.gas_wanted,
        gas_used: result.gas_used,
        signature: hex::encode(&envelope.signature),
        actions,
    })
}
