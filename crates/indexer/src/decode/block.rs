// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Block assembly: drives the event and transaction decoders over one block
//! in order and snapshots the context into the immutable output record.

use std::sync::Arc;

use super::DecodeError;
use super::events::decode_events;
use super::transactions::{BlockItem, decode_block_item};
use crate::context::{AssetResolver, BlockContext, BridgeAssetCache};
use crate::source::{RawBlock, TxResult};
use crate::types::{Block, BlockStats, DataItemRecord, DecodedTransaction};

pub struct BlockAssembler {
    native: String,
    resolver: Arc<AssetResolver>,
    bridge_assets: Arc<BridgeAssetCache>,
}

impl BlockAssembler {
    pub fn new(
        native: impl Into<String>,
        resolver: Arc<AssetResolver>,
        bridge_assets: Arc<BridgeAssetCache>,
    ) -> Self {
        Self {
            native: native.into(),
            resolver,
            bridge_assets,
        }
    }

    /// Decode one block. Strictly sequential over transaction slots: each
    /// slot's events run first, then the slot itself, so fee and deposit
    /// attachment and the acknowledgement flag observe the right
    /// transaction. Any error aborts the whole block.
    pub async fn assemble(&self, raw: &RawBlock) -> Result<Block, DecodeError> {
        let header = &raw.header;
        let mut ctx = BlockContext::new(
            header.height,
            header.time,
            header.proposer_address.clone(),
            self.native.clone(),
            self.bridge_assets.clone(),
        );

        let mut transactions: Vec<DecodedTransaction> = Vec::new();
        let mut data_items: Vec<DataItemRecord> = Vec::new();
        let default_result = TxResult::default();

        for (index, bytes) in raw.transactions.iter().enumerate() {
            let result = raw.results.get(index).unwrap_or(&default_result);

            decode_events(&mut ctx, &result.events, &self.resolver).await?;

            match decode_block_item(&mut ctx, header.app_version, index, bytes, result)? {
                BlockItem::Transaction(tx) => {
                    ctx.bytes += bytes.len() as u64;
                    ctx.gas_wanted += result.gas_wanted;
                    ctx.gas_used += result.gas_used;
                    transactions.push(tx);
                }
                BlockItem::DataItem(item) => data_items.push(item),
            }

            ctx.end_of_transaction();
        }

        // Block-level events (e.g. oracle price updates) land after the
        // transaction slots.
        decode_events(&mut ctx, &raw.events, &self.resolver).await?;

        tracing::debug!(
            height = header.height,
            transactions = transactions.len(),
            data_items = data_items.len(),
            addresses = ctx.addresses.len(),
            "block decoded"
        );

        Ok(snapshot(ctx, raw, transactions, data_items))
    }
}

fn snapshot(
    ctx: BlockContext,
    raw: &RawBlock,
    transactions: Vec<DecodedTransaction>,
    data_items: Vec<DataItemRecord>,
) -> Block {
    let deposits = transactions
        .iter()
        .flat_map(|tx| tx.actions.iter())
        .flat_map(|action| action.deposits.iter().cloned())
        .collect();

    let stats = BlockStats {
        bytes: ctx.bytes,
        gas_wanted: ctx.gas_wanted,
        gas_used: ctx.gas_used,
        data_size: ctx.data_size,
        supply_change: ctx.supply_change,
        tx_count: transactions.len() as u32,
    };

    Block {
        height: raw.header.height,
        time: raw.header.time,
        chain_id: raw.header.chain_id.clone(),
        hash: raw.header.hash.clone(),
        parent_hash: raw.header.parent_hash.clone(),
        proposer: raw.header.proposer_address.clone(),
        app_version: raw.header.app_version,
        transactions,
        data_items,
        addresses: ctx.addresses.into_entities(),
        rollups: ctx.rollups.into_entities(),
        validators: ctx.validators.into_entities(),
        bridges: ctx.bridges,
        constants: ctx.constants,
        transfers: ctx.transfers,
        deposits,
        prices: ctx.prices,
        markets: ctx.markets,
        stats,
    }
}
