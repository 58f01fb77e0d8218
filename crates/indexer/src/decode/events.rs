// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Side-channel event interpretation.
//!
//! Events run ahead of the action decoding they feed: fees and deposits land
//! in the context keyed by action position, acknowledgement errors raise the
//! per-transaction flag, price updates append directly. Unknown tags are
//! ignored.

use super::DecodeError;
use crate::context::{AssetResolver, BlockContext};
use crate::source::RawEvent;
use crate::types::{Deposit, Fee, Price};

pub const EVENT_TX_FEES: &str = "tx.fees";
pub const EVENT_TX_DEPOSIT: &str = "tx.deposit";
pub const EVENT_WRITE_ACK: &str = "write_acknowledgement";
pub const EVENT_PRICE_UPDATE: &str = "price_update";

pub async fn decode_events(
    ctx: &mut BlockContext,
    events: &[RawEvent],
    resolver: &AssetResolver,
) -> Result<(), DecodeError> {
    for event in events {
        match event.kind.as_str() {
            EVENT_TX_FEES => decode_fee(ctx, event, resolver).await?,
            EVENT_TX_DEPOSIT => decode_deposit(ctx, event)?,
            EVENT_WRITE_ACK => {
                if let Some(ack) = event.attr("packet_ack")
                    && ack_is_error(ack)
                {
                    ctx.ack_error = true;
                }
            }
            EVENT_PRICE_UPDATE => {
                let pair = required_attr(event, "currency_pair")?;
                let price = required_attr(event, "price")?;
                ctx.prices.push(Price {
                    pair: pair.to_string(),
                    price: price.to_string(),
                    time: ctx.time,
                });
            }
            other => {
                tracing::trace!(kind = other, "ignoring unrecognized event");
            }
        }
    }
    Ok(())
}

fn required_attr<'a>(event: &'a RawEvent, key: &'static str) -> Result<&'a str, DecodeError> {
    event.attr(key).ok_or(DecodeError::MissingField(key))
}

async fn decode_fee(
    ctx: &mut BlockContext,
    event: &RawEvent,
    resolver: &AssetResolver,
) -> Result<(), DecodeError> {
    let asset = required_attr(event, "asset")?;
    let amount = required_attr(event, "feeAmount")?;
    let position_attr = required_attr(event, "positionInTransaction")?;
    let position: u32 = position_attr
        .parse()
        .map_err(|_| DecodeError::InvalidNumeric(position_attr.to_string()))?;

    let asset = resolver.resolve(asset).await?;

    ctx.fees.insert(
        position,
        Fee {
            asset,
            amount: amount.to_string(),
            payer: String::new(),
            position,
            height: ctx.height,
        },
    );
    Ok(())
}

fn decode_deposit(ctx: &mut BlockContext, event: &RawEvent) -> Result<(), DecodeError> {
    let bridge = required_attr(event, "bridgeAddress")?.to_string();
    let amount = required_attr(event, "amount")?;
    let rollup_id = event.attr("rollupId").unwrap_or_default();
    let asset = ctx.currency(event.attr("asset").unwrap_or_default());
    let position_attr = required_attr(event, "sourceActionIndex")?;
    let position: u32 = position_attr
        .parse()
        .map_err(|_| DecodeError::InvalidNumeric(position_attr.to_string()))?;

    // Register the bridge with a zero-delta touch so the block's address set
    // includes it even when no action references it.
    ctx.addresses.set(&bridge, ctx.height, 0, "", 0, 0);

    let deposit = Deposit {
        bridge_address: bridge,
        rollup_id: rollup_id.to_string(),
        amount: amount.to_string(),
        asset,
        destination_chain_address: event
            .attr("destinationChainAddress")
            .unwrap_or_default()
            .to_string(),
        source_transaction_id: event
            .attr("sourceTransactionId")
            .unwrap_or_default()
            .to_string(),
        source_action_index: position,
        height: ctx.height,
        time: ctx.time,
    };
    ctx.deposits.entry(position).or_default().push(deposit);
    Ok(())
}

fn ack_is_error(ack: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(ack) {
        Ok(value) => value.get("error").is_some(),
        Err(_) => ack.contains("error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AssetMetadataLookup, BridgeAssetCache, LookupError};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    struct StaticLookup;

    #[async_trait]
    impl AssetMetadataLookup for StaticLookup {
        async fn resolve(&self, content_hash: &str) -> Result<String, LookupError> {
            match content_hash {
                "cafe" => Ok("transfer/channel-9/uosmo".to_string()),
                other => Err(LookupError(format!("unknown hash {other}"))),
            }
        }
    }

    fn context() -> BlockContext {
        BlockContext::new(
            7,
            chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            "astria1proposer".to_string(),
            "nria".to_string(),
            Arc::new(BridgeAssetCache::new()),
        )
    }

    fn resolver() -> AssetResolver {
        AssetResolver::new(Arc::new(StaticLookup), Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_fee_event_keys_by_position() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_TX_FEES)
            .with_attr("asset", "nria")
            .with_attr("feeAmount", "321")
            .with_attr("positionInTransaction", "2")];

        decode_events(&mut ctx, &events, &resolver()).await.unwrap();

        let fee = ctx.take_fee(2).unwrap();
        assert_eq!(fee.amount, "321");
        assert_eq!(fee.asset, "nria");
    }

    #[tokio::test]
    async fn test_fee_event_resolves_ibc_denomination() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_TX_FEES)
            .with_attr("asset", "ibc/cafe")
            .with_attr("feeAmount", "1")
            .with_attr("positionInTransaction", "0")];

        decode_events(&mut ctx, &events, &resolver()).await.unwrap();
        assert_eq!(ctx.take_fee(0).unwrap().asset, "transfer/channel-9/uosmo");
    }

    #[tokio::test]
    async fn test_fee_event_lookup_failure_is_fatal() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_TX_FEES)
            .with_attr("asset", "ibc/unknown")
            .with_attr("feeAmount", "1")
            .with_attr("positionInTransaction", "0")];

        let result = decode_events(&mut ctx, &events, &resolver()).await;
        assert!(matches!(result, Err(DecodeError::AssetLookup(_))));
    }

    #[tokio::test]
    async fn test_deposit_event_registers_bridge_with_zero_touch() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_TX_DEPOSIT)
            .with_attr("bridgeAddress", "astria1bridge")
            .with_attr("amount", "99")
            .with_attr("rollupId", "aabb")
            .with_attr("asset", "")
            .with_attr("sourceActionIndex", "0")];

        decode_events(&mut ctx, &events, &resolver()).await.unwrap();

        let bridge = ctx.addresses.lookup("astria1bridge").unwrap();
        assert_eq!(bridge.actions_count, 0);
        assert_eq!(bridge.balances[0].value, 0);

        let deposits = ctx.deposits_at(0);
        assert_eq!(deposits.len(), 1);
        assert_eq!(deposits[0].asset, "nria");
    }

    #[tokio::test]
    async fn test_write_ack_error_raises_flag() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_WRITE_ACK)
            .with_attr("packet_ack", r#"{"error":"insufficient funds"}"#)];
        decode_events(&mut ctx, &events, &resolver()).await.unwrap();
        assert!(ctx.ack_error);
    }

    #[tokio::test]
    async fn test_write_ack_success_leaves_flag_clear() {
        let mut ctx = context();
        let events =
            [RawEvent::new(EVENT_WRITE_ACK).with_attr("packet_ack", r#"{"result":"AQ=="}"#)];
        decode_events(&mut ctx, &events, &resolver()).await.unwrap();
        assert!(!ctx.ack_error);
    }

    #[tokio::test]
    async fn test_price_update_is_block_timestamped() {
        let mut ctx = context();
        let events = [RawEvent::new(EVENT_PRICE_UPDATE)
            .with_attr("currency_pair", "BTC/USD")
            .with_attr("price", "6400000000000")];
        decode_events(&mut ctx, &events, &resolver()).await.unwrap();

        assert_eq!(ctx.prices.len(), 1);
        assert_eq!(ctx.prices[0].pair, "BTC/USD");
        assert_eq!(ctx.prices[0].time, ctx.time);
    }

    #[tokio::test]
    async fn test_unknown_event_tags_are_ignored() {
        let mut ctx = context();
        let events = [RawEvent::new("tx.something_else").with_attr("key", "value")];
        decode_events(&mut ctx, &events, &resolver()).await.unwrap();
        assert!(ctx.fees.is_empty());
        assert!(ctx.deposits.is_empty());
    }
}
