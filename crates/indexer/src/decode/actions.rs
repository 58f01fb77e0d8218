// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-action-kind decoding.
//!
//! One handler per kind. Every handler sets the type tag and payload map,
//! touches each referenced address through the registry (one AddressAction
//! per distinct address), and emits at most one symmetric pair of balance
//! updates. Fee and deposit attachment happens after the handler,
//! independent of the kind.

use prost::Message;
use serde_json::{Value, json};

use super::DecodeError;
use crate::codec::{address_from_pubkey, is_chain_address};
use crate::context::BlockContext;
use crate::types::{
    Action, ActionKind, AddressAction, BalanceUpdate, Bridge, MarketUpdate, MarketUpdateKind,
    RollupAction, TransferRecord,
};
use crate::wire::{self, action::Value as WireAction};

/// Decode one wire action against the owning context.
///
/// Fatal to the enclosing transaction on any malformed or unresolvable
/// input; the caller aborts the block.
pub fn decode_action(
    ctx: &mut BlockContext,
    wire_action: &wire::Action,
    signer: &str,
    position: u32,
) -> Result<Action, DecodeError> {
    let value = wire_action
        .value
        .as_ref()
        .ok_or(DecodeError::MissingField("action.value"))?;

    let mut action = Action::new(kind_of(value), ctx.height, ctx.time, position);

    match value {
        WireAction::Transfer(t) => transfer(ctx, &mut action, signer, t)?,
        WireAction::RollupDataSubmission(r) => rollup_data_submission(ctx, &mut action, signer, r)?,
        WireAction::Mint(m) => mint(ctx, &mut action, m)?,
        WireAction::InitBridgeAccount(b) => init_bridge_account(ctx, &mut action, signer, b)?,
        WireAction::BridgeLock(b) => bridge_lock(ctx, &mut action, signer, b)?,
        WireAction::BridgeUnlock(b) => bridge_unlock(ctx, &mut action, signer, b)?,
        WireAction::BridgeSudoChange(b) => bridge_sudo_change(ctx, &mut action, b)?,
        WireAction::BridgeTransfer(b) => bridge_transfer(ctx, &mut action, b)?,
        WireAction::IbcRelay(i) => ibc_relay(ctx, &mut action, i)?,
        WireAction::Ics20Withdrawal(w) => ics20_withdrawal(ctx, &mut action, signer, w)?,
        WireAction::SudoAddressChange(s) => {
            let address = required_str(&s.new_address, "sudo_address_change.new_address")?;
            touch(ctx, &mut action, address, 0, "");
            action.payload.insert("address".to_string(), json!(address));
        }
        WireAction::ValidatorUpdate(v) => validator_update(ctx, &mut action, v)?,
        WireAction::IbcRelayerChange(c) => ibc_relayer_change(ctx, &mut action, c)?,
        WireAction::FeeAssetChange(c) => fee_asset_change(ctx, &mut action, c)?,
        WireAction::FeeChange(f) => fee_change(ctx, &mut action, f)?,
        WireAction::IbcSudoChange(s) => {
            let address = required_str(&s.new_address, "ibc_sudo_change.new_address")?;
            touch(ctx, &mut action, address, 0, "");
            action.payload.insert("address".to_string(), json!(address));
        }
        WireAction::RecoverIbcClient(r) => {
            action
                .payload
                .insert("clientId".to_string(), json!(r.client_id));
            action.payload.insert(
                "replacementClientId".to_string(),
                json!(r.replacement_client_id),
            );
        }
        WireAction::CurrencyPairsChange(c) => currency_pairs_change(&mut action, c)?,
        WireAction::MarketsChange(m) => markets_change(ctx, &mut action, m)?,
        WireAction::AddCurrencyPairs(c) => {
            let pairs: Vec<Value> = c.pairs.iter().map(pair_json).collect();
            action.payload.insert("pairs".to_string(), Value::Array(pairs));
        }
        WireAction::RemoveCurrencyPairs(c) => {
            let pairs: Vec<Value> = c.pairs.iter().map(pair_json).collect();
            action.payload.insert("pairs".to_string(), Value::Array(pairs));
        }
        WireAction::UpsertMarkets(u) => {
            let markets = record_markets(ctx, &u.markets, MarketUpdateKind::Update)?;
            action.payload.insert("markets".to_string(), markets);
        }
        WireAction::RemoveMarkets(r) => {
            for ticker in &r.markets {
                ctx.markets.push(MarketUpdate {
                    ticker: ticker.clone(),
                    kind: MarketUpdateKind::Remove,
                    market: Value::Null,
                });
            }
            action
                .payload
                .insert("markets".to_string(), json!(r.markets));
        }
    }

    attach_fee_and_deposits(ctx, &mut action, signer, position)?;

    Ok(action)
}

fn kind_of(value: &WireAction) -> ActionKind {
    match value {
        WireAction::Transfer(_) => ActionKind::Transfer,
        WireAction::RollupDataSubmission(_) => ActionKind::RollupDataSubmission,
        WireAction::Mint(_) => ActionKind::Mint,
        WireAction::InitBridgeAccount(_) => ActionKind::InitBridgeAccount,
        WireAction::BridgeLock(_) => ActionKind::BridgeLock,
        WireAction::BridgeUnlock(_) => ActionKind::BridgeUnlock,
        WireAction::BridgeSudoChange(_) => ActionKind::BridgeSudoChange,
        WireAction::BridgeTransfer(_) => ActionKind::BridgeTransfer,
        WireAction::IbcRelay(_) => ActionKind::IbcRelay,
        WireAction::Ics20Withdrawal(_) => ActionKind::Ics20Withdrawal,
        WireAction::SudoAddressChange(_) => ActionKind::SudoAddressChange,
        WireAction::ValidatorUpdate(_) => ActionKind::ValidatorUpdate,
        WireAction::IbcRelayerChange(_) => ActionKind::IbcRelayerChange,
        WireAction::FeeAssetChange(_) => ActionKind::FeeAssetChange,
        WireAction::FeeChange(_) => ActionKind::FeeChange,
        WireAction::IbcSudoChange(_) => ActionKind::IbcSudoChange,
        WireAction::RecoverIbcClient(_) => ActionKind::RecoverIbcClient,
        WireAction::CurrencyPairsChange(_) => ActionKind::CurrencyPairsChange,
        WireAction::MarketsChange(_) => ActionKind::MarketsChange,
        WireAction::AddCurrencyPairs(_) => ActionKind::AddCurrencyPairs,
        WireAction::RemoveCurrencyPairs(_) => ActionKind::RemoveCurrencyPairs,
        WireAction::UpsertMarkets(_) => ActionKind::UpsertMarkets,
        WireAction::RemoveMarkets(_) => ActionKind::RemoveMarkets,
    }
}

// ------------------------------------------------------------------------
// Shared helpers
// ------------------------------------------------------------------------

fn required_str<'a>(value: &'a str, field: &'static str) -> Result<&'a str, DecodeError> {
    if value.is_empty() {
        return Err(DecodeError::MissingField(field));
    }
    Ok(value)
}

fn required_amount(
    amount: &Option<wire::Uint128>,
    field: &'static str,
) -> Result<u128, DecodeError> {
    amount
        .as_ref()
        .map(wire::Uint128::value)
        .ok_or(DecodeError::MissingField(field))
}

fn signed(amount: u128) -> Result<i128, DecodeError> {
    i128::try_from(amount).map_err(|_| DecodeError::AmountOverflow)
}

/// Touch an address on behalf of the action. The first touch of a distinct
/// address yields its AddressAction; later touches within the same action
/// only merge balance deltas, so coinciding addresses collapse.
fn touch(ctx: &mut BlockContext, action: &mut Action, address: &str, delta: i128, currency: &str) {
    let already = action.addresses.iter().any(|a| a.address == address);
    if already && delta == 0 {
        return;
    }

    let touches = if already { 0 } else { 1 };
    ctx.addresses
        .set(address, ctx.height, delta, currency, touches, 0);

    if !already {
        action.addresses.push(AddressAction {
            address: address.to_string(),
        });
    }
}

fn push_update(action: &mut Action, address: &str, currency: &str, update: i128, height: u64) {
    action.balance_updates.push(BalanceUpdate {
        address: address.to_string(),
        currency: currency.to_string(),
        update,
        height,
    });
}

/// Debit `from`, credit `to`. When the two coincide the movement nets to a
/// single zero-delta touch with no balance updates.
fn apply_transfer(
    ctx: &mut BlockContext,
    action: &mut Action,
    from: &str,
    to: &str,
    amount: u128,
    currency: &str,
) -> Result<(), DecodeError> {
    let delta = signed(amount)?;
    let height = ctx.height;

    if from == to {
        touch(ctx, action, from, 0, currency);
        return Ok(());
    }

    touch(ctx, action, from, -delta, currency);
    touch(ctx, action, to, delta, currency);
    push_update(action, from, currency, -delta, height);
    push_update(action, to, currency, delta, height);
    Ok(())
}

fn record_transfer(
    ctx: &mut BlockContext,
    action: &mut Action,
    from: &str,
    to: &str,
    amount: u128,
    currency: &str,
) {
    let record = TransferRecord {
        from: from.to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
        asset: currency.to_string(),
        height: ctx.height,
    };
    ctx.transfers.push(record.clone());
    action.transfer = Some(record);
}

fn pair_json(pair: &wire::CurrencyPair) -> Value {
    json!({ "base": pair.base, "quote": pair.quote })
}

fn market_json(market: &wire::Market) -> Result<(String, Value), DecodeError> {
    let ticker = market
        .ticker
        .as_ref()
        .ok_or(DecodeError::MissingField("market.ticker"))?;
    let pair = ticker
        .currency_pair
        .as_ref()
        .ok_or(DecodeError::MissingField("market.ticker.currency_pair"))?;

    let providers: Vec<Value> = market
        .provider_configs
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "offChainTicker": p.off_chain_ticker,
                "normalizeByPair": p.normalize_by_pair.as_ref().map(pair_json),
                "invert": p.invert,
                "metadata": p.metadata_json,
            })
        })
        .collect();

    let value = json!({
        "ticker": {
            "currencyPair": pair_json(pair),
            "decimals": ticker.decimals,
            "minProviderCount": ticker.min_provider_count,
            "enabled": ticker.enabled,
            "metadata": ticker.metadata_json,
        },
        "providerConfigs": providers,
    });

    Ok((pair.ticker(), value))
}

fn record_markets(
    ctx: &mut BlockContext,
    markets: &[wire::Market],
    kind: MarketUpdateKind,
) -> Result<Value, DecodeError> {
    let mut serialized = Vec::with_capacity(markets.len());
    for market in markets {
        let (ticker, value) = market_json(market)?;
        ctx.markets.push(MarketUpdate {
            ticker,
            kind,
            market: value.clone(),
        });
        serialized.push(value);
    }
    Ok(Value::Array(serialized))
}

// ------------------------------------------------------------------------
// Kind handlers
// ------------------------------------------------------------------------

fn transfer(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    t: &wire::Transfer,
) -> Result<(), DecodeError> {
    let to = required_str(&t.to, "transfer.to")?;
    let amount = required_amount(&t.amount, "transfer.amount")?;
    let currency = ctx.currency(&t.asset);

    action.payload.insert("to".to_string(), json!(to));
    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    action.payload.insert("asset".to_string(), json!(currency));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&t.fee_asset)));

    apply_transfer(ctx, action, signer, to, amount, &currency)?;
    record_transfer(ctx, action, signer, to, amount, &currency);
    Ok(())
}

fn rollup_data_submission(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    r: &wire::RollupDataSubmission,
) -> Result<(), DecodeError> {
    if r.rollup_id.is_empty() {
        return Err(DecodeError::MissingField("rollup_data_submission.rollup_id"));
    }

    let rollup_id = hex::encode(&r.rollup_id);
    let size = r.data.len() as u64;

    ctx.rollups.set(&rollup_id, ctx.height, size, 1, 0);
    ctx.data_size += size;
    touch(ctx, action, signer, 0, "");

    action
        .payload
        .insert("rollupId".to_string(), json!(rollup_id));
    action.payload.insert("size".to_string(), json!(size));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&r.fee_asset)));
    action.rollup_action = Some(RollupAction { rollup_id, size });
    Ok(())
}

fn mint(ctx: &mut BlockContext, action: &mut Action, m: &wire::Mint) -> Result<(), DecodeError> {
    let to = required_str(&m.to, "mint.to")?;
    let amount = required_amount(&m.amount, "mint.amount")?;
    let delta = signed(amount)?;
    let currency = ctx.native().to_string();
    let height = ctx.height;

    touch(ctx, action, to, delta, &currency);
    push_update(action, to, &currency, delta, height);
    ctx.supply_change += delta;

    action.payload.insert("to".to_string(), json!(to));
    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    Ok(())
}

fn init_bridge_account(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    b: &wire::InitBridgeAccount,
) -> Result<(), DecodeError> {
    if b.rollup_id.is_empty() {
        return Err(DecodeError::MissingField("init_bridge_account.rollup_id"));
    }

    let rollup_id = hex::encode(&b.rollup_id);
    let asset = ctx.currency(&b.asset);
    let fee_asset = ctx.currency(&b.fee_asset);

    // The signer becomes the bridge; sudo and withdrawer fall back to it.
    let bridge = signer;
    let sudo = if b.sudo_address.is_empty() {
        bridge
    } else {
        b.sudo_address.as_str()
    };
    let withdrawer = if b.withdrawer_address.is_empty() {
        bridge
    } else {
        b.withdrawer_address.as_str()
    };

    touch(ctx, action, bridge, 0, "");
    touch(ctx, action, sudo, 0, "");
    touch(ctx, action, withdrawer, 0, "");
    ctx.addresses.mark_bridge(bridge);

    ctx.bridges.push(Bridge {
        address: bridge.to_string(),
        rollup_id: rollup_id.clone(),
        asset: asset.clone(),
        fee_asset: fee_asset.clone(),
        sudo_address: sudo.to_string(),
        withdrawer_address: withdrawer.to_string(),
        init_height: ctx.height,
    });
    ctx.bridge_assets.put(bridge, &asset);
    ctx.rollups.set(&rollup_id, ctx.height, 0, 1, 1);

    action
        .payload
        .insert("rollupId".to_string(), json!(rollup_id));
    action.payload.insert("asset".to_string(), json!(asset));
    action
        .payload
        .insert("feeAsset".to_string(), json!(fee_asset));
    action.payload.insert("sudoAddress".to_string(), json!(sudo));
    action
        .payload
        .insert("withdrawerAddress".to_string(), json!(withdrawer));
    Ok(())
}

fn bridge_lock(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    b: &wire::BridgeLock,
) -> Result<(), DecodeError> {
    let to = required_str(&b.to, "bridge_lock.to")?;
    let amount = required_amount(&b.amount, "bridge_lock.amount")?;
    let currency = ctx.currency(&b.asset);

    action.payload.insert("to".to_string(), json!(to));
    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    action.payload.insert("asset".to_string(), json!(currency));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&b.fee_asset)));
    if !b.destination_chain_address.is_empty() {
        action.payload.insert(
            "destinationChainAddress".to_string(),
            json!(b.destination_chain_address),
        );
    }

    apply_transfer(ctx, action, signer, to, amount, &currency)?;
    record_transfer(ctx, action, signer, to, amount, &currency);
    Ok(())
}

fn bridge_unlock(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    b: &wire::BridgeUnlock,
) -> Result<(), DecodeError> {
    let to = required_str(&b.to, "bridge_unlock.to")?;
    let amount = required_amount(&b.amount, "bridge_unlock.amount")?;
    let bridge = if b.bridge_address.is_empty() {
        signer
    } else {
        b.bridge_address.as_str()
    };
    let currency = ctx
        .bridge_assets
        .get(bridge)
        .ok_or_else(|| DecodeError::UnknownBridgeAsset(bridge.to_string()))?;

    action.payload.insert("to".to_string(), json!(to));
    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    action.payload.insert("asset".to_string(), json!(currency));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&b.fee_asset)));
    action
        .payload
        .insert("bridgeAddress".to_string(), json!(bridge));
    if !b.memo.is_empty() {
        action.payload.insert("memo".to_string(), json!(b.memo));
    }
    if b.rollup_block_number != 0 {
        action
            .payload
            .insert("rollupBlockNumber".to_string(), json!(b.rollup_block_number));
    }
    if !b.rollup_withdrawal_event_id.is_empty() {
        action.payload.insert(
            "rollupWithdrawalEventId".to_string(),
            json!(b.rollup_withdrawal_event_id),
        );
    }

    let bridge = bridge.to_string();
    apply_transfer(ctx, action, &bridge, to, amount, &currency)?;
    record_transfer(ctx, action, &bridge, to, amount, &currency);
    Ok(())
}

fn bridge_sudo_change(
    ctx: &mut BlockContext,
    action: &mut Action,
    b: &wire::BridgeSudoChange,
) -> Result<(), DecodeError> {
    let bridge = required_str(&b.bridge_address, "bridge_sudo_change.bridge_address")?;
    let sudo = if b.new_sudo_address.is_empty() {
        bridge
    } else {
        b.new_sudo_address.as_str()
    };
    let withdrawer = if b.new_withdrawer_address.is_empty() {
        bridge
    } else {
        b.new_withdrawer_address.as_str()
    };

    touch(ctx, action, bridge, 0, "");
    touch(ctx, action, sudo, 0, "");
    touch(ctx, action, withdrawer, 0, "");

    action
        .payload
        .insert("bridgeAddress".to_string(), json!(bridge));
    action.payload.insert("sudoAddress".to_string(), json!(sudo));
    action
        .payload
        .insert("withdrawerAddress".to_string(), json!(withdrawer));
    if !b.fee_asset.is_empty() {
        action
            .payload
            .insert("feeAsset".to_string(), json!(b.fee_asset));
    }

    let sudo = sudo.to_string();
    let withdrawer = withdrawer.to_string();
    if let Some(entity) = ctx.bridge_mut(bridge) {
        entity.sudo_address = sudo;
        entity.withdrawer_address = withdrawer;
    }
    Ok(())
}

fn bridge_transfer(
    ctx: &mut BlockContext,
    action: &mut Action,
    b: &wire::BridgeTransfer,
) -> Result<(), DecodeError> {
    let to = required_str(&b.to, "bridge_transfer.to")?;
    let bridge = required_str(&b.bridge_address, "bridge_transfer.bridge_address")?;
    let amount = required_amount(&b.amount, "bridge_transfer.amount")?;
    let currency = ctx
        .bridge_assets
        .get(bridge)
        .ok_or_else(|| DecodeError::UnknownBridgeAsset(bridge.to_string()))?;

    action.payload.insert("to".to_string(), json!(to));
    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    action.payload.insert("asset".to_string(), json!(currency));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&b.fee_asset)));
    action
        .payload
        .insert("bridgeAddress".to_string(), json!(bridge));
    if !b.destination_chain_address.is_empty() {
        action.payload.insert(
            "destinationChainAddress".to_string(),
            json!(b.destination_chain_address),
        );
    }

    let bridge = bridge.to_string();
    apply_transfer(ctx, action, &bridge, to, amount, &currency)?;
    record_transfer(ctx, action, &bridge, to, amount, &currency);
    Ok(())
}

fn ics20_withdrawal(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    w: &wire::Ics20Withdrawal,
) -> Result<(), DecodeError> {
    let amount = required_amount(&w.amount, "ics20_withdrawal.amount")?;
    let currency = ctx.currency(&w.denom);
    let payer = if w.bridge_address.is_empty() {
        signer
    } else {
        w.bridge_address.as_str()
    };
    let delta = signed(amount)?;
    let height = ctx.height;

    let payer = payer.to_string();
    touch(ctx, action, &payer, -delta, &currency);
    push_update(action, &payer, &currency, -delta, height);
    ctx.supply_change -= delta;

    // Refund leg: zero-value touch of the return address, collapsed when it
    // is the payer itself.
    if !w.return_address.is_empty() && w.return_address != payer {
        touch(ctx, action, &w.return_address, 0, "");
    }

    action
        .payload
        .insert("amount".to_string(), json!(amount.to_string()));
    action.payload.insert("denom".to_string(), json!(currency));
    if !w.return_address.is_empty() {
        action
            .payload
            .insert("returnAddress".to_string(), json!(w.return_address));
    }
    action
        .payload
        .insert("sourceChannel".to_string(), json!(w.source_channel));
    action
        .payload
        .insert("feeAsset".to_string(), json!(ctx.currency(&w.fee_asset)));
    if !w.destination_chain_address.is_empty() {
        action.payload.insert(
            "destinationChainAddress".to_string(),
            json!(w.destination_chain_address),
        );
    }
    if let Some(timeout) = &w.timeout_height {
        action.payload.insert(
            "timeoutHeight".to_string(),
            json!({
                "revisionNumber": timeout.revision_number,
                "revisionHeight": timeout.revision_height,
            }),
        );
    }
    if w.timeout_time != 0 {
        action
            .payload
            .insert("timeoutTime".to_string(), json!(w.timeout_time));
    }
    if !w.memo.is_empty() {
        action.payload.insert("memo".to_string(), json!(w.memo));
    }
    if !w.bridge_address.is_empty() {
        action
            .payload
            .insert("bridgeAddress".to_string(), json!(w.bridge_address));
    }
    if w.use_compat_address {
        action
            .payload
            .insert("useCompatAddress".to_string(), json!(true));
    }
    Ok(())
}

fn validator_update(
    ctx: &mut BlockContext,
    action: &mut Action,
    v: &wire::ValidatorUpdate,
) -> Result<(), DecodeError> {
    let address = address_from_pubkey(&v.pub_key)?;
    let pubkey = hex::encode(&v.pub_key);

    touch(ctx, action, &address, 0, "");
    ctx.validators
        .set(&pubkey, &address, v.power, &v.name, ctx.height);

    action.payload.insert("pubkey".to_string(), json!(pubkey));
    action.payload.insert("address".to_string(), json!(address));
    action.payload.insert("power".to_string(), json!(v.power));
    if !v.name.is_empty() {
        action.payload.insert("name".to_string(), json!(v.name));
    }
    Ok(())
}

fn ibc_relayer_change(
    ctx: &mut BlockContext,
    action: &mut Action,
    c: &wire::IbcRelayerChange,
) -> Result<(), DecodeError> {
    let (address, is_addition) = match &c.value {
        Some(wire::ibc_relayer_change::Value::Addition(addr)) => (addr, true),
        Some(wire::ibc_relayer_change::Value::Removal(addr)) => (addr, false),
        None => return Err(DecodeError::MissingField("ibc_relayer_change.value")),
    };
    let address = required_str(address, "ibc_relayer_change.address")?.to_string();

    touch(ctx, action, &address, 0, "");
    ctx.addresses.set_ibc_relayer(&address, is_addition);

    action.payload.insert("address".to_string(), json!(address));
    action.payload.insert(
        "change".to_string(),
        json!(if is_addition { "addition" } else { "removal" }),
    );
    Ok(())
}

fn fee_asset_change(
    _ctx: &mut BlockContext,
    action: &mut Action,
    c: &wire::FeeAssetChange,
) -> Result<(), DecodeError> {
    let (asset, change) = match &c.value {
        Some(wire::fee_asset_change::Value::Addition(asset)) => (asset, "addition"),
        Some(wire::fee_asset_change::Value::Removal(asset)) => (asset, "removal"),
        None => return Err(DecodeError::MissingField("fee_asset_change.value")),
    };

    action.payload.insert("asset".to_string(), json!(asset));
    action.payload.insert("change".to_string(), json!(change));
    Ok(())
}

/// All fee-schedule categories of the current protocol, in oneof order.
pub const FEE_CATEGORIES: [&str; 18] = [
    "transfer",
    "rollup_data_submission",
    "ics20_withdrawal",
    "init_bridge_account",
    "bridge_lock",
    "bridge_unlock",
    "bridge_sudo_change",
    "bridge_transfer",
    "ibc_relay",
    "validator_update",
    "sudo_address_change",
    "ibc_relayer_change",
    "fee_asset_change",
    "fee_change",
    "ibc_sudo_change",
    "recover_ibc_client",
    "currency_pairs_change",
    "markets_change",
];

fn fee_change(
    ctx: &mut BlockContext,
    action: &mut Action,
    f: &wire::FeeChange,
) -> Result<(), DecodeError> {
    use wire::fee_change::Value as Fc;

    let (kind, components) = match f
        .value
        .as_ref()
        .ok_or(DecodeError::MissingField("fee_change.value"))?
    {
        Fc::Transfer(c) => ("transfer", c),
        Fc::RollupDataSubmission(c) => ("rollup_data_submission", c),
        Fc::Ics20Withdrawal(c) => ("ics20_withdrawal", c),
        Fc::InitBridgeAccount(c) => ("init_bridge_account", c),
        Fc::BridgeLock(c) => ("bridge_lock", c),
        Fc::BridgeUnlock(c) => ("bridge_unlock", c),
        Fc::BridgeSudoChange(c) => ("bridge_sudo_change", c),
        Fc::BridgeTransfer(c) => ("bridge_transfer", c),
        Fc::IbcRelay(c) => ("ibc_relay", c),
        Fc::ValidatorUpdate(c) => ("validator_update", c),
        Fc::SudoAddressChange(c) => ("sudo_address_change", c),
        Fc::IbcRelayerChange(c) => ("ibc_relayer_change", c),
        Fc::FeeAssetChange(c) => ("fee_asset_change", c),
        Fc::FeeChange(c) => ("fee_change", c),
        Fc::IbcSudoChange(c) => ("ibc_sudo_change", c),
        Fc::RecoverIbcClient(c) => ("recover_ibc_client", c),
        Fc::CurrencyPairsChange(c) => ("currency_pairs_change", c),
        Fc::MarketsChange(c) => ("markets_change", c),
    };

    let base = components
        .base
        .as_ref()
        .map(wire::Uint128::to_decimal)
        .ok_or(DecodeError::MissingField("fee_change.base"))?;
    let multiplier = components
        .multiplier
        .as_ref()
        .map(wire::Uint128::to_decimal)
        .ok_or(DecodeError::MissingField("fee_change.multiplier"))?;

    ctx.set_constant(format!("{kind}_base"), &base);
    ctx.set_constant(format!("{kind}_multiplier"), &multiplier);

    action.payload.insert("kind".to_string(), json!(kind));
    action.payload.insert("base".to_string(), json!(base));
    action
        .payload
        .insert("multiplier".to_string(), json!(multiplier));
    Ok(())
}

fn currency_pairs_change(
    action: &mut Action,
    c: &wire::CurrencyPairsChange,
) -> Result<(), DecodeError> {
    let (key, pairs) = match &c.value {
        Some(wire::currency_pairs_change::Value::Addition(p)) => ("addition", &p.pairs),
        Some(wire::currency_pairs_change::Value::Removal(p)) => ("removal", &p.pairs),
        None => return Err(DecodeError::MissingField("currency_pairs_change.value")),
    };

    let pairs: Vec<Value> = pairs.iter().map(pair_json).collect();
    action.payload.insert(key.to_string(), Value::Array(pairs));
    Ok(())
}

fn markets_change(
    ctx: &mut BlockContext,
    action: &mut Action,
    m: &wire::MarketsChange,
) -> Result<(), DecodeError> {
    let (key, markets, kind) = match &m.value {
        Some(wire::markets_change::Value::Creation(m)) => {
            ("creation", &m.markets, MarketUpdateKind::Create)
        }
        Some(wire::markets_change::Value::Removal(m)) => {
            ("removal", &m.markets, MarketUpdateKind::Remove)
        }
        Some(wire::markets_change::Value::Update(m)) => {
            ("update", &m.markets, MarketUpdateKind::Update)
        }
        None => return Err(DecodeError::MissingField("markets_change.value")),
    };

    let serialized = record_markets(ctx, markets, kind)?;
    action.payload.insert(key.to_string(), serialized);
    Ok(())
}

fn ibc_relay(
    ctx: &mut BlockContext,
    action: &mut Action,
    relay: &wire::IbcRelay,
) -> Result<(), DecodeError> {
    let Some(raw) = &relay.raw_action else {
        // Empty relay: recorded raw, never an error.
        action.payload.insert("rawType".to_string(), json!(""));
        return Ok(());
    };

    match raw.type_url.as_str() {
        wire::MSG_RECV_PACKET => {
            let msg = wire::MsgRecvPacket::decode(raw.value.as_slice())?;
            let packet = msg
                .packet
                .ok_or(DecodeError::MissingField("recv_packet.packet"))?;
            insert_packet_payload(action, "MsgRecvPacket", &packet);

            match serde_json::from_slice::<wire::FungibleTokenPacketData>(&packet.data) {
                Ok(data) => {
                    action.payload.insert("denom".to_string(), json!(data.denom));
                    action
                        .payload
                        .insert("amount".to_string(), json!(data.amount));
                    action
                        .payload
                        .insert("sender".to_string(), json!(data.sender));
                    action
                        .payload
                        .insert("receiver".to_string(), json!(data.receiver));
                    if !data.memo.is_empty() {
                        action.payload.insert("memo".to_string(), json!(data.memo));
                    }

                    // A prior acknowledgement error means the receiving side
                    // rejected this packet: no credit.
                    let flagged = std::mem::take(&mut ctx.ack_error);
                    if is_chain_address(&data.receiver) && !flagged {
                        let amount: u128 = data
                            .amount
                            .parse()
                            .map_err(|_| DecodeError::InvalidNumeric(data.amount.clone()))?;
                        let delta = signed(amount)?;
                        let currency = format!(
                            "{}/{}/{}",
                            packet.destination_port, packet.destination_channel, data.denom
                        );
                        let height = ctx.height;

                        touch(ctx, action, &data.receiver, delta, &currency);
                        push_update(action, &data.receiver, &currency, delta, height);
                        ctx.supply_change += delta;
                    }
                }
                Err(_) => {
                    action
                        .payload
                        .insert("data".to_string(), json!(hex::encode(&packet.data)));
                }
            }
        }
        wire::MSG_TIMEOUT => {
            let msg = wire::MsgTimeout::decode(raw.value.as_slice())?;
            let packet = msg
                .packet
                .ok_or(DecodeError::MissingField("timeout.packet"))?;
            insert_packet_payload(action, "MsgTimeout", &packet);
        }
        wire::MSG_ACKNOWLEDGEMENT => {
            let msg = wire::MsgAcknowledgement::decode(raw.value.as_slice())?;
            let packet = msg
                .packet
                .ok_or(DecodeError::MissingField("acknowledgement.packet"))?;
            insert_packet_payload(action, "MsgAcknowledgement", &packet);
            action.payload.insert(
                "acknowledgement".to_string(),
                json!(String::from_utf8_lossy(&msg.acknowledgement)),
            );
        }
        wire::MSG_CREATE_CLIENT => {
            let msg = wire::MsgCreateClient::decode(raw.value.as_slice())?;
            action
                .payload
                .insert("type".to_string(), json!("MsgCreateClient"));
            if let Some(state) = &msg.client_state {
                action
                    .payload
                    .insert("clientState".to_string(), json!(state.type_url));
            }
        }
        wire::MSG_UPDATE_CLIENT => {
            let msg = wire::MsgUpdateClient::decode(raw.value.as_slice())?;
            action
                .payload
                .insert("type".to_string(), json!("MsgUpdateClient"));
            action
                .payload
                .insert("clientId".to_string(), json!(msg.client_id));
        }
        wire::MSG_CHANNEL_OPEN_INIT => {
            let msg = wire::MsgChannelOpenInit::decode(raw.value.as_slice())?;
            action
                .payload
                .insert("type".to_string(), json!("MsgChannelOpenInit"));
            action
                .payload
                .insert("portId".to_string(), json!(msg.port_id));
        }
        wire::MSG_CHANNEL_OPEN_CONFIRM => {
            let msg = wire::MsgChannelOpenConfirm::decode(raw.value.as_slice())?;
            action
                .payload
                .insert("type".to_string(), json!("MsgChannelOpenConfirm"));
            action
                .payload
                .insert("portId".to_string(), json!(msg.port_id));
            action
                .payload
                .insert("channelId".to_string(), json!(msg.channel_id));
        }
        unrecognized => {
            // Recorded raw, never an error.
            tracing::debug!(type_url = unrecognized, "unrecognized relayed IBC message");
            action
                .payload
                .insert("rawType".to_string(), json!(unrecognized));
            action
                .payload
                .insert("raw".to_string(), json!(hex::encode(&raw.value)));
        }
    }
    Ok(())
}

fn insert_packet_payload(action: &mut Action, msg_type: &str, packet: &wire::Packet) {
    action.payload.insert("type".to_string(), json!(msg_type));
    action
        .payload
        .insert("sequence".to_string(), json!(packet.sequence));
    action
        .payload
        .insert("sourcePort".to_string(), json!(packet.source_port));
    action
        .payload
        .insert("sourceChannel".to_string(), json!(packet.source_channel));
    action
        .payload
        .insert("destinationPort".to_string(), json!(packet.destination_port));
    action.payload.insert(
        "destinationChannel".to_string(),
        json!(packet.destination_channel),
    );
}

/// Kind-independent post-processing: a fee recorded for this position
/// always moves value from the signer to the block proposer; deposits
/// recorded for this position attach verbatim.
fn attach_fee_and_deposits(
    ctx: &mut BlockContext,
    action: &mut Action,
    signer: &str,
    position: u32,
) -> Result<(), DecodeError> {
    if let Some(mut fee) = ctx.take_fee(position) {
        fee.payer = signer.to_string();

        let amount: i128 = fee
            .amount
            .parse()
            .map_err(|_| DecodeError::InvalidNumeric(fee.amount.clone()))?;
        let currency = fee.asset.clone();
        let proposer = ctx.proposer.clone();
        let height = ctx.height;

        touch(ctx, action, signer, -amount, &currency);
        touch(ctx, action, &proposer, amount, &currency);
        push_update(action, signer, &currency, -amount, height);
        push_update(action, &proposer, &currency, amount, height);

        action.fee = Some(fee);
    }

    let deposits = ctx.deposits_at(position);
    if !deposits.is_empty() {
        action.deposits = deposits;
    }
    Ok(())
}
