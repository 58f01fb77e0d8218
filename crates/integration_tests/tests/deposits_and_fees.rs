// Fee and deposit attachment through block events, including the
// asymmetric per-transaction clearing behavior.

use integration_tests::fixtures::{
    ALICE, ALICE_PUBKEY, BOB, PROPOSER, assembler, block, header, signed_tx, transfer_action,
};

use astria_indexer::source::{RawEvent, TxResult};

fn fee_event(position: u32, amount: &str) -> RawEvent {
    RawEvent::new("tx.fees")
        .with_attr("asset", "nria")
        .with_attr("feeAmount", amount)
        .with_attr("positionInTransaction", position.to_string())
}

fn deposit_event(position: u32, amount: &str) -> RawEvent {
    RawEvent::new("tx.deposit")
        .with_attr("bridgeAddress", BOB)
        .with_attr("rollupId", "aabb")
        .with_attr("amount", amount)
        .with_attr("asset", "nria")
        .with_attr("destinationChainAddress", "0xdead")
        .with_attr("sourceTransactionId", "0xbeef")
        .with_attr("sourceActionIndex", position.to_string())
}

#[tokio::test]
async fn fee_moves_value_from_signer_to_proposer() {
    let tx = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 100)]);
    let result = TxResult {
        events: vec![fee_event(0, "12")],
        ..Default::default()
    };
    let raw = block(header(30, 3), vec![tx], vec![result]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    let action = &decoded.transactions[0].actions[0];
    let fee = action.fee.as_ref().unwrap();
    assert_eq!(fee.amount, "12");
    assert_eq!(fee.payer, ALICE);

    // Two transfer updates plus exactly two fee updates.
    assert_eq!(action.balance_updates.len(), 4);
    let proposer_credit = action
        .balance_updates
        .iter()
        .find(|u| u.address == PROPOSER)
        .unwrap();
    assert_eq!(proposer_credit.update, 12);

    let alice = decoded
        .addresses
        .iter()
        .find(|a| a.address == ALICE)
        .unwrap();
    assert_eq!(alice.balances[0].value, -112);
}

#[tokio::test]
async fn fees_do_not_leak_into_the_next_transaction() {
    // The fee is declared for position 1, which the first transaction does
    // not have. The second transaction does have an action at position 1;
    // it must not pick the stale fee up.
    let first = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 1)]);
    let second = signed_tx(
        &ALICE_PUBKEY,
        1,
        vec![transfer_action(BOB, 2), transfer_action(BOB, 3)],
    );

    let first_result = TxResult {
        events: vec![fee_event(1, "5")],
        ..Default::default()
    };
    let raw = block(
        header(30, 3),
        vec![first, second],
        vec![first_result, TxResult::default()],
    );

    let decoded = assembler().assemble(&raw).await.unwrap();

    for tx in &decoded.transactions {
        for action in &tx.actions {
            assert!(action.fee.is_none());
        }
    }
}

#[tokio::test]
async fn deposits_survive_transaction_boundary() {
    // Deposits are keyed by action position like fees, but the deposit map
    // is not cleared between transactions: a deposit recorded for the first
    // transaction attaches again at the same position in the second. This
    // pins the observed production behavior; see DESIGN.md.
    let first = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 1)]);
    let second = signed_tx(&ALICE_PUBKEY, 1, vec![transfer_action(BOB, 2)]);

    let first_result = TxResult {
        events: vec![deposit_event(0, "77")],
        ..Default::default()
    };
    let raw = block(
        header(30, 3),
        vec![first, second],
        vec![first_result, TxResult::default()],
    );

    let decoded = assembler().assemble(&raw).await.unwrap();

    let first_action = &decoded.transactions[0].actions[0];
    let second_action = &decoded.transactions[1].actions[0];
    assert_eq!(first_action.deposits.len(), 1);
    assert_eq!(second_action.deposits.len(), 1);
    assert_eq!(first_action.deposits[0].amount, "77");
    assert_eq!(second_action.deposits[0].amount, "77");

    // Both attachments are backfilled with block height and time.
    assert_eq!(second_action.deposits[0].height, 30);

    // The bridge address was registered by the event with a zero touch.
    let bridge = decoded
        .addresses
        .iter()
        .find(|a| a.address == BOB)
        .unwrap();
    assert!(bridge.balances.iter().all(|b| b.value <= 3));
}

#[tokio::test]
async fn fee_with_ibc_denomination_resolves_through_lookup() {
    let tx = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 1)]);
    let result = TxResult {
        events: vec![
            RawEvent::new("tx.fees")
                .with_attr("asset", "ibc/cafe")
                .with_attr("feeAmount", "3")
                .with_attr("positionInTransaction", "0"),
        ],
        ..Default::default()
    };
    let raw = block(header(30, 3), vec![tx], vec![result]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    let fee = decoded.transactions[0].actions[0].fee.as_ref().unwrap();
    assert_eq!(fee.asset, "transfer/channel-9/uosmo");
}
