// End-to-end decoding of simple value-movement blocks.

use integration_tests::fixtures::{
    ALICE, ALICE_PUBKEY, BOB, assembler, block, header, signed_tx, transfer_action,
};

use astria_indexer::source::TxResult;
use astria_indexer::types::{ActionKind, TxStatus};

#[tokio::test]
async fn transfer_block_produces_symmetric_updates() {
    let tx = signed_tx(&ALICE_PUBKEY, 3, vec![transfer_action(BOB, 100)]);
    let raw = block(header(10, 3), vec![tx], vec![TxResult::default()]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    assert_eq!(decoded.height, 10);
    assert_eq!(decoded.transactions.len(), 1);

    let tx = &decoded.transactions[0];
    assert_eq!(tx.signer, ALICE);
    assert_eq!(tx.nonce, 3);
    assert_eq!(tx.status, TxStatus::Success);
    assert_eq!(tx.actions.len(), 1);

    let action = &tx.actions[0];
    assert_eq!(action.kind, ActionKind::Transfer);
    assert_eq!(action.addresses.len(), 2);
    assert_eq!(action.balance_updates.len(), 2);
    let total: i128 = action.balance_updates.iter().map(|u| u.update).sum();
    assert_eq!(total, 0);

    let alice = decoded
        .addresses
        .iter()
        .find(|a| a.address == ALICE)
        .unwrap();
    assert_eq!(alice.signed_tx_count, 1);
    assert_eq!(alice.actions_count, 1);
    assert_eq!(alice.nonce, 3);
    assert_eq!(alice.balances[0].value, -100);

    let bob = decoded.addresses.iter().find(|a| a.address == BOB).unwrap();
    assert_eq!(bob.balances[0].value, 100);
    assert_eq!(bob.signed_tx_count, 0);

    assert_eq!(decoded.transfers.len(), 1);
    assert_eq!(decoded.stats.tx_count, 1);
    assert!(decoded.stats.bytes > 0);
}

#[tokio::test]
async fn self_transfer_nets_to_single_zero_row() {
    let tx = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(ALICE, 100)]);
    let raw = block(header(10, 3), vec![tx], vec![TxResult::default()]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    let action = &decoded.transactions[0].actions[0];
    assert_eq!(action.addresses.len(), 1);
    assert!(action.balance_updates.is_empty());

    let alice = decoded
        .addresses
        .iter()
        .find(|a| a.address == ALICE)
        .unwrap();
    assert_eq!(alice.balances.len(), 1);
    assert_eq!(alice.balances[0].value, 0);
}

#[tokio::test]
async fn later_actions_observe_earlier_mutations() {
    // Two transfers in one transaction: the balances merge on the shared
    // entity rather than producing duplicate rows.
    let tx = signed_tx(
        &ALICE_PUBKEY,
        0,
        vec![transfer_action(BOB, 60), transfer_action(BOB, 40)],
    );
    let raw = block(header(10, 3), vec![tx], vec![TxResult::default()]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    let bob = decoded.addresses.iter().find(|a| a.address == BOB).unwrap();
    assert_eq!(bob.balances.len(), 1);
    assert_eq!(bob.balances[0].value, 100);
    assert_eq!(bob.actions_count, 2);

    let alice = decoded
        .addresses
        .iter()
        .find(|a| a.address == ALICE)
        .unwrap();
    assert_eq!(alice.balances[0].value, -100);
}

#[tokio::test]
async fn failed_transaction_is_recorded_with_its_code() {
    let tx = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 1)]);
    let result = TxResult {
        code: 7,
        gas_wanted: 200,
        gas_used: 150,
        events: Vec::new(),
    };
    let raw = block(header(10, 3), vec![tx], vec![result]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    assert_eq!(decoded.transactions[0].status, TxStatus::Failed);
    assert_eq!(decoded.transactions[0].code, 7);
    assert_eq!(decoded.stats.gas_wanted, 200);
    assert_eq!(decoded.stats.gas_used, 150);
}

#[tokio::test]
async fn blocks_flow_from_source_to_record() {
    use astria_indexer::source::BlockSource;
    use integration_tests::fixtures::MemorySource;

    let tx = signed_tx(&ALICE_PUBKEY, 0, vec![transfer_action(BOB, 9)]);
    let source = MemorySource::new([block(header(11, 3), vec![tx], vec![TxResult::default()])]);

    let raw = source.fetch(11).await.unwrap();
    let decoded = assembler().assemble(&raw).await.unwrap();
    assert_eq!(decoded.height, 11);
    assert_eq!(decoded.transactions.len(), 1);

    assert!(source.fetch(12).await.is_err());
}
