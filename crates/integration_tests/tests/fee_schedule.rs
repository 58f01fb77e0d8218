// Fee-schedule changes end to end: every category writes its pair of named
// constants onto the block record.

use integration_tests::fixtures::{ALICE_PUBKEY, assembler, block, header, signed_tx};

use astria_indexer::decode::FEE_CATEGORIES;
use astria_indexer::source::TxResult;
use astria_indexer::wire::{self, fee_change::Value as Fc};

fn fee_change_action(value: Fc) -> wire::Action {
    wire::Action {
        value: Some(wire::action::Value::FeeChange(wire::FeeChange {
            value: Some(value),
        })),
    }
}

fn components(base: u128, multiplier: u128) -> wire::FeeComponents {
    wire::FeeComponents {
        base: Some(wire::Uint128::from_value(base)),
        multiplier: Some(wire::Uint128::from_value(multiplier)),
    }
}

#[tokio::test]
async fn every_category_writes_its_constants() {
    let c = || components(340282366920938463463374607431768211455, 2);
    let actions = vec![
        fee_change_action(Fc::Transfer(c())),
        fee_change_action(Fc::RollupDataSubmission(c())),
        fee_change_action(Fc::Ics20Withdrawal(c())),
        fee_change_action(Fc::InitBridgeAccount(c())),
        fee_change_action(Fc::BridgeLock(c())),
        fee_change_action(Fc::BridgeUnlock(c())),
        fee_change_action(Fc::BridgeSudoChange(c())),
        fee_change_action(Fc::BridgeTransfer(c())),
        fee_change_action(Fc::IbcRelay(c())),
        fee_change_action(Fc::ValidatorUpdate(c())),
        fee_change_action(Fc::SudoAddressChange(c())),
        fee_change_action(Fc::IbcRelayerChange(c())),
        fee_change_action(Fc::FeeAssetChange(c())),
        fee_change_action(Fc::FeeChange(c())),
        fee_change_action(Fc::IbcSudoChange(c())),
        fee_change_action(Fc::RecoverIbcClient(c())),
        fee_change_action(Fc::CurrencyPairsChange(c())),
        fee_change_action(Fc::MarketsChange(c())),
    ];
    assert_eq!(actions.len(), FEE_CATEGORIES.len());

    let tx = signed_tx(&ALICE_PUBKEY, 0, actions);
    let raw = block(header(40, 3), vec![tx], vec![TxResult::default()]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    for kind in FEE_CATEGORIES {
        assert_eq!(
            decoded.constants.get(&format!("{kind}_base")).map(String::as_str),
            Some("340282366920938463463374607431768211455"),
            "base constant for {kind}"
        );
        assert_eq!(
            decoded
                .constants
                .get(&format!("{kind}_multiplier"))
                .map(String::as_str),
            Some("2"),
            "multiplier constant for {kind}"
        );
    }

    // Fee-schedule changes reference no addresses beyond the signer's
    // transaction-level registration.
    for action in &decoded.transactions[0].actions {
        assert!(action.addresses.is_empty());
        assert!(action.balance_updates.is_empty());
    }
}

#[tokio::test]
async fn later_change_overwrites_the_constant() {
    let actions = vec![
        fee_change_action(Fc::Transfer(components(10, 1))),
        fee_change_action(Fc::Transfer(components(25, 1))),
    ];
    let tx = signed_tx(&ALICE_PUBKEY, 0, actions);
    let raw = block(header(40, 3), vec![tx], vec![TxResult::default()]);

    let decoded = assembler().assemble(&raw).await.unwrap();

    assert_eq!(
        decoded.constants.get("transfer_base").map(String::as_str),
        Some("25")
    );
}
