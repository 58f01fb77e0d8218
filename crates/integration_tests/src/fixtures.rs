//! Block builders and collaborator fakes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prost::Message;

use astria_indexer::BlockAssembler;
use astria_indexer::context::{
    AssetMetadataLookup, AssetResolver, BridgeAssetCache, LookupError,
};
use astria_indexer::source::{BlockSource, RawBlock, RawHeader, SourceError, TxResult};
use astria_indexer::wire;
use astria_indexer_config::IndexerConfig;

/// Well-known signer: pubkey of all `0x01` bytes.
pub const ALICE_PUBKEY: [u8; 32] = [1; 32];
pub const ALICE: &str = "astria1wtxkappzcsrlkmgfs6g0zyct0hkhashhp4usfv";
pub const BOB: &str = "astria16zs3p8r62u7gra947rjxh7whmuf7z9r80qhfle";
pub const PROPOSER: &str = "astria1ve584t0cv27hwmy0cx9ca8uwyqyfw9y9z5enka";

pub fn header(height: u64, app_version: u64) -> RawHeader {
    RawHeader {
        height,
        time: chrono_time(),
        chain_id: "astria-1".to_string(),
        hash: format!("{height:064x}"),
        parent_hash: format!("{:064x}", height.saturating_sub(1)),
        proposer_address: PROPOSER.to_string(),
        app_version,
    }
}

fn chrono_time() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

pub fn block(header: RawHeader, transactions: Vec<Vec<u8>>, results: Vec<TxResult>) -> RawBlock {
    RawBlock {
        header,
        transactions,
        results,
        events: Vec::new(),
    }
}

/// Encode a signed transaction envelope around the given actions.
pub fn signed_tx(pubkey: &[u8], nonce: u32, actions: Vec<wire::Action>) -> Vec<u8> {
    let body = wire::TransactionBody {
        params: Some(wire::TransactionParams {
            nonce,
            chain_id: "astria-1".to_string(),
        }),
        actions,
    };
    wire::Transaction {
        signature: vec![7; 64],
        public_key: pubkey.to_vec(),
        body: Some(prost_types::Any {
            type_url: "/astria.protocol.transaction.v1.TransactionBody".to_string(),
            value: body.encode_to_vec(),
        }),
    }
    .encode_to_vec()
}

pub fn transfer_action(to: &str, amount: u128) -> wire::Action {
    wire::Action {
        value: Some(wire::action::Value::Transfer(wire::Transfer {
            to: to.to_string(),
            amount: Some(wire::Uint128::from_value(amount)),
            asset: String::new(),
            fee_asset: String::new(),
        })),
    }
}

pub fn rollup_submission_action(rollup_id: [u8; 32], data: Vec<u8>) -> wire::Action {
    wire::Action {
        value: Some(wire::action::Value::RollupDataSubmission(
            wire::RollupDataSubmission {
                rollup_id: rollup_id.to_vec(),
                data,
                fee_asset: String::new(),
            },
        )),
    }
}

pub fn recv_packet_action(receiver: &str, amount: &str, denom: &str) -> wire::Action {
    let packet = wire::Packet {
        sequence: 1,
        source_port: "transfer".to_string(),
        source_channel: "channel-12".to_string(),
        destination_port: "transfer".to_string(),
        destination_channel: "channel-0".to_string(),
        data: serde_json::to_vec(&serde_json::json!({
            "denom": denom,
            "amount": amount,
            "sender": "cosmos1sender",
            "receiver": receiver,
        }))
        .expect("packet data serializes"),
        timeout_height: None,
        timeout_timestamp: 0,
    };
    let msg = wire::MsgRecvPacket {
        packet: Some(packet),
        signer: "relayer".to_string(),
    };
    wire::Action {
        value: Some(wire::action::Value::IbcRelay(wire::IbcRelay {
            raw_action: Some(prost_types::Any {
                type_url: wire::MSG_RECV_PACKET.to_string(),
                value: msg.encode_to_vec(),
            }),
        })),
    }
}

/// Chain-source fake serving pre-built blocks by height.
pub struct MemorySource {
    blocks: HashMap<u64, RawBlock>,
}

impl MemorySource {
    pub fn new(blocks: impl IntoIterator<Item = RawBlock>) -> Self {
        Self {
            blocks: blocks
                .into_iter()
                .map(|block| (block.header.height, block))
                .collect(),
        }
    }
}

#[async_trait]
impl BlockSource for MemorySource {
    async fn fetch(&self, height: u64) -> Result<RawBlock, SourceError> {
        self.blocks.get(&height).cloned().ok_or(SourceError::Fetch {
            height,
            reason: "height not served".to_string(),
        })
    }
}

/// Asset-metadata fake resolving from a fixed table.
pub struct StaticAssets {
    entries: HashMap<String, String>,
}

impl StaticAssets {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl AssetMetadataLookup for StaticAssets {
    async fn resolve(&self, content_hash: &str) -> Result<String, LookupError> {
        self.entries
            .get(content_hash)
            .cloned()
            .ok_or_else(|| LookupError(format!("unknown hash {content_hash}")))
    }
}

/// Assembler wired with config defaults, a static metadata table and the
/// given (possibly pre-seeded) bridge-asset cache.
pub fn assembler_with(bridge_assets: Arc<BridgeAssetCache>) -> BlockAssembler {
    let config = IndexerConfig::default();
    let resolver = AssetResolver::new(
        Arc::new(StaticAssets::new([("cafe", "transfer/channel-9/uosmo")])),
        Duration::from_secs(config.chain.metadata_timeout_secs),
    );
    BlockAssembler::new(config.chain.native_denom, Arc::new(resolver), bridge_assets)
}

pub fn assembler() -> BlockAssembler {
    assembler_with(Arc::new(BridgeAssetCache::new()))
}
