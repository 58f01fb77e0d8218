//! The recognized subset of relayed IBC messages.
//!
//! Only the message types the decoder interprets are modeled; proof fields
//! are omitted and skipped on decode. Anything outside this set is recorded
//! raw by the action decoder rather than rejected.

use serde::Deserialize;

pub const MSG_RECV_PACKET: &str = "/ibc.core.channel.v1.MsgRecvPacket";
pub const MSG_TIMEOUT: &str = "/ibc.core.channel.v1.MsgTimeout";
pub const MSG_ACKNOWLEDGEMENT: &str = "/ibc.core.channel.v1.MsgAcknowledgement";
pub const MSG_CREATE_CLIENT: &str = "/ibc.core.client.v1.MsgCreateClient";
pub const MSG_UPDATE_CLIENT: &str = "/ibc.core.client.v1.MsgUpdateClient";
pub const MSG_CHANNEL_OPEN_INIT: &str = "/ibc.core.channel.v1.MsgChannelOpenInit";
pub const MSG_CHANNEL_OPEN_CONFIRM: &str = "/ibc.core.channel.v1.MsgChannelOpenConfirm";

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct IbcHeight {
    #[prost(uint64, tag = "1")]
    pub revision_number: u64,
    #[prost(uint64, tag = "2")]
    pub revision_height: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Packet {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(string, tag = "2")]
    pub source_port: String,
    #[prost(string, tag = "3")]
    pub source_channel: String,
    #[prost(string, tag = "4")]
    pub destination_port: String,
    #[prost(string, tag = "5")]
    pub destination_channel: String,
    #[prost(bytes = "vec", tag = "6")]
    pub data: Vec<u8>,
    #[prost(message, optional, tag = "7")]
    pub timeout_height: Option<IbcHeight>,
    #[prost(uint64, tag = "8")]
    pub timeout_timestamp: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgRecvPacket {
    #[prost(message, optional, tag = "1")]
    pub packet: Option<Packet>,
    #[prost(string, tag = "4")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgTimeout {
    #[prost(message, optional, tag = "1")]
    pub packet: Option<Packet>,
    #[prost(string, tag = "4")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgAcknowledgement {
    #[prost(message, optional, tag = "1")]
    pub packet: Option<Packet>,
    #[prost(bytes = "vec", tag = "2")]
    pub acknowledgement: Vec<u8>,
    #[prost(string, tag = "5")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgCreateClient {
    #[prost(message, optional, tag = "1")]
    pub client_state: Option<::prost_types::Any>,
    #[prost(message, optional, tag = "2")]
    pub consensus_state: Option<::prost_types::Any>,
    #[prost(string, tag = "3")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgUpdateClient {
    #[prost(string, tag = "1")]
    pub client_id: String,
    #[prost(message, optional, tag = "2")]
    pub client_message: Option<::prost_types::Any>,
    #[prost(string, tag = "3")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgChannelOpenInit {
    #[prost(string, tag = "1")]
    pub port_id: String,
    #[prost(string, tag = "3")]
    pub signer: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MsgChannelOpenConfirm {
    #[prost(string, tag = "1")]
    pub port_id: String,
    #[prost(string, tag = "2")]
    pub channel_id: String,
    #[prost(string, tag = "5")]
    pub signer: String,
}

/// ICS-20 fungible token packet payload; JSON inside `Packet::data`.
#[derive(Debug, Clone, Deserialize)]
pub struct FungibleTokenPacketData {
    pub denom: String,
    pub amount: String,
    pub sender: String,
    pub receiver: String,
    #[serde(default)]
    pub memo: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_recv_packet_round_trip() {
        let msg = MsgRecvPacket {
            packet: Some(Packet {
                sequence: 1,
                source_port: "transfer".to_string(),
                source_channel: "channel-12".to_string(),
                destination_port: "transfer".to_string(),
                destination_channel: "channel-0".to_string(),
                data: br#"{"denom":"uatom","amount":"5","sender":"a","receiver":"b"}"#.to_vec(),
                timeout_height: Some(IbcHeight {
                    revision_number: 1,
                    revision_height: 100,
                }),
                timeout_timestamp: 0,
            }),
            signer: "relayer".to_string(),
        };
        let decoded = MsgRecvPacket::decode(msg.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_packet_data_json() {
        let data: FungibleTokenPacketData = serde_json::from_slice(
            br#"{"denom":"uatom","amount":"250","sender":"cosmos1abc","receiver":"astria1xyz"}"#,
        )
        .unwrap();
        assert_eq!(data.amount, "250");
        assert_eq!(data.memo, "");
    }
}
