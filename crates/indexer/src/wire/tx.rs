//! The signed transaction envelope and non-transaction data items.

/// Outer envelope of a signed transaction.
///
/// The body is wrapped in an `Any`; an envelope that decodes but carries no
/// body is not a transaction (see the data-item reclassification in
/// `decode::transactions`).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(bytes = "vec", tag = "1")]
    pub signature: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub public_key: Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub body: Option<::prost_types::Any>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionBody {
    #[prost(message, optional, tag = "1")]
    pub params: Option<TransactionParams>,
    #[prost(message, repeated, tag = "2")]
    pub actions: Vec<super::Action>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionParams {
    #[prost(uint32, tag = "1")]
    pub nonce: u32,
    #[prost(string, tag = "2")]
    pub chain_id: String,
}

/// A non-transaction blob occupying a transaction slot.
///
/// Before app version 3 these were bare 32-byte commitment roots in the
/// first two slots; from version 3 on they are structural messages.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DataItem {
    #[prost(oneof = "data_item::Value", tags = "1, 2, 3")]
    pub value: Option<data_item::Value>,
}

pub mod data_item {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(bytes, tag = "1")]
        RollupTransactionsRoot(Vec<u8>),
        #[prost(bytes, tag = "2")]
        RollupIdsRoot(Vec<u8>),
        #[prost(bytes, tag = "3")]
        ExtendedCommitInfo(Vec<u8>),
    }
}
