//! Wire-format message definitions.
//!
//! Hand-derived `prost` messages for everything the chain puts in a block's
//! transaction slots: the signed transaction envelope, the closed action
//! union, the recognized IBC message subset, oracle payloads and the
//! non-transaction data items. Field tags follow the chain's protobuf
//! schema; decoding tolerates unknown fields, so proof/metadata fields the
//! indexer never reads are simply skipped.

mod actions;
mod ibc;
mod oracle;
mod tx;

pub use actions::*;
pub use ibc::*;
pub use oracle::*;
pub use tx::*;

/// A 128-bit unsigned integer split into two 64-bit halves on the wire.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Uint128 {
    #[prost(uint64, tag = "1")]
    pub lo: u64,
    #[prost(uint64, tag = "2")]
    pub hi: u64,
}

impl Uint128 {
    pub fn value(&self) -> u128 {
        crate::codec::compose_u128(self.hi, self.lo)
    }

    pub fn to_decimal(&self) -> String {
        crate::codec::decode_u128(self.hi, self.lo)
    }

    pub fn from_value(value: u128) -> Self {
        Self {
            lo: value as u64,
            hi: (value >> 64) as u64,
        }
    }
}
