//! Codecs for wire-level primitives: 128-bit amounts and account addresses.

mod address;
mod uint128;

pub use address::{ADDRESS_PREFIX, AddressError, address_from_pubkey, encode_address, is_chain_address};
pub use uint128::{compose_u128, decode_u128};
