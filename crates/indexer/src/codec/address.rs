//! Account address derivation.
//!
//! A chain account address is the bech32m encoding of the first 20 bytes of
//! the SHA-256 digest of an Ed25519 verification key, under the `astria`
//! human-readable prefix.

use bech32::{Bech32m, Hrp};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Human-readable prefix of chain account addresses.
pub const ADDRESS_PREFIX: &str = "astria";

/// Length of an Ed25519 verification key.
const PUBKEY_LEN: usize = 32;

/// Length of the address payload: a truncated digest of the key.
const ADDRESS_HASH_LEN: usize = 20;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid public key length {0}, expected {PUBKEY_LEN}")]
    InvalidKeyLength(usize),

    #[error("failed to encode address")]
    Encode(#[from] bech32::EncodeError),
}

/// Derive the bech32m account address controlled by an Ed25519 public key.
pub fn address_from_pubkey(pubkey: &[u8]) -> Result<String, AddressError> {
    if pubkey.len() != PUBKEY_LEN {
        return Err(AddressError::InvalidKeyLength(pubkey.len()));
    }

    let digest = Sha256::digest(pubkey);
    encode_address(&digest[..ADDRESS_HASH_LEN])
}

/// Encode a raw account hash as a bech32m address string.
pub fn encode_address(bytes: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(ADDRESS_PREFIX).expect("prefix is a valid hrp");
    Ok(bech32::encode::<Bech32m>(hrp, bytes)?)
}

/// Whether a string is a well-formed address of this chain.
pub fn is_chain_address(candidate: &str) -> bool {
    bech32::decode(candidate)
        .map(|(hrp, _)| hrp.as_str() == ADDRESS_PREFIX)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_from_pubkey_vectors() {
        let vectors = [
            (
                "0101010101010101010101010101010101010101010101010101010101010101",
                "astria1wtxkappzcsrlkmgfs6g0zyct0hkhashhp4usfv",
            ),
            (
                "88bd0bc59134c9f97e63655d5ce44ba872ca24fe9a0cb5b2288acc22b81ba91f",
                "astria16zs3p8r62u7gra947rjxh7whmuf7z9r80qhfle",
            ),
            (
                "0000000000000000000000000000000000000000000000000000000000000000",
                "astria1ve584t0cv27hwmy0cx9ca8uwyqyfw9y9z5enka",
            ),
            (
                "f70577ae4d0f1e9215606aefd27a7246841f5024a09c0e0e7f7b2b8af8b71d50",
                "astria1wvycgwwl3qfxtc2954xq3g5j2vjgpj7tplrvdf",
            ),
        ];

        for (pubkey_hex, expected) in vectors {
            let pubkey = hex::decode(pubkey_hex).unwrap();
            let address = address_from_pubkey(&pubkey).unwrap();
            assert_eq!(address, expected, "pubkey {}", pubkey_hex);
        }
    }

    #[test]
    fn test_address_from_pubkey_is_deterministic() {
        let pubkey = [7u8; 32];
        assert_eq!(
            address_from_pubkey(&pubkey).unwrap(),
            address_from_pubkey(&pubkey).unwrap()
        );
    }

    #[test]
    fn test_rejects_malformed_key_length() {
        assert!(matches!(
            address_from_pubkey(&[0u8; 31]),
            Err(AddressError::InvalidKeyLength(31))
        ));
        assert!(matches!(
            address_from_pubkey(&[0u8; 33]),
            Err(AddressError::InvalidKeyLength(33))
        ));
        assert!(matches!(
            address_from_pubkey(&[]),
            Err(AddressError::InvalidKeyLength(0))
        ));
    }

    #[test]
    fn test_encode_address_raw_payload() {
        let payload: Vec<u8> = (0u8..20).collect();
        assert_eq!(
            encode_address(&payload).unwrap(),
            "astria1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnl60u4v"
        );
    }

    #[test]
    fn test_is_chain_address() {
        assert!(is_chain_address(
            "astria1wtxkappzcsrlkmgfs6g0zyct0hkhashhp4usfv"
        ));
        assert!(!is_chain_address("cosmos1qqqsyqcyq5rqwzqfpg9scrgwpugpzysn"));
        assert!(!is_chain_address("not-an-address"));
        assert!(!is_chain_address(""));
    }
}
