//! WIF private-key handling for watch-only spending verification.
//!
//! A watch-only account tracks an address without its key; spending
//! requires a one-time private-key entry, verified by deriving the
//! key's P2PKH address and comparing it against the account's.

use std::str::FromStr;

use ripemd::Ripemd160;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// An error that can occur when parsing a WIF private-key string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseWifError {
    /// Not valid base58check.
    #[error("invalid WIF encoding")]
    Encoding,
    /// Wrong network/version prefix (mainnet is 0x80).
    #[error("invalid WIF prefix")]
    BadPrefix,
    /// Payload is neither 33 (uncompressed) nor 34 (compressed) bytes.
    #[error("invalid WIF length")]
    BadLength,
    /// The 32-byte scalar is not a valid secp256k1 secret key.
    #[error("invalid secret key")]
    BadKey,
}

/// A secp256k1 private key imported from WIF, retaining the
/// compression flag so the derived address matches the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: SecretKey,
    compressed: bool,
}

impl FromStr for PrivateKey {
    type Err = ParseWifError;

    fn from_str(wif: &str) -> Result<Self, Self::Err> {
        let decoded = bs58::decode(wif.trim())
            .with_check(None)
            .into_vec()
            .map_err(|_| ParseWifError::Encoding)?;

        if decoded.first() != Some(&0x80) {
            return Err(ParseWifError::BadPrefix);
        }
        let (key_bytes, compressed) = match decoded.len() {
            33 => (&decoded[1..33], false),
            34 if decoded[33] == 0x01 => (&decoded[1..33], true),
            _ => return Err(ParseWifError::BadLength),
        };

        let secret = SecretKey::from_slice(key_bytes).map_err(|_| ParseWifError::BadKey)?;
        Ok(Self { secret, compressed })
    }
}

impl PrivateKey {
    /// Whether the WIF carried the compressed-pubkey flag.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// Derives the legacy P2PKH address controlled by this key.
    pub fn to_p2pkh_address(&self) -> String {
        let secp = Secp256k1::new();
        let pubkey = PublicKey::from_secret_key(&secp, &self.secret);
        let serialized: Vec<u8> = if self.compressed {
            pubkey.serialize().to_vec()
        } else {
            pubkey.serialize_uncompressed().to_vec()
        };

        let pkh = hash160(&serialized);
        let mut payload = Vec::with_capacity(21);
        payload.push(0x00); // mainnet P2PKH
        payload.extend_from_slice(&pkh);
        bs58::encode(payload).with_check().into_string()
    }

    /// True if this key controls the given P2PKH address.
    pub fn controls_address(&self, address: &str) -> bool {
        self.to_p2pkh_address() == address
    }
}

/// Hash160 = RIPEMD160(SHA256(data))
fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let ripe = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripe);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // the scalar k = 1, in both WIF flavors
    const WIF_COMPRESSED: &str = "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn";
    const WIF_UNCOMPRESSED: &str = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf";
    const ADDR_COMPRESSED: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";
    const ADDR_UNCOMPRESSED: &str = "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm";

    #[test]
    fn test_wif_round_trip_to_address() {
        let key = PrivateKey::from_str(WIF_COMPRESSED).unwrap();
        assert!(key.is_compressed());
        assert_eq!(key.to_p2pkh_address(), ADDR_COMPRESSED);

        let key = PrivateKey::from_str(WIF_UNCOMPRESSED).unwrap();
        assert!(!key.is_compressed());
        assert_eq!(key.to_p2pkh_address(), ADDR_UNCOMPRESSED);
    }

    #[test]
    fn test_controls_address() {
        let key = PrivateKey::from_str(WIF_COMPRESSED).unwrap();
        assert!(key.controls_address(ADDR_COMPRESSED));
        // same key, different serialization, different address
        assert!(!key.controls_address(ADDR_UNCOMPRESSED));
    }

    #[test]
    fn test_rejects_malformed_wif() {
        assert_eq!(
            PrivateKey::from_str("not-a-key"),
            Err(ParseWifError::Encoding)
        );
        // a P2PKH address is valid base58check but not a key
        assert_eq!(
            PrivateKey::from_str(ADDR_COMPRESSED),
            Err(ParseWifError::BadPrefix)
        );
    }
}
