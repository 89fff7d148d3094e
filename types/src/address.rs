//! Bitcoin address parsing and per-coin display formatting.

use std::str::FromStr;

use bech32::FromBase32;
use bech32::Variant;
use thiserror::Error;

use crate::cashaddr;
use crate::cashaddr::HashKind;
use crate::coin::Coin;

/// An error that can occur when parsing a Bitcoin address string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAddressError {
    /// Neither valid base58check nor valid bech32.
    #[error("unrecognized address encoding")]
    Encoding,
    /// A known encoding with an unknown version byte or prefix.
    #[error("unknown address version")]
    UnknownVersion,
    /// A known encoding carrying a payload of the wrong length.
    #[error("invalid payload length")]
    BadPayload,
    /// The witness version and bech32 variant do not agree (BIP-350).
    #[error("invalid bech32 variant for witness version")]
    BadVariant,
}

/// A Bitcoin address parsed into its script form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BtcAddress {
    P2pkh([u8; 20]),
    P2sh([u8; 20]),
    Witness { version: u8, program: Vec<u8> },
}

impl FromStr for BtcAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(decoded) = bs58::decode(s).with_check(None).into_vec() {
            if decoded.len() != 21 {
                return Err(ParseAddressError::BadPayload);
            }
            let mut hash = [0u8; 20];
            hash.copy_from_slice(&decoded[1..21]);
            return match decoded[0] {
                0x00 => Ok(Self::P2pkh(hash)),
                0x05 => Ok(Self::P2sh(hash)),
                _ => Err(ParseAddressError::UnknownVersion),
            };
        }

        let (hrp, data, variant) =
            bech32::decode(s).map_err(|_| ParseAddressError::Encoding)?;
        if hrp != "bc" {
            return Err(ParseAddressError::UnknownVersion);
        }
        let (version, program) = data.split_first().ok_or(ParseAddressError::BadPayload)?;
        let version = version.to_u8();
        if version > 16 {
            return Err(ParseAddressError::UnknownVersion);
        }
        let program =
            Vec::<u8>::from_base32(program).map_err(|_| ParseAddressError::Encoding)?;
        match (version, variant) {
            (0, Variant::Bech32) => {
                if program.len() != 20 && program.len() != 32 {
                    return Err(ParseAddressError::BadPayload);
                }
            }
            (0, Variant::Bech32m) | (_, Variant::Bech32) => {
                return Err(ParseAddressError::BadVariant)
            }
            (_, Variant::Bech32m) => {
                if !(2..=40).contains(&program.len()) {
                    return Err(ParseAddressError::BadPayload);
                }
            }
        }
        Ok(Self::Witness { version, program })
    }
}

/// Renders an address in the display encoding for the given coin.
///
/// For the forked-chain variant the legacy base58 form is converted to
/// cashaddr, a one-way deterministic transform. Every other coin, and
/// any string that does not parse as a legacy address, is returned
/// unchanged: malformed input is a validation concern upstream, not an
/// error path here.
pub fn display_address(address: &str, coin: Coin) -> String {
    if !coin.uses_cash_address() {
        return address.to_string();
    }
    match BtcAddress::from_str(address) {
        Ok(BtcAddress::P2pkh(hash)) => cashaddr::encode(HashKind::P2pkh, &hash),
        Ok(BtcAddress::P2sh(hash)) => cashaddr::encode(HashKind::P2sh, &hash),
        _ => address.to_string(),
    }
}
