//! Defines the coins offered by the send form's currency selector.

use serde::Deserialize;
use serde::Serialize;

/// A coin tag selecting per-chain address-format and denomination rules.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIs,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Coin {
    #[default]
    Btc,
    Bch,
    Eth,
    Xlm,
}

impl Coin {
    /// Returns the market ticker for the coin (e.g. "BTC").
    pub fn ticker(&self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Bch => "BCH",
            Self::Eth => "ETH",
            Self::Xlm => "XLM",
        }
    }

    /// Returns the display name of the coin.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Bch => "Bitcoin Cash",
            Self::Eth => "Ether",
            Self::Xlm => "Stellar Lumen",
        }
    }

    /// Returns the number of decimal digits in the coin's smallest unit.
    pub fn decimals(&self) -> u8 {
        match self {
            Self::Btc | Self::Bch => 8,
            Self::Eth => 18,
            Self::Xlm => 7,
        }
    }

    /// True for the forked-chain variant whose canonical display format
    /// is cashaddr rather than the legacy base58 encoding.
    pub fn uses_cash_address(&self) -> bool {
        matches!(self, Self::Bch)
    }
}
