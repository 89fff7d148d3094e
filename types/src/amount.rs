//! Provides a safe, satoshi-denominated amount type for the send form.

use std::fmt;
use std::ops::Add;
use std::ops::AddAssign;

use num_traits::CheckedAdd;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Number of satoshis in one whole coin.
pub const SATS_PER_COIN: i64 = 100_000_000;

/// Decimal digits of the satoshi denomination.
const DECIMALS: u32 = 8;

/// An error that can occur when parsing a string into a [`CoinAmount`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    /// The string is not in a valid numeric format (e.g. "abc", "1.2.3").
    #[error("invalid amount format")]
    InvalidFormat,
    /// The string has more than 8 decimal places.
    #[error("too many decimal places")]
    TooManyDecimals,
    /// The value does not fit in the satoshi range.
    #[error("amount out of range")]
    OutOfRange,
}

/// A coin amount stored as a signed satoshi count.
///
/// Integer minor-unit storage avoids the floating-point inaccuracies a
/// user-typed decimal string would otherwise pick up. `Display` renders
/// the amount as whole coins with an 8-digit fraction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CoinAmount {
    sats: i64,
}

impl CoinAmount {
    /// The zero amount.
    pub fn zero() -> Self {
        Self { sats: 0 }
    }

    /// Creates an amount from a raw satoshi count.
    pub fn from_sats(sats: i64) -> Self {
        Self { sats }
    }

    /// Creates an amount from a whole number of coins.
    pub fn from_coins(coins: i64) -> Self {
        Self {
            sats: coins.saturating_mul(SATS_PER_COIN),
        }
    }

    /// Returns the raw satoshi count.
    pub fn sats(&self) -> i64 {
        self.sats
    }

    /// True if the amount is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.sats > 0
    }

    /// Parses a user-typed decimal coin string (e.g. "0.015").
    ///
    /// Fails on malformed input, more than 8 decimal places, or values
    /// outside the satoshi range. An empty string is not an amount.
    pub fn from_coins_str(s: &str) -> Result<Self, ParseAmountError> {
        let s = s.trim();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match s.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (s, ""),
        };

        if (major_str.is_empty() && minor_str.is_empty()) || minor_str.contains('.') {
            return Err(ParseAmountError::InvalidFormat);
        }
        if minor_str.len() as u32 > DECIMALS {
            return Err(ParseAmountError::TooManyDecimals);
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| ParseAmountError::InvalidFormat)?
        };
        if !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseAmountError::InvalidFormat);
        }
        let minor: i64 = if minor_str.is_empty() {
            0
        } else {
            minor_str
                .parse()
                .map_err(|_| ParseAmountError::InvalidFormat)?
        };

        let scale = 10_i64.pow(DECIMALS - minor_str.len() as u32);
        let sats = major
            .checked_mul(SATS_PER_COIN)
            .and_then(|m| m.checked_add(minor * scale))
            .ok_or(ParseAmountError::OutOfRange)?;

        Ok(Self {
            sats: if negative { -sats } else { sats },
        })
    }

    /// Checked satoshi multiplication, used for fee totals.
    pub fn checked_mul(&self, factor: i64) -> Option<Self> {
        self.sats.checked_mul(factor).map(|sats| Self { sats })
    }

    /// Checked subtraction, used for net-of-fee balances.
    pub fn checked_sub(&self, rhs: Self) -> Option<Self> {
        self.sats.checked_sub(rhs.sats).map(|sats| Self { sats })
    }

    /// Formats the amount with the coin's ticker (e.g. "0.01500000 BTC").
    pub fn to_string_with_ticker(&self, ticker: &str) -> String {
        format!("{} {}", self, ticker)
    }
}

impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // unsigned_abs: i64::MIN has no i64 absolute value
        let major = self.sats.unsigned_abs() / SATS_PER_COIN as u64;
        let minor = self.sats.unsigned_abs() % SATS_PER_COIN as u64;
        let sign = if self.sats < 0 { "-" } else { "" };
        write!(f, "{sign}{major}.{minor:08}")
    }
}

impl Add for CoinAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            sats: self.sats + rhs.sats,
        }
    }
}

impl AddAssign for CoinAmount {
    fn add_assign(&mut self, rhs: Self) {
        self.sats += rhs.sats;
    }
}

/// Implements checked addition. Returns `None` on overflow.
impl CheckedAdd for CoinAmount {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.sats.checked_add(v.sats).map(|sats| Self { sats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!(
            CoinAmount::from_coins_str("1").unwrap(),
            CoinAmount::from_sats(100_000_000)
        );
        assert_eq!(
            CoinAmount::from_coins_str("0.015").unwrap(),
            CoinAmount::from_sats(1_500_000)
        );
        assert_eq!(
            CoinAmount::from_coins_str(".5").unwrap(),
            CoinAmount::from_sats(50_000_000)
        );
        assert_eq!(
            CoinAmount::from_coins_str("-0.00000001").unwrap(),
            CoinAmount::from_sats(-1)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            CoinAmount::from_coins_str("abc"),
            Err(ParseAmountError::InvalidFormat)
        );
        assert_eq!(
            CoinAmount::from_coins_str("1.2.3"),
            Err(ParseAmountError::InvalidFormat)
        );
        assert_eq!(
            CoinAmount::from_coins_str(""),
            Err(ParseAmountError::InvalidFormat)
        );
        assert_eq!(
            CoinAmount::from_coins_str("0.123456789"),
            Err(ParseAmountError::TooManyDecimals)
        );
    }

    #[test]
    fn test_display_pads_fraction() {
        assert_eq!(CoinAmount::from_sats(1_500_000).to_string(), "0.01500000");
        assert_eq!(
            CoinAmount::from_coins(2).to_string_with_ticker("BTC"),
            "2.00000000 BTC"
        );
        assert_eq!(CoinAmount::from_sats(-1).to_string(), "-0.00000001");
    }

    #[test]
    fn test_display_extreme_values() {
        assert_eq!(
            CoinAmount::from_sats(i64::MIN).to_string(),
            "-92233720368.54775808"
        );
        assert_eq!(
            CoinAmount::from_sats(i64::MAX).to_string(),
            "92233720368.54775807"
        );
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = CoinAmount::from_sats(i64::MAX);
        assert!(a.checked_add(&CoinAmount::from_sats(1)).is_none());
        assert!(a.checked_mul(2).is_none());
        assert_eq!(
            CoinAmount::from_sats(10).checked_sub(CoinAmount::from_sats(4)),
            Some(CoinAmount::from_sats(6))
        );
    }
}
