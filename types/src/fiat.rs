//! Fiat currencies and coin/fiat conversion for the amount entry field.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::amount::{CoinAmount, SATS_PER_COIN};

/// The fiat currencies offered by the wallet's conversion widget.
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
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CHF,
    AUD,
    CAD,
    SGD,
    HKD,
    INR,
    BRL,
    TRY,
}

impl FiatCurrency {
    /// Decimal digits of the currency's smallest unit (JPY has none).
    pub fn decimals(&self) -> u8 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }

    /// Graphical symbol, e.g. '$'.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::AUD | Self::CAD | Self::SGD | Self::HKD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::JPY => "¥",
            Self::CHF => "CHF",
            Self::INR => "₹",
            Self::BRL => "R$",
            Self::TRY => "₺",
        }
    }

    /// ISO 4217 code, from the `strum::IntoStaticStr` derive.
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// An error that can occur when parsing a string into a [`FiatAmount`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFiatAmountError {
    /// The string is not in a valid numeric format.
    #[error("invalid fiat amount format")]
    InvalidFormat,
    /// More decimal places than the currency supports (e.g. "$1.234").
    #[error("too many decimal places for the currency")]
    TooManyDecimals,
}

/// An error that can occur when converting fiat back into coin units.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The fiat-per-coin rate is zero, so no conversion exists.
    #[error("exchange rate is zero")]
    ZeroRate,
    /// The converted amount exceeds the 21,000,000-coin supply.
    #[error("exceeds maximum coin supply")]
    ExceedsSupply,
}

/// A monetary value in a specific fiat currency.
///
/// Stored as a signed integer count of the currency's smallest unit
/// (cents for USD), per the same rule as [`CoinAmount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatAmount {
    minor: i64,
    currency: FiatCurrency,
}

impl FiatAmount {
    /// Creates an amount directly from the currency's smallest unit.
    pub fn from_minor(minor: i64, currency: FiatCurrency) -> Self {
        Self { minor, currency }
    }

    /// Parses a user-typed decimal string for the given currency.
    pub fn from_str_in(s: &str, currency: FiatCurrency) -> Result<Self, ParseFiatAmountError> {
        let decimals = currency.decimals() as u32;
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
            return Err(ParseFiatAmountError::InvalidFormat);
        }
        if minor_str.len() as u32 > decimals {
            return Err(ParseFiatAmountError::TooManyDecimals);
        }
        if !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseFiatAmountError::InvalidFormat);
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| ParseFiatAmountError::InvalidFormat)?
        };
        let minor: i64 = if minor_str.is_empty() {
            0
        } else {
            minor_str
                .parse()
                .map_err(|_| ParseFiatAmountError::InvalidFormat)?
        };

        let scale = 10_i64.pow(decimals - minor_str.len() as u32);
        let total = major
            .checked_mul(10_i64.pow(decimals))
            .and_then(|m| m.checked_add(minor * scale))
            .ok_or(ParseFiatAmountError::InvalidFormat)?;

        Ok(Self::from_minor(if negative { -total } else { total }, currency))
    }

    /// Returns the currency of the amount.
    pub fn currency(&self) -> FiatCurrency {
        self.currency
    }

    /// Returns the raw amount in the currency's smallest unit.
    pub fn as_minor_units(&self) -> i64 {
        self.minor
    }

    /// Formats the amount with its currency symbol (e.g. "$25.34").
    pub fn to_string_with_symbol(&self) -> String {
        format!("{}{}", self.currency.symbol(), self)
    }

    /// Formats the amount with its currency code (e.g. "25.34 USD").
    pub fn to_string_with_code(&self) -> String {
        format!("{} {}", self, self.currency.code())
    }
}

impl fmt::Display for FiatAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = self.currency.decimals() as u32;
        if decimals == 0 {
            return write!(f, "{}", self.minor);
        }
        let divisor = 10_u64.pow(decimals);
        let sign = if self.minor < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:0width$}",
            self.minor.unsigned_abs() / divisor,
            self.minor.unsigned_abs() % divisor,
            width = decimals as usize
        )
    }
}

/// Converts a coin amount to fiat using a fiat-per-coin rate.
///
/// Widened to i128 so that `sats * rate_minor` cannot overflow at
/// satoshi scale; the quotient is clamped back into i64.
pub fn coin_to_fiat(amount: CoinAmount, rate: FiatAmount) -> FiatAmount {
    if rate.as_minor_units() == 0 {
        return FiatAmount::from_minor(0, rate.currency());
    }
    let product = amount.sats() as i128 * rate.as_minor_units() as i128;
    let minor = product / SATS_PER_COIN as i128;
    FiatAmount::from_minor(
        minor.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
        rate.currency(),
    )
}

/// Converts a fiat amount to coin units using a fiat-per-coin rate.
pub fn fiat_to_coin(amount: FiatAmount, rate: FiatAmount) -> Result<CoinAmount, ConvertError> {
    if rate.as_minor_units() == 0 {
        return Err(ConvertError::ZeroRate);
    }
    let product = amount.as_minor_units() as i128 * SATS_PER_COIN as i128;
    let sats = product / rate.as_minor_units() as i128;

    const MAX_SUPPLY_SATS: i128 = 21_000_000 * SATS_PER_COIN as i128;
    if sats.abs() > MAX_SUPPLY_SATS {
        return Err(ConvertError::ExceedsSupply);
    }
    Ok(CoinAmount::from_sats(sats as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let amt = FiatAmount::from_str_in("123.45", FiatCurrency::USD).unwrap();
        assert_eq!(amt.as_minor_units(), 12345);
        assert_eq!(amt.to_string_with_symbol(), "$123.45");
        assert_eq!(amt.to_string_with_code(), "123.45 USD");

        let err = FiatAmount::from_str_in("1.234", FiatCurrency::USD).unwrap_err();
        assert_eq!(err, ParseFiatAmountError::TooManyDecimals);

        // JPY carries no fraction at all
        assert!(FiatAmount::from_str_in("1.5", FiatCurrency::JPY).is_err());
        assert_eq!(
            FiatAmount::from_str_in("150", FiatCurrency::JPY)
                .unwrap()
                .to_string(),
            "150"
        );

        // i64::MIN survives formatting
        assert_eq!(
            FiatAmount::from_minor(i64::MIN, FiatCurrency::USD).to_string(),
            "-92233720368547758.08"
        );
    }

    #[test]
    fn test_coin_to_fiat() {
        // 0.5 BTC at $40,000.00/BTC => $20,000.00
        let rate = FiatAmount::from_minor(4_000_000, FiatCurrency::USD);
        let fiat = coin_to_fiat(CoinAmount::from_sats(50_000_000), rate);
        assert_eq!(fiat.as_minor_units(), 2_000_000);

        let zero_rate = FiatAmount::from_minor(0, FiatCurrency::USD);
        assert_eq!(
            coin_to_fiat(CoinAmount::from_coins(1), zero_rate).as_minor_units(),
            0
        );
    }

    #[test]
    fn test_fiat_to_coin() {
        let rate = FiatAmount::from_minor(4_000_000, FiatCurrency::USD);
        let amt = fiat_to_coin(FiatAmount::from_minor(2_000_000, FiatCurrency::USD), rate)
            .unwrap();
        assert_eq!(amt, CoinAmount::from_sats(50_000_000));

        let zero = FiatAmount::from_minor(0, FiatCurrency::USD);
        assert_eq!(
            fiat_to_coin(FiatAmount::from_minor(1, FiatCurrency::USD), zero),
            Err(ConvertError::ZeroRate)
        );

        // $1 at a rate of $0.01/coin is 100 coins; push it past the supply cap
        let tiny_rate = FiatAmount::from_minor(1, FiatCurrency::USD);
        let huge = FiatAmount::from_minor(i64::MAX / 100, FiatCurrency::USD);
        assert_eq!(
            fiat_to_coin(huge, tiny_rate),
            Err(ConvertError::ExceedsSupply)
        );
    }
}
