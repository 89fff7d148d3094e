//! Field-level validators for the send form.
//!
//! Two distinct classes: [`FieldError`] is a hard error rendered
//! inline beside the field and blocks submission; [`FeeWarning`] is
//! advisory text for a protocol-legal but unusual fee rate and never
//! blocks. Validators are pure and re-run on every field change, so no
//! error outlives its triggering condition.

use std::str::FromStr;

use thiserror::Error;
use types::amount::CoinAmount;
use types::fee::{FeeBounds, FeeBoundsCheck};
use types::{BtcAddress, PrivateKey};

/// Outputs below this satoshi count are unrelayable dust.
pub const DUST_LIMIT_SATS: i64 = 546;

/// A hard validation error. Blocks submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Required")]
    Required,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Amount is below the dust limit")]
    BelowDustLimit,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Amount exceeds available balance")]
    AboveAvailableBalance,
    #[error("Invalid Bitcoin address")]
    InvalidAddress,
    #[error("Invalid private key")]
    InvalidPrivateKey,
    #[error("Private key does not match the selected address")]
    PrivateKeyMismatch,
    #[error("Fee must be at least one satoshi per byte")]
    MinimumOneSatoshi,
}

/// A soft fee warning. Advisory only; never blocks submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeeWarning {
    #[error("Fee is below the recommended minimum of {min} sat/byte")]
    BelowRecommended { min: u64 },
    #[error("Fee is above the recommended maximum of {max} sat/byte")]
    AboveRecommended { max: u64 },
}

/// Rejects empty or whitespace-only input.
pub fn required(input: &str) -> Result<(), FieldError> {
    if input.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

/// Parses an amount field and requires a positive, non-dust value.
pub fn validate_amount(input: &str) -> Result<CoinAmount, FieldError> {
    required(input)?;
    let amount = CoinAmount::from_coins_str(input).map_err(|_| FieldError::InvalidAmount)?;
    if !amount.is_positive() {
        return Err(FieldError::InvalidAmount);
    }
    if amount.sats() < DUST_LIMIT_SATS {
        return Err(FieldError::BelowDustLimit);
    }
    Ok(amount)
}

/// Checks the requested amount against the balance net of the fee.
pub fn validate_spend(
    amount: CoinAmount,
    fee_total: CoinAmount,
    balance: CoinAmount,
) -> Result<(), FieldError> {
    let available = balance
        .checked_sub(fee_total)
        .ok_or(FieldError::InsufficientFunds)?;
    if !available.is_positive() {
        return Err(FieldError::InsufficientFunds);
    }
    if amount > available {
        return Err(FieldError::AboveAvailableBalance);
    }
    Ok(())
}

/// Validates the destination field as a Bitcoin address.
pub fn validate_destination(input: &str) -> Result<BtcAddress, FieldError> {
    required(input)?;
    BtcAddress::from_str(input.trim()).map_err(|_| FieldError::InvalidAddress)
}

/// Validates a watch-only private-key entry: the WIF must parse and
/// its derived P2PKH address must match the account's address.
pub fn validate_watch_only_key(
    input: &str,
    account_address: &str,
) -> Result<PrivateKey, FieldError> {
    required(input)?;
    let key = PrivateKey::from_str(input).map_err(|_| FieldError::InvalidPrivateKey)?;
    if !key.controls_address(account_address) {
        return Err(FieldError::PrivateKeyMismatch);
    }
    Ok(key)
}

/// Validates a custom fee-rate entry against the protocol bounds.
///
/// Empty, non-numeric, negative, and zero inputs are hard errors; a
/// numeric rate outside [min, max] is merely a warning and the parsed
/// rate is still usable.
pub fn validate_fee_rate(
    input: &str,
    bounds: FeeBounds,
) -> Result<(u64, Option<FeeWarning>), FieldError> {
    required(input)?;
    let trimmed = input.trim();
    // u64 parsing rejects a leading '-', which settles the negative
    // case as a hard error rather than an out-of-bounds warning
    let rate: u64 = trimmed.parse().map_err(|_| FieldError::InvalidAmount)?;
    if rate == 0 {
        return Err(FieldError::MinimumOneSatoshi);
    }
    let warning = match bounds.classify(rate) {
        FeeBoundsCheck::Valid => None,
        FeeBoundsCheck::BelowMinimum => Some(FeeWarning::BelowRecommended { min: bounds.min }),
        FeeBoundsCheck::AboveMaximum => Some(FeeWarning::AboveRecommended { max: bounds.max }),
    };
    Ok((rate, warning))
}
