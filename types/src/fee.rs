//! Fee-rate tiers, protocol bounds, and fee totals.

use serde::Deserialize;
use serde::Serialize;

use crate::amount::CoinAmount;

/// A preset fee tier supplied by the fee estimation service.
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
pub enum FeeTier {
    #[default]
    Regular,
    Priority,
}

/// The current per-tier fee estimates, in satoshis per byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTiers {
    pub regular: u64,
    pub priority: u64,
}

impl FeeTiers {
    /// Returns the estimated rate for a tier.
    pub fn rate(&self, tier: FeeTier) -> u64 {
        match tier {
            FeeTier::Regular => self.regular,
            FeeTier::Priority => self.priority,
        }
    }
}

/// Where a candidate fee rate falls relative to the protocol bounds.
///
/// `BelowMinimum` and `AboveMaximum` are advisory classifications: a
/// rate outside the recommended bounds is still protocol-legal and does
/// not block submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum FeeBoundsCheck {
    Valid,
    BelowMinimum,
    AboveMaximum,
}

/// Protocol-defined [min, max] recommended fee-rate bounds, sat/byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBounds {
    pub min: u64,
    pub max: u64,
}

impl FeeBounds {
    /// Classifies a candidate rate against the bounds.
    pub fn classify(&self, rate: u64) -> FeeBoundsCheck {
        if rate < self.min {
            FeeBoundsCheck::BelowMinimum
        } else if rate > self.max {
            FeeBoundsCheck::AboveMaximum
        } else {
            FeeBoundsCheck::Valid
        }
    }
}

/// Total fee for a transaction of `tx_vbytes` bytes at `rate` sat/byte.
/// Returns `None` if the product overflows the satoshi range.
pub fn total_fee(rate: u64, tx_vbytes: u64) -> Option<CoinAmount> {
    let sats = rate.checked_mul(tx_vbytes)?;
    i64::try_from(sats).ok().map(CoinAmount::from_sats)
}

/// The confirmation-time banner shown under the fee selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum ConfirmationEstimate {
    /// Rate meets the priority tier: "0-60 minutes".
    WithinHour,
    /// Regular or slower: "1+ hour".
    OverHour,
}

impl ConfirmationEstimate {
    /// Derives the estimate from a resolved rate and the current tiers.
    pub fn for_rate(rate: u64, tiers: FeeTiers) -> Self {
        if rate >= tiers.priority {
            Self::WithinHour
        } else {
            Self::OverHour
        }
    }

    /// The advisory text shown to the user.
    pub fn text(&self) -> &'static str {
        match self {
            Self::WithinHour => "Estimated confirmation time 0-60 minutes",
            Self::OverHour => "Estimated confirmation time 1+ hour",
        }
    }
}
