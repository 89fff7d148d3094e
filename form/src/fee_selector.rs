//! Fee selection state: preset tiers versus a custom sat/byte entry.

use serde::Deserialize;
use serde::Serialize;
use types::amount::CoinAmount;
use types::fee::{total_fee, ConfirmationEstimate, FeeBounds, FeeTier, FeeTiers};

use crate::oracle::FeeQuote;
use crate::validation::{validate_fee_rate, FeeWarning, FieldError};

/// How the fee rate is currently being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumIs)]
pub enum FeeMode {
    /// Rate comes from an oracle-supplied tier estimate.
    Preset,
    /// Rate comes from the user-typed sat/byte field.
    Custom,
}

/// The fee portion of the send form.
///
/// Toggling between preset and custom entry keeps the last custom text
/// around, so switching away and back restores the typed value
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSelector {
    tiers: FeeTiers,
    bounds: FeeBounds,
    mode: FeeMode,
    preset: FeeTier,
    custom_input: String,
}

impl FeeSelector {
    /// Creates a selector in preset/regular mode from an oracle quote.
    pub fn new(quote: FeeQuote) -> Self {
        Self {
            tiers: quote.tiers,
            bounds: quote.bounds,
            mode: FeeMode::Preset,
            preset: FeeTier::Regular,
            custom_input: String::new(),
        }
    }

    pub fn mode(&self) -> FeeMode {
        self.mode
    }

    pub fn tiers(&self) -> FeeTiers {
        self.tiers
    }

    pub fn bounds(&self) -> FeeBounds {
        self.bounds
    }

    /// The last text entered in the custom field, preserved across
    /// mode toggles.
    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }

    /// Selects a preset tier, switching back to preset mode.
    pub fn set_preset(&mut self, tier: FeeTier) {
        self.preset = tier;
        self.mode = FeeMode::Preset;
    }

    /// Flips between preset and custom entry. The custom text is left
    /// intact in both directions.
    pub fn toggle_custom(&mut self) {
        self.mode = match self.mode {
            FeeMode::Preset => FeeMode::Custom,
            FeeMode::Custom => FeeMode::Preset,
        };
    }

    /// Updates the custom sat/byte text.
    pub fn set_custom_input(&mut self, input: impl Into<String>) {
        self.custom_input = input.into();
    }

    /// Applies a fresh oracle quote (tier estimates and bounds).
    pub fn update_quote(&mut self, quote: FeeQuote) {
        self.tiers = quote.tiers;
        self.bounds = quote.bounds;
    }

    /// Resolves the effective sat/byte rate.
    ///
    /// Preset mode reads the tier estimate and carries no warning;
    /// custom mode runs the full hard-error/soft-warning validation.
    pub fn effective_rate(&self) -> Result<(u64, Option<FeeWarning>), FieldError> {
        match self.mode {
            FeeMode::Preset => Ok((self.tiers.rate(self.preset), None)),
            FeeMode::Custom => validate_fee_rate(&self.custom_input, self.bounds),
        }
    }

    /// True when the effective rate reaches the priority estimate.
    pub fn is_priority(&self) -> bool {
        match self.effective_rate() {
            Ok((rate, _)) => rate >= self.tiers.priority,
            Err(_) => false,
        }
    }

    /// The confirmation-time banner for the current selection.
    pub fn confirmation_estimate(&self) -> Option<ConfirmationEstimate> {
        self.effective_rate()
            .ok()
            .map(|(rate, _)| ConfirmationEstimate::for_rate(rate, self.tiers))
    }

    /// Total fee for a transaction of the given virtual size.
    pub fn total_fee(&self, tx_vbytes: u64) -> Result<CoinAmount, FieldError> {
        let (rate, _) = self.effective_rate()?;
        total_fee(rate, tx_vbytes).ok_or(FieldError::InvalidAmount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> FeeSelector {
        FeeSelector::new(FeeQuote {
            tiers: FeeTiers {
                regular: 5,
                priority: 20,
            },
            bounds: FeeBounds { min: 1, max: 200 },
        })
    }

    #[test]
    fn test_preset_rates() {
        let mut sel = selector();
        assert_eq!(sel.effective_rate(), Ok((5, None)));
        sel.set_preset(FeeTier::Priority);
        assert_eq!(sel.effective_rate(), Ok((20, None)));
        assert!(sel.is_priority());
    }

    #[test]
    fn test_toggle_preserves_custom_value() {
        let mut sel = selector();
        sel.toggle_custom();
        sel.set_custom_input("150");
        assert_eq!(sel.effective_rate(), Ok((150, None)));

        // custom -> preset -> custom keeps the typed value unchanged
        sel.toggle_custom();
        assert!(sel.mode().is_preset());
        sel.toggle_custom();
        assert_eq!(sel.custom_input(), "150");
        assert_eq!(sel.effective_rate(), Ok((150, None)));
    }

    #[test]
    fn test_custom_validation_pipeline() {
        let mut sel = selector();
        sel.toggle_custom();

        sel.set_custom_input("0");
        assert_eq!(sel.effective_rate(), Err(FieldError::MinimumOneSatoshi));

        sel.set_custom_input("300");
        assert_eq!(
            sel.effective_rate(),
            Ok((300, Some(FeeWarning::AboveRecommended { max: 200 })))
        );
    }

    #[test]
    fn test_total_fee_and_estimate() {
        let mut sel = selector();
        assert_eq!(sel.total_fee(226), Ok(CoinAmount::from_sats(1_130)));
        assert_eq!(
            sel.confirmation_estimate(),
            Some(ConfirmationEstimate::OverHour)
        );

        sel.set_preset(FeeTier::Priority);
        assert_eq!(
            sel.confirmation_estimate(),
            Some(ConfirmationEstimate::WithinHour)
        );
    }

    #[test]
    fn test_update_quote_keeps_selection() {
        let mut sel = selector();
        sel.toggle_custom();
        sel.set_custom_input("10");
        sel.update_quote(FeeQuote {
            tiers: FeeTiers {
                regular: 8,
                priority: 30,
            },
            bounds: FeeBounds { min: 2, max: 100 },
        });
        assert!(sel.mode().is_custom());
        assert_eq!(sel.effective_rate(), Ok((10, None)));
        assert_eq!(sel.tiers().regular, 8);
    }
}
