//! User display preferences, loaded from the environment.

use std::env;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use types::fiat::FiatCurrency;

/// The user's currency display preference for amount fields.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, strum::EnumIs)]
pub enum DisplayPreference {
    /// Coin-only mode: no fiat conversion is fetched or shown.
    CoinOnly,

    /// Fiat conversion is enabled.
    FiatEnabled {
        /// The fiat currency selected by the user.
        fiat: FiatCurrency,
        /// `true` to make fiat the default entry denomination.
        display_as_fiat: bool,
    },
}

impl DisplayPreference {
    /// Builds the preference from environment variables with in-code
    /// defaults.
    ///
    /// # Environment variables ("true"/"false", case-insensitive):
    /// - `COIN_ONLY`: if "true", disables fiat conversion entirely.
    /// - `FIAT_CURRENCY`: an ISO code such as "USD" or "EUR".
    /// - `DISPLAY_AS_FIAT`: "true" to default the amount entry to fiat.
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("COIN_ONLY").ok().as_deref(),
            env::var("FIAT_CURRENCY").ok().as_deref(),
            env::var("DISPLAY_AS_FIAT").ok().as_deref(),
        )
    }

    fn from_vars(
        coin_only: Option<&str>,
        fiat_currency: Option<&str>,
        display_as_fiat: Option<&str>,
    ) -> Self {
        if coin_only.map(truthy).unwrap_or(false) {
            return Self::CoinOnly;
        }

        let fiat = fiat_currency
            .and_then(|s| FiatCurrency::from_str(s).ok())
            .unwrap_or_default();
        let display_as_fiat = display_as_fiat.map(truthy).unwrap_or(true);

        Self::FiatEnabled {
            fiat,
            display_as_fiat,
        }
    }

    /// The fiat currency to fetch rates for, or `None` in coin-only
    /// mode.
    pub fn fiat(&self) -> Option<FiatCurrency> {
        match self {
            Self::CoinOnly => None,
            Self::FiatEnabled { fiat, .. } => Some(*fiat),
        }
    }
}

fn truthy(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

impl Default for DisplayPreference {
    fn default() -> Self {
        Self::from_env()
    }
}

/// All user prefs. Intended for saving to a file or editing in a
/// settings dialog.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize, Default)]
pub struct UserPrefs {
    display_preference: DisplayPreference,
}

impl UserPrefs {
    pub fn display_preference(&self) -> &DisplayPreference {
        &self.display_preference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let pref = DisplayPreference::from_vars(None, None, None);
        assert_eq!(
            pref,
            DisplayPreference::FiatEnabled {
                fiat: FiatCurrency::USD,
                display_as_fiat: true,
            }
        );
        assert_eq!(pref.fiat(), Some(FiatCurrency::USD));
    }

    #[test]
    fn test_coin_only_disables_fiat() {
        for val in ["true", "TRUE", "1"] {
            let pref = DisplayPreference::from_vars(Some(val), Some("EUR"), None);
            assert!(pref.is_coin_only());
            assert_eq!(pref.fiat(), None);
        }
        // anything else leaves fiat enabled
        let pref = DisplayPreference::from_vars(Some("no"), None, None);
        assert!(pref.is_fiat_enabled());
    }

    #[test]
    fn test_fiat_currency_and_entry_denomination() {
        let pref = DisplayPreference::from_vars(None, Some("EUR"), Some("false"));
        assert_eq!(
            pref,
            DisplayPreference::FiatEnabled {
                fiat: FiatCurrency::EUR,
                display_as_fiat: false,
            }
        );
    }

    #[test]
    fn test_unknown_currency_falls_back_to_default() {
        let pref = DisplayPreference::from_vars(None, Some("DOGE"), None);
        assert_eq!(pref.fiat(), Some(FiatCurrency::USD));
    }
}
