//! The send-transaction form state machine.

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use types::amount::CoinAmount;
use types::coin::Coin;
use types::fiat::{fiat_to_coin, FiatAmount};

use crate::fee_selector::FeeSelector;
use crate::gate::{can_submit, AccountKind, BrowserEngine};
use crate::oracle::FeeQuote;
use crate::validation::{
    validate_amount, validate_destination, validate_spend, validate_watch_only_key, FeeWarning,
    FieldError,
};

/// Virtual size assumed for fee totals until the transaction builder
/// reports a real one (one input, two outputs, P2PKH).
const DEFAULT_TX_VBYTES: u64 = 226;

/// The funding account selected in the "From:" field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub label: String,
    pub kind: AccountKind,
    /// The account's receive address, compared against the derived
    /// address when a watch-only key is entered.
    pub receive_address: String,
    pub balance: CoinAmount,
}

/// The validation snapshot derived from the current field values.
///
/// Recomputed in full on every change; an error disappears as soon as
/// its triggering condition does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    pub from: Option<FieldError>,
    pub private_key: Option<FieldError>,
    pub destination: Option<FieldError>,
    pub amount: Option<FieldError>,
    pub fee: Option<FieldError>,
    /// Advisory only; never affects [`FormValidation::is_valid`].
    pub fee_warning: Option<FeeWarning>,
}

impl FormValidation {
    /// True when no hard error is present. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.from.is_none()
            && self.private_key.is_none()
            && self.destination.is_none()
            && self.amount.is_none()
            && self.fee.is_none()
    }
}

/// The payload handed to the transport once submission begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub from_label: String,
    pub destination: String,
    pub amount: CoinAmount,
    pub fee_rate: u64,
    pub fee_total: CoinAmount,
    pub description: String,
}

/// An error that can occur when submission is requested.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("form is not ready to submit")]
    NotReady,
}

/// All state behind the send screen's first step.
///
/// Field values are mutated only through the setters below, which also
/// clear the pristine flag; external pushes (fee quotes, size
/// estimates) go through their own entry points and leave pristine
/// alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SendForm {
    coin: Coin,
    browser: BrowserEngine,
    from: Option<Account>,
    destination: String,
    amount_input: String,
    description: String,
    private_key_input: String,
    fee: FeeSelector,
    tx_vbytes: u64,
    pristine: bool,
    submitting: bool,
}

impl SendForm {
    /// Creates a pristine form for the given coin and environment.
    pub fn new(coin: Coin, browser: BrowserEngine, quote: FeeQuote) -> Self {
        Self {
            coin,
            browser,
            from: None,
            destination: String::new(),
            amount_input: String::new(),
            description: String::new(),
            private_key_input: String::new(),
            fee: FeeSelector::new(quote),
            tx_vbytes: DEFAULT_TX_VBYTES,
            pristine: true,
            submitting: false,
        }
    }

    // --- Getters ---

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub fn from(&self) -> Option<&Account> {
        self.from.as_ref()
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn fee(&self) -> &FeeSelector {
        &self.fee
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // --- Field setters (the single user-input entry point) ---

    pub fn set_coin(&mut self, coin: Coin) {
        self.coin = coin;
        self.pristine = false;
    }

    pub fn select_from(&mut self, account: Account) {
        self.from = Some(account);
        self.private_key_input.clear();
        self.pristine = false;
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
        self.pristine = false;
    }

    pub fn set_amount_input(&mut self, amount: impl Into<String>) {
        self.amount_input = amount.into();
        self.pristine = false;
    }

    /// Sets the amount from a fiat entry, converting at the given
    /// fiat-per-coin rate. A bad fiat string or rate maps to the same
    /// hard error the coin field would produce.
    pub fn set_amount_from_fiat(
        &mut self,
        fiat_input: &str,
        rate: FiatAmount,
    ) -> Result<(), FieldError> {
        let fiat = FiatAmount::from_str_in(fiat_input, rate.currency())
            .map_err(|_| FieldError::InvalidAmount)?;
        let amount = fiat_to_coin(fiat, rate).map_err(|_| FieldError::InvalidAmount)?;
        self.set_amount_input(amount.to_string());
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.pristine = false;
    }

    pub fn set_private_key_input(&mut self, key: impl Into<String>) {
        self.private_key_input = key.into();
        self.pristine = false;
    }

    pub fn set_fee_preset(&mut self, tier: types::fee::FeeTier) {
        self.fee.set_preset(tier);
        self.pristine = false;
    }

    pub fn toggle_custom_fee(&mut self) {
        self.fee.toggle_custom();
        self.pristine = false;
    }

    pub fn set_custom_fee_input(&mut self, input: impl Into<String>) {
        self.fee.set_custom_input(input);
        self.pristine = false;
    }

    // --- External pushes (not user edits; pristine is untouched) ---

    /// Applies a fresh oracle quote.
    pub fn update_fee_quote(&mut self, quote: FeeQuote) {
        self.fee.update_quote(quote);
    }

    /// Applies an updated size estimate from the transaction builder.
    pub fn update_tx_vbytes(&mut self, vbytes: u64) {
        self.tx_vbytes = vbytes;
    }

    // --- Derived state ---

    /// Recomputes the full validation snapshot.
    pub fn validate(&self) -> FormValidation {
        let mut v = FormValidation::default();

        let fee_total = match self.fee.effective_rate() {
            Ok((_, warning)) => {
                v.fee_warning = warning;
                match self.fee.total_fee(self.tx_vbytes) {
                    Ok(total) => Some(total),
                    Err(err) => {
                        v.fee = Some(err);
                        None
                    }
                }
            }
            Err(err) => {
                v.fee = Some(err);
                None
            }
        };

        // Each field validates on its own; only the balance check
        // needs a selected account.
        match validate_amount(&self.amount_input) {
            Err(err) => v.amount = Some(err),
            Ok(amount) => {
                if let (Some(account), Some(fee_total)) = (&self.from, fee_total) {
                    v.amount = validate_spend(amount, fee_total, account.balance).err();
                }
            }
        }

        match &self.from {
            None => v.from = Some(FieldError::Required),
            Some(account) => {
                if account.kind.is_watch_only() {
                    v.private_key =
                        validate_watch_only_key(&self.private_key_input, &account.receive_address)
                            .err();
                }
            }
        }

        v.destination = validate_destination(&self.destination).err();
        v
    }

    /// Whether the submit button is enabled right now.
    pub fn can_submit(&self) -> bool {
        let account_kind = self
            .from
            .as_ref()
            .map(|a| a.kind)
            .unwrap_or_default();
        can_submit(
            self.validate().is_valid(),
            self.submitting,
            self.pristine,
            account_kind,
            self.browser,
        )
    }

    /// Re-validates, flips the in-flight flag, and yields the payload
    /// for the transport. Refused whenever the gate is closed.
    pub fn begin_submit(&mut self) -> Result<SendRequest, SubmitError> {
        if !self.can_submit() {
            tracing::warn!("submit refused: gate closed");
            return Err(SubmitError::NotReady);
        }
        // the gate guarantees these resolve
        let account = self.from.as_ref().ok_or(SubmitError::NotReady)?;
        let (fee_rate, _) = self
            .fee
            .effective_rate()
            .map_err(|_| SubmitError::NotReady)?;
        let fee_total = self
            .fee
            .total_fee(self.tx_vbytes)
            .map_err(|_| SubmitError::NotReady)?;
        let amount =
            validate_amount(&self.amount_input).map_err(|_| SubmitError::NotReady)?;

        self.submitting = true;
        let request = SendRequest {
            from_label: account.label.clone(),
            destination: self.destination.trim().to_string(),
            amount,
            fee_rate,
            fee_total,
            description: self.description.clone(),
        };
        tracing::info!(
            from = %request.from_label,
            amount = %request.amount,
            fee_rate = request.fee_rate,
            "send submission started"
        );
        Ok(request)
    }

    /// Marks the in-flight submission as settled.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Restores the pristine initial state, keeping the environment
    /// and the last fee quote.
    pub fn reset(&mut self) {
        let quote = FeeQuote {
            tiers: self.fee.tiers(),
            bounds: self.fee.bounds(),
        };
        *self = Self::new(self.coin, self.browser, quote);
        tracing::debug!("send form reset");
    }
}
