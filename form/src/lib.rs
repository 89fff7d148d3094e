//! Send-form state, validation, and collaborator contracts.
//!
//! This crate carries the logic behind the wallet's send screen and
//! the transaction-list address display: fee selection with hard
//! errors and soft warnings, the field-level validators, the
//! submission gate, and the fee-tier oracle. All form state mutates
//! through [`send_form::SendForm`]'s declared setters and every
//! derived value is recomputed synchronously on change.

pub mod display;
pub mod fee_selector;
pub mod gate;
pub mod oracle;
pub mod oracle_cache;
pub mod prefs;
pub mod send_form;
pub mod validation;

pub use display::{AddressBook, TxAddresses, TxIoEntry};
pub use fee_selector::{FeeMode, FeeSelector};
pub use gate::{can_submit, lockbox_send_supported, AccountKind, BrowserEngine};
pub use oracle::{FeeQuote, FeeTierOracle, MempoolFeeApi, OracleError};
pub use oracle_cache::{cached_fee_quote, QuoteCache};
pub use send_form::{Account, FormValidation, SendForm, SendRequest, SubmitError};
pub use validation::{FeeWarning, FieldError};
