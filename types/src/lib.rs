//! Value types shared by the send-flow form logic.
//!
//! Everything here is a plain, synchronous value type: coin tags,
//! satoshi/fiat amounts, fee rates, parsed addresses, and WIF private
//! keys. No I/O happens in this crate.

pub mod address;
pub mod amount;
pub mod cashaddr;
pub mod coin;
pub mod fee;
pub mod fiat;
pub mod keys;

pub use address::{display_address, BtcAddress, ParseAddressError};
pub use amount::{CoinAmount, ParseAmountError};
pub use coin::Coin;
pub use fee::{ConfirmationEstimate, FeeBounds, FeeBoundsCheck, FeeTier, FeeTiers};
pub use fiat::{FiatAmount, FiatCurrency};
pub use keys::{ParseWifError, PrivateKey};
