//! View model for a transaction's grouped from/to address lists.

use serde::Deserialize;
use serde::Serialize;
use types::address::display_address;
use types::coin::Coin;

/// The external address-book contract: address to optional label.
pub trait AddressBook {
    fn label_for(&self, address: &str) -> Option<String>;
}

/// One input or output of a transaction, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxIoEntry {
    /// The address in the coin's display encoding.
    pub address: String,
    /// The address-book label, if the user has one for this address.
    pub label: Option<String>,
}

impl TxIoEntry {
    fn new(raw: &str, coin: Coin, book: &impl AddressBook) -> Self {
        Self {
            address: display_address(raw, coin),
            // the book is keyed by the native encoding, so look up the
            // raw address, not the display form
            label: book.label_for(raw),
        }
    }
}

/// The "From:"/"To:" address groups of a transaction list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxAddresses {
    pub from: Vec<TxIoEntry>,
    pub to: Vec<TxIoEntry>,
}

impl TxAddresses {
    /// Builds the display groups from the raw input/output address
    /// lists, converting the encoding per coin and attaching labels.
    pub fn new(
        coin: Coin,
        inputs: &[impl AsRef<str>],
        outputs: &[impl AsRef<str>],
        book: &impl AddressBook,
    ) -> Self {
        Self {
            from: inputs
                .iter()
                .map(|a| TxIoEntry::new(a.as_ref(), coin, book))
                .collect(),
            to: outputs
                .iter()
                .map(|a| TxIoEntry::new(a.as_ref(), coin, book))
                .collect(),
        }
    }

    /// True when any input carries a label; gates the "from" tooltip.
    pub fn has_labeled_inputs(&self) -> bool {
        self.from.iter().any(|e| e.label.is_some())
    }

    /// True when any output carries a label; gates the "to" tooltip.
    pub fn has_labeled_outputs(&self) -> bool {
        self.to.iter().any(|e| e.label.is_some())
    }
}
