//! The submission gate: a pure combinational rule over form state.

use serde::Deserialize;
use serde::Serialize;

/// The kind of account transaction funds are drawn from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIs,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AccountKind {
    /// An ordinary wallet-held account.
    #[default]
    Wallet,
    /// Tracked by address only; spending needs a one-time key entry.
    WatchOnly,
    /// A hardware-backed account.
    Lockbox,
}

/// The browser engine the form is running under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIs,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum BrowserEngine {
    Chrome,
    Chromium,
    Firefox,
    Safari,
    Edge,
    #[default]
    Other,
}

/// Hardware-backed sends talk to the device over an API only the
/// Chromium-family engines expose.
pub fn lockbox_send_supported(engine: BrowserEngine) -> bool {
    matches!(engine, BrowserEngine::Chrome | BrowserEngine::Chromium)
}

/// Whether the submit button is enabled.
///
/// Recomputed on every relevant state change: submission is blocked
/// while the form is invalid, a submission is already in flight, the
/// form is unmodified, or a Lockbox account is selected on an engine
/// that cannot talk to the device.
pub fn can_submit(
    valid: bool,
    submitting: bool,
    pristine: bool,
    account: AccountKind,
    engine: BrowserEngine,
) -> bool {
    valid
        && !submitting
        && !pristine
        && (!account.is_lockbox() || lockbox_send_supported(engine))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_blocks_each_condition() {
        let ok = (true, false, false, AccountKind::Wallet, BrowserEngine::Firefox);
        assert!(can_submit(ok.0, ok.1, ok.2, ok.3, ok.4));

        assert!(!can_submit(false, false, false, ok.3, ok.4)); // invalid
        assert!(!can_submit(true, true, false, ok.3, ok.4)); // in flight
        assert!(!can_submit(true, false, true, ok.3, ok.4)); // pristine
    }

    #[test]
    fn test_lockbox_needs_chromium_family() {
        for engine in [BrowserEngine::Chrome, BrowserEngine::Chromium] {
            assert!(can_submit(true, false, false, AccountKind::Lockbox, engine));
        }
        for engine in [
            BrowserEngine::Firefox,
            BrowserEngine::Safari,
            BrowserEngine::Edge,
            BrowserEngine::Other,
        ] {
            assert!(!can_submit(true, false, false, AccountKind::Lockbox, engine));
            // other account kinds are unaffected by the engine
            assert!(can_submit(true, false, false, AccountKind::Wallet, engine));
            assert!(can_submit(true, false, false, AccountKind::WatchOnly, engine));
        }
    }
}
