//! The fee-tier oracle contract and its HTTP implementation.

use serde::Deserialize;
use serde::Serialize;
use types::fee::{FeeBounds, FeeTiers};

/// Errors from the oracle layer are opaque to the form.
pub type OracleError = anyhow::Error;

/// A full fee quote: per-tier estimates plus the protocol bounds the
/// custom-fee validator checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub tiers: FeeTiers,
    pub bounds: FeeBounds,
}

/// A trait for any service that can estimate current fee rates.
pub trait FeeTierOracle {
    /// Fetches the latest fee quote.
    async fn fee_quote(&self) -> Result<FeeQuote, OracleError>;
}

/// The shape of the backend's `/mempool/fees` JSON response.
#[derive(Deserialize, Debug)]
struct MempoolFeesResponse {
    regular: u64,
    priority: u64,
    limits: MempoolFeeLimits,
}

#[derive(Deserialize, Debug)]
struct MempoolFeeLimits {
    min: u64,
    max: u64,
}

impl From<MempoolFeesResponse> for FeeQuote {
    fn from(resp: MempoolFeesResponse) -> Self {
        Self {
            tiers: FeeTiers {
                regular: resp.regular,
                priority: resp.priority,
            },
            bounds: FeeBounds {
                min: resp.limits.min,
                max: resp.limits.max,
            },
        }
    }
}

/// Fee estimates from the wallet backend's public mempool API.
pub struct MempoolFeeApi;

impl MempoolFeeApi {
    const URL: &'static str = "https://api.blockchain.info/mempool/fees";
}

impl FeeTierOracle for MempoolFeeApi {
    async fn fee_quote(&self) -> Result<FeeQuote, OracleError> {
        let client = reqwest::Client::new();
        let resp = client
            .get(Self::URL)
            .send()
            .await?
            .json::<MempoolFeesResponse>()
            .await?;
        Ok(resp.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee_selector::FeeSelector;

    /// A canned oracle for driving the form in tests.
    struct FixedOracle(FeeQuote);

    impl FeeTierOracle for FixedOracle {
        async fn fee_quote(&self) -> Result<FeeQuote, OracleError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_oracle_quote_feeds_selector() {
        let oracle = FixedOracle(FeeQuote {
            tiers: FeeTiers {
                regular: 5,
                priority: 20,
            },
            bounds: FeeBounds { min: 1, max: 200 },
        });
        let quote = oracle.fee_quote().await.unwrap();
        let selector = FeeSelector::new(quote);
        assert_eq!(selector.effective_rate(), Ok((5, None)));
    }

    #[test]
    fn test_response_decodes_into_quote() {
        let json = r#"{"limits":{"min":2,"max":200},"regular":5,"priority":20}"#;
        let resp: MempoolFeesResponse = serde_json::from_str(json).unwrap();
        let quote = FeeQuote::from(resp);
        assert_eq!(
            quote.tiers,
            FeeTiers {
                regular: 5,
                priority: 20
            }
        );
        assert_eq!(quote.bounds, FeeBounds { min: 2, max: 200 });
    }
}
