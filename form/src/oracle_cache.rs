//! Time-based caching for fee-tier quotes.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::oracle::{FeeQuote, FeeTierOracle, MempoolFeeApi, OracleError};

#[derive(Clone, Debug)]
struct CachedQuote {
    quote: FeeQuote,
    last_fetched: Instant,
}

/// A lazy, time-based cache in front of a fee-tier oracle.
///
/// Gatekeeper for the underlying provider: the oracle is only hit when
/// the cache is empty or older than `max_age`.
#[derive(Debug)]
pub struct QuoteCache {
    slot: RwLock<Option<CachedQuote>>,
    max_age: Duration,
}

impl QuoteCache {
    pub const fn new(max_age: Duration) -> Self {
        Self {
            slot: RwLock::const_new(None),
            max_age,
        }
    }

    /// Returns the cached quote, fetching from the oracle only when
    /// the cache is empty or stale.
    pub async fn get_or_fetch(
        &self,
        oracle: &impl FeeTierOracle,
    ) -> Result<FeeQuote, OracleError> {
        // Fast path: a valid, non-stale entry under the read lock.
        let read_lock = self.slot.read().await;
        if let Some(cache) = &*read_lock {
            if cache.last_fetched.elapsed() < self.max_age {
                return Ok(cache.quote);
            }
        }
        drop(read_lock); // release before acquiring the write lock

        let mut write_lock = self.slot.write().await;

        // Double-check: another task may have refreshed the cache
        // while we were waiting on the write lock.
        if let Some(cache) = &*write_lock {
            if cache.last_fetched.elapsed() < self.max_age {
                return Ok(cache.quote);
            }
        }

        let quote = oracle.fee_quote().await?;
        tracing::info!(quote = %serde_json::to_string(&quote)?, "refreshed fee quote");

        *write_lock = Some(CachedQuote {
            quote,
            last_fetched: Instant::now(),
        });

        Ok(quote)
    }
}

/// Retrieves the current fee quote from the backend's mempool API,
/// re-fetching at most once a minute.
pub async fn cached_fee_quote() -> Result<FeeQuote, OracleError> {
    static CACHE: QuoteCache = QuoteCache::new(Duration::from_secs(60));
    CACHE.get_or_fetch(&MempoolFeeApi).await
}
