use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mento_prices_core::{
    PriceHistoryError, PricePoint, PriceRequest, PriceSource, QuoteCurrencyPriceHistory,
    timestamp_for_day,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};

/// Mock price source for CI-safe examples. Provides deterministic prices from static fixtures.
///
/// Quote currencies `"FAIL"` and `"TIMEOUT"` force a source error and a
/// 200ms delay respectively. Tokens without a fixture are left out of the
/// response.
pub struct MockPriceSource {
    name: &'static str,
    calls: AtomicUsize,
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceSource {
    #[must_use]
    pub const fn new() -> Self {
        Self::named("mento-prices-mock")
    }

    /// Same fixtures under a different source name.
    #[must_use]
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch_prices` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Fixture price of `token` against `quote` on `day`, if one exists.
    pub fn fixture_price(quote: &str, token: &str, day: u32) -> Option<f64> {
        let base = fixtures::usd_price(token)? / fixtures::usd_price(quote)?;
        Some(base * fixtures::day_drift(token, day))
    }

    async fn maybe_fail_or_timeout(&self, quote: &str) -> Result<(), PriceHistoryError> {
        match quote {
            "FAIL" => Err(PriceHistoryError::source_failed(
                self.name,
                "forced failure: prices",
            )),
            "TIMEOUT" => {
                // Keep short to avoid slowing tests excessively
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_prices(
        &self,
        req: &PriceRequest,
    ) -> Result<QuoteCurrencyPriceHistory, PriceHistoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_fail_or_timeout(req.quote.as_str()).await?;

        let mut out = QuoteCurrencyPriceHistory::new();
        for token in &req.tokens {
            let mut points: Vec<PricePoint> = req
                .days
                .iter()
                .filter_map(|&d| {
                    Self::fixture_price(req.quote.as_str(), token.as_str(), d)
                        .map(|price| PricePoint::new(timestamp_for_day(req.now_ms, d), price))
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            points.sort_by_key(|p| p.timestamp);
            out.insert(token.clone(), points);
        }
        Ok(out)
    }
}
