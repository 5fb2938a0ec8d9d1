use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use mento_prices_core::{
    PriceHistoryError, PriceRequest, PriceSource, QuoteCurrencyPriceHistory, SourceKey,
    validate_history,
};
use mento_prices_types::FetchStrategy;

use super::util::{collapse_errors, tag_err};
use crate::PriceHistory;

type Fetched = (SourceKey, QuoteCurrencyPriceHistory);

impl PriceHistory {
    /// Fetch the requested days from the registered sources.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies the per-source timeout in both modes
    /// - Treats unusable data (non-finite or negative prices) as a source failure
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mento_prices::refresh::fetch_prices",
            skip(self, req),
            fields(quote = %req.quote, days = req.days.len(), tokens = req.tokens.len()),
        )
    )]
    pub(crate) async fn fetch_prices(
        &self,
        req: &PriceRequest,
    ) -> Result<Fetched, PriceHistoryError> {
        match self.cfg.fetch_strategy {
            FetchStrategy::PriorityWithFallback => self.fetch_priority_with_fallback(req).await,
            FetchStrategy::Latency => self.fetch_latency(req).await,
        }
    }

    async fn fetch_priority_with_fallback(
        &self,
        req: &PriceRequest,
    ) -> Result<Fetched, PriceHistoryError> {
        let mut errors: Vec<PriceHistoryError> = Vec::new();

        for s in &self.sources {
            match Self::fetch_validated(Arc::clone(s), req, self.cfg.source_timeout).await {
                Ok(h) => return Ok((s.key(), h)),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = s.name(), error = %e, "price source failed; trying next");
                    errors.push(e);
                }
            }
        }

        Err(collapse_errors(
            errors,
            Some(format!("prices in {}", req.quote)),
        ))
    }

    async fn fetch_latency(&self, req: &PriceRequest) -> Result<Fetched, PriceHistoryError> {
        let timeout = self.cfg.source_timeout;
        let mut futs: FuturesUnordered<_> = self
            .sources
            .iter()
            .map(|s| {
                let s = Arc::clone(s);
                async move {
                    let key = s.key();
                    (key, Self::fetch_validated(s, req, timeout).await)
                }
            })
            .collect();

        let mut errors: Vec<PriceHistoryError> = Vec::new();
        while let Some((key, res)) = futs.next().await {
            match res {
                Ok(h) => return Ok((key, h)),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = key.as_str(), error = %e, "price source failed in race");
                    errors.push(e);
                }
            }
        }

        Err(collapse_errors(
            errors,
            Some(format!("prices in {}", req.quote)),
        ))
    }

    async fn fetch_validated(
        source: Arc<dyn PriceSource>,
        req: &PriceRequest,
        timeout: std::time::Duration,
    ) -> Result<QuoteCurrencyPriceHistory, PriceHistoryError> {
        let name = source.name();
        let fetched = Self::source_call_with_timeout(name, timeout, source.fetch_prices(req))
            .await
            .map_err(|e| tag_err(name, e))?;
        validate_history(&fetched).map_err(|e| tag_err(name, e))?;
        Ok(fetched)
    }
}
