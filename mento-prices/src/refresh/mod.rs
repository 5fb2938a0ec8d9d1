use mento_prices_core::{
    PriceHistoryError, PriceRequest, QuoteCurrencyPriceHistory, ReferencePolicy, RefreshReport,
    TokenId, find_missing_price_days_in, merge_price_histories, prune_price_history,
};

use crate::PriceHistory;

mod fetch;
pub mod poller;
pub(crate) mod util;

impl PriceHistory {
    /// Bring the stored history for `quote` up to date for `tokens`.
    ///
    /// Loads the stored history, finds missing days, fetches only those from the
    /// sources, merges the result into the stored history (fetched points win
    /// per day), prunes days outside the retention window and saves it.
    /// When nothing is missing no source is called.
    ///
    /// # Errors
    /// - `InvalidArg` if `tokens` is empty.
    /// - Any error from the store.
    /// - The collapsed source error (`AllSourcesFailed`, `AllSourcesTimedOut`,
    ///   `NotFound`) when no source could serve the request.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mento_prices::refresh",
            skip(self, quote, tokens),
            fields(quote = %quote, tokens = tokens.len()),
        )
    )]
    pub async fn refresh(
        &self,
        quote: &TokenId,
        tokens: &[TokenId],
    ) -> Result<RefreshReport, PriceHistoryError> {
        if tokens.is_empty() {
            return Err(PriceHistoryError::InvalidArg(
                "refresh requires at least one token".into(),
            ));
        }

        let now = self.clock.now_ms();
        let stored = self.store.load(quote).await?;
        let missing_days = self.missing_days_at(now, stored.as_ref(), tokens);

        if missing_days.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!("history is fresh; skipping fetch");
            return Ok(RefreshReport {
                quote: quote.clone(),
                missing_days,
                source: None,
                points_fetched: 0,
                history: stored.unwrap_or_default(),
            });
        }

        let req = PriceRequest {
            quote: quote.clone(),
            tokens: tokens.to_vec(),
            days: missing_days.clone(),
            now_ms: now,
        };
        let (source, fetched) = self.fetch_prices(&req).await?;
        let points_fetched: usize = fetched.values().map(Vec::len).sum();

        let merged = merge_price_histories(now, &fetched, stored.as_ref());
        let history = prune_price_history(now, &merged, self.cfg.effective_retain_days());
        self.store.save(quote, history.clone()).await?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            source = source.as_str(),
            missing = missing_days.len(),
            points_fetched,
            "merged fetched prices"
        );

        Ok(RefreshReport {
            quote: quote.clone(),
            missing_days,
            source: Some(source),
            points_fetched,
            history,
        })
    }

    /// Stored history for `quote`; empty when nothing was saved yet.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn history(
        &self,
        quote: &TokenId,
    ) -> Result<QuoteCurrencyPriceHistory, PriceHistoryError> {
        Ok(self.store.load(quote).await?.unwrap_or_default())
    }

    /// Day offsets a refresh of `quote` for `tokens` would fetch right now.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub async fn missing_days(
        &self,
        quote: &TokenId,
        tokens: &[TokenId],
    ) -> Result<Vec<u32>, PriceHistoryError> {
        let stored = self.store.load(quote).await?;
        Ok(self.missing_days_at(self.clock.now_ms(), stored.as_ref(), tokens))
    }

    // With `AllTokens`, only the requested tokens count, and a requested token
    // with no stored series makes every day missing.
    fn missing_days_at(
        &self,
        now: i64,
        stored: Option<&QuoteCurrencyPriceHistory>,
        tokens: &[TokenId],
    ) -> Vec<u32> {
        let days = self.cfg.lookback_days;
        let stale = self.cfg.stale_after_ms();
        match &self.cfg.reference {
            ReferencePolicy::AllTokens => {
                let view: QuoteCurrencyPriceHistory = tokens
                    .iter()
                    .map(|t| {
                        let series = stored.and_then(|h| h.get(t)).cloned().unwrap_or_default();
                        (t.clone(), series)
                    })
                    .collect();
                find_missing_price_days_in(now, days, Some(&view), &ReferencePolicy::AllTokens, stale)
            }
            policy => find_missing_price_days_in(now, days, stored, policy, stale),
        }
    }
}
