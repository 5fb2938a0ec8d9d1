use std::sync::Arc;
use std::time::Duration;

use mento_prices_core::{Clock, PriceHistoryError, PriceHistoryStore, PriceSource, SystemClock};
use mento_prices_types::{FetchStrategy, PollConfig, PriceHistoryConfig, ReferencePolicy};

use crate::store::MemoryStore;

/// Orchestrator that keeps stored price histories fresh from registered sources.
pub struct PriceHistory {
    pub(crate) sources: Vec<Arc<dyn PriceSource>>,
    pub(crate) store: Arc<dyn PriceHistoryStore>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: PriceHistoryConfig,
}

/// Builder for constructing a `PriceHistory` orchestrator with custom configuration.
pub struct PriceHistoryBuilder {
    sources: Vec<Arc<dyn PriceSource>>,
    store: Option<Arc<dyn PriceHistoryStore>>,
    clock: Option<Arc<dyn Clock>>,
    cfg: PriceHistoryConfig,
}

impl Default for PriceHistoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceHistoryBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no sources; you must register at least one via [`Self::with_source`].
    /// - Without an explicit store, histories live in a fresh [`MemoryStore`] and are
    ///   lost when the orchestrator is dropped.
    /// - Without an explicit clock, the system clock is used.
    /// - Defaults: 7-day lookback, ~33 minute staleness for today's price,
    ///   first-token reference, priority-with-fallback fetches, 5s source timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: vec![],
            store: None,
            clock: None,
            cfg: PriceHistoryConfig::default(),
        }
    }

    /// Register a price source.
    ///
    /// Registration order is the fallback order for `PriorityWithFallback`.
    /// Duplicates are not deduplicated; avoid registering the same source twice.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Use `store` for loading and saving histories.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn PriceHistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Use `clock` as the time source.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PriceHistoryConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Number of most recent days (today included) to keep covered.
    #[must_use]
    pub const fn lookback_days(mut self, days: u32) -> Self {
        self.cfg.lookback_days = days;
        self
    }

    /// Maximum age of today's point before it is fetched again.
    #[must_use]
    pub const fn stale_after(mut self, stale_after: Duration) -> Self {
        self.cfg.stale_after = stale_after;
        self
    }

    /// Number of days kept in the store after merging.
    ///
    /// Behavior and trade-offs:
    /// - Defaults to the lookback window, which keeps stored state bounded.
    /// - A longer window keeps older days around for charts that later widen
    ///   their lookback, at the cost of larger stored state.
    #[must_use]
    pub const fn retain_days(mut self, days: u32) -> Self {
        self.cfg.retain_days = Some(days);
        self
    }

    /// Select which token history decides what is missing.
    #[must_use]
    pub fn reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.cfg.reference = policy;
        self
    }

    /// Select the fetch strategy for multi-source requests.
    ///
    /// Behavior and trade-offs:
    /// - `PriorityWithFallback`: deterministic order, applies per-source timeout,
    ///   aggregates errors; may be slower but predictable and economical on rate limits.
    /// - `Latency`: race all sources and return the first success; fastest
    ///   typical latency but consumes more concurrent requests.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-source request timeout.
    #[must_use]
    pub const fn source_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.source_timeout = timeout;
        self
    }

    /// Set the poller cadence and jitter.
    #[must_use]
    pub const fn poll(mut self, poll: PollConfig) -> Self {
        self.cfg.poll = poll;
        self
    }

    /// Build the `PriceHistory` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no sources have been registered via [`Self::with_source`]
    /// or if the configuration fails [`PriceHistoryConfig::validate`].
    pub fn build(self) -> Result<PriceHistory, PriceHistoryError> {
        if self.sources.is_empty() {
            return Err(PriceHistoryError::InvalidArg(
                "no price sources registered; add at least one via with_source(...)".to_string(),
            ));
        }
        self.cfg.validate()?;

        Ok(PriceHistory {
            sources: self.sources,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryStore::new())),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            cfg: self.cfg,
        })
    }
}

impl PriceHistory {
    /// Start building a new `PriceHistory` instance.
    ///
    /// ```rust,ignore
    /// let prices = mento_prices::PriceHistory::builder()
    ///     .with_source(primary.clone())
    ///     .with_source(backup.clone())
    ///     .lookback_days(30)
    ///     .fetch_strategy(mento_prices::FetchStrategy::PriorityWithFallback)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PriceHistoryBuilder {
        PriceHistoryBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PriceHistoryConfig {
        &self.cfg
    }

    /// Wrap a source future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "mento_prices::core::source_call_with_timeout",
            skip(fut),
            fields(
                source = source_name,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<T, Fut>(
        source_name: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, PriceHistoryError>
    where
        Fut: core::future::Future<Output = Result<T, PriceHistoryError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(PriceHistoryError::source_timeout(source_name)))
    }
}
