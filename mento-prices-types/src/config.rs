//! Configuration types shared by the orchestrator and its collaborators.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PriceHistoryError, STALE_TOKEN_PRICE_TIME, TokenId};

/// Largest accepted lookback window, in days.
pub const MAX_LOOKBACK_DAYS: u32 = 365;

/// Rule selecting which token history drives gap detection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferencePolicy {
    /// Use the named token's history. A token with no history reports every day missing.
    Token(TokenId),
    /// Use the first token in key order.
    #[default]
    FirstToken,
    /// A day is missing if any token in the map lacks it.
    AllTokens,
}

/// Strategy for selecting among registered price sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchStrategy {
    /// Use registration order and fall back to the next source on failure.
    #[default]
    PriorityWithFallback,
    /// Race all sources concurrently and take the first success.
    Latency,
}

/// Periodic refresh configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Base delay between refresh cycles.
    pub interval: Duration,
    /// Random jitter percentage [0, 100] added to each delay.
    pub jitter_percent: u8,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            jitter_percent: 10,
        }
    }
}

/// Global configuration for the `PriceHistory` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryConfig {
    /// Number of most recent days (today included) the chart needs.
    pub lookback_days: u32,
    /// Maximum age of today's point before it is refetched.
    pub stale_after: Duration,
    /// Days kept in the store after merging. `None` keeps `lookback_days`.
    pub retain_days: Option<u32>,
    /// Which token's history decides what is missing.
    pub reference: ReferencePolicy,
    /// Strategy for fetching from multiple sources.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual source requests.
    pub source_timeout: Duration,
    /// Poller cadence.
    pub poll: PollConfig,
}

impl Default for PriceHistoryConfig {
    fn default() -> Self {
        Self {
            lookback_days: 7,
            stale_after: Duration::from_millis(STALE_TOKEN_PRICE_TIME.unsigned_abs()),
            retain_days: None,
            reference: ReferencePolicy::default(),
            fetch_strategy: FetchStrategy::default(),
            source_timeout: Duration::from_secs(5),
            poll: PollConfig::default(),
        }
    }
}

impl PriceHistoryConfig {
    /// Effective retention window in days.
    #[must_use]
    pub fn effective_retain_days(&self) -> u32 {
        self.retain_days.unwrap_or(self.lookback_days)
    }

    /// Staleness threshold in milliseconds, saturating at `i64::MAX`.
    #[must_use]
    pub fn stale_after_ms(&self) -> i64 {
        i64::try_from(self.stale_after.as_millis()).unwrap_or(i64::MAX)
    }

    /// Check the configuration for values the orchestrator cannot honor.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the lookback window is zero or above
    /// [`MAX_LOOKBACK_DAYS`], the retention window is shorter than the lookback
    /// window, jitter exceeds 100%, or the poll interval or source timeout is zero.
    pub fn validate(&self) -> Result<(), PriceHistoryError> {
        if self.lookback_days == 0 || self.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(PriceHistoryError::InvalidArg(format!(
                "lookback_days must be within 1..={MAX_LOOKBACK_DAYS}, got {}",
                self.lookback_days
            )));
        }
        if let Some(retain) = self.retain_days
            && retain < self.lookback_days
        {
            return Err(PriceHistoryError::InvalidArg(format!(
                "retain_days ({retain}) must not be shorter than lookback_days ({})",
                self.lookback_days
            )));
        }
        if self.poll.jitter_percent > 100 {
            return Err(PriceHistoryError::InvalidArg(format!(
                "poll jitter_percent must be <= 100, got {}",
                self.poll.jitter_percent
            )));
        }
        if self.poll.interval.is_zero() {
            return Err(PriceHistoryError::InvalidArg(
                "poll interval must be non-zero".into(),
            ));
        }
        if self.source_timeout.is_zero() {
            return Err(PriceHistoryError::InvalidArg(
                "source_timeout must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
