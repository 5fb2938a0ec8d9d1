//! mento-prices keeps per-token daily price histories fresh.
//!
//! Overview
//! - Loads the stored history for a quote currency from a `PriceHistoryStore`.
//! - Finds the recent days the history does not cover yet (today counts as
//!   missing once its point is older than the staleness threshold).
//! - Fetches only those days from registered `PriceSource`s.
//! - Merges the fetched points into the stored history one point per day,
//!   prunes days outside the retention window, and saves the result.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-source timeout, aggregates
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races all sources; lowest tail latency but higher request fanout.
//! - Reference policy: `FirstToken` checks a single history (cheap, may miss gaps
//!   in other tokens); `AllTokens` refetches any day some token lacks.
//! - Fetched data is validated before merging; a source returning unusable prices
//!   is treated as a failed source.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use mento_prices::{PriceHistory, TokenId};
//!
//! let prices = PriceHistory::builder()
//!     .with_source(Arc::new(CoinGecko::new()))
//!     .lookback_days(7)
//!     .build()?;
//!
//! let quote = TokenId::new("cUSD");
//! let report = prices.refresh(&quote, &[TokenId::new("CELO")]).await?;
//! for (token, series) in &report.history {
//!     println!("{token}: {} points", series.len());
//! }
//!
//! // Keep refreshing in the background.
//! let handle = Arc::new(prices).spawn_poller(quote, vec![TokenId::new("CELO")]);
//! // ...
//! handle.stop().await;
//! ```
//!
//! See `mento-prices/examples/` for a runnable demonstration.
#![warn(missing_docs)]

pub(crate) mod core;
mod refresh;
mod store;

pub use core::{PriceHistory, PriceHistoryBuilder};
pub use store::MemoryStore;

// Re-export core types for convenience
pub use mento_prices_core::{
    Clock, FetchStrategy, FixedClock, ONE_DAY_MS, PollConfig, PollHandle, PriceHistoryConfig,
    PriceHistoryError, PriceHistoryStore, PricePoint, PriceRequest, PriceSource,
    QuoteCurrencyPriceHistory, ReferencePolicy, RefreshReport, STALE_TOKEN_PRICE_TIME, SourceKey,
    SystemClock, TokenId, TokenPriceHistory,
};
