//! Token price-history data types, configuration primitives and errors shared
//! across the mento-prices crates.
#![warn(missing_docs)]

mod config;
mod error;
mod price;
mod reports;
mod source;

pub use config::{
    FetchStrategy, MAX_LOOKBACK_DAYS, PollConfig, PriceHistoryConfig, ReferencePolicy,
};
pub use error::PriceHistoryError;
pub use price::{
    ONE_DAY_MS, PricePoint, QuoteCurrencyPriceHistory, STALE_TOKEN_PRICE_TIME, TokenId,
    TokenPriceHistory,
};
pub use reports::RefreshReport;
pub use source::SourceKey;
