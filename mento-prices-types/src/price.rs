//! Price observations and per-token histories.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of one day bucket in milliseconds.
pub const ONE_DAY_MS: i64 = 86_400_000;

/// Default maximum age in milliseconds for today's point to still count as fresh.
pub const STALE_TOKEN_PRICE_TIME: i64 = 2_000_000;

/// Identifier of a tradable token (e.g. `"CELO"`, `"cUSD"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Construct a token identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TokenId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TokenId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One observed price for one token at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Price denominated in the quote currency.
    pub price: f64,
}

impl PricePoint {
    /// Build a point from a millisecond timestamp and a price.
    #[must_use]
    pub const fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Price series for a single token, ascending by timestamp.
pub type TokenPriceHistory = Vec<PricePoint>;

/// Histories keyed by token for one quote currency.
///
/// A missing key means no history is known for that token. Keys iterate in
/// a deterministic order.
pub type QuoteCurrencyPriceHistory = BTreeMap<TokenId, TokenPriceHistory>;
