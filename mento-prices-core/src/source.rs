use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{PriceHistoryError, QuoteCurrencyPriceHistory, SourceKey, TokenId};

/// Request for day prices of several tokens against one quote currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Currency the prices are denominated in.
    pub quote: TokenId,
    /// Tokens to price.
    pub tokens: Vec<TokenId>,
    /// Day offsets to fetch, ascending (0 = today).
    pub days: Vec<u32>,
    /// Time the day offsets are relative to, in milliseconds.
    pub now_ms: i64,
}

/// An external price API.
///
/// Implementations return points for a subset of the requested tokens and
/// days; anything they cannot price is simply left out. Returned points are
/// validated by the caller before they reach a stored history.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// A stable identifier used in reports and logs (e.g. "coingecko").
    fn name(&self) -> &'static str;

    /// Canonical key constructed from the static name.
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Fetch prices for the requested tokens and days.
    ///
    /// # Errors
    /// Returns an error if the upstream API fails or cannot serve the quote currency.
    async fn fetch_prices(
        &self,
        req: &PriceRequest,
    ) -> Result<QuoteCurrencyPriceHistory, PriceHistoryError>;
}
