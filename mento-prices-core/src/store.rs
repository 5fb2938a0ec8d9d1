use async_trait::async_trait;

use crate::{PriceHistoryError, QuoteCurrencyPriceHistory, TokenId};

/// Persistence for merged histories, one entry per quote currency.
#[async_trait]
pub trait PriceHistoryStore: Send + Sync {
    /// Load the stored history for `quote`; `Ok(None)` when nothing was saved yet.
    ///
    /// # Errors
    /// Returns `Store` if the backing storage cannot be read.
    async fn load(
        &self,
        quote: &TokenId,
    ) -> Result<Option<QuoteCurrencyPriceHistory>, PriceHistoryError>;

    /// Replace the stored history for `quote`.
    ///
    /// # Errors
    /// Returns `Store` if the backing storage cannot be written.
    async fn save(
        &self,
        quote: &TokenId,
        history: QuoteCurrencyPriceHistory,
    ) -> Result<(), PriceHistoryError>;
}
