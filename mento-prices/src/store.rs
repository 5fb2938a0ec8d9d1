use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mento_prices_core::{PriceHistoryError, PriceHistoryStore, QuoteCurrencyPriceHistory, TokenId};

/// Process-local store keeping one history per quote currency.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<TokenId, QuoteCurrencyPriceHistory>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with `history` for `quote`.
    #[must_use]
    pub fn with_history(quote: TokenId, history: QuoteCurrencyPriceHistory) -> Self {
        let mut map = HashMap::new();
        map.insert(quote, history);
        Self {
            inner: RwLock::new(map),
        }
    }
}

#[async_trait]
impl PriceHistoryStore for MemoryStore {
    async fn load(
        &self,
        quote: &TokenId,
    ) -> Result<Option<QuoteCurrencyPriceHistory>, PriceHistoryError> {
        Ok(self.inner.read().await.get(quote).cloned())
    }

    async fn save(
        &self,
        quote: &TokenId,
        history: QuoteCurrencyPriceHistory,
    ) -> Result<(), PriceHistoryError> {
        self.inner.write().await.insert(quote.clone(), history);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mento_prices_core::PricePoint;

    #[tokio::test]
    async fn load_returns_none_until_saved() {
        let store = MemoryStore::new();
        let q = TokenId::new("cUSD");
        assert_eq!(store.load(&q).await, Ok(None));

        let mut h = QuoteCurrencyPriceHistory::new();
        h.insert(TokenId::new("CELO"), vec![PricePoint::new(1, 0.5)]);
        store.save(&q, h.clone()).await.expect("save");
        assert_eq!(store.load(&q).await, Ok(Some(h)));
        assert_eq!(store.load(&TokenId::new("cEUR")).await, Ok(None));
    }
}
