use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use mento_prices_core::{
    PriceHistoryError, PriceRequest, PriceSource, QuoteCurrencyPriceHistory, TokenId,
};

/// Instruction for how a fetch should behave for a given quote currency.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(PriceHistoryError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<TokenId, MockBehavior<QuoteCurrencyPriceHistory>>,
    requests: Vec<PriceRequest>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for fetches against a quote currency.
    pub async fn set_behavior(
        &self,
        quote: TokenId,
        behavior: MockBehavior<QuoteCurrencyPriceHistory>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert(quote, behavior);
    }

    /// All requests received so far, in arrival order.
    pub async fn requests(&self) -> Vec<PriceRequest> {
        self.state.lock().await.requests.clone()
    }
}

/// Price source whose responses are scripted per quote currency at runtime.
///
/// Quotes without a rule fail with `NotFound`.
pub struct DynamicMockSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockSource {
    /// Create a mock source and the controller that scripts it.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let source = Arc::new(Self {
            name,
            state: Arc::clone(&state),
        });
        (source, DynamicMockController { state })
    }
}

#[async_trait]
impl PriceSource for DynamicMockSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch_prices(
        &self,
        req: &PriceRequest,
    ) -> Result<QuoteCurrencyPriceHistory, PriceHistoryError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.requests.push(req.clone());
            guard.rules.get(&req.quote).cloned()
        };
        match behavior {
            Some(MockBehavior::Return(h)) => Ok(h),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(PriceHistoryError::not_found(format!(
                "prices in {}",
                req.quote
            ))),
        }
    }
}
