use serde::Serialize;

use crate::{QuoteCurrencyPriceHistory, SourceKey, TokenId};

/// Outcome of one refresh cycle for a quote currency.
///
/// Serializable for logs and status endpoints; the source key is written as
/// its name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    /// Quote currency that was refreshed.
    pub quote: TokenId,
    /// Day offsets that were missing before the refresh (0 = today).
    pub missing_days: Vec<u32>,
    /// Source that served the fetch; `None` when nothing was missing.
    pub source: Option<SourceKey>,
    /// Number of price points the source returned across all tokens.
    pub points_fetched: usize,
    /// History as stored after the refresh.
    pub history: QuoteCurrencyPriceHistory,
}

impl RefreshReport {
    /// Returns true if the refresh had to call a price source.
    #[must_use]
    pub const fn fetched(&self) -> bool {
        self.source.is_some()
    }
}
