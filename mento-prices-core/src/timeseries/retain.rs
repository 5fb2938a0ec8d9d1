use crate::QuoteCurrencyPriceHistory;
use crate::timeseries::day::day_offset;

/// Drop points whose day offset from `now_ms` is `retain_days` or more.
///
/// Tokens left without points are removed. Points dated after `now_ms` are
/// kept. Returns a new map; `histories` is not modified.
///
/// ```
/// use mento_prices_core::{ONE_DAY_MS, PricePoint, QuoteCurrencyPriceHistory, TokenId, prune_price_history};
///
/// let now = 1_700_000_000_000;
/// let mut h = QuoteCurrencyPriceHistory::new();
/// h.insert(TokenId::new("CELO"), vec![
///     PricePoint::new(now - 9 * ONE_DAY_MS, 0.4),
///     PricePoint::new(now - ONE_DAY_MS, 0.5),
/// ]);
/// h.insert(TokenId::new("cEUR"), vec![PricePoint::new(now - 30 * ONE_DAY_MS, 1.1)]);
///
/// let pruned = prune_price_history(now, &h, 7);
/// assert_eq!(pruned.len(), 1);
/// assert_eq!(pruned[&TokenId::new("CELO")], vec![PricePoint::new(now - ONE_DAY_MS, 0.5)]);
/// ```
#[must_use]
pub fn prune_price_history(
    now_ms: i64,
    histories: &QuoteCurrencyPriceHistory,
    retain_days: u32,
) -> QuoteCurrencyPriceHistory {
    let limit = i64::from(retain_days);
    histories
        .iter()
        .filter_map(|(token, points)| {
            let kept: Vec<_> = points
                .iter()
                .filter(|p| day_offset(now_ms, p.timestamp) < limit)
                .copied()
                .collect();
            (!kept.is_empty()).then(|| (token.clone(), kept))
        })
        .collect()
}
