//! Shared helpers for price series validation and invariants.

use crate::timeseries::day::day_offset;
use crate::{PriceHistoryError, PricePoint, QuoteCurrencyPriceHistory, TokenId};

/// Ensure every point of `token` carries a usable price and timestamp.
///
/// # Errors
/// Returns `Err(PriceHistoryError::Data)` if a price is NaN, infinite or
/// negative, or if a timestamp precedes the Unix epoch.
pub fn validate_price_points(
    token: &TokenId,
    points: &[PricePoint],
) -> Result<(), PriceHistoryError> {
    for p in points {
        if !p.price.is_finite() || p.price < 0.0 {
            return Err(PriceHistoryError::Data(format!(
                "invalid price {} for {token} at {}",
                p.price, p.timestamp
            )));
        }
        if p.timestamp < 0 {
            return Err(PriceHistoryError::Data(format!(
                "negative timestamp {} for {token}",
                p.timestamp
            )));
        }
    }
    Ok(())
}

/// Validate every token series in `histories`.
///
/// # Errors
/// Returns the first error reported by [`validate_price_points`].
pub fn validate_history(histories: &QuoteCurrencyPriceHistory) -> Result<(), PriceHistoryError> {
    histories
        .iter()
        .try_for_each(|(token, points)| validate_price_points(token, points))
}

/// Returns true if `points` is strictly ascending by timestamp and holds at
/// most one point per day bucket relative to `now_ms`.
#[must_use]
pub fn is_strictly_day_bucketed(now_ms: i64, points: &[PricePoint]) -> bool {
    points.windows(2).all(|w| {
        w[0].timestamp < w[1].timestamp
            && day_offset(now_ms, w[0].timestamp) != day_offset(now_ms, w[1].timestamp)
    })
}
