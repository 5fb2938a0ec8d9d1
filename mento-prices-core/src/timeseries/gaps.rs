use std::collections::BTreeSet;

use crate::timeseries::day::day_offset;
use crate::{PricePoint, QuoteCurrencyPriceHistory, ReferencePolicy};

/// Day offsets in `[0, num_days)` that `reference` does not cover with fresh data.
///
/// - A day is covered when some point falls in its bucket (see [`day_offset`]).
/// - Today (offset 0) additionally requires the point to be at most
///   `stale_after_ms` old; older days accept any point in the bucket.
/// - `None` and an empty slice both mean nothing is known, so every day is missing.
///
/// The result is ascending and free of duplicates.
///
/// ```
/// use mento_prices_core::{ONE_DAY_MS, PricePoint, find_missing_price_days};
///
/// let now = 1_700_000_000_000;
/// let history = vec![
///     PricePoint::new(now - 2 * ONE_DAY_MS, 1.0),
///     PricePoint::new(now - ONE_DAY_MS, 1.1),
///     PricePoint::new(now - 60_000, 1.2),
/// ];
/// assert_eq!(find_missing_price_days(now, 4, Some(&history), 2_000_000), vec![3]);
/// assert_eq!(find_missing_price_days(now, 3, None, 2_000_000), vec![0, 1, 2]);
/// ```
#[must_use]
pub fn find_missing_price_days(
    now_ms: i64,
    num_days: u32,
    reference: Option<&[PricePoint]>,
    stale_after_ms: i64,
) -> Vec<u32> {
    let covered = covered_days(now_ms, num_days, reference.unwrap_or_default(), stale_after_ms);
    (0..num_days).filter(|d| !covered.contains(d)).collect()
}

/// Like [`find_missing_price_days`], with the reference history chosen from a
/// map of token histories by `policy`.
///
/// - `Token(id)`: that token's history; an unknown token reports every day missing.
/// - `FirstToken`: the first history in key order.
/// - `AllTokens`: a day is missing if any token lacks it. An absent or empty
///   map reports every day missing.
#[must_use]
pub fn find_missing_price_days_in(
    now_ms: i64,
    num_days: u32,
    histories: Option<&QuoteCurrencyPriceHistory>,
    policy: &ReferencePolicy,
    stale_after_ms: i64,
) -> Vec<u32> {
    match policy {
        ReferencePolicy::Token(id) => find_missing_price_days(
            now_ms,
            num_days,
            histories.and_then(|h| h.get(id)).map(Vec::as_slice),
            stale_after_ms,
        ),
        ReferencePolicy::FirstToken => find_missing_price_days(
            now_ms,
            num_days,
            histories.and_then(|h| h.values().next()).map(Vec::as_slice),
            stale_after_ms,
        ),
        ReferencePolicy::AllTokens => {
            let Some(map) = histories.filter(|h| !h.is_empty()) else {
                return (0..num_days).collect();
            };
            let missing: BTreeSet<u32> = map
                .values()
                .flat_map(|points| {
                    find_missing_price_days(now_ms, num_days, Some(points), stale_after_ms)
                })
                .collect();
            missing.into_iter().collect()
        }
    }
}

fn covered_days(
    now_ms: i64,
    num_days: u32,
    points: &[PricePoint],
    stale_after_ms: i64,
) -> BTreeSet<u32> {
    points
        .iter()
        .filter_map(|p| {
            let day = u32::try_from(day_offset(now_ms, p.timestamp)).ok()?;
            if day >= num_days {
                return None;
            }
            if day == 0 && now_ms.saturating_sub(p.timestamp) > stale_after_ms {
                return None;
            }
            Some(day)
        })
        .collect()
}
