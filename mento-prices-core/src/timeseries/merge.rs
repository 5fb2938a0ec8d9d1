use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::timeseries::day::day_offset;
use crate::{PricePoint, QuoteCurrencyPriceHistory, TokenPriceHistory};

/// Merge freshly fetched histories into previously stored ones.
///
/// - Every token present in either input appears in the output.
/// - Tokens only in `old` are carried over unchanged.
/// - Tokens in `new` are merged with [`merge_token_history`]: one point per
///   day bucket relative to `now_ms`, new points superseding old ones, sorted
///   ascending by timestamp.
/// - `old = None` is treated as no prior data.
///
/// Neither input is modified; the result is a freshly allocated map.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "trace",
        name = "mento_prices_core::merge_price_histories",
        skip_all,
        fields(new_tokens = new.len(), old_tokens = old.map_or(0, |o| o.len())),
    )
)]
#[must_use]
pub fn merge_price_histories(
    now_ms: i64,
    new: &QuoteCurrencyPriceHistory,
    old: Option<&QuoteCurrencyPriceHistory>,
) -> QuoteCurrencyPriceHistory {
    let mut out = QuoteCurrencyPriceHistory::new();

    if let Some(old) = old {
        for (token, points) in old {
            if !new.contains_key(token) {
                out.insert(token.clone(), points.clone());
            }
        }
    }

    for (token, fresh) in new {
        let prior = old
            .and_then(|o| o.get(token))
            .map(Vec::as_slice)
            .unwrap_or_default();
        out.insert(token.clone(), merge_token_history(now_ms, fresh, prior));
    }

    out
}

/// Merge two point sequences for the same token.
///
/// Points are keyed by their day offset from `now_ms`. Within a bucket a point
/// from `new` always wins over one from `old`; among points from the same side
/// the latest timestamp wins. The result is sorted ascending by timestamp and
/// holds at most one point per day.
#[must_use]
pub fn merge_token_history(
    now_ms: i64,
    new: &[PricePoint],
    old: &[PricePoint],
) -> TokenPriceHistory {
    let mut by_day = bucket_latest(now_ms, old);
    by_day.extend(bucket_latest(now_ms, new));

    // Larger offsets are older, so reversing the key order yields ascending timestamps.
    by_day.into_values().rev().collect()
}

fn bucket_latest(now_ms: i64, points: &[PricePoint]) -> BTreeMap<i64, PricePoint> {
    let mut map: BTreeMap<i64, PricePoint> = BTreeMap::new();
    for p in points {
        match map.entry(day_offset(now_ms, p.timestamp)) {
            Entry::Vacant(v) => {
                v.insert(*p);
            }
            Entry::Occupied(mut o) => {
                if p.timestamp >= o.get().timestamp {
                    o.insert(*p);
                }
            }
        }
    }
    map
}
