use mento_prices_core::{
    ONE_DAY_MS, PricePoint, QuoteCurrencyPriceHistory, ReferencePolicy, STALE_TOKEN_PRICE_TIME,
    TokenId, day_offset, find_missing_price_days, find_missing_price_days_in,
};
use proptest::prelude::*;

const NOW: i64 = 1_700_000_000_000;

fn fresh(day: u32, price: f64) -> PricePoint {
    // One minute into day 0, one hour into older buckets.
    let into = if day == 0 { 60_000 } else { 3_600_000 };
    PricePoint::new(NOW - i64::from(day) * ONE_DAY_MS - into, price)
}

fn stale_today(price: f64) -> PricePoint {
    PricePoint::new(NOW - STALE_TOKEN_PRICE_TIME - 1, price)
}

fn history(entries: &[(&str, Vec<PricePoint>)]) -> QuoteCurrencyPriceHistory {
    entries
        .iter()
        .map(|(t, pts)| (TokenId::new(*t), pts.clone()))
        .collect()
}

#[test]
fn zero_days_is_always_empty() {
    let h = history(&[("CELO", vec![fresh(0, 1.0)])]);
    assert!(find_missing_price_days(NOW, 0, None, STALE_TOKEN_PRICE_TIME).is_empty());
    assert!(
        find_missing_price_days_in(NOW, 0, Some(&h), &ReferencePolicy::AllTokens, STALE_TOKEN_PRICE_TIME)
            .is_empty()
    );
}

#[test]
fn absent_history_reports_every_day() {
    for n in [1u32, 5, 30] {
        let expected: Vec<u32> = (0..n).collect();
        assert_eq!(find_missing_price_days(NOW, n, None, STALE_TOKEN_PRICE_TIME), expected);
    }
}

#[test]
fn absent_and_empty_are_equivalent() {
    let empty_map = QuoteCurrencyPriceHistory::new();
    let empty_token = history(&[("CELO", vec![])]);
    let none = find_missing_price_days(NOW, 6, None, STALE_TOKEN_PRICE_TIME);

    assert_eq!(find_missing_price_days(NOW, 6, Some(&[]), STALE_TOKEN_PRICE_TIME), none);
    for policy in [
        ReferencePolicy::FirstToken,
        ReferencePolicy::AllTokens,
        ReferencePolicy::Token(TokenId::new("CELO")),
    ] {
        for h in [None, Some(&empty_map), Some(&empty_token)] {
            assert_eq!(
                find_missing_price_days_in(NOW, 6, h, &policy, STALE_TOKEN_PRICE_TIME),
                none,
                "{policy:?} {h:?}"
            );
        }
    }
}

#[test]
fn single_gap_in_the_middle() {
    let pts = vec![fresh(4, 1.4), fresh(2, 1.2), fresh(1, 1.1), fresh(0, 1.0)];
    assert_eq!(
        find_missing_price_days(NOW, 5, Some(&pts), STALE_TOKEN_PRICE_TIME),
        vec![3]
    );
}

#[test]
fn stale_today_is_missing() {
    let pts = vec![fresh(2, 1.2), fresh(1, 1.1), stale_today(1.0)];
    assert_eq!(
        find_missing_price_days(NOW, 3, Some(&pts), STALE_TOKEN_PRICE_TIME),
        vec![0]
    );
}

#[test]
fn old_points_within_a_past_day_are_never_stale() {
    // 23 hours into day 1 is far older than the staleness window but still counts.
    let pts = vec![PricePoint::new(NOW - ONE_DAY_MS - 23 * 3_600_000, 1.0)];
    assert_eq!(
        find_missing_price_days(NOW, 2, Some(&pts), STALE_TOKEN_PRICE_TIME),
        vec![0]
    );
}

#[test]
fn future_and_out_of_window_points_are_ignored() {
    let pts = vec![
        PricePoint::new(NOW + 5_000, 1.0),
        fresh(10, 1.0),
        fresh(1, 1.0),
    ];
    assert_eq!(
        find_missing_price_days(NOW, 3, Some(&pts), STALE_TOKEN_PRICE_TIME),
        vec![0, 2]
    );
}

#[test]
fn staleness_threshold_is_inclusive() {
    let pts = vec![PricePoint::new(NOW - 1_000, 1.0)];
    assert!(find_missing_price_days(NOW, 1, Some(&pts), 1_000).is_empty());
    assert_eq!(find_missing_price_days(NOW, 1, Some(&pts), 999), vec![0]);
}

#[test]
fn reference_policies_pick_different_histories() {
    let h = history(&[
        ("CELO", vec![fresh(0, 1.0), fresh(1, 1.0), fresh(2, 1.0)]),
        ("cEUR", vec![fresh(0, 1.0), fresh(2, 1.0)]),
        ("cREAL", vec![fresh(1, 1.0)]),
    ]);
    let s = STALE_TOKEN_PRICE_TIME;

    // Key order: "CELO" < "cEUR" < "cREAL".
    assert!(find_missing_price_days_in(NOW, 3, Some(&h), &ReferencePolicy::FirstToken, s).is_empty());
    assert_eq!(
        find_missing_price_days_in(NOW, 3, Some(&h), &ReferencePolicy::Token(TokenId::new("cEUR")), s),
        vec![1]
    );
    assert_eq!(
        find_missing_price_days_in(NOW, 3, Some(&h), &ReferencePolicy::Token(TokenId::new("cKES")), s),
        vec![0, 1, 2]
    );
    assert_eq!(
        find_missing_price_days_in(NOW, 3, Some(&h), &ReferencePolicy::AllTokens, s),
        vec![0, 1, 2]
    );
}

fn arb_points() -> impl Strategy<Value = Vec<PricePoint>> {
    proptest::collection::vec(
        (-ONE_DAY_MS..40 * ONE_DAY_MS, 0.0f64..100.0)
            .prop_map(|(age, price)| PricePoint::new(NOW - age, price)),
        0..60,
    )
}

proptest! {
    #[test]
    fn missing_days_are_sorted_unique_and_in_range(
        pts in arb_points(),
        n in 0u32..45,
        stale in 0i64..ONE_DAY_MS,
    ) {
        let out = find_missing_price_days(NOW, n, Some(&pts), stale);
        prop_assert!(out.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(out.iter().all(|&d| d < n));
    }

    #[test]
    fn covered_days_match_fresh_points(
        pts in arb_points(),
        n in 0u32..45,
        stale in 0i64..ONE_DAY_MS,
    ) {
        let out = find_missing_price_days(NOW, n, Some(&pts), stale);
        for d in 0..n {
            let has_point = pts.iter().any(|p| {
                day_offset(NOW, p.timestamp) == i64::from(d)
                    && (d != 0 || NOW - p.timestamp <= stale)
            });
            prop_assert_eq!(out.contains(&d), !has_point, "day {}", d);
        }
    }

    #[test]
    fn input_order_does_not_matter(pts in arb_points(), n in 0u32..45) {
        let mut rev = pts.clone();
        rev.reverse();
        prop_assert_eq!(
            find_missing_price_days(NOW, n, Some(&pts), STALE_TOKEN_PRICE_TIME),
            find_missing_price_days(NOW, n, Some(&rev), STALE_TOKEN_PRICE_TIME)
        );
    }

    #[test]
    fn all_tokens_is_union_of_per_token_gaps(a in arb_points(), b in arb_points(), n in 1u32..20) {
        let h = history(&[("A", a.clone()), ("B", b.clone())]);
        let s = STALE_TOKEN_PRICE_TIME;
        let union = find_missing_price_days_in(NOW, n, Some(&h), &ReferencePolicy::AllTokens, s);
        let ma = find_missing_price_days(NOW, n, Some(&a), s);
        let mb = find_missing_price_days(NOW, n, Some(&b), s);
        for d in 0..n {
            prop_assert_eq!(union.contains(&d), ma.contains(&d) || mb.contains(&d));
        }
    }
}
