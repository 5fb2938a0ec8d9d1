use std::time::Duration;

use mento_prices_types::{
    FetchStrategy, PollConfig, PriceHistoryConfig, PriceHistoryError, PricePoint,
    QuoteCurrencyPriceHistory, ReferencePolicy, RefreshReport, SourceKey, TokenId,
};

#[test]
fn config_roundtrip() {
    let cfg = PriceHistoryConfig {
        lookback_days: 30,
        stale_after: Duration::from_secs(600),
        retain_days: Some(90),
        reference: ReferencePolicy::Token(TokenId::new("CELO")),
        fetch_strategy: FetchStrategy::Latency,
        source_timeout: Duration::from_millis(2500),
        poll: PollConfig {
            interval: Duration::from_secs(15),
            jitter_percent: 0,
        },
    };

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: PriceHistoryConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de, cfg);
    assert_eq!(de.stale_after_ms(), 600_000);
    assert_eq!(de.effective_retain_days(), 90);
}

#[test]
fn defaults_are_valid() {
    let cfg = PriceHistoryConfig::default();
    cfg.validate().expect("default config validates");
    assert_eq!(cfg.lookback_days, 7);
    assert_eq!(cfg.effective_retain_days(), 7);
    assert_eq!(cfg.stale_after_ms(), 2_000_000);
    assert_eq!(cfg.reference, ReferencePolicy::FirstToken);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let zero = PriceHistoryConfig {
        lookback_days: 0,
        ..Default::default()
    };
    assert!(matches!(zero.validate(), Err(PriceHistoryError::InvalidArg(_))));

    let too_long = PriceHistoryConfig {
        lookback_days: 366,
        ..Default::default()
    };
    assert!(matches!(too_long.validate(), Err(PriceHistoryError::InvalidArg(_))));

    let short_retention = PriceHistoryConfig {
        lookback_days: 10,
        retain_days: Some(5),
        ..Default::default()
    };
    assert!(matches!(
        short_retention.validate(),
        Err(PriceHistoryError::InvalidArg(_))
    ));

    let jitter = PriceHistoryConfig {
        poll: PollConfig {
            interval: Duration::from_secs(1),
            jitter_percent: 101,
        },
        ..Default::default()
    };
    assert!(matches!(jitter.validate(), Err(PriceHistoryError::InvalidArg(_))));

    let no_timeout = PriceHistoryConfig {
        source_timeout: Duration::ZERO,
        ..Default::default()
    };
    assert!(matches!(no_timeout.validate(), Err(PriceHistoryError::InvalidArg(_))));
}

#[test]
fn history_serializes_as_plain_map() {
    let mut h = QuoteCurrencyPriceHistory::new();
    h.insert(
        TokenId::new("CELO"),
        vec![PricePoint::new(1_000, 0.5), PricePoint::new(2_000, 0.55)],
    );
    let json = serde_json::to_string(&h).expect("serialize history");
    assert_eq!(
        json,
        r#"{"CELO":[{"timestamp":1000,"price":0.5},{"timestamp":2000,"price":0.55}]}"#
    );
    let de: QuoteCurrencyPriceHistory = serde_json::from_str(&json).expect("deserialize history");
    assert_eq!(de, h);
}

#[test]
fn flatten_unwraps_nested_aggregates() {
    let e = PriceHistoryError::AllSourcesFailed(vec![
        PriceHistoryError::source_failed("a", "boom"),
        PriceHistoryError::AllSourcesFailed(vec![PriceHistoryError::source_timeout("b")]),
    ]);
    let flat = e.flatten();
    assert_eq!(flat.len(), 2);
    assert!(flat[1].is_timeout());
    assert_eq!(flat[0].to_string(), "a failed: boom");
}

#[test]
fn refresh_report_serializes_source_by_name() {
    let mut history = QuoteCurrencyPriceHistory::new();
    history.insert(TokenId::new("CELO"), vec![PricePoint::new(1_000, 0.5)]);
    let report = RefreshReport {
        quote: TokenId::new("cUSD"),
        missing_days: vec![0, 2],
        source: Some(SourceKey::new("coingecko")),
        points_fetched: 1,
        history,
    };

    let v = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(
        v,
        serde_json::json!({
            "quote": "cUSD",
            "missing_days": [0, 2],
            "source": "coingecko",
            "points_fetched": 1,
            "history": {"CELO": [{"timestamp": 1000, "price": 0.5}]},
        })
    );

    let skipped = RefreshReport {
        source: None,
        points_fetched: 0,
        missing_days: vec![],
        ..report
    };
    let v = serde_json::to_value(&skipped).expect("serialize report");
    assert_eq!(v["source"], serde_json::Value::Null);
}
