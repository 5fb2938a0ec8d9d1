use std::sync::Arc;
use std::time::Duration;

use mento_prices::{PollConfig, PriceHistory, TokenId};
use mento_prices_mock::MockPriceSource;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=debug cargo run --example refresh_mock --features tracing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    // 1. Build the orchestrator around the fixture-backed mock source.
    let prices = Arc::new(
        PriceHistory::builder()
            .with_source(Arc::new(MockPriceSource::new()))
            .lookback_days(7)
            .poll(PollConfig {
                interval: Duration::from_secs(2),
                jitter_percent: 10,
            })
            .build()?,
    );

    let quote = TokenId::new("cUSD");
    let tokens = vec![TokenId::new("CELO"), TokenId::new("cEUR"), TokenId::new("cKES")];

    // 2. The first refresh fetches the whole window.
    let report = prices.refresh(&quote, &tokens).await?;
    println!(
        "missing days {:?} served by {}",
        report.missing_days,
        report.source.map_or("<none>", |k| k.as_str())
    );
    for (token, series) in &report.history {
        let last = series.last().map_or(f64::NAN, |p| p.price);
        println!("  {token}/{quote}: {} points, latest {last:.6}", series.len());
    }

    // 3. A second refresh right away finds nothing to fetch.
    let report = prices.refresh(&quote, &tokens).await?;
    println!("second refresh fetched: {}", report.fetched());

    // 4. Keep polling in the background for a few seconds.
    let handle = Arc::clone(&prices).spawn_poller(quote.clone(), tokens);
    tokio::time::sleep(Duration::from_secs(5)).await;
    handle.stop().await;

    println!("stored tokens: {}", prices.history(&quote).await?.len());
    Ok(())
}
