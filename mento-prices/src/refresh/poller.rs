use std::sync::Arc;
use std::time::Duration;

use mento_prices_core::{PollHandle, TokenId};
use rand::Rng;
use tokio::sync::oneshot;

use crate::PriceHistory;

/// Base delay plus a uniform random jitter of up to `jitter_percent` of it.
pub fn jitter_wait(base_ms: u64, jitter_percent: u8) -> u64 {
    let jitter_range = if jitter_percent == 0 {
        1
    } else {
        std::cmp::max(1, (base_ms.saturating_mul(u64::from(jitter_percent))) / 100)
    };
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}

impl PriceHistory {
    /// Refresh `quote` for `tokens` now and then periodically in a background task.
    ///
    /// The delay between cycles is the configured poll interval plus jitter.
    /// Failed cycles are logged (with the `tracing` feature) and retried on the
    /// next tick. A pending cycle is abandoned as soon as a stop is requested.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn_poller(self: Arc<Self>, quote: TokenId, tokens: Vec<TokenId>) -> PollHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let poll = self.cfg.poll;
        let base_ms = u64::try_from(poll.interval.as_millis()).unwrap_or(u64::MAX);

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    res = self.refresh(&quote, &tokens) => {
                        #[cfg(feature = "tracing")]
                        match &res {
                            Ok(report) => tracing::debug!(
                                quote = %quote,
                                missing = report.missing_days.len(),
                                fetched = report.fetched(),
                                "poll cycle complete"
                            ),
                            Err(e) => tracing::warn!(quote = %quote, error = %e, "poll cycle failed"),
                        }
                        let _ = res;
                    }
                }

                let wait = Duration::from_millis(jitter_wait(base_ms, poll.jitter_percent));
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    () = tokio::time::sleep(wait) => {}
                }
            }
        });

        PollHandle::new(task, stop_tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_within_range() {
        for _ in 0..200 {
            let w = jitter_wait(1_000, 20);
            assert!((1_000..1_200).contains(&w), "{w}");
        }
        assert_eq!(jitter_wait(1_000, 0), 1_000);
        assert_eq!(jitter_wait(u64::MAX, 50), u64::MAX);
    }
}
