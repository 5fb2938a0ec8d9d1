//! mento-prices-core
//!
//! Core types, traits, and utilities shared across the mento-prices crates.
//!
//! - `timeseries`: day bucketing, gap detection, merging and pruning of
//!   per-token price histories. Every function here is pure and takes the
//!   current time as an argument.
//! - `clock`: the injected time source used by callers of `timeseries`.
//! - `source`: the `PriceSource` trait implemented by price APIs.
//! - `store`: the `PriceHistoryStore` trait implemented by state layers.
//! - `poll`: the handle returned for a running background poller.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `poll::PollHandle` wraps `tokio::task::JoinHandle<()>` and uses
//! `tokio::sync::oneshot::Sender<()>` for cooperative shutdown, so code that
//! spawns pollers must run under a Tokio 1.x runtime. The `timeseries`
//! functions have no runtime requirements.
#![warn(missing_docs)]

/// Injectable time sources.
pub mod clock;
/// Handle and shutdown helpers for background pollers.
pub mod poll;
/// Price source trait and request type.
pub mod source;
/// History store trait.
pub mod store;
/// Day bucketing, gap detection and merge utilities.
pub mod timeseries;

pub use clock::{Clock, FixedClock, SystemClock};
pub use mento_prices_types::*;
pub use poll::PollHandle;
pub use source::{PriceRequest, PriceSource};
pub use store::PriceHistoryStore;
pub use timeseries::day::{day_offset, timestamp_for_day};
pub use timeseries::gaps::{find_missing_price_days, find_missing_price_days_in};
pub use timeseries::merge::{merge_price_histories, merge_token_history};
pub use timeseries::retain::prune_price_history;
pub use timeseries::util::{is_strictly_day_bucketed, validate_history, validate_price_points};
