//! Time-series utilities shared by price sources and the orchestrator.
//!
//! Modules include:
//! - `day`: map timestamps to day offsets relative to "now"
//! - `gaps`: find the recent days a history does not cover yet
//! - `merge`: merge fetched points into stored histories, one point per day
//! - `retain`: drop points that fell out of the retention window
//! - `util`: validation and invariant checks
/// Day-offset bucketing.
pub mod day;
/// Missing-day detection.
pub mod gaps;
/// Merge utilities for joining fetched and stored histories.
pub mod merge;
/// Retention-window pruning.
pub mod retain;
/// Validation helpers.
pub mod util;
