use crate::ONE_DAY_MS;

/// Whole days between `now_ms` and `timestamp_ms`, floored.
///
/// `0` is the 24 hours ending at `now_ms`, `1` the 24 hours before that, and
/// so on. Timestamps after `now_ms` yield negative offsets.
///
/// ```
/// use mento_prices_core::{ONE_DAY_MS, day_offset};
///
/// let now = 10 * ONE_DAY_MS;
/// assert_eq!(day_offset(now, now), 0);
/// assert_eq!(day_offset(now, now - 1), 0);
/// assert_eq!(day_offset(now, now - ONE_DAY_MS), 1);
/// assert_eq!(day_offset(now, now + 1), -1);
/// ```
#[must_use]
pub const fn day_offset(now_ms: i64, timestamp_ms: i64) -> i64 {
    now_ms.saturating_sub(timestamp_ms).div_euclid(ONE_DAY_MS)
}

/// Timestamp lying `day` whole days before `now_ms`.
///
/// This is the inverse of [`day_offset`] for the start of the bucket:
/// `day_offset(now, timestamp_for_day(now, d)) == d`.
#[must_use]
pub const fn timestamp_for_day(now_ms: i64, day: u32) -> i64 {
    now_ms.saturating_sub((day as i64).saturating_mul(ONE_DAY_MS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_edges() {
        let now = 100 * ONE_DAY_MS + 12_345;
        assert_eq!(day_offset(now, now - ONE_DAY_MS + 1), 0);
        assert_eq!(day_offset(now, now - ONE_DAY_MS), 1);
        assert_eq!(day_offset(now, now - 2 * ONE_DAY_MS - 1), 2);
        assert_eq!(day_offset(now, now + ONE_DAY_MS), -1);
        assert_eq!(day_offset(now, now + ONE_DAY_MS + 1), -2);
    }

    #[test]
    fn timestamp_for_day_inverts_offset() {
        let now = 1_700_000_000_000;
        for d in 0..40u32 {
            assert_eq!(day_offset(now, timestamp_for_day(now, d)), i64::from(d));
        }
    }
}
