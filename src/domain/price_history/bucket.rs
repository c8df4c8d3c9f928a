//! Timestamp ↔ bucket index mapping.
//!
//! A bucket index is `floor(timestamp / granularity_seconds)`; adjacent indices
//! are adjacent, non-overlapping slots and `index * granularity_seconds` is the
//! slot start.

use crate::shared::Granularity;

/// Bucket containing `timestamp_seconds`.
pub fn to_bucket_index(timestamp_seconds: i64, granularity: Granularity) -> i64 {
    timestamp_seconds.div_euclid(granularity.seconds())
}

/// Start of the slot at `bucket_index`, in seconds.
pub fn from_bucket_index(bucket_index: i64, granularity: Granularity) -> i64 {
    bucket_index.saturating_mul(granularity.seconds())
}

/// Start of the slot at `bucket_index`, in milliseconds.
pub fn bucket_start_millis(bucket_index: i64, granularity: Granularity) -> i64 {
    from_bucket_index(bucket_index, granularity).saturating_mul(1_000)
}
