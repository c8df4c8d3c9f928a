//! Price history domain — bucket records, chart windows, and the resampling engine.
//!
//! The engine turns sparse, bucket-indexed records into a fixed-length series for
//! one of the chart timeframe presets. Every stage is a pure function:
//!
//! 1. [`timeframe`] — preset catalog and window selection
//! 2. [`bucket`] — timestamp ↔ bucket index mapping
//! 3. [`gap_fill`] — dense, forward-filled slot sequence
//! 4. [`sampler`] — block sampling or interpolation down/up to the target count
//! 5. [`anchor`] — pin the last point to the live price
//!
//! [`resample`] wires the stages together.

pub mod anchor;
pub mod bucket;
pub mod client;
pub mod config;
pub(crate) mod convert;
pub mod gap_fill;
pub mod observe;
pub mod resample;
pub mod sampler;
pub mod timeframe;
pub mod wire;

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use config::ResampleConfig;
pub use convert::records_from_wire;
pub use observe::{NoopObserver, ResampleObserver, StageMetrics, TracingObserver};
pub use resample::{resample, resample_with, Resampler};
pub use timeframe::{select_window, ChartWindow, Timeframe, TimeframeSpec};

/// One historical bucket as reported by the indexer, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucketRecord {
    pub bucket_index: i64,
    pub market_price: Decimal,
    pub floor_price: Decimal,
    pub volume: Decimal,
}

/// Per-call inputs that do not come from the bucket store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesContext {
    pub asset_id: AssetId,
    /// Slots before this instant are treated as pre-existence.
    pub created_at_seconds: i64,
    pub current_market_price: Decimal,
    pub current_floor_price: Decimal,
    pub now_seconds: i64,
}

impl SeriesContext {
    pub fn now_millis(&self) -> i64 {
        self.now_seconds.saturating_mul(1_000)
    }

    /// Asset age at `now`, never negative.
    pub fn age_seconds(&self) -> i64 {
        self.now_seconds.saturating_sub(self.created_at_seconds).max(0)
    }
}

/// A single data point on a price chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp_millis: i64,
    pub market_price: Decimal,
    pub floor_price: Decimal,
    /// Zero unless the point is backed by a real record.
    pub volume: Decimal,
}

impl PricePoint {
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_millis)
    }
}
