//! Chart timeframe presets and window selection.

use super::bucket::{bucket_start_millis, from_bucket_index, to_bucket_index};
use super::config::ResampleConfig;
use crate::shared::Granularity;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;

const HOUR: i64 = 3_600;
const WEEK: i64 = 7 * 86_400;

// ─── Timeframe ───────────────────────────────────────────────────────────────

/// Chart timeframe preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "live")]
    Live,
    #[serde(rename = "4h")]
    Intraday,
    #[default]
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl Timeframe {
    /// Presets in menu order.
    pub const ALL: [Timeframe; 6] = [
        Timeframe::Live,
        Timeframe::Intraday,
        Timeframe::Day,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Intraday => "4h",
            Self::Day => "1d",
            Self::Week => "1w",
            Self::Month => "1m",
            Self::All => "all",
        }
    }

    /// Catalog entry for this preset.
    pub fn spec(&self) -> TimeframeSpec {
        let (granularity, window_buckets, target_points) = match self {
            Self::Live => (Some(Granularity::Minute), Some(60), 60),
            Self::Intraday => (Some(Granularity::Minute), Some(240), 48),
            Self::Day => (Some(Granularity::Hour), Some(24), 24),
            Self::Week => (Some(Granularity::Hour), Some(168), 42),
            Self::Month => (Some(Granularity::Day), Some(30), 30),
            Self::All => (None, None, 60),
        };
        TimeframeSpec {
            timeframe: *self,
            granularity,
            window_buckets,
            target_points,
        }
    }

    pub fn target_points(&self) -> usize {
        self.spec().target_points
    }

    pub fn is_adaptive(&self) -> bool {
        self.spec().granularity.is_none()
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| format!("Unknown timeframe: {}", s))
    }
}

/// Static description of a preset.
///
/// `granularity` and `window_buckets` are `None` for the adaptive all-time preset;
/// they are derived from asset age by [`select_window`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeSpec {
    pub timeframe: Timeframe,
    pub granularity: Option<Granularity>,
    pub window_buckets: Option<u64>,
    pub target_points: usize,
}

// ─── ChartWindow ─────────────────────────────────────────────────────────────

/// The concrete bucket range a chart covers, ending at the bucket containing `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartWindow {
    pub timeframe: Timeframe,
    pub granularity: Granularity,
    /// Requested window length; the range may be shorter near the epoch.
    pub window_buckets: u64,
    pub start_index: i64,
    pub end_index: i64,
    pub target_points: usize,
}

impl ChartWindow {
    pub fn indices(&self) -> RangeInclusive<i64> {
        self.start_index..=self.end_index
    }

    pub fn len(&self) -> usize {
        (self.end_index - self.start_index + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, bucket_index: i64) -> bool {
        self.indices().contains(&bucket_index)
    }

    pub fn start_seconds(&self) -> i64 {
        from_bucket_index(self.start_index, self.granularity)
    }

    pub fn end_millis(&self) -> i64 {
        bucket_start_millis(self.end_index, self.granularity)
    }

    /// Span the preset nominally covers.
    pub fn nominal_duration_secs(&self) -> i64 {
        (self.window_buckets as i64).saturating_mul(self.granularity.seconds())
    }
}

/// Pick granularity and window length for `timeframe`, then place the window so it
/// ends at the bucket containing `now_seconds`.
///
/// Fixed presets use their catalog entry. The all-time preset picks minute buckets for
/// assets younger than an hour, hour buckets under a week, and day buckets beyond that,
/// with `ceil(age / width) + 1` buckets capped by the config.
pub fn select_window(
    timeframe: Timeframe,
    created_at_seconds: i64,
    now_seconds: i64,
    config: &ResampleConfig,
) -> ChartWindow {
    let spec = timeframe.spec();

    let (granularity, window_buckets) = match (spec.granularity, spec.window_buckets) {
        (Some(g), Some(w)) => (g, w),
        _ => {
            let age = now_seconds.saturating_sub(created_at_seconds).max(0);
            let g = if age < HOUR {
                Granularity::Minute
            } else if age < WEEK {
                Granularity::Hour
            } else {
                Granularity::Day
            };
            let buckets = (age as u64).div_ceil(g.seconds() as u64) + 1;
            (g, buckets.min(config.max_buckets_for(g)))
        }
    };

    let end_index = to_bucket_index(now_seconds, granularity);
    let start_index = end_index
        .saturating_sub(window_buckets.saturating_sub(1) as i64)
        .max(0)
        .min(end_index);

    ChartWindow {
        timeframe,
        granularity,
        window_buckets,
        start_index,
        end_index,
        target_points: spec.target_points,
    }
}
