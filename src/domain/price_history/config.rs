//! Resampling configuration.

use crate::shared::Granularity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunables for the resampling engine.
///
/// Defaults match the chart presets shipped with the app; override fields with the
/// builder-style setters or deserialize from app config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResampleConfig {
    /// Price emitted before creation and before the first real record.
    pub baseline_price: Decimal,
    /// Upper bound on the all-time window at minute granularity.
    pub max_minute_buckets: u64,
    /// Upper bound on the all-time window at hour granularity.
    pub max_hour_buckets: u64,
    /// Upper bound on the all-time window at day granularity.
    pub max_day_buckets: u64,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            baseline_price: Decimal::new(1, 8),
            max_minute_buckets: 61,
            max_hour_buckets: 169,
            max_day_buckets: 365,
        }
    }
}

impl ResampleConfig {
    pub fn baseline_price(mut self, price: Decimal) -> Self {
        self.baseline_price = price;
        self
    }

    pub fn max_buckets(mut self, granularity: Granularity, max: u64) -> Self {
        match granularity {
            Granularity::Minute => self.max_minute_buckets = max,
            Granularity::Hour => self.max_hour_buckets = max,
            Granularity::Day => self.max_day_buckets = max,
        }
        self
    }

    /// Cap on the adaptive window for `granularity` (at least one bucket).
    pub fn max_buckets_for(&self, granularity: Granularity) -> u64 {
        let max = match granularity {
            Granularity::Minute => self.max_minute_buckets,
            Granularity::Hour => self.max_hour_buckets,
            Granularity::Day => self.max_day_buckets,
        };
        max.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_baseline_is_non_zero() {
        let config = ResampleConfig::default();
        assert!(config.baseline_price > Decimal::ZERO);
        assert_eq!(config.max_buckets_for(Granularity::Day), 365);
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: ResampleConfig =
            serde_json::from_str(r#"{"baseline_price":"0.001","max_day_buckets":90}"#).unwrap();
        assert_eq!(config.baseline_price, Decimal::from_str("0.001").unwrap());
        assert_eq!(config.max_day_buckets, 90);
        assert_eq!(config.max_hour_buckets, 169);
    }

    #[test]
    fn test_zero_cap_is_raised_to_one() {
        let config = ResampleConfig::default().max_buckets(Granularity::Hour, 0);
        assert_eq!(config.max_buckets_for(Granularity::Hour), 1);
    }
}
