//! The resampling pipeline: window → gap-fill → sample → anchor.

use super::anchor::{anchor, degenerate_series, AnchorAction};
use super::config::ResampleConfig;
use super::gap_fill::{fill_gaps, FillSummary};
use super::observe::{ResampleObserver, StageMetrics, TracingObserver};
use super::sampler::sample;
use super::timeframe::{select_window, ChartWindow, Timeframe};
use super::{PricePoint, SeriesContext, TimeBucketRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Resample `records` for `timeframe` with the default config, logging through `tracing`.
///
/// Always returns `timeframe.target_points()` points, or exactly two when the window
/// holds no usable record. Points are sorted by timestamp and the last one carries
/// the live prices from `ctx`.
pub fn resample(
    timeframe: Timeframe,
    records: &[TimeBucketRecord],
    ctx: &SeriesContext,
) -> Vec<PricePoint> {
    resample_with(timeframe, records, ctx, &ResampleConfig::default(), &TracingObserver)
}

/// [`resample`] with an explicit config and observer.
pub fn resample_with(
    timeframe: Timeframe,
    records: &[TimeBucketRecord],
    ctx: &SeriesContext,
    config: &ResampleConfig,
    observer: &dyn ResampleObserver,
) -> Vec<PricePoint> {
    let window = select_window(timeframe, ctx.created_at_seconds, ctx.now_seconds, config);
    observer.on_stage(&StageMetrics::Window {
        asset_id: ctx.asset_id.clone(),
        timeframe,
        granularity: window.granularity,
        start_index: window.start_index,
        end_index: window.end_index,
        target_points: window.target_points,
    });

    // Last record wins on duplicate indices.
    let mut by_index = BTreeMap::new();
    let mut ignored_records = 0;
    for record in records {
        if window.contains(record.bucket_index) {
            by_index.insert(record.bucket_index, record.clone());
        } else {
            ignored_records += 1;
        }
    }

    let slots = fill_gaps(&window, &by_index, ctx, config.baseline_price);
    observer.on_stage(&StageMetrics::GapFill {
        asset_id: ctx.asset_id.clone(),
        summary: FillSummary::of(&slots),
        ignored_records,
    });

    let grid_end_millis = ctx.now_millis().max(window.end_millis());
    let Some((regime, points)) = sample(
        &slots,
        window.target_points,
        config.baseline_price,
        grid_end_millis,
    ) else {
        return finish(degenerate_series(&window, ctx), AnchorAction::Degenerate, ctx, observer);
    };
    observer.on_stage(&StageMetrics::Sample {
        asset_id: ctx.asset_id.clone(),
        regime,
        input_len: slots.len(),
        output_len: points.len(),
    });

    let (points, action) = anchor(points, &window, ctx);
    finish(points, action, ctx, observer)
}

fn finish(
    points: Vec<PricePoint>,
    action: AnchorAction,
    ctx: &SeriesContext,
    observer: &dyn ResampleObserver,
) -> Vec<PricePoint> {
    observer.on_stage(&StageMetrics::Anchor {
        asset_id: ctx.asset_id.clone(),
        action,
        output_len: points.len(),
    });
    points
}

/// Reusable engine: a config plus an observer.
#[derive(Clone)]
pub struct Resampler {
    config: ResampleConfig,
    observer: Arc<dyn ResampleObserver>,
}

impl Default for Resampler {
    fn default() -> Self {
        Self::new(ResampleConfig::default())
    }
}

impl std::fmt::Debug for Resampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resampler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Resampler {
    pub fn new(config: ResampleConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_config(mut self, config: ResampleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl ResampleObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn config(&self) -> &ResampleConfig {
        &self.config
    }

    /// The bucket window `timeframe` covers for `ctx`.
    pub fn window(&self, timeframe: Timeframe, ctx: &SeriesContext) -> ChartWindow {
        select_window(timeframe, ctx.created_at_seconds, ctx.now_seconds, &self.config)
    }

    pub fn resample(
        &self,
        timeframe: Timeframe,
        records: &[TimeBucketRecord],
        ctx: &SeriesContext,
    ) -> Vec<PricePoint> {
        resample_with(timeframe, records, ctx, &self.config, self.observer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_history::bucket::to_bucket_index;
    use crate::domain::price_history::observe::NoopObserver;
    use crate::domain::price_history::sampler::Regime;
    use crate::shared::{AssetId, Granularity};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Mutex;

    const NOW: i64 = 1_740_076_800;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ctx(created_at_seconds: i64, price: &str) -> SeriesContext {
        SeriesContext {
            asset_id: AssetId::from("content_token"),
            created_at_seconds,
            current_market_price: dec(price),
            current_floor_price: dec(price) / Decimal::TWO,
            now_seconds: NOW,
        }
    }

    fn record(bucket_index: i64, price: &str, volume: &str) -> TimeBucketRecord {
        TimeBucketRecord {
            bucket_index,
            market_price: dec(price),
            floor_price: dec(price),
            volume: dec(volume),
        }
    }

    #[test]
    fn test_every_timeframe_hits_target_with_dense_history() {
        let context = ctx(NOW - 400 * 86_400, "2.5");
        for tf in Timeframe::ALL {
            let window = select_window(tf, context.created_at_seconds, NOW, &ResampleConfig::default());
            let records: Vec<_> = window
                .indices()
                .map(|i| record(i, &format!("{}.5", i % 7 + 1), "1"))
                .collect();
            let out = resample_with(tf, &records, &context, &ResampleConfig::default(), &NoopObserver);
            assert_eq!(out.len(), tf.target_points(), "{tf}");
            assert!(out.windows(2).all(|w| w[0].timestamp_millis <= w[1].timestamp_millis));
            assert_eq!(out.last().unwrap().market_price, dec("2.5"));
            assert_eq!(out.last().unwrap().floor_price, dec("1.25"));
        }
    }

    #[test]
    fn test_live_young_asset_without_records_is_two_points() {
        let context = ctx(NOW - 30 * 60, "0.00042");
        let out = resample(Timeframe::Live, &[], &context);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.market_price == dec("0.00042")));
        assert_eq!(out[1].timestamp_millis - out[0].timestamp_millis, 60 * 60_000);
        assert_eq!(out[1].timestamp_millis, NOW * 1_000);
    }

    #[test]
    fn test_week_with_recent_records_only() {
        let context = ctx(NOW - 10 * 86_400, "3");
        let end = to_bucket_index(NOW, Granularity::Hour);
        let records: Vec<_> = (0..6)
            .map(|k| record(end - 5 + k, &format!("{}", k + 1), "4"))
            .collect();
        let out = resample(Timeframe::Week, &records, &context);

        let baseline = ResampleConfig::default().baseline_price;
        assert_eq!(out.len(), 42);
        assert!(out[..36].iter().all(|p| p.market_price == baseline && p.volume.is_zero()));
        for (k, p) in out[36..41].iter().enumerate() {
            assert_eq!(p.market_price, Decimal::from(k as i64 + 1));
            assert_eq!(p.volume, Decimal::from(4));
        }
        assert_eq!(out[41].market_price, dec("3"));
    }

    #[test]
    fn test_month_with_three_records_interpolates() {
        let context = ctx(NOW - 90 * 86_400, "9");
        let end = to_bucket_index(NOW, Granularity::Day);
        let records = vec![
            record(end - 29, "10", "5"),
            record(end - 15, "38", "6"),
            record(end - 1, "24", "7"),
        ];
        let out = resample(Timeframe::Month, &records, &context);
        assert_eq!(out.len(), 30);
        assert_eq!(out[0].market_price, dec("10"));
        assert_eq!(out[7].market_price, dec("24"));
        assert_eq!(out[14].market_price, dec("38"));
        assert_eq!(out[21].market_price, dec("31"));
        assert_eq!(out[28].market_price, dec("24"));
        assert_eq!(out[29].market_price, dec("9"));

        let with_volume: Vec<usize> = (0..30).filter(|&i| !out[i].volume.is_zero()).collect();
        assert_eq!(with_volume, vec![0, 14, 28]);
    }

    #[test]
    fn test_month_interpolation_with_very_large_prices() {
        let context = ctx(NOW - 90 * 86_400, "250000000000000000000");
        let end = to_bucket_index(NOW, Granularity::Day);
        let records = vec![
            record(end - 29, "100000000000000000000", "1"),
            record(end - 1, "300000000000000000000", "1"),
        ];
        let out = resample(Timeframe::Month, &records, &context);
        assert_eq!(out.len(), 30);
        assert_eq!(out[0].market_price, dec("100000000000000000000"));
        assert_eq!(out[7].market_price, dec("150000000000000000000"));
        assert_eq!(out[14].market_price, dec("200000000000000000000"));
        assert_eq!(out[28].market_price, dec("300000000000000000000"));
        assert_eq!(out[29].market_price, dec("250000000000000000000"));
    }

    #[test]
    fn test_pre_creation_records_do_not_count() {
        let created = NOW - 10 * 60;
        let context = ctx(created, "1");
        let creation_index = to_bucket_index(created, Granularity::Minute);
        let records = vec![record(creation_index - 5, "7", "1")];
        let out = resample(Timeframe::Live, &records, &context);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let context = ctx(NOW - 86_400, "1");
        let end = to_bucket_index(NOW, Granularity::Minute);
        let records = vec![record(end - 3, "2", "1"), record(end + 10, "2", "1")];
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let resampler = Resampler::default()
            .with_observer(move |m: &StageMetrics| sink.lock().unwrap().push(m.clone()));

        let out = resampler.resample(Timeframe::Live, &records, &context);
        assert_eq!(out.len(), 60);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert!(matches!(seen[1], StageMetrics::GapFill { ignored_records: 1, .. }));
        assert!(matches!(
            seen[2],
            StageMetrics::Sample { regime: Regime::Interpolate, input_len: 60, output_len: 60, .. }
        ));
        assert!(matches!(seen[3], StageMetrics::Anchor { output_len: 60, .. }));
    }

    #[test]
    fn test_duplicate_indices_last_record_wins() {
        let context = ctx(NOW - 86_400, "1");
        let end = to_bucket_index(NOW, Granularity::Minute);
        let records = vec![record(end - 1, "2", "1"), record(end - 1, "5", "2")];
        let out = resample(Timeframe::Live, &records, &context);
        let real: Vec<_> = out.iter().filter(|p| !p.volume.is_zero()).collect();
        assert_eq!(real.len(), 1);
        assert_eq!(real[0].market_price, dec("5"));
    }
}
