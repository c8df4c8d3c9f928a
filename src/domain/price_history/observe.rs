//! Observability hook for the resampling pipeline.
//!
//! The engine reports one [`StageMetrics`] per stage to an injected observer.
//! [`TracingObserver`] is the default and logs through `tracing`.

use super::anchor::AnchorAction;
use super::gap_fill::FillSummary;
use super::sampler::Regime;
use super::timeframe::Timeframe;
use crate::shared::{AssetId, Granularity};

/// Structured metrics for one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageMetrics {
    Window {
        asset_id: AssetId,
        timeframe: Timeframe,
        granularity: Granularity,
        start_index: i64,
        end_index: i64,
        target_points: usize,
    },
    GapFill {
        asset_id: AssetId,
        summary: FillSummary,
        /// Records that fell outside the window.
        ignored_records: usize,
    },
    Sample {
        asset_id: AssetId,
        regime: Regime,
        input_len: usize,
        output_len: usize,
    },
    Anchor {
        asset_id: AssetId,
        action: AnchorAction,
        output_len: usize,
    },
}

/// Receives stage metrics from the engine.
pub trait ResampleObserver: Send + Sync {
    fn on_stage(&self, metrics: &StageMetrics);
}

impl<F> ResampleObserver for F
where
    F: Fn(&StageMetrics) + Send + Sync,
{
    fn on_stage(&self, metrics: &StageMetrics) {
        self(metrics)
    }
}

/// Discards all metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ResampleObserver for NoopObserver {
    fn on_stage(&self, _metrics: &StageMetrics) {}
}

/// Logs every stage at `debug` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ResampleObserver for TracingObserver {
    fn on_stage(&self, metrics: &StageMetrics) {
        match metrics {
            StageMetrics::Window {
                asset_id,
                timeframe,
                granularity,
                start_index,
                end_index,
                target_points,
            } => tracing::debug!(
                asset = %asset_id,
                timeframe = %timeframe,
                granularity = %granularity,
                start_index,
                end_index,
                target_points,
                "chart window selected"
            ),
            StageMetrics::GapFill {
                asset_id,
                summary,
                ignored_records,
            } => tracing::debug!(
                asset = %asset_id,
                records = summary.records,
                forward_filled = summary.forward_filled,
                no_data = summary.no_data,
                pre_creation = summary.pre_creation,
                ignored_records,
                "gaps filled"
            ),
            StageMetrics::Sample {
                asset_id,
                regime,
                input_len,
                output_len,
            } => tracing::debug!(
                asset = %asset_id,
                regime = ?regime,
                input_len,
                output_len,
                "series sampled"
            ),
            StageMetrics::Anchor {
                asset_id,
                action,
                output_len,
            } => tracing::debug!(
                asset = %asset_id,
                action = ?action,
                output_len,
                "series anchored to live price"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_closure_observer_receives_metrics() {
        let seen = Mutex::new(Vec::new());
        let observer = |m: &StageMetrics| seen.lock().unwrap().push(m.clone());
        let metrics = StageMetrics::Sample {
            asset_id: AssetId::from("a"),
            regime: Regime::Block,
            input_len: 168,
            output_len: 42,
        };
        observer.on_stage(&metrics);
        NoopObserver.on_stage(&metrics);
        TracingObserver.on_stage(&metrics);
        assert_eq!(seen.lock().unwrap().as_slice(), &[metrics]);
    }
}
