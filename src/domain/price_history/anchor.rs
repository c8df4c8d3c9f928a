//! Pin the end of a sampled series to the live price.

use super::timeframe::ChartWindow;
use super::{PricePoint, SeriesContext};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the finalizer did to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorAction {
    /// Last point's prices replaced by the live prices.
    Overwrite,
    /// A live point was appended at `now` and the oldest point dropped.
    Append,
    /// No history: a two-point series at the live price.
    Degenerate,
}

/// Force the series to end at the live price.
///
/// When the last point is more than one bucket older than `now`, a point at `now`
/// is appended and the oldest point dropped so the length is unchanged. Otherwise
/// the last point keeps its timestamp and takes the live prices. An empty input
/// yields the [`degenerate_series`].
pub fn anchor(
    mut points: Vec<PricePoint>,
    window: &ChartWindow,
    ctx: &SeriesContext,
) -> (Vec<PricePoint>, AnchorAction) {
    let now_millis = ctx.now_millis();

    let Some(last) = points.last_mut() else {
        return (degenerate_series(window, ctx), AnchorAction::Degenerate);
    };

    if now_millis.saturating_sub(last.timestamp_millis) > window.granularity.millis() {
        points.push(live_point(now_millis, ctx));
        points.remove(0);
        (points, AnchorAction::Append)
    } else {
        last.market_price = ctx.current_market_price;
        last.floor_price = ctx.current_floor_price;
        (points, AnchorAction::Overwrite)
    }
}

/// Two points at the live price spanning the window's nominal duration.
pub fn degenerate_series(window: &ChartWindow, ctx: &SeriesContext) -> Vec<PricePoint> {
    let now_millis = ctx.now_millis();
    let start_millis = now_millis
        .saturating_sub(window.nominal_duration_secs().saturating_mul(1_000))
        .max(0)
        .min(now_millis);

    vec![live_point(start_millis, ctx), live_point(now_millis, ctx)]
}

fn live_point(timestamp_millis: i64, ctx: &SeriesContext) -> PricePoint {
    PricePoint {
        timestamp_millis,
        market_price: ctx.current_market_price,
        floor_price: ctx.current_floor_price,
        volume: Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price_history::config::ResampleConfig;
    use crate::domain::price_history::timeframe::{select_window, Timeframe};
    use crate::shared::AssetId;

    const NOW: i64 = 1_740_076_800;

    fn ctx() -> SeriesContext {
        SeriesContext {
            asset_id: AssetId::from("asset"),
            created_at_seconds: NOW - 30 * 86_400,
            current_market_price: Decimal::new(42, 5),
            current_floor_price: Decimal::new(30, 5),
            now_seconds: NOW,
        }
    }

    fn point(timestamp_millis: i64, price: i64) -> PricePoint {
        PricePoint {
            timestamp_millis,
            market_price: Decimal::from(price),
            floor_price: Decimal::from(price),
            volume: Decimal::from(3),
        }
    }

    #[test]
    fn test_recent_last_point_is_overwritten() {
        let window = select_window(Timeframe::Live, NOW - 86_400, NOW, &ResampleConfig::default());
        let points = vec![point((NOW - 120) * 1_000, 1), point((NOW - 30) * 1_000, 2)];
        let (out, action) = anchor(points, &window, &ctx());
        assert_eq!(action, AnchorAction::Overwrite);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].timestamp_millis, (NOW - 30) * 1_000);
        assert_eq!(out[1].market_price, Decimal::new(42, 5));
        assert_eq!(out[1].floor_price, Decimal::new(30, 5));
        assert_eq!(out[1].volume, Decimal::from(3));
    }

    #[test]
    fn test_stale_last_point_appends_and_keeps_length() {
        let window = select_window(Timeframe::Live, NOW - 86_400, NOW, &ResampleConfig::default());
        let points = vec![
            point((NOW - 600) * 1_000, 1),
            point((NOW - 300) * 1_000, 2),
            point((NOW - 180) * 1_000, 3),
        ];
        let (out, action) = anchor(points, &window, &ctx());
        assert_eq!(action, AnchorAction::Append);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].market_price, Decimal::from(2));
        assert_eq!(out[1].market_price, Decimal::from(3));
        assert_eq!(out[2].timestamp_millis, NOW * 1_000);
        assert_eq!(out[2].market_price, Decimal::new(42, 5));
        assert_eq!(out[2].volume, Decimal::ZERO);
    }

    #[test]
    fn test_empty_series_is_degenerate() {
        let window = select_window(Timeframe::Week, NOW - 30 * 86_400, NOW, &ResampleConfig::default());
        let (out, action) = anchor(Vec::new(), &window, &ctx());
        assert_eq!(action, AnchorAction::Degenerate);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].timestamp_millis, (NOW - 168 * 3_600) * 1_000);
        assert_eq!(out[1].timestamp_millis, NOW * 1_000);
        assert!(out.iter().all(|p| p.market_price == Decimal::new(42, 5)));
    }

    #[test]
    fn test_degenerate_start_never_negative() {
        let mut context = ctx();
        context.now_seconds = 100;
        context.created_at_seconds = 0;
        let window = select_window(Timeframe::Month, 0, 100, &ResampleConfig::default());
        let out = degenerate_series(&window, &context);
        assert_eq!(out[0].timestamp_millis, 0);
        assert_eq!(out[1].timestamp_millis, 100_000);
    }
}
