//! Point-count normalization.
//!
//! Two regimes bring a dense sequence to exactly the preset's target count:
//!
//! - **Block sampling** when the window holds at least as many real records as
//!   target points. The sequence is cut into `target` contiguous blocks and each
//!   block contributes its first real slot, or its first slot when it has none.
//! - **Interpolation** when real records are scarcer than target points. Real
//!   records become anchors and the remaining points are linearly interpolated
//!   between them.

use super::gap_fill::DenseSlot;
use super::PricePoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sampling regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Block,
    Interpolate,
}

impl Regime {
    /// `None` when there is nothing real to sample from.
    pub fn choose(real_count: usize, target: usize) -> Option<Regime> {
        if real_count == 0 {
            None
        } else if real_count < target {
            Some(Regime::Interpolate)
        } else {
            Some(Regime::Block)
        }
    }
}

/// Sample `slots` down or up to `target` points.
///
/// `grid_end_millis` bounds the evenly spaced grid used when the window has fewer
/// slots than `target`; the pipeline passes `now`. Returns `None` when the
/// sequence has no real slot.
pub fn sample(
    slots: &[DenseSlot],
    target: usize,
    baseline: Decimal,
    grid_end_millis: i64,
) -> Option<(Regime, Vec<PricePoint>)> {
    let real_count = slots.iter().filter(|s| s.is_real()).count();
    let regime = Regime::choose(real_count, target)?;
    let points = match regime {
        Regime::Block => block_sample(slots, target),
        Regime::Interpolate => interpolate(slots, target, baseline, grid_end_millis),
    };
    Some((regime, points))
}

/// Block `b` of `len` items split into `target` blocks: `[b·len/target, (b+1)·len/target)`.
fn block_bounds(block: usize, len: usize, target: usize) -> (usize, usize) {
    (block * len / target, (block + 1) * len / target)
}

/// One representative slot per block, preferring real records.
///
/// Sequences no longer than `target` are returned slot for slot.
pub fn block_sample(slots: &[DenseSlot], target: usize) -> Vec<PricePoint> {
    if slots.len() <= target {
        return slots.iter().map(DenseSlot::to_point).collect();
    }

    (0..target)
        .map(|block| {
            let (start, end) = block_bounds(block, slots.len(), target);
            let block = &slots[start..end];
            block
                .iter()
                .find(|slot| slot.is_real())
                .unwrap_or(&block[0])
                .to_point()
        })
        .collect()
}

/// Expand sparse real records to `target` points by linear interpolation.
///
/// When the window has at least `target` slots the grid stays bucket-aligned: every
/// real slot is kept and the remaining points are spread evenly over record-free
/// slots. Otherwise the grid is `target` evenly spaced timestamps from the first slot
/// to `grid_end_millis`.
///
/// Grid points before the first real record take `baseline`, points after the last
/// one carry it forward, and points in between are interpolated by time. Only points
/// that coincide with a real record carry volume.
pub fn interpolate(
    slots: &[DenseSlot],
    target: usize,
    baseline: Decimal,
    grid_end_millis: i64,
) -> Vec<PricePoint> {
    if slots.is_empty() || target == 0 {
        return Vec::new();
    }

    let anchors: Vec<&DenseSlot> = slots.iter().filter(|s| s.is_real()).collect();
    let grid = if slots.len() >= target && anchors.len() <= target {
        aligned_grid(slots, target)
    } else {
        let first = slots[0].timestamp_millis();
        let last = slots[slots.len() - 1].timestamp_millis();
        even_grid(first, grid_end_millis.max(last), target)
    };

    grid.into_iter()
        .map(|t| value_at(&anchors, t, baseline))
        .collect()
}

/// All real slots plus `target - real` record-free slots picked at even strides,
/// first and last free slot included.
fn aligned_grid(slots: &[DenseSlot], target: usize) -> Vec<i64> {
    let free: Vec<usize> = (0..slots.len()).filter(|&i| !slots[i].is_real()).collect();
    let real = slots.len() - free.len();
    let need = target - real;

    let mut picked: Vec<usize> = (0..slots.len()).filter(|&i| slots[i].is_real()).collect();
    match need {
        0 => {}
        1 => picked.push(free[0]),
        _ => picked.extend((0..need).map(|k| free[k * (free.len() - 1) / (need - 1)])),
    }
    picked.sort_unstable();

    picked.into_iter().map(|i| slots[i].timestamp_millis()).collect()
}

fn even_grid(first: i64, last: i64, target: usize) -> Vec<i64> {
    if target == 1 {
        return vec![last];
    }
    let span = (last - first) as i128;
    let steps = (target - 1) as i128;
    (0..target)
        .map(|i| first + (span * i as i128 / steps) as i64)
        .collect()
}

fn value_at(anchors: &[&DenseSlot], t: i64, baseline: Decimal) -> PricePoint {
    let idx = anchors.partition_point(|a| a.timestamp_millis() < t);

    if let Some(anchor) = anchors.get(idx).filter(|a| a.timestamp_millis() == t) {
        return anchor.to_point();
    }

    let (market_price, floor_price) = match (idx.checked_sub(1).map(|i| anchors[i]), anchors.get(idx)) {
        (None, _) => (baseline, baseline),
        (Some(prev), None) => (prev.market_price, prev.floor_price),
        (Some(prev), Some(next)) => {
            let elapsed = Decimal::from(t - prev.timestamp_millis());
            let span = Decimal::from(next.timestamp_millis() - prev.timestamp_millis());
            (
                lerp(prev.market_price, next.market_price, elapsed, span),
                lerp(prev.floor_price, next.floor_price, elapsed, span),
            )
        }
    };

    PricePoint {
        timestamp_millis: t,
        market_price,
        floor_price,
        volume: Decimal::ZERO,
    }
}

/// Multiply first so only the final division rounds. Prices too large for that
/// product fall back to scaling by the fraction `elapsed / span`, which is in `[0, 1]`.
fn lerp(from: Decimal, to: Decimal, elapsed: Decimal, span: Decimal) -> Decimal {
    let delta = to - from;
    match delta.checked_mul(elapsed) {
        Some(scaled) => from + scaled / span,
        None => from + delta * (elapsed / span),
    }
}
