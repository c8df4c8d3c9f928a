//! Dense slot sequence with forward-fill.
//!
//! Walks every bucket of a [`ChartWindow`] oldest → newest and emits exactly one
//! slot per index. Prices carry forward from the last real record; volume never
//! does.

use super::bucket::{from_bucket_index, to_bucket_index};
use super::timeframe::ChartWindow;
use super::{PricePoint, SeriesContext, TimeBucketRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Where a slot's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotOrigin {
    /// The asset did not exist yet.
    PreCreation,
    /// The asset existed but no record has been seen in this window.
    NoData,
    /// Carried from the last real record.
    ForwardFill,
    /// Backed by a fetched record.
    Record,
}

/// One bucket of the dense sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseSlot {
    pub bucket_index: i64,
    pub timestamp_seconds: i64,
    pub market_price: Decimal,
    pub floor_price: Decimal,
    pub volume: Decimal,
    pub origin: SlotOrigin,
}

impl DenseSlot {
    pub fn is_real(&self) -> bool {
        self.origin == SlotOrigin::Record
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_seconds.saturating_mul(1_000)
    }

    pub fn to_point(&self) -> PricePoint {
        PricePoint {
            timestamp_millis: self.timestamp_millis(),
            market_price: self.market_price,
            floor_price: self.floor_price,
            volume: self.volume,
        }
    }
}

/// Slot counts per origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    pub pre_creation: usize,
    pub no_data: usize,
    pub forward_filled: usize,
    pub records: usize,
}

impl FillSummary {
    pub fn of(slots: &[DenseSlot]) -> Self {
        slots.iter().fold(Self::default(), |mut acc, slot| {
            match slot.origin {
                SlotOrigin::PreCreation => acc.pre_creation += 1,
                SlotOrigin::NoData => acc.no_data += 1,
                SlotOrigin::ForwardFill => acc.forward_filled += 1,
                SlotOrigin::Record => acc.records += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.pre_creation + self.no_data + self.forward_filled + self.records
    }
}

/// Build the dense sequence for `window`.
///
/// `records` is keyed by bucket index; entries outside the window are never read.
/// Slots whose bucket precedes the bucket containing `created_at_seconds` are
/// pre-creation and take `baseline` even if a record exists for them.
pub fn fill_gaps(
    window: &ChartWindow,
    records: &BTreeMap<i64, TimeBucketRecord>,
    ctx: &SeriesContext,
    baseline: Decimal,
) -> Vec<DenseSlot> {
    let granularity = window.granularity;
    let creation_index = to_bucket_index(ctx.created_at_seconds, granularity);

    let mut last_market = baseline;
    let mut last_floor = baseline;
    let mut seen_real = false;

    let mut slots = Vec::with_capacity(window.len());
    for index in window.indices() {
        let timestamp_seconds = from_bucket_index(index, granularity);

        let slot = if index < creation_index {
            DenseSlot {
                bucket_index: index,
                timestamp_seconds,
                market_price: baseline,
                floor_price: baseline,
                volume: Decimal::ZERO,
                origin: SlotOrigin::PreCreation,
            }
        } else if let Some(record) = records.get(&index) {
            last_market = record.market_price;
            last_floor = record.floor_price;
            seen_real = true;
            DenseSlot {
                bucket_index: index,
                timestamp_seconds,
                market_price: record.market_price,
                floor_price: record.floor_price,
                volume: record.volume,
                origin: SlotOrigin::Record,
            }
        } else {
            DenseSlot {
                bucket_index: index,
                timestamp_seconds,
                market_price: last_market,
                floor_price: last_floor,
                volume: Decimal::ZERO,
                origin: if seen_real {
                    SlotOrigin::ForwardFill
                } else {
                    SlotOrigin::NoData
                },
            }
        };
        slots.push(slot);
    }
    slots
}
