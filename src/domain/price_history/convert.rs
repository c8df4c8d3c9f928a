//! Conversion: BucketRecordResponse → TimeBucketRecord (TryFrom + validation).

use super::wire::BucketRecordResponse;
use super::TimeBucketRecord;
use crate::error::RecordError;
use rust_decimal::Decimal;
use std::str::FromStr;

impl TryFrom<BucketRecordResponse> for TimeBucketRecord {
    type Error = RecordError;

    fn try_from(source: BucketRecordResponse) -> Result<Self, Self::Error> {
        Ok(TimeBucketRecord {
            bucket_index: source.bucket_index,
            market_price: parse_non_negative("market_price", &source.market_price)?,
            floor_price: parse_non_negative("floor_price", &source.floor_price)?,
            volume: parse_non_negative("volume", &source.volume)?,
        })
    }
}

/// Parse a decimal string, accepting plain and scientific notation.
pub(crate) fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, RecordError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| RecordError::Malformed {
            field,
            value: raw.to_string(),
        })
}

pub(crate) fn parse_non_negative(field: &'static str, raw: &str) -> Result<Decimal, RecordError> {
    let value = parse_decimal(field, raw)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RecordError::Negative {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

/// Convert wire records, dropping the ones that fail validation.
///
/// A dropped record is treated as absent: its bucket is gap-filled like any other.
pub fn records_from_wire(
    records: impl IntoIterator<Item = BucketRecordResponse>,
) -> Vec<TimeBucketRecord> {
    records
        .into_iter()
        .filter_map(|raw| {
            let bucket_index = raw.bucket_index;
            match TimeBucketRecord::try_from(raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(bucket_index, error = %e, "dropping malformed bucket record");
                    None
                }
            }
        })
        .collect()
}
