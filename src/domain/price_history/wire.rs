//! Wire types for price history (indexer bucket store).

use serde::{Deserialize, Serialize};

/// One bucket as returned by the indexer. Decimal fields arrive as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecordResponse {
    pub bucket_index: i64,
    pub market_price: String,
    pub floor_price: String,
    #[serde(default = "zero_volume")]
    pub volume: String,
}

fn zero_volume() -> String {
    "0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_record_deserialize() {
        let json = r#"{
            "bucket_index": 29001280,
            "market_price": "0.000420",
            "floor_price": "0.000300",
            "volume": "12.5"
        }"#;
        let record: BucketRecordResponse = serde_json::from_str(json).unwrap();
        assert_eq!(record.bucket_index, 29_001_280);
        assert_eq!(record.market_price, "0.000420");
        assert_eq!(record.volume, "12.5");
    }

    #[test]
    fn test_missing_volume_defaults_to_zero() {
        let json = r#"{"bucket_index": 1, "market_price": "1", "floor_price": "1"}"#;
        let record: BucketRecordResponse = serde_json::from_str(json).unwrap();
        assert_eq!(record.volume, "0");
    }
}
