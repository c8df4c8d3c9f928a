//! Wire types for asset metadata.

use crate::shared::AssetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Asset metadata as returned by the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetaResponse {
    pub asset_id: AssetId,
    #[serde(with = "crate::shared::serde_util::timestamp_ms")]
    pub created_at: DateTime<Utc>,
    pub current_market_price: String,
    pub current_floor_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_meta_deserialize() {
        let json = r#"{
            "asset_id": "tok_123",
            "created_at": 1740076800000,
            "current_market_price": "0.00042",
            "current_floor_price": "0.0003"
        }"#;
        let meta: AssetMetaResponse = serde_json::from_str(json).unwrap();
        assert_eq!(meta.asset_id.as_str(), "tok_123");
        assert_eq!(meta.created_at.timestamp(), 1_740_076_800);

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["created_at"], 1_740_076_800_000_i64);
    }
}
