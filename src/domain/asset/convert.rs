//! Conversion: AssetMetaResponse → AssetMeta (TryFrom + validation).

use super::wire::AssetMetaResponse;
use super::AssetMeta;
use crate::domain::price_history::convert::parse_non_negative;
use crate::error::RecordError;

impl TryFrom<AssetMetaResponse> for AssetMeta {
    type Error = RecordError;

    fn try_from(source: AssetMetaResponse) -> Result<Self, Self::Error> {
        Ok(AssetMeta {
            current_market_price: parse_non_negative(
                "current_market_price",
                &source.current_market_price,
            )?,
            current_floor_price: parse_non_negative(
                "current_floor_price",
                &source.current_floor_price,
            )?,
            created_at_seconds: source.created_at.timestamp(),
            asset_id: source.asset_id,
        })
    }
}
