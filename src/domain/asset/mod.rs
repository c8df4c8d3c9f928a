//! Asset domain — creation time and live prices of a content token.

pub mod convert;
pub mod wire;

use crate::domain::price_history::SeriesContext;
use crate::shared::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Validated asset metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMeta {
    pub asset_id: AssetId,
    pub created_at_seconds: i64,
    pub current_market_price: Decimal,
    pub current_floor_price: Decimal,
}

impl AssetMeta {
    /// The per-call context for a chart built at `now_seconds`.
    pub fn context(&self, now_seconds: i64) -> SeriesContext {
        SeriesContext {
            asset_id: self.asset_id.clone(),
            created_at_seconds: self.created_at_seconds,
            current_market_price: self.current_market_price,
            current_floor_price: self.current_floor_price,
            now_seconds,
        }
    }
}
