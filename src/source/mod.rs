//! Data sources — where asset metadata and bucket records come from.
//!
//! A [`SeriesSource`] returns raw wire types; validation and conversion happen
//! in the price history sub-client. [`MemorySource`] is an in-process store for
//! apps that already hold indexer data, and for tests.

pub mod memory;

use crate::domain::asset::wire::AssetMetaResponse;
use crate::domain::price_history::wire::BucketRecordResponse;
use crate::error::SourceError;
use crate::shared::{AssetId, Granularity};

pub use memory::MemorySource;

/// Read access to the indexer's asset and bucket stores.
#[allow(async_fn_in_trait)]
pub trait SeriesSource {
    /// Metadata for one asset. Unknown assets yield [`SourceError::NotFound`].
    async fn fetch_asset_meta(&self, asset_id: &AssetId) -> Result<AssetMetaResponse, SourceError>;

    /// Records stored for `indices` at `granularity`. Missing buckets are simply absent
    /// from the result.
    async fn fetch_bucket_records(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
        indices: &[i64],
    ) -> Result<Vec<BucketRecordResponse>, SourceError>;
}
