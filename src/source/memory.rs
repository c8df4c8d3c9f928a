//! In-memory [`SeriesSource`].

use super::SeriesSource;
use crate::domain::asset::wire::AssetMetaResponse;
use crate::domain::price_history::wire::BucketRecordResponse;
use crate::error::SourceError;
use crate::shared::{AssetId, Granularity};
use async_lock::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

type BucketKey = (AssetId, Granularity);

/// Shared, cloneable store of asset metadata and bucket records.
///
/// Clones share the same data, so one handle can keep ingesting while another
/// builds charts.
#[derive(Clone, Default)]
pub struct MemorySource {
    /// asset_id → metadata
    assets: Arc<RwLock<HashMap<AssetId, AssetMetaResponse>>>,
    /// (asset_id, granularity) → bucket_index → record
    buckets: Arc<RwLock<HashMap<BucketKey, BTreeMap<i64, BucketRecordResponse>>>>,
}

impl std::fmt::Debug for MemorySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySource").finish_non_exhaustive()
    }
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an asset's metadata.
    pub async fn insert_asset(&self, meta: AssetMetaResponse) {
        self.assets
            .write()
            .await
            .insert(meta.asset_id.clone(), meta);
    }

    /// Insert records for one asset and granularity. A record replaces any stored
    /// record with the same bucket index.
    pub async fn insert_records(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
        records: impl IntoIterator<Item = BucketRecordResponse>,
    ) {
        let mut buckets = self.buckets.write().await;
        let series = buckets
            .entry((asset_id.clone(), granularity))
            .or_default();
        for record in records {
            series.insert(record.bucket_index, record);
        }
    }

    /// Remove an asset and all of its records.
    pub async fn remove_asset(&self, asset_id: &AssetId) {
        self.assets.write().await.remove(asset_id);
        self.buckets
            .write()
            .await
            .retain(|(id, _), _| id != asset_id);
    }

    /// Drop everything.
    pub async fn clear(&self) {
        self.assets.write().await.clear();
        self.buckets.write().await.clear();
    }
}

impl SeriesSource for MemorySource {
    async fn fetch_asset_meta(&self, asset_id: &AssetId) -> Result<AssetMetaResponse, SourceError> {
        self.assets
            .read()
            .await
            .get(asset_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(asset_id.to_string()))
    }

    async fn fetch_bucket_records(
        &self,
        asset_id: &AssetId,
        granularity: Granularity,
        indices: &[i64],
    ) -> Result<Vec<BucketRecordResponse>, SourceError> {
        let buckets = self.buckets.read().await;
        let Some(series) = buckets.get(&(asset_id.clone(), granularity)) else {
            return Ok(Vec::new());
        };

        let mut wanted = indices.to_vec();
        wanted.sort_unstable();
        wanted.dedup();
        Ok(wanted
            .into_iter()
            .filter_map(|index| series.get(&index).cloned())
            .collect())
    }
}
