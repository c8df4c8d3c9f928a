//! Price history sub-client — fetch, convert, resample.

use super::{records_from_wire, PricePoint, Timeframe};
use crate::client::ChartClient;
use crate::domain::asset::AssetMeta;
use crate::error::{RecordError, SdkError};
use crate::shared::AssetId;
use crate::source::SeriesSource;

/// Sub-client for chart series.
pub struct PriceHistory<'a, S> {
    pub(crate) client: &'a ChartClient<S>,
}

impl<'a, S: SeriesSource> PriceHistory<'a, S> {
    /// Chart series for `timeframe` as of the current wall clock.
    pub async fn chart(
        &self,
        asset_id: &AssetId,
        timeframe: Timeframe,
    ) -> Result<Vec<PricePoint>, SdkError> {
        self.chart_at(asset_id, timeframe, chrono::Utc::now().timestamp())
            .await
    }

    /// Chart series for `timeframe` as of `now_seconds`.
    ///
    /// Source errors propagate unchanged; no series is built from a failed fetch.
    pub async fn chart_at(
        &self,
        asset_id: &AssetId,
        timeframe: Timeframe,
        now_seconds: i64,
    ) -> Result<Vec<PricePoint>, SdkError> {
        let meta = self.meta(asset_id).await?;
        self.chart_for(&meta, timeframe, now_seconds).await
    }

    /// Series for every preset, sharing one metadata fetch.
    pub async fn all_timeframes(
        &self,
        asset_id: &AssetId,
        now_seconds: i64,
    ) -> Result<Vec<(Timeframe, Vec<PricePoint>)>, SdkError> {
        let meta = self.meta(asset_id).await?;
        let mut charts = Vec::with_capacity(Timeframe::ALL.len());
        for timeframe in Timeframe::ALL {
            charts.push((timeframe, self.chart_for(&meta, timeframe, now_seconds).await?));
        }
        Ok(charts)
    }

    /// Validated metadata for an asset.
    pub async fn meta(&self, asset_id: &AssetId) -> Result<AssetMeta, SdkError> {
        let resp = self.client.source.fetch_asset_meta(asset_id).await?;
        resp.try_into()
            .map_err(|e: RecordError| SdkError::Validation(format!("asset {}: {}", asset_id, e)))
    }

    async fn chart_for(
        &self,
        meta: &AssetMeta,
        timeframe: Timeframe,
        now_seconds: i64,
    ) -> Result<Vec<PricePoint>, SdkError> {
        let ctx = meta.context(now_seconds);
        let resampler = &self.client.resampler;
        let window = resampler.window(timeframe, &ctx);
        let indices: Vec<i64> = window.indices().collect();

        let raw = self
            .client
            .source
            .fetch_bucket_records(&meta.asset_id, window.granularity, &indices)
            .await?;
        let records = records_from_wire(raw);

        Ok(resampler.resample(timeframe, &records, &ctx))
    }
}
