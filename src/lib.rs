//! # Content Markets SDK
//!
//! Multi-timeframe price charts for content tokens, built from sparse
//! bucket-indexed indexer data.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, and the pure resampling engine
//! 2. **Data source** — The `SeriesSource` trait and the in-memory `MemorySource`
//! 3. **High-Level Client** — `ChartClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use content_markets_sdk::prelude::*;
//!
//! let client = ChartClient::builder()
//!     .source(MemorySource::new())
//!     .build()?;
//!
//! let points = client
//!     .price_history()
//!     .chart(&AssetId::from("asset_id"), Timeframe::Week)
//!     .await?;
//! ```
//!
//! The engine can also be driven directly with records already in hand:
//!
//! ```rust,ignore
//! let points = resample(Timeframe::Live, &records, &ctx);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, engine.
pub mod domain;

/// Unified SDK error types.
pub mod error;

// ── Layer 2: Data source ─────────────────────────────────────────────────────

/// `SeriesSource` trait and in-memory implementation.
pub mod source;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `ChartClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AssetId, Granularity};

    // Domain types — asset
    pub use crate::domain::asset::AssetMeta;

    // Domain types — price history
    pub use crate::domain::price_history::{
        records_from_wire, resample, resample_with, select_window, ChartWindow, NoopObserver, PricePoint,
        ResampleConfig, ResampleObserver, Resampler, SeriesContext, StageMetrics, TimeBucketRecord,
        Timeframe, TimeframeSpec, TracingObserver,
    };

    // Errors
    pub use crate::error::{RecordError, SdkError, SourceError};

    // Data sources
    pub use crate::source::{MemorySource, SeriesSource};

    // Client + sub-clients
    pub use crate::client::{ChartClient, ChartClientBuilder, PriceHistoryClient};
}
