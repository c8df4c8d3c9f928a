//! High-level client — `ChartClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::domain::price_history::client::PriceHistory;
use crate::domain::price_history::{ResampleConfig, ResampleObserver, Resampler};
use crate::error::SdkError;
use crate::source::SeriesSource;

// Re-export sub-client types for convenience.
pub use crate::domain::price_history::client::PriceHistory as PriceHistoryClient;

/// The primary entry point for building charts.
///
/// Owns a [`SeriesSource`] and a [`Resampler`]; `client.price_history()` runs
/// fetch → convert → resample.
#[derive(Debug, Clone)]
pub struct ChartClient<S> {
    pub(crate) source: S,
    pub(crate) resampler: Resampler,
}

impl<S: SeriesSource> ChartClient<S> {
    pub fn builder() -> ChartClientBuilder<S> {
        ChartClientBuilder::default()
    }

    /// Shorthand for a client with the default config and tracing observer.
    pub fn new(source: S) -> Self {
        Self {
            source,
            resampler: Resampler::default(),
        }
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn price_history(&self) -> PriceHistory<'_, S> {
        PriceHistory { client: self }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn resampler(&self) -> &Resampler {
        &self.resampler
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct ChartClientBuilder<S> {
    source: Option<S>,
    resampler: Resampler,
}

impl<S> Default for ChartClientBuilder<S> {
    fn default() -> Self {
        Self {
            source: None,
            resampler: Resampler::default(),
        }
    }
}

impl<S: SeriesSource> ChartClientBuilder<S> {
    pub fn source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    /// Replaces the config; the observer is kept.
    pub fn config(mut self, config: ResampleConfig) -> Self {
        self.resampler = self.resampler.with_config(config);
        self
    }

    pub fn observer(mut self, observer: impl ResampleObserver + 'static) -> Self {
        self.resampler = self.resampler.with_observer(observer);
        self
    }

    pub fn build(self) -> Result<ChartClient<S>, SdkError> {
        let source = self
            .source
            .ok_or_else(|| SdkError::Validation("a series source is required".to_string()))?;
        Ok(ChartClient {
            source,
            resampler: self.resampler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use rust_decimal::Decimal;

    #[test]
    fn test_build_requires_source() {
        let err = ChartClient::<MemorySource>::builder().build().unwrap_err();
        assert!(matches!(err, SdkError::Validation(_)));
    }

    #[test]
    fn test_builder_keeps_observer_when_config_changes() {
        let client = ChartClient::builder()
            .source(MemorySource::new())
            .observer(crate::domain::price_history::NoopObserver)
            .config(ResampleConfig::default().baseline_price(Decimal::ZERO))
            .build()
            .unwrap();
        assert_eq!(client.resampler().config().baseline_price, Decimal::ZERO);
    }
}
