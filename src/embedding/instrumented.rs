//! Instrumented Provider
//!
//! Wraps any provider and records each call in [`ProviderMetrics`].

use std::sync::Arc;
use std::time::Instant;

use crate::error::EmbeddingError;
use crate::metrics::ProviderMetrics;
use crate::vector::Embedding;

use super::EmbeddingProvider;

/// Provider wrapper that counts calls, failures and latency
pub struct Instrumented<P> {
    inner: P,
    metrics: Arc<ProviderMetrics>,
}

impl<P: EmbeddingProvider> Instrumented<P> {
    pub fn new(inner: P) -> Self {
        Self::with_metrics(inner, Arc::new(ProviderMetrics::new()))
    }

    /// Share an existing collector
    pub fn with_metrics(inner: P, metrics: Arc<ProviderMetrics>) -> Self {
        Self { inner, metrics }
    }

    pub fn metrics(&self) -> &Arc<ProviderMetrics> {
        &self.metrics
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for Instrumented<P> {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let start = Instant::now();
        let result = self.inner.embed(text).await;
        self.metrics
            .record_call(start.elapsed(), result.as_ref().err().map(EmbeddingError::kind));
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
