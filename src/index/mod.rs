//! Semantic Index
//!
//! In-memory table of text segments and their embeddings, answering top-k
//! cosine similarity queries.

mod config;

pub use config::IndexConfig;

use std::ops::Range;
use std::pin::pin;

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::embedding::EmbeddingProvider;
use crate::error::{EmbedTarget, EmbeddingError, SearchError};
use crate::vector::{Segment, SegmentId, SegmentTable};

/// Number of hits returned when the caller does not choose
pub const DEFAULT_TOP_K: usize = 3;

/// One ranked search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: SegmentId,
    pub text: String,
    /// Cosine similarity, higher is more similar
    pub score: f32,
}

/// Semantic index over text segments
///
/// Owns its segment table and an injected embedding provider. Segments get
/// sequential identifiers starting at 0, in ingestion order, and are never
/// removed. `ingest` needs `&mut self`, so searches cannot overlap an
/// ingestion; any number of searches may run together afterwards.
pub struct SemanticIndex<P> {
    provider: P,
    table: SegmentTable,
    config: IndexConfig,
}

impl<P: EmbeddingProvider> SemanticIndex<P> {
    /// Create an empty index with default configuration
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, IndexConfig::default())
    }

    /// Create an empty index with custom configuration
    pub fn with_config(provider: P, config: IndexConfig) -> Self {
        Self {
            provider,
            table: SegmentTable::new(),
            config,
        }
    }

    /// Embed and store segments, returning the identifiers assigned
    ///
    /// Identifiers continue from any earlier call. With concurrency above 1
    /// several provider calls may be in flight, but identifiers are fixed by
    /// input position before dispatch and rows are committed in input order.
    ///
    /// On failure the error names the offending position. Every segment
    /// before it stays in the index; nothing at or after it is stored, and
    /// there is no rollback.
    pub async fn ingest<I>(&mut self, segments: I) -> Result<Range<usize>, SearchError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let start = self.table.len();
        let provider = &self.provider;

        let mut embedded = pin!(stream::iter(segments.into_iter().enumerate())
            .map(|(offset, text)| {
                let text: String = text.into();
                async move {
                    let result = provider.embed(&text).await;
                    (start + offset, text, result)
                }
            })
            .buffered(self.config.effective_concurrency()));

        while let Some((position, text, result)) = embedded.next().await {
            let target = EmbedTarget::Segment(position);
            let embedding =
                result.map_err(|source| SearchError::EmbeddingFailure { target, source })?;
            check_embedding(&self.table, target, &embedding)?;

            let id = self.table.push(text, embedding);
            debug_assert_eq!(id.as_usize(), position);
        }

        Ok(start..self.table.len())
    }

    /// Return the `k` stored segments most similar to `query`
    ///
    /// The query is always embedded, even when the index is empty. Hits are
    /// ordered by score descending; exact ties are ordered by ascending
    /// identifier. Asking for more hits than there are segments returns them
    /// all.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchHit>, SearchError> {
        validate_k(k)?;

        let embedding = self
            .provider
            .embed(query)
            .await
            .map_err(|source| SearchError::EmbeddingFailure {
                target: EmbedTarget::Query,
                source,
            })?;

        self.rank(&embedding, k)
    }

    /// [`search`](Self::search) with [`DEFAULT_TOP_K`]
    pub async fn search_default(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.search(query, DEFAULT_TOP_K).await
    }
}

impl<P> SemanticIndex<P> {
    /// Rank stored segments against an already computed query embedding
    pub fn rank(&self, query_embedding: &[f32], k: usize) -> Result<Vec<SearchHit>, SearchError> {
        validate_k(k)?;
        check_embedding(&self.table, EmbedTarget::Query, query_embedding)?;

        Ok(self
            .table
            .rank(query_embedding, k)
            .into_iter()
            .filter_map(|(id, score)| {
                self.table.get(id).map(|seg| SearchHit {
                    id,
                    text: seg.text.to_string(),
                    score,
                })
            })
            .collect())
    }

    /// Number of indexed segments
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Embedding dimension, once something has been ingested
    pub fn dimension(&self) -> Option<usize> {
        self.table.dimension()
    }

    /// Look up a stored segment
    pub fn get(&self, id: SegmentId) -> Option<Segment<'_>> {
        self.table.get(id)
    }

    /// Stored text for a segment
    pub fn text(&self, id: SegmentId) -> Option<&str> {
        self.table.get(id).map(|seg| seg.text)
    }

    /// Stored embedding for a segment
    pub fn embedding(&self, id: SegmentId) -> Option<&[f32]> {
        self.table.get(id).map(|seg| seg.embedding)
    }

    /// Iterate segments in identifier order
    pub fn iter(&self) -> impl Iterator<Item = Segment<'_>> + '_ {
        self.table.iter()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

fn validate_k(k: usize) -> Result<(), SearchError> {
    if k == 0 {
        return Err(SearchError::InvalidQueryParameter { k });
    }
    Ok(())
}

/// Reject empty vectors and vectors whose length differs from the table's
fn check_embedding(
    table: &SegmentTable,
    target: EmbedTarget,
    embedding: &[f32],
) -> Result<(), SearchError> {
    if embedding.is_empty() {
        return Err(SearchError::EmbeddingFailure {
            target,
            source: EmbeddingError::MalformedResponse("provider returned an empty vector".into()),
        });
    }
    if !table.accepts(embedding) {
        return Err(SearchError::DimensionMismatch {
            target,
            expected: table.dimension().unwrap_or_default(),
            actual: embedding.len(),
        });
    }
    Ok(())
}
