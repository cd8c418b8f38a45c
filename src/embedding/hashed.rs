//! Hashed Bag-of-Words Embedding
//!
//! Local, deterministic provider: no network, no model files. Tokens are
//! hashed into a fixed number of buckets and the result is L2-normalized.
//! Similar wording gives similar vectors, which is enough for demos, offline
//! runs and reproducible tests, but it carries no real semantics.

use crate::error::EmbeddingError;
use crate::vector::{normalize_vector, Embedding};

use super::EmbeddingProvider;

/// Default bucket count
pub const DEFAULT_DIMENSION: usize = 256;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a, stable across platforms and releases
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// Feature-hashing embedding provider
#[derive(Debug, Clone)]
pub struct HashedEmbedding {
    dimension: usize,
}

impl Default for HashedEmbedding {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl HashedEmbedding {
    /// Create a provider producing `dimension`-length vectors (minimum 1)
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Synchronous embedding, shared by the async trait method
    ///
    /// Empty or token-free text maps to the zero vector.
    pub fn embed_text(&self, text: &str) -> Embedding {
        let mut embedding = vec![0.0f32; self.dimension];

        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            let hash = fnv1a(token.to_lowercase().as_bytes());
            let bucket = (hash % self.dimension as u64) as usize;
            // top bit picks the sign so unrelated tokens tend to cancel
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        normalize_vector(&mut embedding);
        embedding
    }
}

impl EmbeddingProvider for HashedEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        Ok(self.embed_text(text))
    }

    fn name(&self) -> &str {
        "hashed"
    }
}
