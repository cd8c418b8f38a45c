//! Embedding Providers
//!
//! The capability the index uses to turn text into vectors, plus the
//! concrete providers shipped with the crate.

mod hashed;
mod instrumented;
mod openai;

pub use hashed::HashedEmbedding;
pub use instrumented::Instrumented;
pub use openai::{OpenAiConfig, OpenAiEmbeddings, DEFAULT_BASE_URL, DEFAULT_MODEL};

use std::future::Future;
use std::sync::Arc;

use crate::error::EmbeddingError;
use crate::vector::Embedding;

/// Maps text to a fixed-length vector
///
/// A provider is expected to return vectors of one length for every call.
/// Text is passed through untouched, including empty strings; how a provider
/// treats empty input is up to the provider.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one piece of text
    fn embed(&self, text: &str) -> impl Future<Output = Result<Embedding, EmbeddingError>> + Send;

    /// Provider name, for logs and diagnostics
    fn name(&self) -> &str {
        "unknown"
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for Arc<P> {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Embedding, EmbeddingError>> + Send {
        (**self).embed(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for &P {
    fn embed(&self, text: &str) -> impl Future<Output = Result<Embedding, EmbeddingError>> + Send {
        (**self).embed(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
