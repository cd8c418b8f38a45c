//! semsearch - In-Memory Semantic Search
//!
//! Ranks text segments against a natural-language query by cosine
//! similarity of their embeddings. Embeddings come from an injected
//! provider; segments come from any source that yields ordered text.

pub mod embedding;
pub mod error;
pub mod index;
pub mod metrics;
pub mod source;
pub mod vector;

pub use embedding::{EmbeddingProvider, HashedEmbedding, Instrumented, OpenAiConfig, OpenAiEmbeddings};
pub use error::{EmbedTarget, EmbeddingError, SearchError, SourceError};
pub use index::{IndexConfig, SearchHit, SemanticIndex, DEFAULT_TOP_K};
pub use metrics::ProviderMetrics;
pub use source::{read_pdf_pages, PageFile, SegmentSource};
pub use vector::{cosine_similarity, Embedding, SegmentId};
