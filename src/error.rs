//! Error Types
//!
//! Failures surfaced by the index, the embedding providers and the page source.

use std::fmt;
use std::path::PathBuf;

/// What a provider was asked to embed when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTarget {
    /// Segment at this ingestion position (equal to its identifier)
    Segment(usize),
    /// The search query
    Query,
}

impl fmt::Display for EmbedTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedTarget::Segment(pos) => write!(f, "segment {}", pos),
            EmbedTarget::Query => write!(f, "query"),
        }
    }
}

/// Provider-side failure to produce a vector
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// Transport failure, including timeouts
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("embedding API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The service answered but the payload was not usable
    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),

    /// No key to authenticate with
    #[error("no API key configured (set OPENAI_API_KEY)")]
    MissingApiKey,

    /// Generic refusal from a provider
    #[error("embedding rejected: {0}")]
    Rejected(String),
}

impl EmbeddingError {
    /// Short label for metrics
    pub fn kind(&self) -> &'static str {
        match self {
            EmbeddingError::Http(e) if e.is_timeout() => "timeout",
            EmbeddingError::Http(_) => "http",
            EmbeddingError::Api { .. } => "api",
            EmbeddingError::MalformedResponse(_) => "malformed",
            EmbeddingError::MissingApiKey => "missing_api_key",
            EmbeddingError::Rejected(_) => "rejected",
        }
    }
}

/// Errors returned by [`crate::SemanticIndex`] operations
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("embedding failed for {target}: {source}")]
    EmbeddingFailure {
        target: EmbedTarget,
        #[source]
        source: EmbeddingError,
    },

    #[error("invalid query parameter: k must be at least 1, got {k}")]
    InvalidQueryParameter { k: usize },

    #[error("dimension mismatch for {target}: expected {expected}, got {actual}")]
    DimensionMismatch {
        target: EmbedTarget,
        expected: usize,
        actual: usize,
    },
}

impl SearchError {
    /// Ingestion position of the segment that caused the error, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            SearchError::EmbeddingFailure {
                target: EmbedTarget::Segment(pos),
                ..
            }
            | SearchError::DimensionMismatch {
                target: EmbedTarget::Segment(pos),
                ..
            } => Some(*pos),
            _ => None,
        }
    }
}

/// Errors opening or reading a paged document
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("unsupported file type (expected .pdf or .txt): {}", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("failed to read PDF {}: {message}", .path.display())]
    Pdf { path: PathBuf, message: String },

    #[error("invalid page number {page}: file has {num_pages} pages")]
    PageOutOfRange { page: usize, num_pages: usize },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
