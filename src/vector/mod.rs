//! Vector Module
//!
//! Cosine scoring and the ordered segment/embedding table.

mod similarity;
mod table;

pub use similarity::{cosine_similarity, dot_product, magnitude, normalize_vector};
pub use table::{Embedding, Segment, SegmentId, SegmentTable};
