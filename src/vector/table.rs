//! Segment Table
//!
//! Ordered storage of segment text and embeddings, indexed by identifier.

use std::fmt;

use super::similarity::cosine_similarity;

/// Embedding vector
pub type Embedding = Vec<f32>;

/// Sequential zero-based segment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct SegmentId(pub usize);

impl SegmentId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SegmentId {
    fn from(id: usize) -> Self {
        SegmentId(id)
    }
}

/// A stored row
#[derive(Debug, Clone)]
struct Row {
    text: String,
    embedding: Embedding,
}

/// Borrowed view of one stored segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment<'a> {
    pub id: SegmentId,
    pub text: &'a str,
    pub embedding: &'a [f32],
}

/// Append-only table of `(id, text, embedding)` rows
///
/// Row `i` always carries identifier `i`; insertion order is the identifier
/// order, so iteration and ranking never depend on hashing.
#[derive(Debug, Clone, Default)]
pub struct SegmentTable {
    rows: Vec<Row>,
    /// Fixed by the first stored embedding
    dimension: Option<usize>,
}

impl SegmentTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored segments
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Embedding dimension, once at least one row is stored
    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    /// Identifier the next pushed row will receive
    pub fn next_id(&self) -> SegmentId {
        SegmentId(self.rows.len())
    }

    /// Whether `embedding` may be stored in or ranked against this table
    pub fn accepts(&self, embedding: &[f32]) -> bool {
        match self.dimension {
            Some(dim) => embedding.len() == dim,
            None => true,
        }
    }

    /// Append a row and return its identifier
    ///
    /// Callers check [`accepts`](Self::accepts) first; a mismatched vector is
    /// a logic error.
    pub fn push(&mut self, text: String, embedding: Embedding) -> SegmentId {
        debug_assert!(self.accepts(&embedding), "embedding dimension mismatch");
        let id = self.next_id();
        self.dimension.get_or_insert(embedding.len());
        self.rows.push(Row { text, embedding });
        id
    }

    /// Look up a stored segment
    pub fn get(&self, id: SegmentId) -> Option<Segment<'_>> {
        self.rows.get(id.0).map(|row| Segment {
            id,
            text: &row.text,
            embedding: &row.embedding,
        })
    }

    /// Iterate rows in identifier order
    pub fn iter(&self) -> impl Iterator<Item = Segment<'_>> + '_ {
        self.rows.iter().enumerate().map(|(i, row)| Segment {
            id: SegmentId(i),
            text: &row.text,
            embedding: &row.embedding,
        })
    }

    /// Score every row against `query` and keep the `k` best
    ///
    /// Sorted by score descending. The sort is stable over identifier order,
    /// so exact ties come back with ascending identifiers.
    pub fn rank(&self, query: &[f32], k: usize) -> Vec<(SegmentId, f32)> {
        let mut scored: Vec<(SegmentId, f32)> = self
            .iter()
            .map(|seg| (seg.id, cosine_similarity(query, seg.embedding)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(k);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(vectors: &[&[f32]]) -> SegmentTable {
        let mut table = SegmentTable::new();
        for (i, v) in vectors.iter().enumerate() {
            table.push(format!("segment {}", i), v.to_vec());
        }
        table
    }

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut table = SegmentTable::new();
        assert_eq!(table.dimension(), None);
        assert_eq!(table.push("a".into(), vec![1.0, 0.0]), SegmentId(0));
        assert_eq!(table.push("b".into(), vec![0.0, 1.0]), SegmentId(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.dimension(), Some(2));
        assert_eq!(table.get(SegmentId(1)).unwrap().text, "b");
        assert!(table.get(SegmentId(2)).is_none());
    }

    #[test]
    fn test_accepts_checks_dimension() {
        let table = table(&[&[1.0, 0.0, 0.0]]);
        assert!(table.accepts(&[0.5, 0.5, 0.5]));
        assert!(!table.accepts(&[0.5, 0.5]));
        assert!(SegmentTable::new().accepts(&[1.0]));
    }

    #[test]
    fn test_rank_orders_by_score() {
        let table = table(&[&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0], &[0.9, 0.1, 0.0]]);

        let ranked = table.rank(&[1.0, 0.0, 0.0], 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, SegmentId(1));
        assert_eq!(ranked[1].0, SegmentId(2));
        assert!(ranked[0].1 >= ranked[1].1);
    }

    #[test]
    fn test_rank_ties_keep_identifier_order() {
        let table = table(&[
            &[0.0, 1.0],
            &[1.0, 0.0],
            &[0.0, 2.0],
            &[2.0, 0.0],
            &[0.0, 3.0],
        ]);

        let ids: Vec<usize> = table
            .rank(&[0.0, 1.0], 10)
            .into_iter()
            .map(|(id, _)| id.0)
            .collect();
        assert_eq!(ids, vec![0, 2, 4, 1, 3]);
    }

    #[test]
    fn test_rank_zero_vectors_score_zero() {
        let table = table(&[&[0.0, 0.0], &[1.0, 0.0], &[-1.0, 0.0]]);

        let ranked = table.rank(&[1.0, 0.0], 3);
        assert_eq!(ranked[0], (SegmentId(1), 1.0));
        assert_eq!(ranked[1], (SegmentId(0), 0.0));
        assert_eq!(ranked[2].0, SegmentId(2));
    }

    #[test]
    fn test_rank_k_larger_than_table() {
        let table = table(&[&[1.0], &[2.0]]);
        assert_eq!(table.rank(&[1.0], 100).len(), 2);
        assert!(SegmentTable::new().rank(&[1.0], 3).is_empty());
    }
}
