//! Result ranking: probability vector to bounded top-k results.
//!
//! The ranker filters the model's per-label probabilities by an inclusive
//! confidence threshold and keeps the k highest-confidence candidates in a
//! fixed-capacity heap, then extracts them in descending confidence order.

use crate::core::errors::ClassifierError;
use crate::domain::{LabelTable, Recognition};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A threshold-passing candidate, ordered by confidence.
///
/// Ties on exactly equal confidence break by ascending probability index, so
/// ranking is deterministic for any input vector.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScoredIndex {
    confidence: f32,
    index: usize,
}

impl Eq for ScoredIndex {}

impl Ord for ScoredIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.confidence
            .partial_cmp(&other.confidence)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for ScoredIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ranks raw model probabilities into an ordered, bounded result list.
///
/// The ranker is total over any well-formed probability vector: a zero-length
/// vector yields an empty result, and fewer threshold-passing entries than
/// `top_k` yield a shorter list.
#[derive(Debug, Clone)]
pub struct ResultRanker {
    threshold: f32,
    top_k: usize,
}

impl ResultRanker {
    /// Creates a ranker with the given confidence threshold and result bound.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `top_k` is 0 or `threshold` is not finite.
    pub fn new(threshold: f32, top_k: usize) -> Result<Self, ClassifierError> {
        if top_k == 0 {
            return Err(ClassifierError::config_error(
                "top_k must be greater than 0",
            ));
        }
        if !threshold.is_finite() {
            return Err(ClassifierError::config_error(format!(
                "confidence threshold must be finite, got {threshold}"
            )));
        }
        Ok(Self { threshold, top_k })
    }

    /// The inclusive confidence threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// The maximum number of results returned per call.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Ranks a probability vector against a label table.
    ///
    /// Every probability at index `i` with `probabilities[i] >= threshold`
    /// becomes a candidate labeled `labels[i]`, or `"Unknown"` when `i` is
    /// beyond the table bound. The returned list holds at most `top_k`
    /// entries in descending confidence order.
    pub fn rank(&self, probabilities: &[f32], labels: &LabelTable) -> Vec<Recognition> {
        // Min-heap over the current best candidates; the root is the weakest
        // entry and gets evicted once capacity is exceeded.
        let mut heap: BinaryHeap<std::cmp::Reverse<ScoredIndex>> =
            BinaryHeap::with_capacity(self.top_k + 1);

        for (index, &confidence) in probabilities.iter().enumerate() {
            if confidence >= self.threshold {
                heap.push(std::cmp::Reverse(ScoredIndex { confidence, index }));
                if heap.len() > self.top_k {
                    heap.pop();
                }
            }
        }

        let mut selected: Vec<ScoredIndex> =
            heap.into_iter().map(|reverse| reverse.0).collect();
        selected.sort_unstable_by(|a, b| b.cmp(a));

        selected
            .into_iter()
            .map(|candidate| {
                Recognition::new(
                    candidate.index.to_string(),
                    labels.name_or_unknown(candidate.index),
                    candidate.confidence,
                )
            })
            .collect()
    }
}
