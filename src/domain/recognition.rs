//! Classification result value type.

use serde::Serialize;

/// A single labeled classification result.
///
/// Produced fresh per classification call and immutable once constructed.
/// Results are ordered only by `confidence`; `id` carries the probability
/// index the result came from and has no identity across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// The probability index this result was ranked from, stringified.
    pub id: String,
    /// Human-readable label, or `"Unknown"` for indices beyond the label table.
    pub label: String,
    /// Model confidence for this label.
    pub confidence: f32,
}

impl Recognition {
    /// Creates a new recognition result.
    pub fn new(id: impl Into<String>, label: impl Into<String>, confidence: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            confidence,
        }
    }
}

impl std::fmt::Display for Recognition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (confidence: {:.3})", self.label, self.confidence)
    }
}
