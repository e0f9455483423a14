//! Label table loading and lookup.
//!
//! The label table is an ordered sequence of label strings loaded once at
//! initialization. Position `i` in the table corresponds to output index `i`
//! of the model's probability vector. The table is immutable after load, so
//! concurrent classification calls can read it without locking.

use crate::core::errors::ClassifierError;
use std::path::Path;

/// Sentinel label for probability indices beyond the table bound.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// An ordered, immutable table of label names indexed by class position.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    /// Creates a label table from an ordered list of label names.
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Reads a label table from a text file, one label per line.
    ///
    /// Line order defines class index order. Empty lines are preserved so
    /// indices stay aligned with the model's output vector.
    ///
    /// # Errors
    ///
    /// Returns a `ClassifierError::InvalidInput` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::invalid_input(format!(
                "failed to read label file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self::from_labels(
            content.lines().map(|s| s.to_string()).collect(),
        ))
    }

    /// Returns the number of labels in the table.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the table holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label at `index`, if within the table bound.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Returns the label at `index`, or [`UNKNOWN_LABEL`] beyond the bound.
    pub fn name_or_unknown(&self, index: usize) -> &str {
        self.get(index).unwrap_or(UNKNOWN_LABEL)
    }

    /// Iterates labels in class index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file_preserves_line_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cat").unwrap();
        writeln!(file, "dog").unwrap();
        writeln!(file, "fish").unwrap();

        let table = LabelTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), Some("cat"));
        assert_eq!(table.get(2), Some("fish"));
    }

    #[test]
    fn test_from_file_preserves_empty_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cat\n\ndog").unwrap();

        let table = LabelTable::from_file(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1), Some(""));
        assert_eq!(table.get(2), Some("dog"));
    }

    #[test]
    fn test_nonexistent_file_is_invalid_input() {
        let result = LabelTable::from_file(Path::new("/nonexistent/labels.txt"));
        assert!(matches!(
            result,
            Err(ClassifierError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_name_or_unknown_beyond_bound() {
        let table = LabelTable::from_labels(vec!["cat".to_string()]);
        assert_eq!(table.name_or_unknown(0), "cat");
        assert_eq!(table.name_or_unknown(7), UNKNOWN_LABEL);
    }
}
