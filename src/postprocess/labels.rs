//! Class label vocabulary.

use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::tracker::UNKNOWN_LABEL;

/// Ordered, non-empty list of class names, indexed by class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels(Vec<String>);

impl Labels {
    pub fn new(labels: Vec<String>) -> Result<Self, ConfigError> {
        if labels.is_empty() {
            return Err(ConfigError::EmptyLabels);
        }
        Ok(Self(labels))
    }

    /// Parse a newline-separated label file. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        )
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::LabelsIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.0.get(class_id).map(String::as_str)
    }

    /// Label for `class_id`, or [`UNKNOWN_LABEL`] if the vocabulary has no entry.
    pub fn resolve(&self, class_id: usize) -> &str {
        self.get(class_id).unwrap_or_else(|| {
            warn!(
                class_id,
                vocabulary = self.0.len(),
                "class index outside label vocabulary"
            );
            UNKNOWN_LABEL
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
