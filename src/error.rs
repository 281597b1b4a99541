//! Error types for pipeline construction and tensor validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::postprocess::Layout;

/// A tensor whose shape or length cannot be read under the declared layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TensorError {
    #[error("tensor rank {0} is unsupported, expected 2 or 3 dimensions")]
    Rank(usize),

    #[error("tensor batch size {0} is unsupported, expected 1")]
    Batch(usize),

    #[error("tensor holds {got} values but shape {shape:?} needs {expected}")]
    Length {
        shape: Vec<usize>,
        expected: usize,
        got: usize,
    },

    #[error("tensor shape {0:?} holds more values than fit in memory")]
    Overflow(Vec<usize>),

    #[error("shape {shape:?} leaves no class scores under the {layout:?} layout")]
    Layout { layout: Layout, shape: Vec<usize> },

    #[error("frame tensor shape {got:?} differs from the configured shape {expected:?}")]
    UnexpectedShape { expected: Vec<usize>, got: Vec<usize> },
}

/// Failure to set up a pipeline. Raised before any frame is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("failed to read labels from {path}")]
    LabelsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("label vocabulary is empty")]
    EmptyLabels,

    #[error("malformed pipeline configuration")]
    Json(#[from] serde_json::Error),

    #[error("declared output tensor is incompatible")]
    Tensor(#[from] TensorError),
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        Self::Invalid {
            name,
            value: value.to_string(),
        }
    }
}
