//! Post-processing and tracking for YOLO-style object detectors.
//!
//! Each frame's raw output tensor is decoded under an explicit [`Layout`],
//! filtered with greedy non-max suppression and associated into
//! [`TrackedObject`]s by nearest-centroid matching.

pub mod config;
pub mod error;
pub mod integration;
pub mod postprocess;
pub mod tracker;

pub use config::{BoxUnits, OutputSpace, PipelineConfig};
pub use error::{ConfigError, TensorError};
pub use integration::{
    DetectionBuilder, FramePipeline, OverlayTransform, TensorSource, TrackerPipeline,
};
pub use postprocess::{
    Decoder, FrameSize, Labels, Layout, Postprocessor, RawTensor, TensorBuf, non_max_suppression,
};
pub use tracker::{CentroidTracker, Detection, Rect, TrackedObject, TrackerConfig};
