//! Integration module for connecting inference backends with the tracker.
//!
//! This module provides the inference-source seam, frame pipelines that run
//! decode, suppression and tracking, and helpers for building detections and
//! drawing them onto a display surface.

mod builder;
mod overlay;
mod pipeline;
mod source;

pub use builder::DetectionBuilder;
pub use overlay::OverlayTransform;
pub use pipeline::{FramePipeline, TrackerPipeline};
pub use source::TensorSource;
