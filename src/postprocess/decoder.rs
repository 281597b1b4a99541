//! Output tensor decoding into candidate detections.

use tracing::{debug, trace, warn};

use crate::config::{BoxUnits, OutputSpace, PipelineConfig};
use crate::error::TensorError;
use crate::integration::DetectionBuilder;
use crate::postprocess::labels::Labels;
use crate::postprocess::layout::{Layout, TensorDims};
use crate::postprocess::tensor::RawTensor;
use crate::tracker::Detection;

/// Pixel dimensions of the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Turns a raw detection head output into thresholded candidates.
#[derive(Debug, Clone)]
pub struct Decoder {
    layout: Layout,
    labels: Labels,
    score_threshold: f32,
    input_size: u32,
    box_units: BoxUnits,
    output_space: OutputSpace,
}

impl Decoder {
    /// A decoder emitting model-space boxes for a 640x640 input.
    pub fn new(layout: Layout, labels: Labels, score_threshold: f32) -> Self {
        Self {
            layout,
            labels,
            score_threshold,
            input_size: 640,
            box_units: BoxUnits::default(),
            output_space: OutputSpace::default(),
        }
    }

    pub fn from_config(config: &PipelineConfig, labels: Labels) -> Self {
        Self::new(config.layout, labels, config.score_threshold)
            .with_input_size(config.input_size)
            .with_box_units(config.box_units)
            .with_output_space(config.output_space)
    }

    pub fn with_input_size(mut self, input_size: u32) -> Self {
        self.input_size = input_size;
        self
    }

    pub fn with_box_units(mut self, box_units: BoxUnits) -> Self {
        self.box_units = box_units;
        self
    }

    pub fn with_output_space(mut self, output_space: OutputSpace) -> Self {
        self.output_space = output_space;
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Validate a declared output shape against the layout and vocabulary.
    ///
    /// A class count that differs from the vocabulary is tolerated; the
    /// surplus indices decode with the unknown label.
    pub fn check_shape(&self, shape: &[usize]) -> Result<TensorDims, TensorError> {
        let dims = self.layout.dims(shape)?;
        let classes = self.layout.classes(dims);
        if classes != self.labels.len() {
            warn!(
                classes,
                labels = self.labels.len(),
                "tensor class count differs from label vocabulary"
            );
        }
        Ok(dims)
    }

    /// Decode every candidate scoring strictly above the threshold.
    ///
    /// Detections come back in ascending candidate order. Candidates with
    /// non-finite values or zero-area boxes are skipped.
    pub fn decode(
        &self,
        tensor: RawTensor<'_>,
        frame: FrameSize,
    ) -> Result<Vec<Detection>, TensorError> {
        let dims = self.layout.dims(tensor.shape())?;
        let rows = self.layout.view(tensor.data(), dims)?;

        let input = self.input_size as f32;
        let unit = match self.box_units {
            BoxUnits::ModelPixels => 1.0,
            BoxUnits::Normalized => input,
        };
        let (sx, sy) = match self.output_space {
            OutputSpace::Model => (1.0, 1.0),
            OutputSpace::Image if frame.is_empty() => {
                warn!(?frame, "cannot scale boxes into an empty frame");
                return Ok(Vec::new());
            }
            OutputSpace::Image => (frame.width as f32 / input, frame.height as f32 / input),
        };

        let header = self.layout.box_attributes();
        let mut detections = Vec::new();

        'candidates: for (candidate, row) in rows.outer_iter().enumerate() {
            let objectness = if self.layout.has_objectness() {
                row[4]
            } else {
                1.0
            };
            if !objectness.is_finite() {
                trace!(candidate, "non-finite objectness");
                continue;
            }

            // Ascending scan with strict comparison: ties keep the lowest index.
            let mut best = None;
            let mut max_score = 0.0f32;
            for (class_id, &raw) in row.iter().skip(header).enumerate() {
                let score = raw * objectness;
                if !score.is_finite() {
                    trace!(candidate, class_id, "non-finite class score");
                    continue 'candidates;
                }
                if score > max_score {
                    max_score = score;
                    best = Some(class_id);
                }
            }

            let Some(class_id) = best else {
                continue;
            };
            if max_score <= self.score_threshold {
                continue;
            }

            let mut detection = DetectionBuilder::new()
                .xywh(row[0] * unit, row[1] * unit, row[2] * unit, row[3] * unit)
                .score(max_score)
                .class(class_id, self.labels.resolve(class_id))
                .build();
            detection.bbox = detection.bbox.scale(sx, sy);

            if detection.bbox.is_degenerate() {
                debug!(candidate, bbox = ?detection.bbox, "skipping degenerate box");
                continue;
            }
            detections.push(detection);
        }

        trace!(
            candidates = dims.candidates,
            kept = detections.len(),
            "decoded"
        );
        Ok(detections)
    }
}
