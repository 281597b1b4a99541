//! Pipelines combining post-processing with centroid tracking.

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::postprocess::{FrameSize, Labels, Postprocessor, RawTensor};
use crate::tracker::{CentroidTracker, Detection, TrackedObject};

use super::TensorSource;

/// Decode, suppress and track frames handed over as raw tensors.
///
/// Frames must arrive in order from a single owner.
#[derive(Debug, Clone)]
pub struct FramePipeline {
    postprocessor: Postprocessor,
    tracker: CentroidTracker,
}

impl FramePipeline {
    /// Validate the configuration and the model's declared output shape.
    pub fn new(
        config: &PipelineConfig,
        labels: Labels,
        output_shape: &[usize],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            postprocessor: Postprocessor::new(config, labels, output_shape)?,
            tracker: CentroidTracker::new(config.tracker.clone()),
        })
    }

    /// Detections for one frame without touching the tracker.
    pub fn detect(&self, tensor: RawTensor<'_>, frame: FrameSize) -> Vec<Detection> {
        self.postprocessor.run(tensor, frame)
    }

    /// Detections for one frame, associated into tracked objects sorted by id.
    pub fn process(&mut self, tensor: RawTensor<'_>, frame: FrameSize) -> Vec<TrackedObject> {
        let detections = self.postprocessor.run(tensor, frame);
        self.tracker.update(detections)
    }

    pub fn postprocessor(&self) -> &Postprocessor {
        &self.postprocessor
    }

    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut CentroidTracker {
        &mut self.tracker
    }
}

/// A [`FramePipeline`] driven by an inference backend.
pub struct TrackerPipeline<S: TensorSource> {
    source: S,
    frames: FramePipeline,
}

impl<S: TensorSource> TrackerPipeline<S> {
    pub fn new(source: S, frames: FramePipeline) -> Self {
        Self { source, frames }
    }

    /// Run inference on one image and return the tracked objects.
    ///
    /// Only inference failures are returned; post-processing problems drop
    /// detections instead.
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<TrackedObject>, S::Error> {
        let output = self.source.infer(input, width, height)?;
        let frame = FrameSize::new(width, height);
        Ok(self.frames.process(output.view(), frame))
    }

    /// Get a reference to the underlying inference source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a mutable reference to the underlying inference source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn frames(&self) -> &FramePipeline {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut FramePipeline {
        &mut self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postprocess::{Layout, TensorBuf};

    struct MockSource {
        outputs: Vec<Vec<f32>>,
    }

    impl TensorSource for MockSource {
        type Error = &'static str;

        fn infer(
            &mut self,
            _input: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<TensorBuf, Self::Error> {
            if self.outputs.is_empty() {
                return Err("no more frames");
            }
            TensorBuf::new(self.outputs.remove(0), vec![1, 1, 6]).map_err(|_| "bad output")
        }
    }

    fn pipeline(outputs: Vec<Vec<f32>>) -> TrackerPipeline<MockSource> {
        let config = PipelineConfig {
            layout: Layout::Interleaved,
            ..Default::default()
        };
        let labels = Labels::parse("person\ncar").unwrap();
        let frames = FramePipeline::new(&config, labels, &[1, 1, 6]).unwrap();
        TrackerPipeline::new(MockSource { outputs }, frames)
    }

    #[test]
    fn test_tracker_pipeline() {
        let mut pipeline = pipeline(vec![
            vec![100.0, 100.0, 20.0, 20.0, 0.9, 0.1],
            vec![104.0, 103.0, 20.0, 20.0, 0.8, 0.1],
        ]);

        let first = pipeline.process_frame(&[], 640, 640).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].label, "person");

        let second = pipeline.process_frame(&[], 640, 640).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(second[0].centroid(), (104.0, 103.0));
    }

    #[test]
    fn test_inference_error_propagates() {
        let mut pipeline = pipeline(vec![]);
        assert_eq!(pipeline.process_frame(&[], 640, 640), Err("no more frames"));
    }
}
