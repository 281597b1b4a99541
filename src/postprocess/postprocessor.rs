//! Decode followed by suppression, validated once at construction.

use tracing::{debug, warn};

use crate::config::PipelineConfig;
use crate::error::{ConfigError, TensorError};
use crate::postprocess::decoder::{Decoder, FrameSize};
use crate::postprocess::labels::Labels;
use crate::postprocess::nms::non_max_suppression;
use crate::postprocess::tensor::RawTensor;
use crate::tracker::Detection;

/// Stateless per-frame post-processing: decode, then non-max suppression.
#[derive(Debug, Clone)]
pub struct Postprocessor {
    decoder: Decoder,
    output_shape: Vec<usize>,
    iou_threshold: f32,
    max_results: usize,
}

impl Postprocessor {
    /// Validate `config` and the model's declared output shape.
    pub fn new(
        config: &PipelineConfig,
        labels: Labels,
        output_shape: &[usize],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let decoder = Decoder::from_config(config, labels);
        let dims = decoder.check_shape(output_shape)?;
        debug!(
            layout = ?config.layout,
            candidates = dims.candidates,
            attributes = dims.attributes,
            "postprocessor ready"
        );

        Ok(Self {
            decoder,
            output_shape: output_shape.to_vec(),
            iou_threshold: config.iou_threshold,
            max_results: config.max_results,
        })
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    pub fn output_shape(&self) -> &[usize] {
        &self.output_shape
    }

    /// Decode and suppress one frame.
    ///
    /// A tensor that does not match the configured shape is logged and
    /// yields no detections.
    pub fn run(&self, tensor: RawTensor<'_>, frame: FrameSize) -> Vec<Detection> {
        match self.try_run(tensor, frame) {
            Ok(detections) => detections,
            Err(e) => {
                warn!(error = %e, "dropping frame tensor");
                Vec::new()
            }
        }
    }

    fn try_run(
        &self,
        tensor: RawTensor<'_>,
        frame: FrameSize,
    ) -> Result<Vec<Detection>, TensorError> {
        if tensor.shape() != self.output_shape.as_slice() {
            return Err(TensorError::UnexpectedShape {
                expected: self.output_shape.clone(),
                got: tensor.shape().to_vec(),
            });
        }
        let candidates = self.decoder.decode(tensor, frame)?;
        Ok(non_max_suppression(candidates, self.iou_threshold, self.max_results))
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::postprocess::Layout;

    fn config() -> PipelineConfig {
        PipelineConfig {
            layout: Layout::Interleaved,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_incompatible_shape() {
        let labels = Labels::parse("a").unwrap();
        let err = Postprocessor::new(&config(), labels, &[2, 10, 5]).unwrap_err();
        assert!(matches!(err, ConfigError::Tensor(TensorError::Batch(2))));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let labels = Labels::parse("a").unwrap();
        let config = PipelineConfig {
            iou_threshold: 1.5,
            ..config()
        };
        assert!(matches!(
            Postprocessor::new(&config, labels, &[1, 1, 5]),
            Err(ConfigError::Invalid { name: "iou_threshold", .. })
        ));
    }

    #[test]
    fn test_decodes_and_suppresses() {
        let data = [
            5.0, 5.0, 10.0, 10.0, 0.9, //
            6.0, 6.0, 10.0, 10.0, 0.8, //
            100.0, 100.0, 10.0, 10.0, 0.7, //
        ];
        let shape = [1, 3, 5];
        let post = Postprocessor::new(&config(), Labels::parse("a").unwrap(), &shape).unwrap();
        let detections = post.run(RawTensor::new(&data, &shape).unwrap(), FrameSize::default());

        let scores: Vec<f32> = detections.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.7]);
    }

    #[test]
    #[traced_test]
    fn test_unexpected_frame_shape_yields_nothing() {
        let data = [5.0, 5.0, 10.0, 10.0, 0.9];
        let post =
            Postprocessor::new(&config(), Labels::parse("a").unwrap(), &[1, 3, 5]).unwrap();
        let tensor = RawTensor::new(&data, &[1, 1, 5]).unwrap();
        let detections = post.run(tensor, FrameSize::default());
        assert!(detections.is_empty());
        assert!(logs_contain("dropping frame tensor"));
    }
}
