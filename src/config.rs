//! Pipeline configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::postprocess::Layout;
use crate::tracker::TrackerConfig;

/// Units of the raw `cx, cy, w, h` values in the output tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxUnits {
    /// Model input pixels, e.g. 0..640.
    #[default]
    ModelPixels,
    /// Fractions of the model input, 0..1.
    Normalized,
}

/// Coordinate space of every box the pipeline emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputSpace {
    /// Model input pixels, `0..input_size` on both axes.
    #[default]
    Model,
    /// Source frame pixels, scaled by `frame / input_size` per axis.
    Image,
}

/// Configuration for decoding, suppression and tracking.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub layout: Layout,
    /// Candidates must score strictly above this.
    pub score_threshold: f32,
    /// Boxes overlapping an accepted box by more than this are suppressed.
    pub iou_threshold: f32,
    pub max_results: usize,
    /// Side of the square model input.
    pub input_size: u32,
    pub box_units: BoxUnits,
    pub output_space: OutputSpace,
    pub tracker: TrackerConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            score_threshold: 0.5,
            iou_threshold: 0.5,
            max_results: 10,
            input_size: 640,
            box_units: BoxUnits::default(),
            output_space: OutputSpace::default(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.score_threshold > 0.0 && self.score_threshold <= 1.0) {
            return Err(ConfigError::invalid("score_threshold", self.score_threshold));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(ConfigError::invalid("iou_threshold", self.iou_threshold));
        }
        if self.max_results == 0 {
            return Err(ConfigError::invalid("max_results", self.max_results));
        }
        if self.input_size == 0 {
            return Err(ConfigError::invalid("input_size", self.input_size));
        }
        let max_distance = self.tracker.max_distance;
        if !(max_distance.is_finite() && max_distance > 0.0) {
            return Err(ConfigError::invalid("tracker.max_distance", max_distance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        PipelineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json() {
        let config = PipelineConfig::from_json_str(
            r#"{
                "layout": "objectness-prefixed",
                "iou_threshold": 0.45,
                "output_space": "image",
                "tracker": { "max_frames_to_live": 5 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.layout, Layout::ObjectnessPrefixed);
        assert_eq!(config.iou_threshold, 0.45);
        assert_eq!(config.output_space, OutputSpace::Image);
        assert_eq!(config.score_threshold, 0.5);
        assert_eq!(config.tracker.max_frames_to_live, 5);
        assert_eq!(config.tracker.max_distance, 100.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_threshold = PipelineConfig {
            score_threshold: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            zero_threshold.validate(),
            Err(ConfigError::Invalid { name: "score_threshold", .. })
        ));

        let no_results = PipelineConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(no_results.validate().is_err());

        assert!(matches!(
            PipelineConfig::from_json_str(r#"{ "layout": "sideways" }"#),
            Err(ConfigError::Json(_))
        ));
    }
}
