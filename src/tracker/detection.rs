//! Detection record shared by the decoder, suppressor and tracker.

use crate::tracker::rect::Rect;

/// Label used when a class index has no entry in the vocabulary.
pub const UNKNOWN_LABEL: &str = "unknown";

/// A single labeled, scored box.
///
/// The coordinate space of `bbox` is fixed per pipeline by
/// [`OutputSpace`](crate::config::OutputSpace).
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box
    pub bbox: Rect,
    /// Best class confidence
    pub score: f32,
    /// Index of the winning class
    pub class_id: usize,
    /// Label resolved from `class_id`
    pub label: String,
}

impl Detection {
    /// Create a detection from TLBR coordinates.
    pub fn new(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        score: f32,
        class_id: usize,
        label: impl Into<String>,
    ) -> Self {
        Self::from_rect(Rect::from_tlbr(x1, y1, x2, y2), score, class_id, label)
    }

    pub fn from_rect(bbox: Rect, score: f32, class_id: usize, label: impl Into<String>) -> Self {
        Self {
            bbox,
            score,
            class_id,
            label: label.into(),
        }
    }

    /// Center of the bounding box.
    #[inline]
    pub fn centroid(&self) -> (f32, f32) {
        self.bbox.center()
    }
}
