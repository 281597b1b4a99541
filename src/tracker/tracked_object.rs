//! Single object tracked across frames.

use crate::tracker::detection::Detection;
use crate::tracker::rect::Rect;

/// An object with a stable identity.
///
/// Carries the most recent matched detection's box, label and score.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Unique identifier, never reused by the tracker that assigned it
    pub id: u64,
    /// Last matched bounding box
    pub bbox: Rect,
    /// Last matched confidence score
    pub score: f32,
    /// Last matched class index
    pub class_id: usize,
    /// Last matched label
    pub label: String,
    /// Consecutive frames this object has gone unmatched
    pub frames_without_detection: u32,
}

impl TrackedObject {
    pub(crate) fn register(id: u64, detection: Detection) -> Self {
        Self {
            id,
            bbox: detection.bbox,
            score: detection.score,
            class_id: detection.class_id,
            label: detection.label,
            frames_without_detection: 0,
        }
    }

    /// Overwrite box, label and score from a matched detection.
    pub(crate) fn refresh(&mut self, detection: &Detection) {
        self.bbox = detection.bbox;
        self.score = detection.score;
        self.class_id = detection.class_id;
        self.label.clone_from(&detection.label);
        self.frames_without_detection = 0;
    }

    #[inline]
    pub fn centroid(&self) -> (f32, f32) {
        self.bbox.center()
    }
}
