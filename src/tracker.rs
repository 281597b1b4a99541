mod centroid_tracker;
mod detection;
mod rect;
mod tracked_object;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use detection::{Detection, UNKNOWN_LABEL};
pub use rect::Rect;
pub use tracked_object::TrackedObject;
