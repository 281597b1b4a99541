//! Nearest-centroid multi-object tracker.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::trace;

use crate::tracker::detection::Detection;
use crate::tracker::tracked_object::TrackedObject;

/// Configuration for the [`CentroidTracker`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Centroids must be strictly closer than this to associate, in box units.
    pub max_distance: f32,
    /// Unmatched frames tolerated before an object is evicted.
    pub max_frames_to_live: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            max_frames_to_live: 10,
        }
    }
}

/// Associates per-frame detections into objects with stable ids.
///
/// Matching is greedy: tracked objects are visited in ascending id order and
/// each claims the nearest detection not yet claimed. This is not a globally
/// optimal assignment and can pair suboptimally when detections are dense.
///
/// The tracker must be fed frames in order from a single owner; it holds no
/// locks.
#[derive(Debug, Clone)]
pub struct CentroidTracker {
    objects: BTreeMap<u64, TrackedObject>,
    next_id: u64,
    config: TrackerConfig,
}

impl Default for CentroidTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Feed one frame of detections and return the current objects sorted by id.
    pub fn update(&mut self, detections: Vec<Detection>) -> Vec<TrackedObject> {
        for object in self.objects.values_mut() {
            object.frames_without_detection = object.frames_without_detection.saturating_add(1);
        }

        if self.objects.is_empty() {
            for detection in detections {
                self.register(detection);
            }
            return self.objects();
        }

        if detections.is_empty() {
            self.evict_stale();
            return self.objects();
        }

        let mut used = vec![false; detections.len()];
        for object in self.objects.values_mut() {
            let closest = detections
                .iter()
                .enumerate()
                .filter(|(i, _)| !used[*i])
                .map(|(i, d)| (i, object.bbox.centroid_distance(&d.bbox)))
                .fold(None, |best: Option<(usize, f32)>, (i, dist)| match best {
                    Some((_, best_dist)) if best_dist <= dist => best,
                    _ => Some((i, dist)),
                });

            if let Some((idx, dist)) = closest {
                if dist < self.config.max_distance {
                    trace!(id = object.id, detection = idx, dist, "matched");
                    object.refresh(&detections[idx]);
                    used[idx] = true;
                }
            }
        }

        for (detection, used) in detections.into_iter().zip(used) {
            if !used {
                self.register(detection);
            }
        }

        self.evict_stale();
        self.objects()
    }

    /// Snapshot of every tracked object, sorted by id.
    pub fn objects(&self) -> Vec<TrackedObject> {
        self.objects.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<&TrackedObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Id the next registered object will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Drop every tracked object. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    fn register(&mut self, detection: Detection) {
        let id = self.next_id;
        self.next_id += 1;
        trace!(id, label = %detection.label, "registered");
        self.objects.insert(id, TrackedObject::register(id, detection));
    }

    fn evict_stale(&mut self) {
        let ttl = self.config.max_frames_to_live;
        self.objects.retain(|&id, object| {
            let keep = object.frames_without_detection <= ttl;
            if !keep {
                trace!(id, "evicted");
            }
            keep
        });
    }
}
