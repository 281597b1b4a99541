//! Greedy non-max suppression.

use crate::tracker::Detection;

/// Keep the highest-scoring detections, dropping any box that overlaps an
/// already kept one by more than `iou_threshold`.
///
/// The result is sorted by descending score and holds at most `max_results`
/// entries. Equal scores keep their input order.
pub fn non_max_suppression(
    mut detections: Vec<Detection>,
    iou_threshold: f32,
    max_results: usize,
) -> Vec<Detection> {
    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<Detection> = Vec::with_capacity(max_results.min(detections.len()));
    for detection in detections {
        if kept.len() >= max_results {
            break;
        }
        let overlaps = kept
            .iter()
            .any(|k| k.bbox.iou(&detection.bbox) > iou_threshold);
        if !overlaps {
            kept.push(detection);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(x1: f32, y1: f32, x2: f32, y2: f32, score: f32) -> Detection {
        Detection::new(x1, y1, x2, y2, score, 0, "person")
    }

    #[test]
    fn test_overlapping_lower_score_suppressed() {
        let kept = non_max_suppression(
            vec![
                det(1.0, 1.0, 11.0, 11.0, 0.8),
                det(0.0, 0.0, 10.0, 10.0, 0.9),
            ],
            0.5,
            10,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn test_disjoint_boxes_sorted() {
        let kept = non_max_suppression(
            vec![
                det(0.0, 0.0, 10.0, 10.0, 0.6),
                det(20.0, 0.0, 30.0, 10.0, 0.9),
                det(40.0, 0.0, 50.0, 10.0, 0.7),
            ],
            0.5,
            10,
        );
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.7, 0.6]);
    }

    #[test]
    fn test_max_results_cap() {
        let detections = (0..5)
            .map(|i| {
                let x = i as f32 * 20.0;
                det(x, 0.0, x + 10.0, 10.0, 0.9 - i as f32 * 0.1)
            })
            .collect();
        let kept = non_max_suppression(detections, 0.5, 3);
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[2].bbox.x, 40.0);
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let kept = non_max_suppression(
            vec![
                det(0.0, 0.0, 10.0, 10.0, 0.8),
                det(0.0, 0.0, 10.0, 10.0, 0.8),
                det(50.0, 0.0, 60.0, 10.0, 0.8),
            ],
            0.5,
            10,
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].bbox.x, 0.0);
        assert_eq!(kept[1].bbox.x, 50.0);
    }

    #[test]
    fn test_iou_equal_to_threshold_is_kept() {
        // Intersection 50, union 150.
        let kept = non_max_suppression(
            vec![
                det(0.0, 0.0, 10.0, 10.0, 0.9),
                det(5.0, 0.0, 15.0, 10.0, 0.8),
            ],
            50.0 / 150.0,
            10,
        );
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(non_max_suppression(Vec::new(), 0.5, 10).is_empty());
    }
}
