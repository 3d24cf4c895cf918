//! Choosing the bag among detector outputs

use crate::domain::Detection;

/// Pick the detection that most likely is the passenger's bag.
///
/// Class priority first (suitcase, backpack, handbag, other), then the
/// highest confidence. Ties keep the earlier detection.
pub fn pick_best(detections: &[Detection]) -> Option<&Detection> {
    detections.iter().min_by(|a, b| {
        a.class
            .cmp(&b.class)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::BoundingBox;
    use crate::domain::DetectedClass;

    fn det(class: DetectedClass, confidence: f64) -> Detection {
        Detection {
            class,
            confidence,
            bbox: BoundingBox {
                x: 0.0,
                y: 0.0,
                w: 10.0,
                h: 10.0,
            },
        }
    }

    #[test]
    fn empty_input_has_no_best() {
        assert!(pick_best(&[]).is_none());
    }

    #[test]
    fn class_priority_beats_confidence() {
        let dets = vec![
            det(DetectedClass::Backpack, 0.95),
            det(DetectedClass::Suitcase, 0.51),
            det(DetectedClass::Other, 0.99),
        ];
        assert_eq!(pick_best(&dets).unwrap().class, DetectedClass::Suitcase);
    }

    #[test]
    fn confidence_breaks_ties_within_class() {
        let dets = vec![
            det(DetectedClass::Handbag, 0.60),
            det(DetectedClass::Handbag, 0.90),
        ];
        assert_eq!(pick_best(&dets).unwrap().confidence, 0.90);
    }
}
