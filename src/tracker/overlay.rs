//! Overlay drawing — camera frame, hand skeletons, pinch-distance labels.
//!
//! Pure given its inputs: the tracker resource feeds it the latest camera
//! frame and detection snapshot each display tick.

use crate::surface::{DrawSurface, PixelFrame};

use super::detection::{Detection, HandRecord, Handedness, HAND_EDGES};
use super::TrackerConfig;

/// Callback invoked once per qualifying hand per frame with the pinch
/// distance and the full hand record. Extension point for gesture control.
pub type GestureFn = Box<dyn FnMut(f64, &HandRecord) + Send>;

/// Draw one overlay frame.
///
/// Hands below the confidence threshold are ignored entirely: not drawn,
/// no callback.
pub fn draw_overlay(
    surface: &mut dyn DrawSurface,
    camera_frame: Option<&PixelFrame>,
    detection: Option<&Detection>,
    config: &TrackerConfig,
    mut gesture: Option<&mut GestureFn>,
) {
    if let Some(frame) = camera_frame {
        surface.blit(frame);
    }

    let Some(detection) = detection else {
        return;
    };

    for hand in &detection.hands {
        if hand.score <= config.score_threshold {
            continue;
        }

        let color = match hand.handedness {
            Handedness::Left => config.left_color.as_str(),
            Handedness::Right => config.right_color.as_str(),
        };

        for &(a, b) in &HAND_EDGES {
            let ka = hand.keypoints[a];
            let kb = hand.keypoints[b];
            surface.line(ka.x, ka.y, kb.x, kb.y, color);
        }

        let distance = hand.pinch_distance();
        let mid = hand.pinch_midpoint();
        surface.text(
            mid.x,
            mid.y,
            &format!("{distance:.0}"),
            &config.label_color,
            &config.font_family,
        );

        if let Some(cb) = gesture.as_deref_mut() {
            cb(distance, hand);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface};
    use crate::tracker::detection::{Keypoint, INDEX_TIP, KEYPOINT_COUNT, THUMB_TIP};
    use assert_approx_eq::assert_approx_eq;
    use std::sync::{Arc, Mutex};

    fn hand(score: f32, handedness: Handedness) -> HandRecord {
        let mut keypoints = [Keypoint::new(5.0, 5.0); KEYPOINT_COUNT];
        keypoints[THUMB_TIP] = Keypoint::new(10.0, 0.0);
        keypoints[INDEX_TIP] = Keypoint::new(10.0, 30.0);
        HandRecord {
            score,
            handedness,
            keypoints,
        }
    }

    #[test]
    fn draws_frame_skeleton_and_label() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let frame = PixelFrame::solid(4, 4, [0, 0, 0, 255]);
        let detection = Detection {
            hands: vec![hand(0.9, Handedness::Right)],
        };
        draw_overlay(
            &mut surface,
            Some(&frame),
            Some(&detection),
            &TrackerConfig::default(),
            None,
        );

        assert_eq!(surface.count(|op| matches!(op, DrawOp::Blit { .. })), 1);
        assert_eq!(
            surface.count(|op| matches!(op, DrawOp::Line { .. })),
            HAND_EDGES.len()
        );
        // Distance 30 labelled at the tip midpoint.
        assert!(surface.ops().iter().any(
            |op| matches!(op, DrawOp::Text { text, x, y, .. } if text == "30" && *x == 10.0 && *y == 15.0)
        ));
    }

    #[test]
    fn low_confidence_hands_are_skipped() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let detection = Detection {
            hands: vec![hand(0.5, Handedness::Left)],
        };
        let calls = Arc::new(Mutex::new(0u32));
        let calls2 = calls.clone();
        let mut gesture: GestureFn = Box::new(move |_, _| {
            *calls2.lock().unwrap() += 1;
        });
        draw_overlay(
            &mut surface,
            None,
            Some(&detection),
            &TrackerConfig::default(),
            Some(&mut gesture),
        );

        assert_eq!(surface.count(|op| matches!(op, DrawOp::Line { .. })), 0);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn hands_are_colored_by_handedness() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let config = TrackerConfig::default();
        let detection = Detection {
            hands: vec![hand(0.9, Handedness::Left), hand(0.9, Handedness::Right)],
        };
        draw_overlay(&mut surface, None, Some(&detection), &config, None);

        let left_lines = surface.count(
            |op| matches!(op, DrawOp::Line { style, .. } if *style == config.left_color),
        );
        let right_lines = surface.count(
            |op| matches!(op, DrawOp::Line { style, .. } if *style == config.right_color),
        );
        assert_eq!(left_lines, HAND_EDGES.len());
        assert_eq!(right_lines, HAND_EDGES.len());
    }

    #[test]
    fn gesture_callback_reports_exact_distance_per_hand() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let detection = Detection {
            hands: vec![hand(0.9, Handedness::Left), hand(0.95, Handedness::Right)],
        };
        let seen: Arc<Mutex<Vec<f64>>> = Arc::new(Mutex::new(Vec::new()));
        let seen2 = seen.clone();
        let mut gesture: GestureFn = Box::new(move |d, _| {
            seen2.lock().unwrap().push(d);
        });
        draw_overlay(
            &mut surface,
            None,
            Some(&detection),
            &TrackerConfig::default(),
            Some(&mut gesture),
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        for d in seen.iter() {
            assert_approx_eq!(*d, 30.0);
        }
    }

    #[test]
    fn no_detection_draws_only_camera_frame() {
        let mut surface = RecordingSurface::new(640.0, 480.0);
        let frame = PixelFrame::solid(4, 4, [0, 0, 0, 255]);
        draw_overlay(
            &mut surface,
            Some(&frame),
            None,
            &TrackerConfig::default(),
            None,
        );
        assert_eq!(surface.ops().len(), 1);
    }
}
