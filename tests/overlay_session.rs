//! Shared-surface session tests — pattern roll and hand overlay interleaving.
//!
//! The two loops are independent: the paint driver follows playback time,
//! the tracker follows the display refresh. Each writes whole frames, so
//! they can interleave on one surface at tick granularity without locking.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rollscope::pattern::{HapValue, LoopPattern};
use rollscope::roll::{PaintDriver, PaintOptions};
use rollscope::surface::{DrawOp, PixelFrame, RecordingSurface};
use rollscope::tracker::{
    Detection, HandRecord, Handedness, Keypoint, OverlayTracker, SyntheticCamera, SyntheticModel,
    TrackerConfig, KEYPOINT_COUNT,
};

fn fast_tracker(detection: Option<Detection>) -> OverlayTracker {
    let camera = SyntheticCamera::new(vec![PixelFrame::solid(8, 8, [1, 2, 3, 255])]);
    let model = SyntheticModel::ready(detection);
    let config = TrackerConfig {
        poll_interval: Duration::from_millis(1),
        frame_interval: Duration::from_millis(1),
        ..Default::default()
    };
    OverlayTracker::start(Box::new(camera), Box::new(model), config)
}

fn one_hand() -> Detection {
    Detection {
        hands: vec![HandRecord {
            score: 0.9,
            handedness: Handedness::Right,
            keypoints: [Keypoint::new(3.0, 3.0); KEYPOINT_COUNT],
        }],
    }
}

fn wait_for_detection(tracker: &OverlayTracker) {
    for _ in 0..200 {
        if tracker.latest_detection().is_some() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("tracker never delivered a detection");
}

#[test]
fn roll_and_overlay_interleave_on_one_surface() {
    let mut driver = PaintDriver::new();
    driver.attach_default(
        Arc::new(LoopPattern::from_values(vec![HapValue::Pitch(60.0)])),
        PaintOptions::default(),
    );
    let mut tracker = fast_tracker(Some(one_hand()));
    wait_for_detection(&tracker);

    let mut surface = RecordingSurface::new(640.0, 480.0);
    driver.tick(0.25, &mut surface);
    tracker.render(&mut surface);
    driver.tick(0.26, &mut surface);

    assert!(surface.count(|op| matches!(op, DrawOp::FillRect { .. })) >= 2);
    assert_eq!(surface.count(|op| matches!(op, DrawOp::Blit { .. })), 1);

    tracker.stop();
}

#[test]
fn detaching_the_roll_leaves_the_tracker_running() {
    let mut driver = PaintDriver::new();
    let handle = driver.attach_default(
        Arc::new(LoopPattern::from_values(vec![HapValue::Pitch(60.0)])),
        PaintOptions::default(),
    );
    let mut tracker = fast_tracker(Some(one_hand()));
    wait_for_detection(&tracker);

    assert!(driver.detach(handle.id()));

    let mut surface = RecordingSurface::new(640.0, 480.0);
    driver.tick(1.0, &mut surface);
    assert!(surface.ops().is_empty());

    tracker.render(&mut surface);
    assert_eq!(surface.count(|op| matches!(op, DrawOp::Blit { .. })), 1);

    tracker.stop();
}
