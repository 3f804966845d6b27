//! Hand-tracker overlay — an owned camera/model resource with a latest-value
//! mailbox.
//!
//! One tracker owns one camera and one pose model. Acquisition and
//! inference run on a background thread that overwrites the detection
//! mailbox; the display loop calls [`OverlayTracker::render`] each refresh
//! and draws whatever snapshot is current. The thread is joined on `stop`
//! or drop, so the camera is releasable (unlike a process-wide singleton).
//!
//! Camera permission is requested exactly once, at start. On denial the
//! tracker still constructs: its first render draws a fallback frame with a
//! message, and the camera is never touched again.

pub mod detection;
pub mod mailbox;
pub mod overlay;
pub mod source;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::surface::{DrawSurface, PixelFrame};

pub use detection::{Detection, HandRecord, Handedness, Keypoint, HAND_EDGES, KEYPOINT_COUNT};
pub use mailbox::DetectionSlot;
pub use overlay::{draw_overlay, GestureFn};
pub use source::{CameraSource, PoseModel, SyntheticCamera, SyntheticModel, TrackerError};

/// Tracker behavior and styling.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Hands at or below this confidence are ignored.
    pub score_threshold: f32,
    /// Interval between model-readiness polls.
    pub poll_interval: Duration,
    /// Readiness polls before giving up on the model.
    pub max_polls: u32,
    /// Pace of the acquisition loop once running.
    pub frame_interval: Duration,
    pub left_color: String,
    pub right_color: String,
    pub label_color: String,
    pub fallback_color: String,
    pub fallback_message: String,
    pub font_family: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            score_threshold: 0.8,
            poll_interval: Duration::from_millis(50),
            max_polls: 100,
            frame_interval: Duration::from_millis(16),
            left_color: "#ff0000".to_string(),
            right_color: "#00ff00".to_string(),
            label_color: "#ffffff".to_string(),
            fallback_color: "#222222".to_string(),
            fallback_message: "camera unavailable".to_string(),
            font_family: "monospace".to_string(),
        }
    }
}

enum TrackerState {
    /// Camera denied: draw the fallback once, never retry.
    Denied { fallback_drawn: bool },
    Running,
}

/// The overlay tracker resource. Construct with [`OverlayTracker::start`];
/// stop explicitly or let drop join the acquisition thread.
pub struct OverlayTracker {
    config: TrackerConfig,
    state: TrackerState,
    detections: Arc<DetectionSlot>,
    frame_slot: Arc<Mutex<Option<PixelFrame>>>,
    gesture: Option<GestureFn>,
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl OverlayTracker {
    /// Request camera permission and start the acquisition thread.
    ///
    /// Denial is not an error: the returned tracker renders the fallback
    /// frame instead of camera output and makes no further camera calls.
    pub fn start(
        mut camera: Box<dyn CameraSource>,
        model: Box<dyn PoseModel>,
        config: TrackerConfig,
    ) -> Self {
        let detections = Arc::new(DetectionSlot::new());
        let frame_slot = Arc::new(Mutex::new(None));
        let stop_flag = Arc::new(AtomicBool::new(false));

        if let Err(e) = camera.request_permission() {
            log::warn!("hand tracker disabled: {e}");
            return Self {
                config,
                state: TrackerState::Denied { fallback_drawn: false },
                detections,
                frame_slot,
                gesture: None,
                stop_flag,
                thread: None,
            };
        }

        let thread = thread::spawn({
            let detections = detections.clone();
            let frame_slot = frame_slot.clone();
            let stop = stop_flag.clone();
            let poll_interval = config.poll_interval;
            let max_polls = config.max_polls;
            let frame_interval = config.frame_interval;
            move || {
                let mut camera = camera;
                let mut model = model;
                acquisition_loop(
                    &mut *camera,
                    &mut *model,
                    &detections,
                    &frame_slot,
                    &stop,
                    poll_interval,
                    max_polls,
                    frame_interval,
                );
            }
        });

        Self {
            config,
            state: TrackerState::Running,
            detections,
            frame_slot,
            gesture: None,
            stop_flag,
            thread: Some(thread),
        }
    }

    /// Install the per-hand gesture callback.
    pub fn set_gesture_callback(&mut self, callback: GestureFn) {
        self.gesture = Some(callback);
    }

    /// Latest detection snapshot, if any has arrived.
    pub fn latest_detection(&self) -> Option<Detection> {
        self.detections.latest()
    }

    /// Whether the camera was denied at start.
    pub fn is_denied(&self) -> bool {
        matches!(self.state, TrackerState::Denied { .. })
    }

    /// Draw one overlay frame. Called from the display refresh loop,
    /// independent of pattern playback.
    pub fn render(&mut self, surface: &mut dyn DrawSurface) {
        match &mut self.state {
            TrackerState::Denied { fallback_drawn } => {
                if !*fallback_drawn {
                    let (cx, cy) = (surface.width() / 2.0, surface.height() / 2.0);
                    surface.clear(&self.config.fallback_color);
                    surface.text(
                        cx,
                        cy,
                        &self.config.fallback_message,
                        &self.config.label_color,
                        &self.config.font_family,
                    );
                    *fallback_drawn = true;
                }
            }
            TrackerState::Running => {
                let frame = self.frame_slot.lock().ok().and_then(|f| f.clone());
                let detection = self.detections.latest();
                draw_overlay(
                    surface,
                    frame.as_ref(),
                    detection.as_ref(),
                    &self.config,
                    self.gesture.as_mut(),
                );
            }
        }
    }

    /// Stop the acquisition thread and release the camera. Idempotent.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for OverlayTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[allow(clippy::too_many_arguments)]
fn acquisition_loop(
    camera: &mut dyn CameraSource,
    model: &mut dyn PoseModel,
    detections: &DetectionSlot,
    frame_slot: &Mutex<Option<PixelFrame>>,
    stop: &AtomicBool,
    poll_interval: Duration,
    max_polls: u32,
    frame_interval: Duration,
) {
    // Bounded wait for the model to finish loading.
    let mut polls = 0;
    while !model.is_ready() {
        polls += 1;
        if polls >= max_polls {
            log::warn!("{}", TrackerError::ModelTimeout);
            return;
        }
        if stop.load(Ordering::Relaxed) {
            return;
        }
        thread::sleep(poll_interval);
    }

    while !stop.load(Ordering::Relaxed) {
        if let Some(frame) = camera.latest_frame() {
            if let Some(detection) = model.detect(&frame) {
                detections.store(detection);
            }
            if let Ok(mut slot) = frame_slot.lock() {
                *slot = Some(frame);
            }
        }
        thread::sleep(frame_interval);
    }
}
