//! Camera and pose-model collaborator traits, plus in-process doubles.
//!
//! Real acquisition and inference live outside this crate; the tracker only
//! needs permissioned frame access and a ready-gated detector. The synthetic
//! implementations here drive the demo binary and tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use crate::surface::PixelFrame;

use super::detection::Detection;

/// Errors from the tracker's external collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// The user (or platform) denied camera access.
    PermissionDenied(String),
    /// The pose model never became ready within the polling budget.
    ModelTimeout,
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::PermissionDenied(why) => {
                write!(f, "camera permission denied: {why}")
            }
            TrackerError::ModelTimeout => write!(f, "pose model did not become ready"),
        }
    }
}

impl std::error::Error for TrackerError {}

/// A live camera. Permission is requested once, up front.
pub trait CameraSource: Send {
    /// Ask for camera access. Called exactly once per tracker.
    fn request_permission(&mut self) -> Result<(), TrackerError>;

    /// Most recent captured frame, if one is available yet.
    fn latest_frame(&mut self) -> Option<PixelFrame>;
}

/// A hand-pose estimation model.
pub trait PoseModel: Send {
    /// Whether the model has finished loading. Polled with bounded backoff.
    fn is_ready(&self) -> bool;

    /// Run inference on a frame. `None` when the model has no result for
    /// this frame (still warming up, nothing in view).
    fn detect(&mut self, frame: &PixelFrame) -> Option<Detection>;
}

/// A camera double that replays queued frames.
pub struct SyntheticCamera {
    frames: VecDeque<PixelFrame>,
    deny: Option<String>,
    permission_requests: Arc<AtomicU32>,
}

impl SyntheticCamera {
    /// A camera that grants permission and replays `frames`, holding the
    /// last one once the queue drains.
    pub fn new(frames: Vec<PixelFrame>) -> Self {
        Self {
            frames: frames.into(),
            deny: None,
            permission_requests: Arc::new(AtomicU32::new(0)),
        }
    }

    /// A camera whose permission request fails.
    pub fn denied(reason: &str) -> Self {
        Self {
            frames: VecDeque::new(),
            deny: Some(reason.to_string()),
            permission_requests: Arc::new(AtomicU32::new(0)),
        }
    }

    /// How many times permission has been requested.
    pub fn permission_requests(&self) -> u32 {
        self.permission_requests.load(Ordering::SeqCst)
    }

    /// Shared view of the request counter, readable after the camera has
    /// moved into a tracker.
    pub fn permission_probe(&self) -> Arc<AtomicU32> {
        self.permission_requests.clone()
    }
}

impl CameraSource for SyntheticCamera {
    fn request_permission(&mut self) -> Result<(), TrackerError> {
        self.permission_requests.fetch_add(1, Ordering::SeqCst);
        match &self.deny {
            Some(reason) => Err(TrackerError::PermissionDenied(reason.clone())),
            None => Ok(()),
        }
    }

    fn latest_frame(&mut self) -> Option<PixelFrame> {
        if self.frames.len() > 1 {
            self.frames.pop_front()
        } else {
            self.frames.front().cloned()
        }
    }
}

/// A model double that becomes ready after a fixed number of polls and then
/// returns a constant detection.
pub struct SyntheticModel {
    polls_until_ready: u32,
    polls: AtomicU32,
    detection: Option<Detection>,
}

impl SyntheticModel {
    pub fn new(polls_until_ready: u32, detection: Option<Detection>) -> Self {
        Self {
            polls_until_ready,
            polls: AtomicU32::new(0),
            detection,
        }
    }

    /// A model that is ready immediately.
    pub fn ready(detection: Option<Detection>) -> Self {
        Self::new(0, detection)
    }
}

impl PoseModel for SyntheticModel {
    fn is_ready(&self) -> bool {
        let seen = self.polls.fetch_add(1, Ordering::Relaxed);
        seen >= self.polls_until_ready
    }

    fn detect(&mut self, _frame: &PixelFrame) -> Option<Detection> {
        self.detection.clone()
    }
}
