//! Hand detection results — keypoints, skeleton topology, pinch geometry.
//!
//! A detection is a read-only snapshot: the pose model overwrites the whole
//! thing on every inference, nothing is merged and no history is kept.

/// A 2D keypoint in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another keypoint.
    pub fn distance(&self, other: &Keypoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    /// Midpoint between two keypoints.
    pub fn midpoint(&self, other: &Keypoint) -> Keypoint {
        Keypoint {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Which hand a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

/// Number of keypoints per tracked hand.
pub const KEYPOINT_COUNT: usize = 21;

/// Keypoint index of the thumb tip.
pub const THUMB_TIP: usize = 4;

/// Keypoint index of the index fingertip.
pub const INDEX_TIP: usize = 8;

/// Skeleton edge list over the 21 keypoints: wrist, thumb, index, middle,
/// ring, pinky chains plus the palm arch.
pub const HAND_EDGES: [(usize, usize); 21] = [
    // Thumb
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 4),
    // Index
    (0, 5),
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky
    (0, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    // Palm arch
    (5, 9),
    (9, 13),
    (13, 17),
];

/// One tracked hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandRecord {
    /// Model confidence in `[0, 1]`.
    pub score: f32,
    pub handedness: Handedness,
    pub keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl HandRecord {
    /// Pixel distance between the thumb tip and index fingertip.
    pub fn pinch_distance(&self) -> f64 {
        self.keypoints[THUMB_TIP].distance(&self.keypoints[INDEX_TIP])
    }

    /// Midpoint of the thumb/index tips, where the distance label draws.
    pub fn pinch_midpoint(&self) -> Keypoint {
        self.keypoints[THUMB_TIP].midpoint(&self.keypoints[INDEX_TIP])
    }
}

/// Latest set of tracked hands from one inference pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub hands: Vec<HandRecord>,
}
