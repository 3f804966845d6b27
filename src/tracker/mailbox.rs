//! Single-slot detection mailbox.
//!
//! The detection thread writes whole snapshots; the render loop reads
//! whatever was last delivered. No queue, no blocking on freshness — the
//! overlay is eventually consistent with true hand position, bounded by
//! model inference latency.

use std::sync::Mutex;

use super::detection::Detection;

/// Latest-value cache for detection results.
#[derive(Debug, Default)]
pub struct DetectionSlot {
    slot: Mutex<Option<Detection>>,
}

impl DetectionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a fresh detection.
    pub fn store(&self, detection: Detection) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(detection);
        }
    }

    /// Snapshot of the most recent detection, if any has arrived yet.
    pub fn latest(&self) -> Option<Detection> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    /// Whether any detection has been delivered.
    pub fn has_value(&self) -> bool {
        self.slot.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}
