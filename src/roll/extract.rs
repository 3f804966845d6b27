//! Value extraction — maps hap payloads to screen-placement values.
//!
//! Extraction is best-effort and total: a malformed note name yields pitch 0
//! instead of an error, because the visualization must never crash on bad
//! note syntax. Silent fallbacks are counted so implementers can detect them
//! without touching the rendering path.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::pattern::note::{freq_to_pitch, parse_note_name};
use crate::pattern::HapValue;

/// A payload reduced to what placement needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Numeric pitch (semitone index), used for the value axis.
    Pitch(f64),
    /// Categorical bucket for non-pitched sounds, underscore-prefixed so it
    /// can't collide with stringified numbers.
    Bucket(String),
    /// Payload the extractor has no rule for, passed through unchanged.
    Raw(String),
}

/// Extracts placement values and counts silent parse fallbacks.
#[derive(Debug, Default)]
pub struct ValueExtractor {
    parse_failures: AtomicU64,
}

impl ValueExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a payload to its placement value. Pure and total.
    ///
    /// Frequency converts via the standard pitch formula; named notes parse
    /// to MIDI numbers, defaulting to 0 on malformed names; sound names
    /// become underscore-tagged buckets.
    pub fn extract(&self, value: &HapValue) -> Extracted {
        match value {
            HapValue::Pitch(p) => Extracted::Pitch(*p),
            HapValue::Frequency(f) => Extracted::Pitch(freq_to_pitch(*f)),
            HapValue::Note(name) => match parse_note_name(name) {
                Some(midi) => Extracted::Pitch(midi as f64),
                None => {
                    self.parse_failures.fetch_add(1, Ordering::Relaxed);
                    log::debug!("unparseable note name {name:?}, defaulting to pitch 0");
                    Extracted::Pitch(0.0)
                }
            },
            HapValue::Sound(s) => Extracted::Bucket(format!("_{s}")),
            HapValue::Other(raw) => Extracted::Raw(raw.clone()),
        }
    }

    /// Number of note names that failed to parse since construction.
    pub fn parse_failures(&self) -> u64 {
        self.parse_failures.load(Ordering::Relaxed)
    }
}
