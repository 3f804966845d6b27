//! Hap data model — the unit of scheduled musical information.
//!
//! A [`Hap`] is one occurrence produced by a pattern query: a time span
//! ("whole") plus a payload. Haps are immutable once produced and live only
//! for the frame that consumed them.
//!
//! Payloads arrive from pattern expressions in loosely-shaped form (a bare
//! number, a note name, a frequency, a sample name). [`RawPayload`] resolves
//! that shape ONCE at ingestion into the [`HapValue`] tagged union, so the
//! rest of the crate never probes duck-typed fields.

use super::cycle::CycleSpan;

/// Payload of a hap, resolved to one known shape at ingestion.
#[derive(Debug, Clone, PartialEq)]
pub enum HapValue {
    /// A numeric pitch (semitone index, fractional allowed).
    Pitch(f64),
    /// A named note ("C4", "Eb2") not yet converted to a pitch number.
    Note(String),
    /// A frequency in Hz.
    Frequency(f64),
    /// A non-pitched sound name ("bd", "snare").
    Sound(String),
    /// Anything the known shapes don't cover, carried verbatim.
    Other(String),
}

/// A note field as it appears in a raw payload: already numeric, or a name.
#[derive(Debug, Clone, PartialEq)]
pub enum NoteField {
    Name(String),
    Number(f64),
}

/// Loosely-shaped payload as produced by a pattern expression.
///
/// All fields optional; [`RawPayload::resolve`] applies the precedence
/// rules and returns the single shape that wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPayload {
    /// Bare scalar payload (a pattern of plain numbers).
    pub value: Option<f64>,
    /// Frequency in Hz. Takes precedence over note fields.
    pub freq: Option<f64>,
    /// Primary note field.
    pub note: Option<NoteField>,
    /// Fallback note field, consulted when `note` is absent.
    pub n: Option<NoteField>,
    /// Sound / sample name.
    pub sound: Option<String>,
    /// Free-form remainder, used when nothing else applies.
    pub other: Option<String>,
}

impl RawPayload {
    /// Resolve the payload into a single [`HapValue`].
    ///
    /// Precedence: bare scalar, then frequency, then `note` falling back to
    /// `n`, then sound name, then the raw remainder.
    pub fn resolve(self) -> HapValue {
        if let Some(v) = self.value {
            return HapValue::Pitch(v);
        }
        if let Some(f) = self.freq {
            return HapValue::Frequency(f);
        }
        if let Some(note) = self.note.or(self.n) {
            return match note {
                NoteField::Name(name) => HapValue::Note(name),
                NoteField::Number(num) => HapValue::Pitch(num),
            };
        }
        if let Some(s) = self.sound {
            return HapValue::Sound(s);
        }
        HapValue::Other(self.other.unwrap_or_default())
    }
}

/// A single scheduled occurrence with a time span and payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Hap {
    /// The event's full interval `[begin, end)` in cycles.
    pub whole: CycleSpan,
    /// Resolved payload.
    pub value: HapValue,
}

impl Hap {
    /// Create a hap from a span and an already-resolved value.
    pub fn new(whole: CycleSpan, value: HapValue) -> Self {
        Self { whole, value }
    }

    /// Create a pitched hap.
    pub fn pitch(begin: f64, end: f64, pitch: f64) -> Self {
        Self::new(CycleSpan::new(begin, end), HapValue::Pitch(pitch))
    }

    /// Create a sound-name hap.
    pub fn sound(begin: f64, end: f64, name: &str) -> Self {
        Self::new(CycleSpan::new(begin, end), HapValue::Sound(name.to_string()))
    }

    /// Whether the hap is sounding at time `t`.
    pub fn is_active_at(&self, t: f64) -> bool {
        self.whole.contains(t)
    }

    /// Whether the hap overlaps the half-open range `[t0, t1)` at all.
    ///
    /// Partial overlaps count: a note that starts before `t0` but extends
    /// into the range is active within it.
    pub fn is_active_within(&self, t0: f64, t1: f64) -> bool {
        self.whole.overlaps(&CycleSpan::new(t0, t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_scalar_resolves_to_pitch() {
        let p = RawPayload {
            value: Some(7.0),
            ..Default::default()
        };
        assert_eq!(p.resolve(), HapValue::Pitch(7.0));
    }

    #[test]
    fn frequency_beats_note() {
        let p = RawPayload {
            freq: Some(440.0),
            note: Some(NoteField::Name("C4".into())),
            ..Default::default()
        };
        assert_eq!(p.resolve(), HapValue::Frequency(440.0));
    }

    #[test]
    fn note_falls_back_to_n() {
        let p = RawPayload {
            n: Some(NoteField::Number(60.0)),
            ..Default::default()
        };
        assert_eq!(p.resolve(), HapValue::Pitch(60.0));

        let p = RawPayload {
            note: Some(NoteField::Name("A4".into())),
            n: Some(NoteField::Number(12.0)),
            ..Default::default()
        };
        assert_eq!(p.resolve(), HapValue::Note("A4".into()));
    }

    #[test]
    fn sound_name_resolves() {
        let p = RawPayload {
            sound: Some("bd".into()),
            ..Default::default()
        };
        assert_eq!(p.resolve(), HapValue::Sound("bd".into()));
    }

    #[test]
    fn empty_payload_resolves_to_other() {
        assert_eq!(RawPayload::default().resolve(), HapValue::Other(String::new()));
    }

    #[test]
    fn active_at_respects_half_open_whole() {
        let h = Hap::pitch(0.0, 1.0, 60.0);
        assert!(h.is_active_at(0.0));
        assert!(h.is_active_at(0.5));
        assert!(!h.is_active_at(1.0));
    }

    #[test]
    fn active_within_counts_partial_overlap() {
        let h = Hap::pitch(-1.0, 1.0, 60.0);
        assert!(h.is_active_within(0.0, 2.0));
        assert!(h.is_active_within(-2.0, -0.5));
        assert!(!h.is_active_within(1.0, 2.0));
    }
}
