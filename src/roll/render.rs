//! Default piano-roll painter.
//!
//! Placement is split into pure helpers ([`time_extent`], [`ValueScale`])
//! that produce normalized `[0, 1]` coordinates; [`RollPainter::paint`]
//! scales those to surface pixels and issues the draw calls. Haps fetched
//! through the overscan margin map slightly outside `[0, 1]` — surfaces
//! clip, the painter does not.

use crate::pattern::Hap;
use crate::surface::DrawSurface;

use super::extract::{Extracted, ValueExtractor};
use super::options::PaintOptions;
use super::window::Window;
use super::RollFrame;

/// Normalized time extent of a span within the visible window.
///
/// Returns `(start, end)` fractions of the time axis, `flip` reversing the
/// direction of travel.
pub fn time_extent(begin: f64, end: f64, now: f64, window: &Window) -> (f64, f64) {
    let span = window.span();
    if span == 0.0 {
        return (0.0, 0.0);
    }
    let origin = now + window.from;
    ((begin - origin) / span, (end - origin) / span)
}

/// Value-axis placement: either a numeric pitch range or folded slots.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueScale {
    /// Pitches place proportionally; each semitone gets an equal band.
    Numeric { min: f64, max: f64 },
    /// Distinct value keys place on evenly spaced rows.
    Folded { slots: Vec<String> },
}

/// Stable string key for folding and labels.
fn value_key(extracted: &Extracted) -> String {
    match extracted {
        Extracted::Pitch(p) => format!("{p}"),
        Extracted::Bucket(s) | Extracted::Raw(s) => s.clone(),
    }
}

impl ValueScale {
    /// Build the scale for one frame's extracted values.
    pub fn for_frame(values: &[Extracted], options: &PaintOptions) -> Self {
        if options.fold {
            let mut slots: Vec<String> = values.iter().map(value_key).collect();
            slots.sort();
            slots.dedup();
            return ValueScale::Folded { slots };
        }
        if options.autorange {
            let pitches: Vec<f64> = values
                .iter()
                .filter_map(|v| match v {
                    Extracted::Pitch(p) => Some(*p),
                    _ => None,
                })
                .collect();
            if !pitches.is_empty() {
                let min = pitches.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = pitches.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                return ValueScale::Numeric { min, max };
            }
        }
        ValueScale::Numeric {
            min: options.min_pitch,
            max: options.max_pitch,
        }
    }

    /// Normalized `(position, thickness)` band for a value.
    ///
    /// Position 0 is the low edge. Non-numeric values in numeric mode sit in
    /// the pitch-0 band, mirroring the extractor's best-effort default.
    pub fn band(&self, extracted: &Extracted) -> (f64, f64) {
        match self {
            ValueScale::Numeric { min, max } => {
                // +1 so the top pitch still gets a full band.
                let bands = (max - min) + 1.0;
                if bands <= 0.0 {
                    return (0.0, 1.0);
                }
                let pitch = match extracted {
                    Extracted::Pitch(p) => *p,
                    _ => 0.0,
                };
                ((pitch - min) / bands, 1.0 / bands)
            }
            ValueScale::Folded { slots } => {
                if slots.is_empty() {
                    return (0.0, 1.0);
                }
                let key = value_key(extracted);
                let idx = slots.iter().position(|s| *s == key).unwrap_or(0);
                (idx as f64 / slots.len() as f64, 1.0 / slots.len() as f64)
            }
        }
    }
}

/// The built-in painter: notes as bars scrolling across the surface with a
/// fixed playhead line.
#[derive(Debug, Default)]
pub struct RollPainter {
    extractor: ValueExtractor,
}

impl RollPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Silent note-name fallbacks seen by this painter so far.
    pub fn parse_failures(&self) -> u64 {
        self.extractor.parse_failures()
    }

    pub fn paint(&self, frame: &RollFrame<'_>, surface: &mut dyn DrawSurface) {
        let options = frame.options;
        let window = options.window();

        if !options.smear {
            surface.clear(&options.background_color);
        }

        let extracted: Vec<Extracted> = frame
            .haps
            .iter()
            .map(|h| self.extractor.extract(&h.value))
            .collect();
        let scale = ValueScale::for_frame(&extracted, options);

        for (hap, value) in frame.haps.iter().zip(&extracted) {
            let active = hap.is_active_at(frame.now);
            if options.hide_inactive && !active {
                continue;
            }
            self.paint_hap(hap, value, active, &scale, &window, frame, surface);
        }

        self.paint_playhead(options, surface);
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_hap(
        &self,
        hap: &Hap,
        value: &Extracted,
        active: bool,
        scale: &ValueScale,
        window: &Window,
        frame: &RollFrame<'_>,
        surface: &mut dyn DrawSurface,
    ) {
        let options = frame.options;

        let (mut t0, mut t1) = time_extent(hap.whole.begin, hap.whole.end, frame.now, window);
        if options.flip_time {
            (t0, t1) = (1.0 - t1, 1.0 - t0);
        }

        let (mut v0, band) = scale.band(value);
        if !options.flip_values {
            // Low pitches at the bottom of the surface (y grows downward).
            v0 = 1.0 - v0 - band;
        }

        let (x, y, w, h) = if options.vertical {
            (
                v0 * surface.width(),
                t0 * surface.height(),
                band * surface.width(),
                (t1 - t0) * surface.height(),
            )
        } else {
            (
                t0 * surface.width(),
                v0 * surface.height(),
                (t1 - t0) * surface.width(),
                band * surface.height(),
            )
        };

        let color = if active || options.colorize_inactive {
            options.active_color.as_str()
        } else {
            options.inactive_color.as_str()
        };

        let filled = if active { options.fill_active } else { options.fill };
        let stroked = if active {
            options.stroke_active
        } else {
            options.stroke
        };

        if filled {
            surface.fill_rect(x, y, w, h, color);
        }
        if stroked {
            surface.stroke_rect(x, y, w, h, color);
        }
        if options.labels {
            surface.text(x, y, &value_key(value), color, &options.font_family);
        }
    }

    fn paint_playhead(&self, options: &PaintOptions, surface: &mut dyn DrawSurface) {
        let mut frac = options.playhead_fraction;
        if options.flip_time {
            frac = 1.0 - frac;
        }
        if options.vertical {
            let y = frac * surface.height();
            surface.line(0.0, y, surface.width(), y, &options.playhead_color);
        } else {
            let x = frac * surface.width();
            surface.line(x, 0.0, x, surface.height(), &options.playhead_color);
        }
    }
}
