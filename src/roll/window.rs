//! Window calculation — maps playhead parameters to visible time bounds.
//!
//! A visualization shows `cycles_visible` cycles of pattern time with "now"
//! pinned at `playhead_fraction` of the way across the span. The window is
//! expressed as signed offsets from now: `from ≤ 0 ≤ to`, with
//! `to − from == cycles_visible`.

/// Visible time bounds as offsets from the current playback time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    /// Lookbehind offset, stored as a non-positive number.
    pub from: f64,
    /// Lookahead offset, non-negative.
    pub to: f64,
}

impl Window {
    /// Pad both bounds symmetrically by `overscan` cycles.
    ///
    /// Overscanned queries pre-fetch events just outside the visible range
    /// so edge events don't pop in abruptly.
    pub fn with_overscan(self, overscan: f64) -> Self {
        Self {
            from: self.from - overscan,
            to: self.to + overscan,
        }
    }

    /// Span length in cycles.
    pub fn span(self) -> f64 {
        self.to - self.from
    }
}

/// Compute the window for a given span size and playhead position.
///
/// `playhead_fraction` ∈ [0, 1]: 0 puts now at the leading edge (all
/// lookahead), 1 at the trailing edge (all lookbehind).
pub fn compute_window(cycles_visible: f64, playhead_fraction: f64) -> Window {
    Window {
        from: -cycles_visible * playhead_fraction,
        to: cycles_visible * (1.0 - playhead_fraction),
    }
}

/// Recover `(cycles_visible, playhead_fraction)` from a window.
///
/// Inverse of [`compute_window`]. A zero-length window reports a playhead
/// fraction of 0 rather than dividing by zero.
pub fn infer_window_params(window: Window) -> (f64, f64) {
    let cycles_visible = window.to + window.from.abs();
    let playhead_fraction = if cycles_visible == 0.0 {
        0.0
    } else {
        window.from.abs() / cycles_visible
    };
    (cycles_visible, playhead_fraction)
}
