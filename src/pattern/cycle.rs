//! Cycle time spans — signed fractional musical time.
//!
//! The pattern engine measures time in cycles, its unit of repetition.
//! Visualization windows extend before "now" (and before cycle zero when
//! playback just started), so spans are signed `f64` rather than the
//! unsigned tick counts an audio scheduler would use. All interval
//! semantics are half-open `[begin, end)`.

/// A half-open span of cycle time `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSpan {
    pub begin: f64,
    pub end: f64,
}

impl CycleSpan {
    /// Create a span from begin/end cycle positions.
    pub fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// Length of the span in cycles.
    pub fn duration(&self) -> f64 {
        self.end - self.begin
    }

    /// Whether `t` falls inside the span (begin inclusive, end exclusive).
    pub fn contains(&self, t: f64) -> bool {
        t >= self.begin && t < self.end
    }

    /// Whether this span overlaps `other` at all, partial overlaps included.
    ///
    /// Half-open semantics: spans that merely touch at a boundary do not
    /// overlap.
    pub fn overlaps(&self, other: &CycleSpan) -> bool {
        self.begin < other.end && self.end > other.begin
    }

    /// Translate the span by `dt` cycles.
    pub fn shift(&self, dt: f64) -> Self {
        Self {
            begin: self.begin + dt,
            end: self.end + dt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn duration() {
        let s = CycleSpan::new(-1.5, 2.0);
        assert_approx_eq!(s.duration(), 3.5);
    }

    #[test]
    fn contains_is_half_open() {
        let s = CycleSpan::new(0.0, 1.0);
        assert!(s.contains(0.0));
        assert!(s.contains(0.999));
        assert!(!s.contains(1.0));
        assert!(!s.contains(-0.001));
    }

    #[test]
    fn contains_negative_time() {
        let s = CycleSpan::new(-2.0, -1.0);
        assert!(s.contains(-1.5));
        assert!(!s.contains(0.0));
    }

    #[test]
    fn partial_overlap_counts() {
        let a = CycleSpan::new(-1.0, 1.0);
        let b = CycleSpan::new(0.5, 3.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_spans_do_not_overlap() {
        let a = CycleSpan::new(0.0, 1.0);
        let b = CycleSpan::new(1.0, 2.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_is_overlap() {
        let outer = CycleSpan::new(-2.0, 2.0);
        let inner = CycleSpan::new(-0.5, 0.5);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn shift_translates_both_ends() {
        let s = CycleSpan::new(0.0, 1.0).shift(-2.5);
        assert_approx_eq!(s.begin, -2.5);
        assert_approx_eq!(s.end, -1.5);
    }
}
