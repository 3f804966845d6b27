//! Pattern engine interface — the event producer the visualizer draws from.
//!
//! The visualizer only needs one operation from a pattern: query the haps
//! overlapping a time span. [`Pattern`] is that narrow seam; the shipped
//! [`LoopPattern`] covers the demo binary and tests, while a real engine
//! plugs in behind the same trait.

pub mod cycle;
pub mod hap;
pub mod note;

use std::fmt;

pub use cycle::CycleSpan;
pub use hap::{Hap, HapValue, NoteField, RawPayload};

/// An error raised while querying a pattern for events.
#[derive(Debug, Clone)]
pub struct QueryError {
    pub message: String,
    pub kind: QueryErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryErrorKind {
    /// The span itself was malformed (end before begin, NaN bounds).
    BadSpan,
    /// The pattern could not be evaluated at the requested time.
    Evaluation,
}

impl QueryError {
    pub fn bad_span(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: QueryErrorKind::BadSpan,
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: QueryErrorKind::Evaluation,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for QueryError {}

/// Source of timed events. Queried fresh every frame; implementations must
/// be cheap per call and safe to share across the paint registry.
pub trait Pattern: Send + Sync {
    /// Return all haps overlapping `span`, in no guaranteed order.
    fn query(&self, span: CycleSpan) -> Result<Vec<Hap>, QueryError>;
}

/// A single step of a [`LoopPattern`]: a sub-span of one cycle plus a value.
#[derive(Debug, Clone)]
pub struct LoopStep {
    /// Position within the cycle, both bounds in `[0, 1]`.
    pub span: CycleSpan,
    pub value: HapValue,
}

/// A pattern that repeats a fixed list of steps every cycle.
///
/// Correct for negative query times: cycle numbers come from flooring, so
/// querying `[-0.5, 0.5)` sees the tail of cycle −1 and the head of cycle 0.
#[derive(Debug, Clone, Default)]
pub struct LoopPattern {
    steps: Vec<LoopStep>,
}

impl LoopPattern {
    pub fn new(steps: Vec<LoopStep>) -> Self {
        Self { steps }
    }

    /// Build a pattern of equal-length steps spanning one cycle.
    pub fn from_values(values: Vec<HapValue>) -> Self {
        let n = values.len().max(1) as f64;
        let steps = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| LoopStep {
                span: CycleSpan::new(i as f64 / n, (i + 1) as f64 / n),
                value,
            })
            .collect();
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Pattern for LoopPattern {
    fn query(&self, span: CycleSpan) -> Result<Vec<Hap>, QueryError> {
        if !span.begin.is_finite() || !span.end.is_finite() {
            return Err(QueryError::bad_span("non-finite span bounds"));
        }
        if span.end < span.begin {
            return Err(QueryError::bad_span(format!(
                "end {} before begin {}",
                span.end, span.begin
            )));
        }

        let first_cycle = span.begin.floor() as i64;
        let last_cycle = span.end.ceil() as i64;

        let mut haps = Vec::new();
        for cycle in first_cycle..last_cycle {
            let offset = cycle as f64;
            for step in &self.steps {
                let whole = step.span.shift(offset);
                if whole.overlaps(&span) {
                    haps.push(Hap::new(whole, step.value.clone()));
                }
            }
        }
        Ok(haps)
    }
}
