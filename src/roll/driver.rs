//! Paint driver — per-visualization registry ticked by the host scheduler.
//!
//! Pure orchestration: each tick the driver queries every registered
//! pattern over its (overscan-padded) window, filters the result to the
//! visible frame, and hands the haps to the registration's render callback.
//! It owns no rendering logic itself.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::pattern::{CycleSpan, Hap, Pattern};
use crate::surface::DrawSurface;

use super::filter::visible_haps;
use super::options::PaintOptions;
use super::render::RollPainter;

/// Per-tick context handed to a render callback.
#[derive(Debug)]
pub struct RollFrame<'a> {
    /// Visible haps for this frame, already filtered.
    pub haps: &'a [Hap],
    /// Current playback time in cycles.
    pub now: f64,
    pub options: &'a PaintOptions,
}

/// Callback invoked once per tick per registration.
pub type RenderFn = Box<dyn FnMut(&RollFrame<'_>, &mut dyn DrawSurface) + Send>;

/// Handle to an attached visualization. Detach by id; detaching an already
/// detached id is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintHandle {
    id: String,
}

impl PaintHandle {
    pub fn id(&self) -> &str {
        &self.id
    }
}

struct Registration {
    pattern: Arc<dyn Pattern>,
    options: PaintOptions,
    render: RenderFn,
}

/// Registry of active visualizations, keyed by options id.
#[derive(Default)]
pub struct PaintDriver {
    // BTreeMap keeps tick order deterministic across runs.
    registrations: BTreeMap<String, Registration>,
    skipped_ticks: u64,
}

impl PaintDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a visualization with a custom render callback.
    ///
    /// Re-attaching with an id that is already registered replaces the prior
    /// registration — at most one active paint loop per id.
    pub fn attach(
        &mut self,
        pattern: Arc<dyn Pattern>,
        options: PaintOptions,
        render: RenderFn,
    ) -> PaintHandle {
        let id = options.id.clone();
        if self.registrations.contains_key(&id) {
            log::debug!("replacing visualization {id:?}");
        }
        self.registrations.insert(
            id.clone(),
            Registration {
                pattern,
                options,
                render,
            },
        );
        PaintHandle { id }
    }

    /// Register a visualization rendered by the built-in [`RollPainter`].
    pub fn attach_default(&mut self, pattern: Arc<dyn Pattern>, options: PaintOptions) -> PaintHandle {
        let painter = RollPainter::new();
        self.attach(
            pattern,
            options,
            Box::new(move |frame, surface| painter.paint(frame, surface)),
        )
    }

    /// Remove a registration. Idempotent: returns whether anything was
    /// actually detached.
    pub fn detach(&mut self, id: &str) -> bool {
        self.registrations.remove(id).is_some()
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.registrations.contains_key(id)
    }

    /// Number of active registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registrations skipped because their pattern query failed.
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }

    /// Advance every visualization to `now` and invoke its callback.
    ///
    /// A query error skips that registration for this tick only; the loop
    /// carries on and the next tick retries.
    pub fn tick(&mut self, now: f64, surface: &mut dyn DrawSurface) {
        for (id, reg) in self.registrations.iter_mut() {
            let query = reg.options.query_window();
            let span = CycleSpan::new(now + query.from, now + query.to);

            let haps = match reg.pattern.query(span) {
                Ok(haps) => haps,
                Err(e) => {
                    self.skipped_ticks += 1;
                    log::warn!("visualization {id:?}: query failed, skipping tick: {e}");
                    continue;
                }
            };

            let visible = visible_haps(&haps, now, &query, reg.options.hide_negative);
            let frame = RollFrame {
                haps: &visible,
                now,
                options: &reg.options,
            };
            (reg.render)(&frame, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{HapValue, LoopPattern, QueryError};
    use crate::surface::RecordingSurface;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingPattern;

    impl Pattern for FailingPattern {
        fn query(&self, _span: CycleSpan) -> Result<Vec<Hap>, QueryError> {
            Err(QueryError::evaluation("negative-time scale lookup failed"))
        }
    }

    fn pattern() -> Arc<dyn Pattern> {
        Arc::new(LoopPattern::from_values(vec![
            HapValue::Pitch(60.0),
            HapValue::Pitch(64.0),
        ]))
    }

    fn counting_render(counter: Arc<AtomicUsize>) -> RenderFn {
        Box::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn options(id: &str) -> PaintOptions {
        PaintOptions {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn two_ids_each_render_once_per_tick() {
        let mut driver = PaintDriver::new();
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));
        driver.attach(pattern(), options("a"), counting_render(a.clone()));
        driver.attach(pattern(), options("b"), counting_render(b.clone()));

        let mut surface = RecordingSurface::new(100.0, 100.0);
        driver.tick(0.0, &mut surface);

        assert_eq!(a.load(Ordering::SeqCst), 1);
        assert_eq!(b.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reattach_replaces_registration() {
        let mut driver = PaintDriver::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        driver.attach(pattern(), options("solo"), counting_render(first.clone()));
        driver.attach(pattern(), options("solo"), counting_render(second.clone()));
        assert_eq!(driver.len(), 1);

        let mut surface = RecordingSurface::new(100.0, 100.0);
        driver.tick(0.0, &mut surface);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detach_is_idempotent() {
        let mut driver = PaintDriver::new();
        let handle = driver.attach_default(pattern(), options("x"));
        assert!(driver.is_attached(handle.id()));
        assert!(driver.detach(handle.id()));
        assert!(!driver.detach(handle.id()));
        assert!(driver.is_empty());
    }

    #[test]
    fn query_error_skips_only_that_registration() {
        let mut driver = PaintDriver::new();
        let ok = Arc::new(AtomicUsize::new(0));
        driver.attach(
            Arc::new(FailingPattern),
            options("bad"),
            Box::new(|_, _| panic!("render must not run for a failed query")),
        );
        driver.attach(pattern(), options("good"), counting_render(ok.clone()));

        let mut surface = RecordingSurface::new(100.0, 100.0);
        driver.tick(0.0, &mut surface);
        driver.tick(0.1, &mut surface);

        assert_eq!(ok.load(Ordering::SeqCst), 2);
        assert_eq!(driver.skipped_ticks(), 2);
    }

    #[test]
    fn tick_passes_filtered_haps() {
        let mut driver = PaintDriver::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = seen.clone();
        let opts = PaintOptions {
            id: "f".to_string(),
            hide_negative: true,
            ..Default::default()
        };
        driver.attach(
            pattern(),
            opts,
            Box::new(move |frame, _| {
                // At now=0 with hide_negative, nothing before cycle 0 shows.
                assert!(frame.haps.iter().all(|h| h.whole.begin >= 0.0));
                seen2.fetch_add(frame.haps.len(), Ordering::SeqCst);
            }),
        );

        let mut surface = RecordingSurface::new(100.0, 100.0);
        driver.tick(0.0, &mut surface);
        assert!(seen.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn default_render_draws_to_surface() {
        let mut driver = PaintDriver::new();
        driver.attach_default(pattern(), options("draw"));
        let mut surface = RecordingSurface::new(100.0, 100.0);
        driver.tick(0.5, &mut surface);
        assert!(!surface.ops().is_empty());
    }
}
