//! Rollscope — a scrolling piano-roll visualizer with live hand-tracking
//! overlay.

pub mod pattern;
pub mod roll;
pub mod surface;
pub mod term;
pub mod tracker;
