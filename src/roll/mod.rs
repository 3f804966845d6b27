//! Piano-roll core — window math, frame filtering, value extraction, and
//! the paint driver that ties them to a drawing surface.

pub mod driver;
pub mod extract;
pub mod filter;
pub mod options;
pub mod render;
pub mod window;

pub use driver::{PaintDriver, PaintHandle, RenderFn, RollFrame};
pub use extract::{Extracted, ValueExtractor};
pub use filter::{is_visible, visible_haps};
pub use options::{OptionsError, PaintOptions};
pub use render::{time_extent, RollPainter, ValueScale};
pub use window::{compute_window, infer_window_params, Window};
