//! Drawing surface interface — the immediate-mode 2D context seam.
//!
//! The roll painter and the hand-tracker overlay both draw through
//! [`DrawSurface`]. Styles are color strings (hex or named); interpreting
//! them is the surface implementation's concern, matching canvas-style
//! contexts where the style travels as text.
//!
//! [`RecordingSurface`] is the headless implementation: it captures draw
//! operations for assertions and for piping frames somewhere else.

/// An RGBA pixel frame, as delivered by a camera source.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFrame {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGBA bytes, row-major, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl PixelFrame {
    /// Create a frame filled with a single RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self { width, height, data }
    }
}

/// Immediate-mode 2D drawing context. Coordinates are pixels, origin
/// top-left.
pub trait DrawSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Fill the whole surface with `style`.
    fn clear(&mut self, style: &str);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str);

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str);

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, style: &str);

    /// Draw `text` with its anchor at `(x, y)`.
    fn text(&mut self, x: f64, y: f64, text: &str, style: &str, font: &str);

    /// Blit an image frame scaled to fill the surface.
    fn blit(&mut self, frame: &PixelFrame);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        style: String,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: String,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: String,
    },
    Line {
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        style: String,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        style: String,
    },
    Blit {
        width: u32,
        height: u32,
    },
}

/// A surface that records every operation instead of rasterizing.
#[derive(Debug)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    /// All operations recorded so far, in draw order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget recorded operations (e.g. between frames under test).
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// Count operations matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, style: &str) {
        self.ops.push(DrawOp::Clear {
            style: style.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            w,
            h,
            style: style.to_string(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        self.ops.push(DrawOp::StrokeRect {
            x,
            y,
            w,
            h,
            style: style.to_string(),
        });
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, style: &str) {
        self.ops.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            style: style.to_string(),
        });
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &str, _font: &str) {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            style: style.to_string(),
        });
    }

    fn blit(&mut self, frame: &PixelFrame) {
        self.ops.push(DrawOp::Blit {
            width: frame.width,
            height: frame.height,
        });
    }
}
