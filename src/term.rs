//! Terminal drawing surface — a character-cell implementation of
//! [`DrawSurface`] rendered through ratatui.
//!
//! One "pixel" is one terminal cell. Draw calls land in an owned cell grid;
//! [`TermSurface::to_lines`] converts the grid to styled lines for a
//! ratatui frame. All primitives clip to the grid.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::surface::{DrawSurface, PixelFrame};

/// Parse a color string: "#RRGGBB" hex or named color.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }
    match s.to_lowercase().as_str() {
        "black" | "transparent" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "white" => Some(Color::White),
        "reset" => Some(Color::Reset),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
    bg: Color::Reset,
};

/// A cols × rows cell grid usable as a drawing surface.
#[derive(Debug, Clone)]
pub struct TermSurface {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl TermSurface {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY; cols * rows],
        }
    }

    /// Resize the grid, dropping all content.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![EMPTY; cols * rows];
    }

    fn set(&mut self, col: i64, row: i64, ch: char, fg: Color) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        let cell = &mut self.cells[row as usize * self.cols + col as usize];
        cell.ch = ch;
        cell.fg = fg;
    }

    /// Character at a cell, for tests and dumps.
    pub fn char_at(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row * self.cols + col].ch)
    }

    /// Convert the grid into styled lines for a ratatui frame.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| {
                        Span::styled(
                            cell.ch.to_string(),
                            Style::default().fg(cell.fg).bg(cell.bg),
                        )
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

impl DrawSurface for TermSurface {
    fn width(&self) -> f64 {
        self.cols as f64
    }

    fn height(&self) -> f64 {
        self.rows as f64
    }

    fn clear(&mut self, style: &str) {
        let bg = parse_color(style).unwrap_or(Color::Reset);
        for cell in &mut self.cells {
            *cell = Cell {
                ch: ' ',
                fg: Color::Reset,
                bg,
            };
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        let fg = parse_color(style).unwrap_or(Color::White);
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let x1 = (x + w).ceil() as i64;
        let y1 = (y + h).ceil() as i64;
        for row in y0..y1 {
            for col in x0..x1 {
                self.set(col, row, '█', fg);
            }
        }
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &str) {
        let fg = parse_color(style).unwrap_or(Color::White);
        let x0 = x.floor() as i64;
        let y0 = y.floor() as i64;
        let x1 = ((x + w).ceil() as i64 - 1).max(x0);
        let y1 = ((y + h).ceil() as i64 - 1).max(y0);
        for col in x0..=x1 {
            self.set(col, y0, '─', fg);
            self.set(col, y1, '─', fg);
        }
        for row in y0..=y1 {
            self.set(x0, row, '│', fg);
            self.set(x1, row, '│', fg);
        }
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, style: &str) {
        let fg = parse_color(style).unwrap_or(Color::White);
        let (mut cx, mut cy) = (x0.floor() as i64, y0.floor() as i64);
        let (ex, ey) = (x1.floor() as i64, y1.floor() as i64);
        let dx = (ex - cx).abs();
        let dy = -(ey - cy).abs();
        let sx = if cx < ex { 1 } else { -1 };
        let sy = if cy < ey { 1 } else { -1 };
        let mut err = dx + dy;
        let glyph = if dx == 0 {
            '│'
        } else if dy == 0 {
            '─'
        } else {
            '·'
        };
        loop {
            self.set(cx, cy, glyph, fg);
            if cx == ex && cy == ey {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }
    }

    fn text(&mut self, x: f64, y: f64, text: &str, style: &str, _font: &str) {
        let fg = parse_color(style).unwrap_or(Color::White);
        let row = y.floor() as i64;
        let start = x.floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            self.set(start + i as i64, row, ch, fg);
        }
    }

    fn blit(&mut self, frame: &PixelFrame) {
        if frame.width == 0 || frame.height == 0 {
            return;
        }
        // Nearest-neighbor sample, one cell per sample.
        for row in 0..self.rows {
            for col in 0..self.cols {
                let px = (col * frame.width as usize) / self.cols.max(1);
                let py = (row * frame.height as usize) / self.rows.max(1);
                let idx = (py * frame.width as usize + px) * 4;
                if idx + 3 < frame.data.len() {
                    let fg = Color::Rgb(frame.data[idx], frame.data[idx + 1], frame.data[idx + 2]);
                    self.set(col as i64, row as i64, '▒', fg);
                }
            }
        }
    }
}
