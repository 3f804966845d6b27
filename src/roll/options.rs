//! Paint options — per-visualization configuration, loadable from YAML.

use std::io;
use std::path::Path;

use serde::Deserialize;

use super::window::{compute_window, Window};

fn default_cycles_visible() -> f64 {
    4.0
}
fn default_playhead_fraction() -> f64 {
    0.5
}
fn default_true() -> bool {
    true
}
fn default_active_color() -> String {
    "#ffffff".to_string()
}
fn default_inactive_color() -> String {
    "#7491d2".to_string()
}
fn default_background() -> String {
    "transparent".to_string()
}
fn default_playhead_color() -> String {
    "#ffffff".to_string()
}
fn default_font() -> String {
    "monospace".to_string()
}
fn default_min_pitch() -> f64 {
    0.0
}
fn default_max_pitch() -> f64 {
    127.0
}
fn default_id() -> String {
    "default".to_string()
}

/// Configuration for one pattern-to-surface visualization.
///
/// All fields have defaults, so a YAML file (or literal) only needs the
/// fields it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaintOptions {
    /// How many cycles of pattern time the frame spans.
    pub cycles_visible: f64,
    /// Where "now" sits in the span: 0 = leading edge, 1 = trailing edge.
    pub playhead_fraction: f64,
    /// Extra cycles queried beyond the visible bounds to avoid edge pop-in.
    pub overscan: f64,
    /// Drop haps that begin before cycle zero.
    pub hide_negative: bool,
    /// Scroll top-to-bottom instead of left-to-right.
    pub vertical: bool,
    /// Draw the payload text on each note.
    pub labels: bool,
    /// Reverse the time axis.
    pub flip_time: bool,
    /// Reverse the value axis.
    pub flip_values: bool,
    /// Skip clearing the background, leaving trails of previous frames.
    pub smear: bool,
    /// Collapse distinct values onto evenly spaced rows instead of pitch
    /// positions.
    pub fold: bool,
    pub active_color: String,
    pub inactive_color: String,
    pub background_color: String,
    pub playhead_color: String,
    /// Fill note bodies (inactive notes).
    pub fill: bool,
    /// Fill note bodies while active.
    pub fill_active: bool,
    /// Outline note bodies (inactive notes).
    pub stroke: bool,
    /// Outline note bodies while active.
    pub stroke_active: bool,
    /// Draw only the currently sounding notes.
    pub hide_inactive: bool,
    /// Apply the active color to inactive notes as well.
    pub colorize_inactive: bool,
    pub font_family: String,
    /// Fixed value-axis range, ignored when `autorange` is set.
    pub min_pitch: f64,
    pub max_pitch: f64,
    /// Fit the value axis to the pitches present in each frame.
    pub autorange: bool,
    /// Registration key: re-attaching with the same id replaces the prior
    /// visualization.
    pub id: String,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            cycles_visible: default_cycles_visible(),
            playhead_fraction: default_playhead_fraction(),
            overscan: 0.0,
            hide_negative: false,
            vertical: false,
            labels: false,
            flip_time: false,
            flip_values: false,
            smear: false,
            fold: false,
            active_color: default_active_color(),
            inactive_color: default_inactive_color(),
            background_color: default_background(),
            playhead_color: default_playhead_color(),
            fill: default_true(),
            fill_active: default_true(),
            stroke: false,
            stroke_active: false,
            hide_inactive: false,
            colorize_inactive: false,
            font_family: default_font(),
            min_pitch: default_min_pitch(),
            max_pitch: default_max_pitch(),
            autorange: false,
            id: default_id(),
        }
    }
}

/// Errors from loading options from a YAML file.
#[derive(Debug)]
pub enum OptionsError {
    Io(io::Error),
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionsError::Io(e) => write!(f, "options file error: {e}"),
            OptionsError::Parse(e) => write!(f, "options parse error: {e}"),
        }
    }
}

impl std::error::Error for OptionsError {}

impl PaintOptions {
    /// Strictly visible window (no overscan) for these options.
    pub fn window(&self) -> Window {
        compute_window(self.cycles_visible, self.playhead_fraction)
    }

    /// Query window: visible bounds padded by the overscan margin.
    pub fn query_window(&self) -> Window {
        self.window().with_overscan(self.overscan)
    }

    /// Parse options from a YAML string. Missing fields take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, OptionsError> {
        serde_yaml::from_str(yaml).map_err(OptionsError::Parse)
    }

    /// Load options from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let content = std::fs::read_to_string(path).map_err(OptionsError::Io)?;
        Self::from_yaml_str(&content)
    }
}
