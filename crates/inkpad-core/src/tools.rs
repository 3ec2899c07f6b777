//! Drawing tools and the settings applied to new strokes.

use crate::stroke::HexColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opacity used by the highlighter.
pub const HIGHLIGHTER_OPACITY: f32 = 0.28;
/// Highlighter lines are this much wider than the selected width.
pub const HIGHLIGHTER_WIDTH_FACTOR: f64 = 2.2;
/// Eraser lines are this much wider than the selected width.
pub const ERASER_WIDTH_FACTOR: f64 = 1.2;
/// Smallest width the width control may select.
pub const MIN_TOOL_WIDTH: f64 = 0.5;
/// Width selected when the notebook starts.
pub const DEFAULT_TOOL_WIDTH: f64 = 4.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Highlighter,
    Eraser,
}

/// Pixel blending rule used when a tool paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Opaque paint over the destination.
    SourceOver,
    /// Translucent multiply over the destination.
    Multiply,
    /// Removes destination alpha; the paint colour is ignored.
    DestinationOut,
}

impl ToolKind {
    /// All tools, in toolbar order.
    pub const ALL: [ToolKind; 3] = [ToolKind::Pen, ToolKind::Highlighter, ToolKind::Eraser];

    /// Composition mode this tool paints with.
    pub fn composition(self) -> Composition {
        match self {
            ToolKind::Pen => Composition::SourceOver,
            ToolKind::Highlighter => Composition::Multiply,
            ToolKind::Eraser => Composition::DestinationOut,
        }
    }

    /// Paint opacity in `0.0..=1.0`.
    pub fn opacity(self) -> f32 {
        match self {
            ToolKind::Highlighter => HIGHLIGHTER_OPACITY,
            ToolKind::Pen | ToolKind::Eraser => 1.0,
        }
    }

    /// Line width actually painted for a stroke of the given width.
    pub fn effective_width(self, width: f64) -> f64 {
        match self {
            ToolKind::Pen => width,
            ToolKind::Highlighter => width * HIGHLIGHTER_WIDTH_FACTOR,
            ToolKind::Eraser => width * ERASER_WIDTH_FACTOR,
        }
    }

    /// Radius of the dot painted for the first point of a stroke.
    ///
    /// The highlighter dot uses the full width as its radius so that a
    /// single tap is about as wide as a highlighter line.
    pub fn dot_radius(self, width: f64) -> f64 {
        match self {
            ToolKind::Highlighter => width.max(1.0),
            ToolKind::Pen | ToolKind::Eraser => (width / 2.0).max(1.0),
        }
    }

    /// Lowercase name, as stored in documents.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "pen",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Eraser => "eraser",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown tool name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

impl FromStr for ToolKind {
    type Err = UnknownToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownToolError(s.to_string()))
    }
}

/// Tool, colour and width applied to the next stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    tool: ToolKind,
    color: HexColor,
    width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            tool: ToolKind::default(),
            color: HexColor::BLACK,
            width: DEFAULT_TOOL_WIDTH,
        }
    }
}

impl ToolSettings {
    /// Create settings with the default pen.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> HexColor {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Select a tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    /// Select a colour.
    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Select a width. Non-finite values are ignored and tiny values are
    /// raised to [`MIN_TOOL_WIDTH`] so strokes always have a positive width.
    pub fn set_width(&mut self, width: f64) {
        if !width.is_finite() {
            log::warn!("Ignoring non-finite tool width {}", width);
            return;
        }
        self.width = width.max(MIN_TOOL_WIDTH);
    }

    /// Live readout text for the width control.
    pub fn width_label(&self) -> String {
        format!("{}", self.width)
    }
}
