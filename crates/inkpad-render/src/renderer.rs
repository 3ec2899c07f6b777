//! Renderer trait abstraction.

use inkpad_core::{Composition, HexColor, Stroke, ToolKind};
use kurbo::{Point, Size};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid surface size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Colour, opacity and blending rule for one paint call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: HexColor,
    /// Paint opacity in `0.0..=1.0`.
    pub opacity: f32,
    pub composition: Composition,
}

impl Brush {
    /// Brush used by `tool` with the selected colour. The eraser always
    /// paints opaque black since only its alpha matters.
    pub fn for_tool(tool: ToolKind, color: HexColor) -> Self {
        let color = match tool {
            ToolKind::Eraser => HexColor::BLACK,
            ToolKind::Pen | ToolKind::Highlighter => color,
        };
        Self {
            color,
            opacity: tool.opacity(),
            composition: tool.composition(),
        }
    }

    pub fn for_stroke(stroke: &Stroke) -> Self {
        Self::for_tool(stroke.tool, stroke.color)
    }

    /// Alpha channel value for the paint colour.
    pub fn alpha8(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Trait for rendering backends.
///
/// All coordinates are in target pixels. Segments use round caps and
/// round joins.
pub trait Renderer {
    /// Size of the target in pixels.
    fn size(&self) -> Size;

    /// Make every pixel fully transparent.
    fn clear(&mut self);

    /// Fill every pixel with an opaque colour.
    fn fill_background(&mut self, color: HexColor);

    /// Paint a filled circle.
    fn fill_dot(&mut self, center: Point, radius: f64, brush: &Brush);

    /// Paint a line segment of the given width.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, brush: &Brush);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_for_tools() {
        let yellow = HexColor::new(255, 230, 0);

        let pen = Brush::for_tool(ToolKind::Pen, yellow);
        assert_eq!(pen.color, yellow);
        assert_eq!(pen.alpha8(), 255);
        assert_eq!(pen.composition, Composition::SourceOver);

        let highlighter = Brush::for_tool(ToolKind::Highlighter, yellow);
        assert_eq!(highlighter.alpha8(), 71);
        assert_eq!(highlighter.composition, Composition::Multiply);

        let eraser = Brush::for_tool(ToolKind::Eraser, yellow);
        assert_eq!(eraser.color, HexColor::BLACK);
        assert_eq!(eraser.alpha8(), 255);
        assert_eq!(eraser.composition, Composition::DestinationOut);
    }
}
