//! Mapping raw pointer/touch positions into canvas space.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Raw pointer input in viewport coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerInput {
    /// Mouse or pen pointer.
    Mouse { position: Point },
    /// Active touches; only the first one is used.
    Touch { touches: Vec<Point> },
}

impl PointerInput {
    pub fn mouse(x: f64, y: f64) -> Self {
        PointerInput::Mouse {
            position: Point::new(x, y),
        }
    }

    pub fn touch(touches: Vec<Point>) -> Self {
        PointerInput::Touch { touches }
    }

    /// Position of the primary pointer, if any.
    pub fn primary_position(&self) -> Option<Point> {
        match self {
            PointerInput::Mouse { position } => Some(*position),
            PointerInput::Touch { touches } => touches.first().copied(),
        }
    }
}

/// Maps viewport coordinates onto a canvas whose backing resolution may
/// differ from its displayed size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasMapper {
    /// Where the canvas is displayed, in viewport pixels.
    pub display_rect: Rect,
    /// Backing resolution of the canvas.
    pub canvas_size: Size,
}

impl CanvasMapper {
    pub fn new(display_rect: Rect, canvas_size: Size) -> Self {
        Self {
            display_rect,
            canvas_size,
        }
    }

    /// A mapper for a canvas displayed at its own resolution at the origin.
    pub fn identity(canvas_size: Size) -> Self {
        Self::new(Rect::from_origin_size(Point::ZERO, canvas_size), canvas_size)
    }

    /// Scale factors from display pixels to canvas pixels.
    /// An axis with no displayed extent maps 1:1.
    pub fn scale(&self) -> (f64, f64) {
        let axis = |canvas: f64, display: f64| {
            if display.abs() < f64::EPSILON {
                1.0
            } else {
                canvas / display
            }
        };
        (
            axis(self.canvas_size.width, self.display_rect.width()),
            axis(self.canvas_size.height, self.display_rect.height()),
        )
    }

    /// Convert a viewport point to canvas coordinates. Points outside the
    /// canvas are not clamped.
    pub fn map(&self, client: Point) -> Point {
        let (sx, sy) = self.scale();
        Point::new(
            (client.x - self.display_rect.x0) * sx,
            (client.y - self.display_rect.y0) * sy,
        )
    }

    /// Convert the primary position of an input event.
    pub fn map_input(&self, input: &PointerInput) -> Option<Point> {
        input.primary_position().map(|p| self.map(p))
    }
}
