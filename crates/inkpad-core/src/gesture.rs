//! Gesture state machine: pointer down, moves, pointer up.
//!
//! The gesture only mutates the page and reports what should be painted;
//! painting is left to the caller.

use crate::page::Page;
use crate::stroke::Stroke;
use crate::tools::ToolSettings;
use kurbo::Point;

/// One incremental paint step produced by a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintOp {
    /// Index of the stroke in the page's stroke list.
    pub stroke_index: usize,
    pub from: Point,
    pub to: Point,
    /// The initial dot of a stroke rather than a segment.
    pub is_dot: bool,
}

/// State of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// Waiting for a pointer down.
    #[default]
    Idle,
    /// A stroke is being drawn.
    Active {
        /// Stroke receiving points.
        stroke_index: usize,
        /// Last point appended.
        last: Point,
    },
}

/// Tracks the stroke currently being drawn on a page.
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: GestureState,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Start a stroke at `point`.
    ///
    /// Records an undo snapshot, appends a one-point stroke and returns the
    /// dot to paint. A gesture that is still active is ended first; its
    /// stroke stays on the page.
    pub fn begin(&mut self, page: &mut Page, point: Point, settings: &ToolSettings) -> PaintOp {
        if self.end() {
            log::debug!("Gesture restarted before pointer up");
        }

        page.push_undo();
        page.strokes.push(Stroke::new(
            settings.tool(),
            settings.color(),
            settings.width(),
            point,
        ));
        let stroke_index = page.strokes.len() - 1;

        self.state = GestureState::Active {
            stroke_index,
            last: point,
        };
        log::debug!(
            "Begin {} stroke #{} at ({:.1}, {:.1})",
            settings.tool(),
            stroke_index,
            point.x,
            point.y
        );

        PaintOp {
            stroke_index,
            from: point,
            to: point,
            is_dot: true,
        }
    }

    /// Append `point` to the active stroke and return the segment to paint.
    /// Returns `None` when no gesture is active.
    pub fn extend(&mut self, page: &mut Page, point: Point) -> Option<PaintOp> {
        let GestureState::Active { stroke_index, last } = self.state else {
            return None;
        };

        let Some(stroke) = page.strokes.get_mut(stroke_index) else {
            // The stroke list was replaced underneath us.
            log::warn!("Active stroke #{} no longer exists; ending gesture", stroke_index);
            self.state = GestureState::Idle;
            return None;
        };
        stroke.add_point(point);

        self.state = GestureState::Active {
            stroke_index,
            last: point,
        };
        Some(PaintOp {
            stroke_index,
            from: last,
            to: point,
            is_dot: false,
        })
    }

    /// Finish the active gesture. Returns false if there was none.
    pub fn end(&mut self) -> bool {
        match std::mem::take(&mut self.state) {
            GestureState::Active { stroke_index, .. } => {
                log::debug!("End stroke #{}", stroke_index);
                true
            }
            GestureState::Idle => false,
        }
    }
}
