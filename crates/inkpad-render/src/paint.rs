//! Replaying strokes onto a renderer.
//!
//! The same replay drives the main canvas, incremental painting during a
//! gesture and the scaled-down page thumbnails.

use crate::renderer::{Brush, RenderResult, Renderer};
use crate::surface::Surface;
use inkpad_core::{HexColor, PaintOp, Stroke};
use kurbo::{Point, Size, Vec2};

const UNIT_SCALE: Vec2 = Vec2::new(1.0, 1.0);

/// Paint one segment of a stroke, or its initial dot.
pub fn render_stroke<R: Renderer + ?Sized>(
    target: &mut R,
    stroke: &Stroke,
    from: Point,
    to: Point,
    is_dot: bool,
) {
    render_stroke_scaled(target, stroke, from, to, is_dot, UNIT_SCALE);
}

/// Paint a [`PaintOp`] produced by a gesture. Returns false if the op
/// refers to a stroke that is not in `strokes`.
pub fn render_op<R: Renderer + ?Sized>(target: &mut R, strokes: &[Stroke], op: &PaintOp) -> bool {
    match strokes.get(op.stroke_index) {
        Some(stroke) => {
            render_stroke(target, stroke, op.from, op.to, op.is_dot);
            true
        }
        None => {
            log::warn!("Paint op for missing stroke #{}", op.stroke_index);
            false
        }
    }
}

/// Clear the target and replay every stroke in order.
pub fn render_page<R: Renderer + ?Sized>(target: &mut R, strokes: &[Stroke]) {
    target.clear();
    replay(target, strokes, UNIT_SCALE);
}

/// Replay strokes drawn on a `source_size` canvas onto a target of a
/// different size. Coordinates scale per axis; widths scale with the
/// horizontal factor.
pub fn render_scaled<R: Renderer + ?Sized>(target: &mut R, strokes: &[Stroke], source_size: Size) {
    let target_size = target.size();
    let axis = |target: f64, source: f64| {
        if source > 0.0 { target / source } else { 1.0 }
    };
    let scale = Vec2::new(
        axis(target_size.width, source_size.width),
        axis(target_size.height, source_size.height),
    );
    replay(target, strokes, scale);
}

/// Render a page into a new white thumbnail surface.
pub fn render_thumbnail(
    strokes: &[Stroke],
    source_size: Size,
    target_width: u32,
    target_height: u32,
) -> RenderResult<Surface> {
    let mut surface = Surface::new(target_width, target_height)?;
    surface.fill_background(HexColor::WHITE);
    render_scaled(&mut surface, strokes, source_size);
    Ok(surface)
}

/// Thumbnail dimensions for a given width, keeping the source aspect ratio.
pub fn thumbnail_size(source_size: Size, target_width: u32) -> (u32, u32) {
    let width = target_width.max(1);
    if source_size.width <= 0.0 {
        return (width, width);
    }
    let height = (width as f64 * source_size.height / source_size.width).round();
    (width, (height as u32).max(1))
}

fn replay<R: Renderer + ?Sized>(target: &mut R, strokes: &[Stroke], scale: Vec2) {
    for stroke in strokes {
        for (from, to, is_dot) in stroke.replay() {
            render_stroke_scaled(target, stroke, from, to, is_dot, scale);
        }
    }
}

fn render_stroke_scaled<R: Renderer + ?Sized>(
    target: &mut R,
    stroke: &Stroke,
    from: Point,
    to: Point,
    is_dot: bool,
    scale: Vec2,
) {
    let brush = Brush::for_stroke(stroke);
    let width = stroke.width * scale.x;
    let from = Point::new(from.x * scale.x, from.y * scale.y);

    if is_dot {
        target.fill_dot(from, stroke.tool.dot_radius(width), &brush);
    } else {
        let to = Point::new(to.x * scale.x, to.y * scale.y);
        target.stroke_segment(from, to, stroke.tool.effective_width(width), &brush);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::ToolKind;

    /// Records draw calls instead of painting.
    #[derive(Debug, Default)]
    struct RecordingRenderer {
        size: Size,
        clears: usize,
        calls: Vec<Call>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        /// Center and radius.
        Dot(Point, f64),
        /// Endpoints and width.
        Segment(Point, Point, f64),
    }

    impl RecordingRenderer {
        fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                ..Default::default()
            }
        }
    }

    impl Renderer for RecordingRenderer {
        fn size(&self) -> Size {
            self.size
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.calls.clear();
        }

        fn fill_background(&mut self, _color: HexColor) {}

        fn fill_dot(&mut self, center: Point, radius: f64, _brush: &Brush) {
            self.calls.push(Call::Dot(center, radius));
        }

        fn stroke_segment(&mut self, from: Point, to: Point, width: f64, _brush: &Brush) {
            self.calls.push(Call::Segment(from, to, width));
        }
    }

    fn sample_strokes() -> Vec<Stroke> {
        vec![
            Stroke::from_points(
                ToolKind::Pen,
                HexColor::BLACK,
                4.0,
                vec![Point::new(10.0, 10.0), Point::new(50.0, 30.0), Point::new(90.0, 10.0)],
            ),
            Stroke::from_points(
                ToolKind::Highlighter,
                HexColor::new(255, 230, 0),
                6.0,
                vec![Point::new(20.0, 80.0), Point::new(180.0, 80.0)],
            ),
            Stroke::new(ToolKind::Eraser, HexColor::BLACK, 10.0, Point::new(100.0, 100.0)),
        ]
    }

    #[test]
    fn test_render_page_replay_order() {
        let mut recorder = RecordingRenderer::new(200.0, 200.0);
        render_page(&mut recorder, &sample_strokes());

        assert_eq!(recorder.clears, 1);
        assert_eq!(
            recorder.calls,
            vec![
                Call::Dot(Point::new(10.0, 10.0), 2.0),
                Call::Segment(Point::new(10.0, 10.0), Point::new(50.0, 30.0), 4.0),
                Call::Segment(Point::new(50.0, 30.0), Point::new(90.0, 10.0), 4.0),
                Call::Dot(Point::new(20.0, 80.0), 6.0),
                Call::Segment(Point::new(20.0, 80.0), Point::new(180.0, 80.0), 6.0 * 2.2),
                Call::Dot(Point::new(100.0, 100.0), 5.0),
            ]
        );
    }

    #[test]
    fn test_scaled_replay_is_geometrically_consistent() {
        let strokes = sample_strokes();
        let mut native = RecordingRenderer::new(200.0, 200.0);
        render_page(&mut native, &strokes);

        let mut small = RecordingRenderer::new(50.0, 50.0);
        render_scaled(&mut small, &strokes, Size::new(200.0, 200.0));

        let s = 0.25;
        assert_eq!(native.calls.len(), small.calls.len());
        for (big, thumb) in native.calls.iter().zip(&small.calls) {
            match (big, thumb) {
                (Call::Dot(a, _), Call::Dot(b, _)) => {
                    assert!((a.x - b.x / s).abs() < 1e-9 && (a.y - b.y / s).abs() < 1e-9);
                }
                (Call::Segment(a0, a1, wa), Call::Segment(b0, b1, wb)) => {
                    assert!((a0.x - b0.x / s).abs() < 1e-9 && (a0.y - b0.y / s).abs() < 1e-9);
                    assert!((a1.x - b1.x / s).abs() < 1e-9 && (a1.y - b1.y / s).abs() < 1e-9);
                    assert!((wa - wb / s).abs() < 1e-9);
                }
                _ => panic!("call kinds differ: {:?} vs {:?}", big, thumb),
            }
        }
    }

    #[test]
    fn test_scaled_dot_radius_never_below_one() {
        let strokes = vec![Stroke::new(
            ToolKind::Pen,
            HexColor::BLACK,
            2.0,
            Point::new(100.0, 100.0),
        )];
        let mut small = RecordingRenderer::new(20.0, 20.0);
        render_scaled(&mut small, &strokes, Size::new(200.0, 200.0));
        assert_eq!(small.calls, vec![Call::Dot(Point::new(10.0, 10.0), 1.0)]);
    }

    #[test]
    fn test_render_op_missing_stroke() {
        let mut recorder = RecordingRenderer::new(10.0, 10.0);
        let op = PaintOp {
            stroke_index: 3,
            from: Point::ZERO,
            to: Point::ZERO,
            is_dot: true,
        };
        assert!(!render_op(&mut recorder, &[], &op));
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_render_page_is_deterministic() {
        let strokes = sample_strokes();
        let mut a = Surface::new(200, 200).unwrap();
        let mut b = Surface::new(200, 200).unwrap();
        render_page(&mut a, &strokes);
        render_page(&mut b, &strokes);

        assert!(a.painted_pixel_count() > 0);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_render_page_clears_previous_content() {
        let mut surface = Surface::new(100, 100).unwrap();
        surface.fill_background(HexColor::WHITE);
        render_page(&mut surface, &[]);
        assert_eq!(surface.painted_pixel_count(), 0);
    }

    #[test]
    fn test_thumbnail_pixels() {
        let strokes = vec![Stroke::from_points(
            ToolKind::Pen,
            HexColor::BLACK,
            20.0,
            vec![Point::new(100.0, 200.0), Point::new(300.0, 200.0)],
        )];
        let thumb = render_thumbnail(&strokes, Size::new(400.0, 400.0), 100, 100).unwrap();

        assert_eq!(thumb.pixel(50, 50), Some([0, 0, 0, 255]));
        assert_eq!(thumb.pixel(5, 5), Some([255, 255, 255, 255]));
        assert_eq!(thumb.pixel(50, 90), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_thumbnail_does_not_touch_main_surface() {
        let strokes = sample_strokes();
        let mut main = Surface::new(200, 200).unwrap();
        render_page(&mut main, &strokes);
        let before = main.clone();

        let _thumb = render_thumbnail(&strokes, Size::new(200.0, 200.0), 50, 50).unwrap();
        assert_eq!(main.data(), before.data());
    }

    #[test]
    fn test_thumbnail_size() {
        assert_eq!(thumbnail_size(Size::new(1200.0, 1600.0), 220), (220, 293));
        assert_eq!(thumbnail_size(Size::new(800.0, 400.0), 220), (220, 110));
        assert_eq!(thumbnail_size(Size::new(0.0, 400.0), 220), (220, 220));
        assert_eq!(thumbnail_size(Size::new(10000.0, 1.0), 220), (220, 1));
    }
}
