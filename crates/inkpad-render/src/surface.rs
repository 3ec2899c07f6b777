//! tiny-skia backed pixel surface.

use crate::export::encode_png;
use crate::renderer::{Brush, RenderError, RenderResult, Renderer};
use inkpad_core::{Composition, HexColor};
use kurbo::{Point, Size};
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// A raster surface. Starts fully transparent.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Pixmap::new(width, height)
            .map(|pixmap| Self { pixmap })
            .ok_or(RenderError::InvalidSize { width, height })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Raw premultiplied RGBA bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight RGBA bytes, row by row.
    pub fn rgba_data(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixmap.data().len());
        for p in self.pixmap.pixels() {
            let c = p.demultiply();
            rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        rgba
    }

    /// Encode the surface as PNG.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        encode_png(&self.rgba_data(), self.width(), self.height())
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixel_count(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }
}

fn to_paint(brush: &Brush) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(
        brush.color.r,
        brush.color.g,
        brush.color.b,
        brush.alpha8(),
    ));
    paint.anti_alias = true;
    paint.blend_mode = match brush.composition {
        Composition::SourceOver => BlendMode::SourceOver,
        Composition::Multiply => BlendMode::Multiply,
        Composition::DestinationOut => BlendMode::DestinationOut,
    };
    paint
}

impl Renderer for Surface {
    fn size(&self) -> Size {
        Size::new(self.width() as f64, self.height() as f64)
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    fn fill_background(&mut self, color: HexColor) {
        self.pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    fn fill_dot(&mut self, center: Point, radius: f64, brush: &Brush) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            log::debug!("Skipping dot with radius {}", radius);
            return;
        };
        self.pixmap.fill_path(
            &path,
            &to_paint(brush),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, brush: &Brush) {
        if from == to {
            // A zero-length segment with round caps is a dot.
            self.fill_dot(from, width / 2.0, brush);
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &to_paint(brush), &stroke, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::ToolKind;

    fn pen(color: HexColor) -> Brush {
        Brush::for_tool(ToolKind::Pen, color)
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(8, 4).unwrap();
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 4);
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.painted_pixel_count(), 0);
        assert_eq!(surface.rgba_data().len(), 8 * 4 * 4);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(RenderError::InvalidSize {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_pen_segment_is_opaque() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.stroke_segment(
            Point::new(5.0, 20.0),
            Point::new(35.0, 20.0),
            6.0,
            &pen(HexColor::new(255, 0, 0)),
        );
        assert_eq!(surface.pixel(20, 20), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(20, 5).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.stroke_segment(
            Point::new(10.0, 20.0),
            Point::new(30.0, 20.0),
            10.0,
            &pen(HexColor::BLACK),
        );
        // Cap reaches ~5px beyond the end point.
        assert_eq!(surface.pixel(32, 20).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_zero_length_segment_paints_dot() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.stroke_segment(
            Point::new(10.0, 10.0),
            Point::new(10.0, 10.0),
            6.0,
            &pen(HexColor::BLACK),
        );
        assert_eq!(surface.pixel(10, 10).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_eraser_removes_alpha() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.stroke_segment(
            Point::new(0.0, 20.0),
            Point::new(40.0, 20.0),
            8.0,
            &pen(HexColor::BLACK),
        );
        assert_eq!(surface.pixel(20, 20).map(|p| p[3]), Some(255));

        let eraser = Brush::for_tool(ToolKind::Eraser, HexColor::new(255, 0, 0));
        surface.fill_dot(Point::new(20.0, 20.0), 8.0, &eraser);
        assert_eq!(surface.pixel(20, 20).map(|p| p[3]), Some(0));
        assert_eq!(surface.pixel(2, 20).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_highlighter_multiplies() {
        let mut surface = Surface::new(40, 40).unwrap();
        surface.fill_background(HexColor::WHITE);
        surface.stroke_segment(
            Point::new(0.0, 10.0),
            Point::new(40.0, 10.0),
            6.0,
            &pen(HexColor::BLACK),
        );

        let highlighter = Brush::for_tool(ToolKind::Highlighter, HexColor::new(255, 255, 0));
        surface.stroke_segment(Point::new(20.0, 0.0), Point::new(20.0, 40.0), 10.0, &highlighter);

        // Over white: red and green stay, blue is pulled down.
        let over_paper = surface.pixel(20, 30).unwrap();
        assert!(over_paper[0] >= 250 && over_paper[1] >= 250);
        assert!(over_paper[2] > 150 && over_paper[2] < 220);
        assert_eq!(over_paper[3], 255);

        // Over black ink nothing gets lighter.
        let over_ink = surface.pixel(20, 10).unwrap();
        assert!(over_ink[0] <= 5 && over_ink[1] <= 5 && over_ink[2] <= 5);
    }

    #[test]
    fn test_clear() {
        let mut surface = Surface::new(10, 10).unwrap();
        surface.fill_background(HexColor::WHITE);
        assert_eq!(surface.painted_pixel_count(), 100);
        surface.clear();
        assert_eq!(surface.painted_pixel_count(), 0);
    }
}
