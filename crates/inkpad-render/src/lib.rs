//! Inkpad Render Library
//!
//! Renderer abstraction and a tiny-skia raster implementation for Inkpad:
//! incremental stroke painting, full page replay, thumbnails and PNG export.

mod export;
mod paint;
mod renderer;
mod surface;

pub use export::{encode_png, export_file_name};
pub use paint::{
    render_op, render_page, render_scaled, render_stroke, render_thumbnail, thumbnail_size,
};
pub use renderer::{Brush, RenderError, RenderResult, Renderer};
pub use surface::Surface;
