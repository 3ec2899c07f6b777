//! The notebook session: routes pointer and toolbar events to the current
//! page, keeps the drawing surface in sync and autosaves after every
//! change.

use crate::config::{ConfigError, NotebookConfig};
use inkpad_core::{
    CanvasMapper, Document, DocumentStore, Gesture, HexColor, PageSummary, PaintOp, Point,
    PointerInput, Rect, Storage, ToolKind, ToolSettings,
};
use inkpad_render::{
    export_file_name, render_op, render_page, render_thumbnail, thumbnail_size, RenderError,
    RenderResult, Surface,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors opening a notebook.
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// One row of the page list.
#[derive(Debug, Clone)]
pub struct PageEntry {
    pub summary: PageSummary,
    pub thumbnail: Surface,
}

/// The current page encoded for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

/// A notebook session over a storage backend.
pub struct Notebook<S: Storage> {
    document: Document,
    gesture: Gesture,
    tools: ToolSettings,
    surface: Surface,
    store: DocumentStore<S>,
    config: NotebookConfig,
    /// Autosaves that did not reach storage.
    failed_saves: usize,
}

impl<S: Storage> Notebook<S> {
    /// Load the stored document (or start a new one), render the current
    /// page and write the possibly repaired document back.
    pub fn open(storage: Arc<S>, config: NotebookConfig) -> Result<Self, NotebookError> {
        config.validate()?;
        let store = DocumentStore::with_key(storage, config.storage_key.clone());
        let document = store.load_or_default();
        let surface = Surface::new(config.canvas_width, config.canvas_height)?;

        let mut notebook = Self {
            document,
            gesture: Gesture::new(),
            tools: ToolSettings::default(),
            surface,
            store,
            config,
            failed_saves: 0,
        };
        notebook.redraw();
        notebook.autosave();
        Ok(notebook)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// The drawing surface showing the current page.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn config(&self) -> &NotebookConfig {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    pub fn failed_saves(&self) -> usize {
        self.failed_saves
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    // --- Toolbar ---

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.tools.set_color(color);
    }

    pub fn set_width(&mut self, width: f64) {
        self.tools.set_width(width);
    }

    // --- Pointer events ---

    /// Mapper from a displayed canvas rectangle to canvas pixels.
    pub fn mapper(&self, display_rect: Rect) -> CanvasMapper {
        CanvasMapper::new(display_rect, self.config.canvas_size())
    }

    /// Start a stroke where the pointer went down. Input without a
    /// position (a touch event with no touches) is ignored.
    pub fn pointer_down(&mut self, input: &PointerInput, display_rect: Rect) -> Option<PaintOp> {
        let point = self.mapper(display_rect).map_input(input)?;
        Some(self.begin_gesture(point))
    }

    /// Extend the active stroke to the pointer position.
    pub fn pointer_move(&mut self, input: &PointerInput, display_rect: Rect) -> Option<PaintOp> {
        if !self.gesture.is_active() {
            return None;
        }
        let point = self.mapper(display_rect).map_input(input)?;
        self.extend_gesture(point)
    }

    /// Pointer up, leave or cancel.
    pub fn pointer_up(&mut self) -> bool {
        self.end_gesture()
    }

    /// Begin a stroke at a canvas point and paint its initial dot.
    pub fn begin_gesture(&mut self, point: Point) -> PaintOp {
        if self.gesture.is_active() {
            self.end_gesture();
        }

        let page = self.document.current_page_mut();
        let op = self.gesture.begin(page, point, &self.tools);
        if let Some(limit) = self.config.history_limit {
            page.truncate_history(limit);
        }
        render_op(&mut self.surface, &page.strokes, &op);
        op
    }

    /// Append a canvas point to the active stroke and paint the new segment.
    pub fn extend_gesture(&mut self, point: Point) -> Option<PaintOp> {
        let page = self.document.current_page_mut();
        let op = self.gesture.extend(page, point)?;
        render_op(&mut self.surface, &page.strokes, &op);
        Some(op)
    }

    /// Finish the active stroke and save. Returns false when idle.
    pub fn end_gesture(&mut self) -> bool {
        if !self.gesture.end() {
            return false;
        }
        self.autosave();
        true
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.end_gesture();
        if !self.document.current_page_mut().undo() {
            return false;
        }
        self.redraw();
        self.autosave();
        true
    }

    pub fn redo(&mut self) -> bool {
        self.end_gesture();
        if !self.document.current_page_mut().redo() {
            return false;
        }
        self.redraw();
        self.autosave();
        true
    }

    /// Remove every stroke from the current page. Undoable.
    pub fn clear(&mut self) {
        self.end_gesture();
        let page = self.document.current_page_mut();
        page.clear();
        if let Some(limit) = self.config.history_limit {
            page.truncate_history(limit);
        }
        self.redraw();
        self.autosave();
    }

    // --- Pages ---

    /// Add a page at the front of the list and switch to it.
    pub fn add_page(&mut self) -> String {
        self.end_gesture();
        let id = self.document.add_page();
        self.redraw();
        self.autosave();
        id
    }

    /// Switch to an existing page. Unknown ids change nothing.
    pub fn switch_page(&mut self, id: &str) -> bool {
        self.end_gesture();
        if !self.document.set_current_page(id) {
            log::warn!("No page with id {}", id);
            return false;
        }
        self.redraw();
        self.autosave();
        true
    }

    /// Page summaries in display order, each with a fresh thumbnail.
    pub fn page_list(&self) -> RenderResult<Vec<PageEntry>> {
        let source = self.config.canvas_size();
        let (width, height) = thumbnail_size(source, self.config.thumbnail_width);

        self.document
            .page_summaries()
            .into_iter()
            .zip(self.document.pages())
            .map(|(summary, page)| {
                Ok(PageEntry {
                    summary,
                    thumbnail: render_thumbnail(&page.strokes, source, width, height)?,
                })
            })
            .collect()
    }

    // --- Export ---

    /// Encode the drawing surface as PNG, named after the current page.
    pub fn export_png(&self) -> RenderResult<ExportedImage> {
        let file_name = export_file_name(&self.document.current_page().title);
        let png = self.surface.to_png()?;
        log::info!("Exported {} ({} bytes)", file_name, png.len());
        Ok(ExportedImage { file_name, png })
    }

    /// Re-render the current page from its strokes.
    pub fn redraw(&mut self) {
        render_page(&mut self.surface, &self.document.current_page().strokes);
    }

    fn autosave(&mut self) {
        if let Err(e) = self.store.save_document(&self.document) {
            self.failed_saves += 1;
            log::warn!("Autosave failed: {}", e);
        }
    }
}
