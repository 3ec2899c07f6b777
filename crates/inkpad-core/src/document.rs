//! The notebook document: ordered pages and the page being edited.

use crate::page::Page;
use serde::{Deserialize, Serialize};

/// Title prefix for generated pages.
const PAGE_TITLE_PREFIX: &str = "Page";

/// Page list entry, as shown by a page picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub stroke_count: usize,
    pub is_current: bool,
}

/// A notebook: an ordered list of pages plus the current page.
///
/// Always holds at least one page, and the current page id resolves.
/// Deserialization repairs documents that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredDocument")]
pub struct Document {
    pages: Vec<Page>,
    current_page_id: Option<String>,
}

/// Document as stored, before repair.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredDocument {
    pages: Vec<Page>,
    #[serde(default)]
    current_page_id: Option<String>,
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        let mut document = Self {
            pages: stored.pages,
            current_page_id: stored.current_page_id,
        };
        document.repair();
        document
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with a single empty page.
    pub fn new() -> Self {
        let page = Page::new(page_title(1));
        let current_page_id = Some(page.id.clone());
        Self {
            pages: vec![page],
            current_page_id,
        }
    }

    /// Ensure there is at least one page and the current page id resolves.
    /// Returns true if anything had to be fixed.
    pub fn repair(&mut self) -> bool {
        let mut repaired = false;

        if self.pages.is_empty() {
            log::warn!("Document has no pages; adding a blank page");
            self.pages.push(Page::new(page_title(1)));
            repaired = true;
        }

        let resolves = self
            .current_page_id
            .as_deref()
            .is_some_and(|id| self.pages.iter().any(|p| p.id == id));
        if !resolves {
            if self.current_page_id.is_some() {
                log::warn!("Current page id is stale; selecting the first page");
            }
            self.current_page_id = Some(self.pages[0].id.clone());
            repaired = true;
        }

        repaired
    }

    /// Pages in display order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: &str) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    pub fn current_page_id(&self) -> Option<&str> {
        self.current_page_id.as_deref()
    }

    fn current_index(&self) -> usize {
        self.current_page_id
            .as_deref()
            .and_then(|id| self.pages.iter().position(|p| p.id == id))
            .unwrap_or(0)
    }

    /// The page being edited. Falls back to the first page if the current
    /// id does not resolve.
    pub fn current_page(&self) -> &Page {
        &self.pages[self.current_index()]
    }

    /// Mutable access to the page being edited, repairing the current page
    /// id first.
    pub fn current_page_mut(&mut self) -> &mut Page {
        self.repair();
        let index = self.current_index();
        &mut self.pages[index]
    }

    /// Make `id` the current page. Returns false for unknown ids.
    pub fn set_current_page(&mut self, id: &str) -> bool {
        if self.page(id).is_none() {
            log::warn!("Cannot switch to unknown page {}", id);
            return false;
        }
        self.current_page_id = Some(id.to_string());
        true
    }

    /// Create a new page at the top of the list and make it current.
    /// Returns the new page's id.
    pub fn add_page(&mut self) -> String {
        let page = Page::new(page_title(self.pages.len() + 1));
        let id = page.id.clone();
        self.pages.insert(0, page);
        self.current_page_id = Some(id.clone());
        log::info!("Added page {}", id);
        id
    }

    /// Entries for a page picker, in display order.
    pub fn page_summaries(&self) -> Vec<PageSummary> {
        let current = self.current_page().id.as_str();
        self.pages
            .iter()
            .map(|page| PageSummary {
                id: page.id.clone(),
                title: page.title.clone(),
                stroke_count: page.stroke_count(),
                is_current: page.id == current,
            })
            .collect()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON, repairing it if needed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn page_title(number: usize) -> String {
    format!("{} {}", PAGE_TITLE_PREFIX, number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{HexColor, Stroke};
    use crate::tools::ToolKind;
    use kurbo::Point;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 1);
        let page = doc.current_page();
        assert_eq!(page.title, "Page 1");
        assert!(page.strokes.is_empty());
        assert_eq!(doc.current_page_id(), Some(page.id.as_str()));
    }

    #[test]
    fn test_add_page_goes_first_and_becomes_current() {
        let mut doc = Document::new();
        let first_id = doc.current_page().id.clone();
        let id = doc.add_page();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[0].id, id);
        assert_eq!(doc.pages()[0].title, "Page 2");
        assert_eq!(doc.pages()[1].id, first_id);
        assert_eq!(doc.current_page().id, id);
    }

    #[test]
    fn test_set_current_page() {
        let mut doc = Document::new();
        let first_id = doc.current_page().id.clone();
        doc.add_page();

        assert!(doc.set_current_page(&first_id));
        assert_eq!(doc.current_page().id, first_id);
        assert!(!doc.set_current_page("missing"));
        assert_eq!(doc.current_page().id, first_id);
    }

    #[test]
    fn test_repair_stale_current_page() {
        let json = r#"{
            "pages": [
                {"id": "a", "title": "A", "strokes": []},
                {"id": "b", "title": "B", "strokes": []}
            ],
            "currentPageId": "zzz"
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.current_page_id(), Some("a"));
    }

    #[test]
    fn test_repair_missing_current_page() {
        let json = r#"{"pages":[{"id":"a","title":"A","strokes":[]}],"currentPageId":null}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.current_page_id(), Some("a"));

        let json = r#"{"pages":[{"id":"a","title":"A","strokes":[]}]}"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.current_page_id(), Some("a"));
    }

    #[test]
    fn test_repair_empty_pages() {
        let doc = Document::from_json(r#"{"pages":[],"currentPageId":"x"}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.current_page().title, "Page 1");
        assert_eq!(doc.current_page_id(), Some(doc.pages()[0].id.as_str()));
    }

    #[test]
    fn test_serde_deserialize_repairs_empty_document() {
        let doc: Document = serde_json::from_str(r#"{"pages":[],"currentPageId":null}"#).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.current_page().title, "Page 1");
        assert_eq!(doc.current_page_id(), Some(doc.pages()[0].id.as_str()));
    }

    #[test]
    fn test_serde_deserialize_repairs_stale_current_page() {
        let value = serde_json::json!({
            "pages": [{"id": "a", "title": "A", "strokes": []}],
            "currentPageId": "gone",
        });
        let doc: Document = serde_json::from_value(value).unwrap();
        assert_eq!(doc.current_page_id(), Some("a"));
    }

    #[test]
    fn test_repair_reports_changes() {
        let mut doc = Document::new();
        assert!(!doc.repair());
    }

    #[test]
    fn test_page_summaries() {
        let mut doc = Document::new();
        doc.current_page_mut()
            .strokes
            .push(Stroke::new(ToolKind::Pen, HexColor::BLACK, 2.0, Point::ZERO));
        doc.add_page();

        let summaries = doc.page_summaries();
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].is_current);
        assert_eq!(summaries[0].stroke_count, 0);
        assert!(!summaries[1].is_current);
        assert_eq!(summaries[1].stroke_count, 1);
        assert_eq!(summaries[1].title, "Page 1");
    }

    #[test]
    fn test_json_roundtrip_keeps_history() {
        let mut doc = Document::new();
        let page = doc.current_page_mut();
        page.push_undo();
        page.strokes.push(Stroke::new(
            ToolKind::Highlighter,
            HexColor::new(255, 230, 0),
            8.0,
            Point::new(3.0, 4.0),
        ));
        page.clear();
        page.undo();

        let json = doc.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("currentPageId").is_some());

        let loaded = Document::from_json(&json).unwrap();
        assert_eq!(loaded, doc);
        assert_eq!(loaded.current_page().undo_depth(), 1);
        assert_eq!(loaded.current_page().redo_depth(), 1);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Document::from_json("{not json").is_err());
        assert!(Document::from_json(r#"{"pages":"nope"}"#).is_err());
    }
}
