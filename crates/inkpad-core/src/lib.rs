//! Inkpad Core Library
//!
//! Platform-agnostic data structures and logic for the Inkpad notebook:
//! strokes, pages with undo/redo history, the gesture state machine, the
//! multi-page document and its persistence.

pub mod document;
pub mod geometry;
pub mod gesture;
mod history;
pub mod page;
pub mod storage;
pub mod stroke;
pub mod tools;

pub use document::{Document, PageSummary};
pub use geometry::{CanvasMapper, PointerInput};
pub use gesture::{Gesture, GestureState, PaintOp};
pub use page::{Page, Snapshot};
pub use storage::{DocumentStore, FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use stroke::{ColorParseError, HexColor, Stroke};
pub use tools::{Composition, ToolKind, ToolSettings};

pub use kurbo::{Point, Rect, Size};
