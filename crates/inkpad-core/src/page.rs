//! Pages: an ordered stroke list plus its undo/redo history.

use crate::stroke::Stroke;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A full copy of a page's stroke list at one point in time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Snapshot(Vec<Stroke>);

impl Snapshot {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self(strokes)
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.0
    }

    pub fn into_strokes(self) -> Vec<Stroke> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshots are written as arrays, but older notebooks stored each one as
/// a JSON-encoded string.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotRepr {
    Strokes(Vec<Stroke>),
    Encoded(String),
}

impl<'de> Deserialize<'de> for Snapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SnapshotRepr::deserialize(deserializer)? {
            SnapshotRepr::Strokes(strokes) => Ok(Self(strokes)),
            SnapshotRepr::Encoded(json) => serde_json::from_str(&json)
                .map(Self)
                .map_err(D::Error::custom),
        }
    }
}

/// A notebook page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique page identifier.
    pub id: String,
    /// Title shown in the page list and used for exports.
    pub title: String,
    /// Strokes in painting order.
    pub strokes: Vec<Stroke>,
    #[serde(default)]
    pub(crate) undo_stack: Vec<Snapshot>,
    #[serde(default)]
    pub(crate) redo_stack: Vec<Snapshot>,
}

impl Page {
    /// Create an empty page with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            strokes: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Number of strokes on the page.
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn last_stroke(&self) -> Option<&Stroke> {
        self.strokes.last()
    }
}
