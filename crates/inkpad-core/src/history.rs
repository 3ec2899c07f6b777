//! Snapshot-based undo/redo over a page's stroke list.
//!
//! Every mutating action first pushes a full copy of the stroke list onto
//! the undo stack and empties the redo stack. Undo and redo only move the
//! live list and one snapshot between the two stacks.

use crate::page::{Page, Snapshot};

impl Page {
    /// Take a snapshot of the current stroke list.
    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.strokes.clone())
    }

    /// Push the current state to the undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);

        // Clear redo stack when new changes are made
        self.redo_stack.clear();
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            let current = self.snapshot();
            self.redo_stack.push(current);
            self.strokes = snapshot.into_strokes();
            true
        } else {
            false
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            let current = self.snapshot();
            self.undo_stack.push(current);
            self.strokes = snapshot.into_strokes();
            true
        } else {
            false
        }
    }

    /// Remove every stroke, recording the removal in the history.
    pub fn clear(&mut self) {
        self.push_undo();
        self.strokes.clear();
    }

    /// Drop the oldest undo entries so at most `max_depth` remain.
    /// Returns how many entries were dropped.
    pub fn truncate_history(&mut self, max_depth: usize) -> usize {
        let excess = self.undo_stack.len().saturating_sub(max_depth);
        if excess > 0 {
            self.undo_stack.drain(..excess);
        }
        excess
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo snapshots, oldest first.
    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    /// Redo snapshots, oldest first.
    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }
}
