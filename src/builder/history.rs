use std::collections::VecDeque;

use crate::domain::FormField;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Linear undo/redo log of field-sequence snapshots with a current pointer.
///
/// Snapshots are owned clones, never shared with live state.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Vec<FormField>>,
    index: usize,
    capacity: usize,
}

impl History {
    pub fn new(initial: Vec<FormField>, capacity: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Start over with a single entry at pointer 0.
    pub fn reset(&mut self, initial: Vec<FormField>) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.index = 0;
    }

    /// Append a snapshot, discarding any redo entries and evicting the oldest
    /// entry when over capacity.
    pub fn record(&mut self, snapshot: Vec<FormField>) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.index = self.entries.len() - 1;
    }

    pub fn undo(&mut self) -> Option<Vec<FormField>> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index).cloned()
    }

    pub fn redo(&mut self) -> Option<Vec<FormField>> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current(&self) -> Option<&[FormField]> {
        self.entries.get(self.index).map(Vec::as_slice)
    }
}
