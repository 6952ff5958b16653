//! Snapshot history (undo/redo) for the compose buffer.

/// Default maximum number of snapshots kept
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Linear text history: a list of snapshots and a cursor into it.
///
/// `entries[cursor]` is always the visible text. A new edit after an undo
/// discards every snapshot past the cursor, so there is never more than one
/// redo branch.
#[derive(Debug, Clone)]
pub struct TextHistory {
    entries: Vec<String>,
    cursor: usize,
    max_entries: usize,
}

impl Default for TextHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHistory {
    /// Create a history holding a single empty snapshot
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    /// Create a history with a bounded number of snapshots (at least 1)
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: vec![String::new()],
            cursor: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new snapshot (drops the redo branch)
    pub fn edit(&mut self, value: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(value.into());
        self.cursor = self.entries.len() - 1;

        // Trim oldest snapshots once over capacity
        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot. Returns false at the first snapshot.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns false at the last snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Replace the whole history with a single snapshot
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.entries.clear();
        self.entries.push(initial.into());
        self.cursor = 0;
    }

    pub fn current_text(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Index of the active snapshot
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}
