use crate::domain::models::{OperationEntry, WorkspaceEntry};

/// Rows of a list modal whose contents arrive from the engine after it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<T> {
    pub entries: Vec<T>,
    pub selected: usize,
    pub loading: bool,
}

pub type OperationLogState = EntryList<OperationEntry>;
pub type WorkspaceListState = EntryList<WorkspaceEntry>;

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: 0,
            loading: false,
        }
    }
}

impl<T> EntryList<T> {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Replaces the rows, keeping the cursor in range.
    pub fn set_entries(&mut self, entries: Vec<T>) {
        self.entries = entries;
        self.loading = false;
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1).min(self.entries.len() - 1);
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.selected)
    }
}
