use crate::domain::models::CommitId;
use crate::domain::prefix::UniquePrefixIndex;
use ratatui::widgets::TableState;
use std::collections::HashMap;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Panel {
    Graph,
    Diff,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LogState {
    pub list_state: TableState,
    pub selected_file_index: Option<usize>,
    pub current_diff: Option<String>,
    pub is_loading_diff: bool,
    pub diff_scroll: u16,
    pub diff_cache: HashMap<CommitId, String>,
    /// Built over the displayed short ids whenever a snapshot arrives.
    pub change_id_prefixes: UniquePrefixIndex,
    pub commit_id_prefixes: UniquePrefixIndex,
}

impl LogState {
    /// Drops everything derived from the previous snapshot.
    pub fn invalidate_diffs(&mut self) {
        self.diff_cache.clear();
        self.current_diff = None;
        self.is_loading_diff = false;
        self.diff_scroll = 0;
    }
}
