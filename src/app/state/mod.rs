use super::config::{AppConfig, GraphStyle};
use super::keymap::KeyMap;
use crate::domain::models::{CommitId, FileChange, RepoSnapshot, Revision};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub mod error;
pub mod header;
pub mod history;
pub mod input;
pub mod log;
pub mod picker;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use header::HeaderState;
pub use history::{EntryList, OperationLogState, WorkspaceListState};
pub use input::InputState;
pub use log::{LogState, Panel};
pub use picker::{BookmarkPickerState, PickerPurpose};

const STATUS_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum AppMode {
    Normal,         // Navigating the log
    Diff,           // Focusing the diff window for scrolling
    Input,          // Editing a description
    BookmarkInput,  // Inputting a bookmark name
    RebaseSelect,   // Selecting rebase destination
    BookmarkPicker, // Choosing from every bookmark
    OperationLog,   // Browsing the operation log
    Workspaces,     // Listing workspaces
    WorkspaceInput, // Naming a new workspace
    Help,           // Showing the help overlay
    NoRepo,         // No repository found, showing welcome screen
    Loading,        // Waiting for the first snapshot
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState<'a> {
    // --- Connectivity & Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,
    pub active_tasks: Vec<String>,

    // --- Repository data ---
    pub repo: Option<RepoSnapshot>,
    pub revset: Option<String>,
    pub log_limit: usize,
    pub trunk_bookmark: String,

    // --- UI State (Selection, Scroll, Diff) ---
    pub log: LogState,
    pub show_diffs: bool,
    pub header_state: HeaderState,
    pub spinner: String,
    pub graph_style: GraphStyle,

    // --- Input Handling ---
    pub input: Option<InputState<'a>>,
    pub bookmark_picker: Option<BookmarkPickerState>,
    pub rebase_source: Option<CommitId>,
    pub operation_log: Option<OperationLogState>,
    pub workspace_list: Option<WorkspaceListState>,

    // --- Click Tracking ---
    pub last_click_time: Option<Instant>,
    pub last_click_pos: Option<(u16, u16)>,

    // --- Animation ---
    pub frame_count: u64,
    pub hunk_highlight_time: Option<Instant>,

    // --- Layout ---
    pub diff_ratio: u16,
    pub focused_panel: Panel,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub theme: crate::theme::Theme,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            keymap: Arc::new(KeyMap::from_config(&config.keys)),
            theme: crate::theme::Theme::from_palette_type(config.theme),
            graph_style: config.graph_style,
            trunk_bookmark: config.trunk_bookmark.clone(),
            log_limit: config.log_limit,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn selected_revision(&self) -> Option<&Revision> {
        let repo = self.repo.as_ref()?;
        repo.revisions.get(self.log.list_state.selected()?)
    }

    #[must_use]
    pub fn selected_commit_id(&self) -> Option<CommitId> {
        self.selected_revision().map(|r| r.commit_id.clone())
    }

    #[must_use]
    pub fn get_selected_file(&self) -> Option<&FileChange> {
        let rev = self.selected_revision()?;
        rev.changed_files.get(self.log.selected_file_index?)
    }

    /// Shows a footer message that clears itself after a few seconds.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_DURATION);
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Normal,
            last_error: None,
            status_message: None,
            status_clear_time: None,
            active_tasks: Vec::new(),
            repo: None,
            revset: None,
            log_limit: 100,
            trunk_bookmark: "main".to_string(),
            log: LogState::default(),
            show_diffs: false,
            header_state: HeaderState::default(),
            spinner: "⠋".to_string(),
            graph_style: GraphStyle::Full,
            input: None,
            bookmark_picker: None,
            rebase_source: None,
            operation_log: None,
            workspace_list: None,
            last_click_time: None,
            last_click_pos: None,
            frame_count: 0,
            hunk_highlight_time: None,
            diff_ratio: 50,
            focused_panel: Panel::Graph,
            keymap: Arc::new(KeyMap::default()),
            theme: crate::theme::Theme::default(),
        }
    }
}
