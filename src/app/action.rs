use crate::app::command::Command;
use crate::domain::models::{CommitId, OperationEntry, RepoSnapshot, WorkspaceEntry};

#[derive(Debug, Clone)]
pub enum UpdateResult {
    Handled(Option<Command>),
    NotHandled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Navigation (Log View) ---
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PageDown,
    PageUp,
    SelectIndex(usize),
    SelectFile(usize),
    SelectNextFile,
    SelectPrevFile,
    ScrollDiffUp(u16),
    ScrollDiffDown(u16),
    NextHunk,
    PrevHunk,
    ToggleDiffs,
    FocusDiff,
    FocusGraph,

    // --- Bookmark Navigation ---
    JumpToNearestBookmark,          // select the bookmark closest to @
    OpenBookmarkPicker,             // list every bookmark (B)
    BookmarkPickerNext,
    BookmarkPickerPrev,
    BookmarkPickerConfirm,
    EditBookmarkTarget(String),     // `jj edit` on the bookmark's edit target
    EditTrunkTarget,                // same, for the configured trunk bookmark

    // --- JJ Domain Intents ---
    SnapshotWorkingCopy,                 // `jj status`
    EditRevision(Option<CommitId>),      // `jj edit <rev>`
    SquashRevision(Option<CommitId>),    // `jj squash -r <rev>`
    NewRevision(Option<CommitId>),       // `jj new <rev>`
    AbandonRevision(Option<CommitId>),   // `jj abandon -r <rev>`
    DescribeRevisionIntent,              // open the description editor
    DescribeRevision(CommitId, String),  // `jj describe <rev> -m "msg"`
    RebaseRevisionIntent,                // pick a destination in the log
    ConfirmRebase,                       // destination = current selection
    RebaseRevision(CommitId, CommitId),  // `jj rebase -r <src> -d <dst>`
    SetBookmarkIntent,
    SetBookmark(CommitId, String),       // `jj bookmark set <name> -r <rev>`
    DeleteBookmarkIntent,
    DeleteBookmark(String),              // `jj bookmark delete <name>`
    RestoreSelectedFile,                 // `jj restore <path>`
    Undo,                                // `jj undo`
    InitRepo,                            // `jj git init --colocate`

    // --- Operations & Workspaces ---
    OpenOperationLog,
    OperationLogNext,
    OperationLogPrev,
    OpenWorkspaces,
    WorkspaceNext,
    WorkspacePrev,
    AddWorkspaceIntent,                  // prompt for a name
    AddWorkspace(String),                // `jj workspace add --name <name> <dir>`
    ForgetWorkspace,                     // `jj workspace forget <selected>`

    // --- UI Mode Transitions ---
    CancelMode,
    ToggleHelp,
    ToggleGraphStyle,
    TextAreaInput(crossterm::event::KeyEvent),

    // --- Async Results ---
    RepoLoaded(Box<RepoSnapshot>),
    RepoReloadedBackground(Box<RepoSnapshot>),
    DiffLoaded(CommitId, String),
    OperationLogLoaded(Result<Vec<OperationEntry>, String>),
    WorkspacesLoaded(Result<Vec<WorkspaceEntry>, String>),
    OperationStarted(String),
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
    ExternalChangeDetected,
}

impl Action {
    /// Resolves a user-facing action name, as written in `[keys.custom]`.
    /// Only actions that make sense as a bare key binding have a name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "quit" => Action::Quit,
            "select_next" => Action::SelectNext,
            "select_prev" => Action::SelectPrev,
            "select_first" => Action::SelectFirst,
            "select_last" => Action::SelectLast,
            "page_down" => Action::PageDown,
            "page_up" => Action::PageUp,
            "toggle_diffs" => Action::ToggleDiffs,
            "focus_diff" => Action::FocusDiff,
            "focus_graph" => Action::FocusGraph,
            "next_hunk" => Action::NextHunk,
            "prev_hunk" => Action::PrevHunk,
            "nearest_bookmark" => Action::JumpToNearestBookmark,
            "bookmarks" => Action::OpenBookmarkPicker,
            "edit_trunk" => Action::EditTrunkTarget,
            "snapshot" => Action::SnapshotWorkingCopy,
            "edit" => Action::EditRevision(None),
            "squash" => Action::SquashRevision(None),
            "new" => Action::NewRevision(None),
            "abandon" => Action::AbandonRevision(None),
            "describe" => Action::DescribeRevisionIntent,
            "rebase" => Action::RebaseRevisionIntent,
            "set_bookmark" => Action::SetBookmarkIntent,
            "delete_bookmark" => Action::DeleteBookmarkIntent,
            "restore_file" => Action::RestoreSelectedFile,
            "undo" => Action::Undo,
            "operation_log" => Action::OpenOperationLog,
            "workspaces" => Action::OpenWorkspaces,
            "help" => Action::ToggleHelp,
            "toggle_graph_style" => Action::ToggleGraphStyle,
            "cancel" => Action::CancelMode,
            _ => return None,
        };
        Some(action)
    }
}
