use crate::domain::models::{CommitId, OperationEntry, RepoSnapshot, WorkspaceEntry};
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Everything the application asks of the version-control engine.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VcsFacade: Send + Sync {
    /// Up to `limit` revisions, newest first. A revset narrows the selection.
    async fn load_snapshot(&self, limit: usize, revset: Option<String>) -> Result<RepoSnapshot>;

    async fn get_commit_diff(&self, commit_id: &CommitId) -> Result<String>;

    async fn edit(&self, commit_id: &CommitId) -> Result<()>;
    async fn rebase(&self, source: &CommitId, destination: &CommitId) -> Result<()>;
    async fn describe(&self, commit_id: &CommitId, message: &str) -> Result<()>;
    async fn abandon(&self, commit_id: &CommitId) -> Result<()>;
    // Folds the revision into its parent
    async fn squash(&self, commit_id: &CommitId) -> Result<()>;
    async fn new_child(&self, commit_id: &CommitId) -> Result<()>;
    async fn restore_file(&self, path: &str) -> Result<()>;

    async fn set_bookmark(&self, commit_id: &CommitId, name: &str) -> Result<()>;
    async fn delete_bookmark(&self, name: &str) -> Result<()>;

    async fn undo(&self) -> Result<()>;
    async fn snapshot(&self) -> Result<String>;

    /// Up to `limit` operations reachable from the current one, newest first.
    async fn operation_log(&self, limit: usize) -> Result<Vec<OperationEntry>>;

    /// Every workspace of the repository, sorted by name.
    async fn workspaces(&self) -> Result<Vec<WorkspaceEntry>>;
    /// Adds workspace `name` in a new directory next to this workspace.
    /// Returns the directory it was created in.
    async fn add_workspace(&self, name: &str) -> Result<PathBuf>;
    /// Stops tracking workspace `name`. The current workspace is refused.
    async fn forget_workspace(&self, name: &str) -> Result<()>;

    async fn init_repo(&self) -> Result<()>;
    async fn is_valid(&self) -> bool;

    fn workspace_root(&self) -> PathBuf;
}
