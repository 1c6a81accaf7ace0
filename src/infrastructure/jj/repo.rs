use super::JjAdapter;
use crate::domain::models::CommitId;
use anyhow::{anyhow, Result};
use jj_lib::{
    backend::CommitId as JjCommitId,
    commit::Commit,
    merged_tree::MergedTree,
    object_id::ObjectId,
    ref_name::{WorkspaceName, WorkspaceNameBuf},
    repo::{ReadonlyRepo, Repo},
};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) struct RepoHandle {
    pub repo: Arc<ReadonlyRepo>,
    pub root: PathBuf,
    pub workspace_name: WorkspaceNameBuf,
}

impl JjAdapter {
    pub(crate) async fn open_repo(&self) -> Result<RepoHandle> {
        let guard = self.workspace.lock().await;
        let ws = guard
            .as_ref()
            .ok_or_else(|| anyhow!("No repository found"))?;
        let repo = ws.repo_loader().load_at_head()?;
        Ok(RepoHandle {
            repo,
            root: ws.workspace_root().to_path_buf(),
            workspace_name: ws.workspace_name().to_owned(),
        })
    }

    /// Rejects ids that are malformed or no longer in the index, so a stale
    /// selection fails before `jj` is spawned.
    pub(crate) async fn validate_commit(&self, commit_id: &CommitId) -> Result<JjCommitId> {
        let handle = self.open_repo().await?;
        let id = JjCommitId::try_from_hex(&commit_id.0)
            .ok_or_else(|| anyhow!("Invalid commit ID format: {}", commit_id.0))?;
        if !handle.repo.index().has_id(&id).map_err(|e| anyhow!(e))? {
            return Err(anyhow!(
                "Commit {} is no longer valid; it was rewritten or abandoned",
                commit_id.short(12)
            ));
        }
        Ok(id)
    }

    pub(crate) async fn is_valid_impl(&self) -> bool {
        self.workspace.lock().await.is_some()
    }
}

pub(crate) struct CommitInfo {
    pub commit: Commit,
    pub parent_tree: Option<MergedTree>,
    pub parent_ids: Vec<CommitId>,
    pub is_working_copy: bool,
    pub is_root: bool,
    pub has_conflict: bool,
    pub is_git_head: bool,
    pub bookmarks: Vec<String>,
    pub workspaces: Vec<String>,
}

pub(crate) fn build_commit_info(
    repo: &ReadonlyRepo,
    id: &JjCommitId,
    current_ws: &WorkspaceName,
) -> Result<CommitInfo> {
    let commit = repo.store().get_commit(id)?;
    let parent_ids = commit
        .parent_ids()
        .iter()
        .map(|p| CommitId(p.hex()))
        .collect();

    let first_parent: Option<Commit> = commit.parents().next().transpose()?;
    let parent_tree = first_parent.as_ref().map(Commit::tree);

    let view = repo.view();
    let is_root = id == repo.store().root_commit_id();
    let is_working_copy = view.get_wc_commit_id(current_ws) == Some(id);
    let is_git_head = view.git_head().added_ids().any(|head| head == id);
    let has_conflict = commit.tree().has_conflict();

    let bookmarks = view
        .local_bookmarks()
        .filter(|(_, target)| target.added_ids().any(|added| added == id))
        .map(|(name, _)| name.as_str().to_string())
        .collect();

    let workspaces = view
        .wc_commit_ids()
        .iter()
        .filter(|(_, wc_id)| *wc_id == id)
        .map(|(name, _)| name.as_str().to_string())
        .collect();

    Ok(CommitInfo {
        commit,
        parent_tree,
        parent_ids,
        is_working_copy,
        is_root,
        has_conflict,
        is_git_head,
        bookmarks,
        workspaces,
    })
}
