use super::ops::run_jj;
use super::{format_change_id, JjAdapter};
use crate::domain::models::{CommitId, OperationEntry, WorkspaceEntry};
use anyhow::{anyhow, Result};
use jj_lib::{
    object_id::ObjectId,
    op_store::OperationId,
    operation::Operation,
    repo::{ReadonlyRepo, Repo},
};
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::path::{Path, PathBuf};

const OPERATION_ID_LEN: usize = 12;

impl JjAdapter {
    /// Walks operation ancestry from the head operation. Merged histories are
    /// visited once, newest start time first.
    pub(crate) async fn operation_log_impl(&self, limit: usize) -> Result<Vec<OperationEntry>> {
        let handle = self.open_repo().await?;
        let op_store = handle.repo.op_store().clone();
        let head = handle.repo.operation().clone();
        let head_id = head.id().clone();

        let mut queue = BinaryHeap::new();
        let mut pending: HashMap<OperationId, Operation> = HashMap::new();
        let mut seen = HashSet::new();
        seen.insert(head_id.clone());
        queue.push((start_millis(&head), head_id.clone()));
        pending.insert(head_id.clone(), head);

        let mut entries = Vec::new();
        while let Some((_, id)) = queue.pop() {
            if entries.len() >= limit {
                break;
            }
            let Some(op) = pending.remove(&id) else {
                continue;
            };
            for parent_id in op.parent_ids() {
                if !seen.insert(parent_id.clone()) {
                    continue;
                }
                match op_store.read_operation(parent_id).await {
                    Ok(data) => {
                        let parent = Operation::new(op_store.clone(), parent_id.clone(), data);
                        queue.push((start_millis(&parent), parent_id.clone()));
                        pending.insert(parent_id.clone(), parent);
                    }
                    Err(e) => ::log::warn!("skipping operation {}: {e}", parent_id.hex()),
                }
            }
            entries.push(OperationEntry {
                id: short_hex(&id.hex()),
                description: op.metadata().description.clone(),
                timestamp: format_millis(start_millis(&op)),
                is_current: id == head_id,
            });
        }
        ::log::debug!("operation log: {} entries", entries.len());
        Ok(entries)
    }

    pub(crate) async fn workspaces_impl(&self) -> Result<Vec<WorkspaceEntry>> {
        let handle = self.open_repo().await?;
        let repo = &handle.repo;
        let mut entries = Vec::new();
        // Keyed by name, so already sorted
        for (name, commit_id) in repo.view().wc_commit_ids() {
            let change_id = match repo.store().get_commit(commit_id) {
                Ok(commit) => format_change_id(commit.change_id()),
                Err(e) => {
                    ::log::warn!("workspace {} points at unreadable commit: {e}", name.as_str());
                    String::new()
                }
            };
            entries.push(WorkspaceEntry {
                name: name.as_str().to_string(),
                commit_id: CommitId(commit_id.hex()),
                change_id,
                is_current: *name == handle.workspace_name,
            });
        }
        Ok(entries)
    }

    pub(crate) async fn add_workspace_impl(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        validate_workspace_name(name)?;
        let handle = self.open_repo().await?;
        if has_workspace(&handle.repo, name) {
            return Err(anyhow!("Workspace {name} already exists"));
        }

        let destination = sibling_path(&handle.root, name)?;
        ensure_usable_destination(&destination)?;
        let destination_arg = destination.to_string_lossy().into_owned();
        run_jj(
            &handle.root,
            &["workspace", "add", "--name", name, "--", &destination_arg],
        )
        .await?;
        ::log::info!("added workspace {name} at {}", destination.display());
        Ok(destination)
    }

    pub(crate) async fn forget_workspace_impl(&self, name: &str) -> Result<()> {
        let handle = self.open_repo().await?;
        if name == handle.workspace_name.as_str() {
            return Err(anyhow!("Cannot forget the current workspace"));
        }
        if !has_workspace(&handle.repo, name) {
            return Err(anyhow!("Workspace not found: {name}"));
        }
        run_jj(&handle.root, &["workspace", "forget", "--", name]).await?;
        Ok(())
    }
}

fn has_workspace(repo: &ReadonlyRepo, name: &str) -> bool {
    repo.view()
        .wc_commit_ids()
        .keys()
        .any(|ws| ws.as_str() == name)
}

fn start_millis(op: &Operation) -> i64 {
    op.metadata().time.start.timestamp.0
}

fn short_hex(hex: &str) -> String {
    hex.chars().take(OPERATION_ID_LEN).collect()
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

fn validate_workspace_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("Workspace name cannot be empty"));
    }
    if name.starts_with('-') || name.starts_with('.') {
        return Err(anyhow!("Invalid workspace name: {name}"));
    }
    if name
        .chars()
        .any(|c| c.is_whitespace() || c == '/' || c == '\\')
    {
        return Err(anyhow!("Workspace name cannot contain spaces or slashes"));
    }
    Ok(())
}

/// `<parent>/<repo dir>-<name>`, next to the workspace at `root`.
fn sibling_path(root: &Path, name: &str) -> Result<PathBuf> {
    let parent = root
        .parent()
        .ok_or_else(|| anyhow!("Workspace root {} has no parent", root.display()))?;
    let base = root
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("workspace");
    Ok(parent.join(format!("{base}-{name}")))
}

/// The destination may be missing or an empty directory, nothing else.
fn ensure_usable_destination(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(anyhow!("Path exists and is a file: {}", path.display()));
    }
    if std::fs::read_dir(path)?.next().is_some() {
        return Err(anyhow!("Directory is not empty: {}", path.display()));
    }
    Ok(())
}
