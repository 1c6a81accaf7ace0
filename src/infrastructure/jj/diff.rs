use super::{JjAdapter, MAX_DIFF_SIZE};
use crate::domain::models::{CommitId, FileStatus};
use anyhow::{anyhow, Result};
use futures::StreamExt;
use jj_lib::{
    backend::{CommitId as JjCommitId, TreeValue},
    matchers::EverythingMatcher,
    merge::MergedTreeValue,
    object_id::ObjectId,
    repo::Repo,
    repo_path::RepoPath,
    store::Store,
};
use std::fmt::Write as _;
use tokio::io::AsyncReadExt;

/// One side of a file change, or `None` when any term looks binary.
async fn read_side(
    store: &Store,
    path: &RepoPath,
    value: &MergedTreeValue,
) -> Result<Option<Vec<u8>>> {
    let mut content = Vec::new();
    for term in value {
        let Some(TreeValue::File { id, .. }) = term.as_ref() else {
            continue;
        };
        let mut reader = store.read_file(path, id).await?.take(MAX_DIFF_SIZE);
        let mut chunk = vec![0u8; 1024];
        let n = reader.read(&mut chunk).await?;
        chunk.truncate(n);
        if super::is_binary(&chunk) {
            return Ok(None);
        }
        content.extend_from_slice(&chunk);
        reader.read_to_end(&mut content).await?;
    }
    Ok(Some(content))
}

fn status_of(value_before: &MergedTreeValue, value_after: &MergedTreeValue) -> FileStatus {
    if !value_after.is_resolved() {
        FileStatus::Conflicted
    } else if value_before.is_absent() {
        FileStatus::Added
    } else if value_after.is_absent() {
        FileStatus::Deleted
    } else {
        FileStatus::Modified
    }
}

impl JjAdapter {
    pub(crate) async fn get_commit_diff_impl(&self, commit_id: &CommitId) -> Result<String> {
        let handle = self.open_repo().await?;
        let repo = &handle.repo;

        let id = JjCommitId::try_from_hex(&commit_id.0)
            .ok_or_else(|| anyhow!("Invalid commit ID format: {}", commit_id.0))?;
        let commit = repo.store().get_commit(&id)?;

        let author = commit.author();
        let timestamp = chrono::DateTime::from_timestamp(author.timestamp.timestamp.0 / 1000, 0)
            .unwrap_or_default()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M");

        let mut output = String::new();
        writeln!(output, "Commit ID: {}", commit.id().hex())?;
        writeln!(
            output,
            "Change ID: {}",
            super::format_change_id(commit.change_id())
        )?;

        let bookmarks: Vec<&str> = repo
            .view()
            .local_bookmarks()
            .filter(|(_, target)| target.added_ids().any(|added| *added == id))
            .map(|(name, _)| name.as_str())
            .collect();
        if !bookmarks.is_empty() {
            writeln!(output, "Bookmarks: {}", bookmarks.join(", "))?;
        }
        writeln!(
            output,
            "Author   : {} <{}> ({timestamp})",
            author.name, author.email
        )?;
        let description = commit.description().trim_end();
        if description.is_empty() {
            output.push_str("    (no description)\n\n");
        } else {
            writeln!(output, "    {}\n", description.replace('\n', "\n    "))?;
        }

        let tree = commit.tree();
        let parent_tree = match commit.parents().next().transpose()? {
            Some(parent) => parent.tree(),
            None => tree.clone(),
        };

        let store = repo.store();
        let mut stream = parent_tree.diff_stream(&tree, &EverythingMatcher);
        while let Some(entry) = stream.next().await {
            let _permit = self
                .diff_semaphore
                .acquire()
                .await
                .map_err(|e| anyhow!(e))?;
            let path = entry.path;
            let values = entry.values?;

            writeln!(output, "File: {}", path.as_internal_file_string())?;
            writeln!(output, "Status: {}", status_of(&values.before, &values.after))?;

            let before = read_side(store, &path, &values.before).await?;
            let after = read_side(store, &path, &values.after).await?;
            let (Some(before), Some(after)) = (before, after) else {
                output.push_str("    (binary file)\n\n");
                continue;
            };

            let before = String::from_utf8_lossy(&before);
            let after = String::from_utf8_lossy(&after);
            let diff = similar::TextDiff::from_lines(before.as_ref(), after.as_ref());
            output.push_str(&diff.unified_diff().context_radius(3).to_string());
            output.push('\n');
        }

        Ok(output)
    }
}
