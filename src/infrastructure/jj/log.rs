use super::repo::{build_commit_info, CommitInfo};
use super::JjAdapter;
use crate::domain::models::{CommitId, FileChange, FileStatus, RepoSnapshot, Revision};
use anyhow::{anyhow, Context, Result};
use futures::StreamExt;
use jj_lib::{backend::CommitId as JjCommitId, matchers::EverythingMatcher, object_id::ObjectId};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::path::Path;

impl JjAdapter {
    pub(crate) async fn load_snapshot_impl(
        &self,
        limit: usize,
        revset: Option<String>,
    ) -> Result<RepoSnapshot> {
        let handle = self.open_repo().await?;
        let repo = handle.repo.clone();
        let ws_name = handle.workspace_name.clone();
        let root = handle.root.clone();

        let infos = tokio::task::spawn_blocking(move || -> Result<Vec<CommitInfo>> {
            let ids = match revset {
                Some(revset) => resolve_revset(&root, &revset, limit)?,
                None => walk_from_heads(repo.view().heads().iter().cloned(), limit, |id| {
                    repo.store()
                        .get_commit(id)
                        .map(|c| c.parent_ids().to_vec())
                        .unwrap_or_default()
                }),
            };
            let mut infos = Vec::with_capacity(ids.len());
            for id in &ids {
                match build_commit_info(&repo, id, &ws_name) {
                    Ok(info) => infos.push(info),
                    Err(e) => ::log::warn!("skipping {}: {e}", id.hex()),
                }
            }
            Ok(infos)
        })
        .await??;

        let nodes: Vec<(CommitId, Vec<CommitId>, i64)> = infos
            .iter()
            .map(|info| {
                (
                    CommitId(info.commit.id().hex()),
                    info.parent_ids.clone(),
                    info.commit.committer().timestamp.timestamp.0,
                )
            })
            .collect();
        let order = children_first(&nodes);
        let mut slots: Vec<Option<CommitInfo>> = infos.into_iter().map(Some).collect();
        let ordered: Vec<CommitInfo> = order.into_iter().filter_map(|i| slots[i].take()).collect();

        let revisions = futures::stream::iter(ordered)
            .map(to_revision)
            .buffered(32)
            .collect::<Vec<_>>()
            .await;

        let repo = &handle.repo;
        let working_copy_id = repo
            .view()
            .get_wc_commit_id(&handle.workspace_name)
            .map(|id| CommitId(id.hex()))
            .unwrap_or_default();
        let repo_name = handle
            .root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        ::log::debug!("loaded {} revisions from {repo_name}", revisions.len());
        Ok(RepoSnapshot {
            repo_name,
            operation_id: repo.operation().id().hex(),
            workspace_id: handle.workspace_name.as_str().to_string(),
            working_copy_id,
            revisions,
        })
    }
}

fn resolve_revset(root: &Path, revset: &str, limit: usize) -> Result<Vec<JjCommitId>> {
    let output = std::process::Command::new("jj")
        .args(["--color", "never", "--no-pager", "log", "--no-graph"])
        .args(["-r", revset])
        .args(["-T", "commit_id ++ \"\\n\""])
        .current_dir(root)
        .output()
        .context("Failed to execute 'jj'. Is it installed and on PATH?")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("jj log failed: {}", stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter_map(JjCommitId::try_from_hex)
        .take(limit)
        .collect())
}

fn walk_from_heads<F>(
    heads: impl Iterator<Item = JjCommitId>,
    limit: usize,
    parents_of: F,
) -> Vec<JjCommitId>
where
    F: Fn(&JjCommitId) -> Vec<JjCommitId>,
{
    let mut visited = HashSet::new();
    let mut queue: VecDeque<JjCommitId> = heads.collect();
    let mut out = Vec::new();
    while let Some(id) = queue.pop_front() {
        if out.len() >= limit {
            break;
        }
        if !visited.insert(id.clone()) {
            continue;
        }
        queue.extend(parents_of(&id));
        out.push(id);
    }
    out
}

/// Orders nodes so every child precedes its parents. Among the revisions
/// ready at each step the newest goes first, then the earlier input index.
/// Parents outside the set are ignored.
pub(crate) fn children_first(nodes: &[(CommitId, Vec<CommitId>, i64)]) -> Vec<usize> {
    let index: HashMap<&CommitId, usize> =
        nodes.iter().enumerate().map(|(i, n)| (&n.0, i)).collect();

    let mut pending_children = vec![0usize; nodes.len()];
    for (_, parents, _) in nodes {
        let unique: HashSet<&CommitId> = parents.iter().collect();
        for parent in unique {
            if let Some(&p) = index.get(parent) {
                pending_children[p] += 1;
            }
        }
    }

    let mut ready: BinaryHeap<(i64, Reverse<usize>)> = nodes
        .iter()
        .enumerate()
        .filter(|(i, _)| pending_children[*i] == 0)
        .map(|(i, n)| (n.2, Reverse(i)))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some((_, Reverse(i))) = ready.pop() {
        order.push(i);
        let unique: HashSet<&CommitId> = nodes[i].1.iter().collect();
        for parent in unique {
            if let Some(&p) = index.get(parent) {
                pending_children[p] -= 1;
                if pending_children[p] == 0 {
                    ready.push((nodes[p].2, Reverse(p)));
                }
            }
        }
    }

    // A cycle would strand nodes; keep them rather than drop data.
    if order.len() < nodes.len() {
        let placed: HashSet<usize> = order.iter().copied().collect();
        order.extend((0..nodes.len()).filter(|i| !placed.contains(i)));
    }
    order
}

async fn to_revision(info: CommitInfo) -> Revision {
    let commit = &info.commit;
    let author = commit.author();
    let timestamp_secs = author.timestamp.timestamp.0 / 1000;
    let timestamp = chrono::DateTime::from_timestamp(timestamp_secs, 0)
        .unwrap_or_default()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let mut changed_files = Vec::new();
    if let Some(parent_tree) = &info.parent_tree {
        let tree = commit.tree();
        let mut stream = parent_tree.diff_stream(&tree, &EverythingMatcher);
        while let Some(entry) = stream.next().await {
            let status = match &entry.values {
                Ok(values) if !values.after.is_resolved() => FileStatus::Conflicted,
                Ok(values) if values.before.is_absent() => FileStatus::Added,
                Ok(values) if values.after.is_absent() => FileStatus::Deleted,
                _ => FileStatus::Modified,
            };
            changed_files.push(FileChange {
                path: entry.path.as_internal_file_string().to_string(),
                status,
            });
        }
    }

    Revision {
        commit_id: CommitId(commit.id().hex()),
        change_id: super::format_change_id(commit.change_id()),
        parents: info.parent_ids,
        bookmarks: info.bookmarks,
        is_working_copy: info.is_working_copy,
        is_root: info.is_root,
        description: commit.description().to_string(),
        author: author.email.clone(),
        timestamp,
        timestamp_secs,
        is_immutable: info.is_root,
        has_conflict: info.has_conflict,
        is_git_head: info.is_git_head,
        workspaces: info.workspaces,
        changed_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, parents: &[&str], ts: i64) -> (CommitId, Vec<CommitId>, i64) {
        (
            CommitId(id.to_string()),
            parents.iter().map(|p| CommitId(p.to_string())).collect(),
            ts,
        )
    }

    fn ordered_ids(nodes: &[(CommitId, Vec<CommitId>, i64)]) -> Vec<&str> {
        children_first(nodes)
            .into_iter()
            .map(|i| nodes[i].0 .0.as_str())
            .collect()
    }

    #[test]
    fn test_children_first_fixes_bfs_order() {
        // BFS from heads [short, long] reaches base before long's parent
        let nodes = vec![
            node("short", &["base"], 50),
            node("long", &["mid"], 40),
            node("base", &[], 10),
            node("mid", &["base"], 30),
        ];
        assert_eq!(ordered_ids(&nodes), vec!["short", "long", "mid", "base"]);
    }

    #[test]
    fn test_children_first_merge_and_missing_parents() {
        let nodes = vec![
            node("merge", &["a", "b"], 100),
            node("b", &["gone"], 90),
            node("a", &["root"], 95),
            node("root", &[], 0),
        ];
        let order = ordered_ids(&nodes);
        assert_eq!(order[0], "merge");
        assert_eq!(order[1], "a");
        assert_eq!(order[2], "b");
        assert_eq!(order[3], "root");
    }

    #[test]
    fn test_children_first_keeps_cyclic_nodes() {
        let nodes = vec![node("x", &["y"], 1), node("y", &["x"], 2)];
        assert_eq!(children_first(&nodes).len(), 2);
    }

    #[test]
    fn test_walk_from_heads_respects_limit_and_dedupes() {
        let id = |s: &str| JjCommitId::from_hex(s);
        let graph: HashMap<JjCommitId, Vec<JjCommitId>> = HashMap::from([
            (id("aa"), vec![id("cc")]),
            (id("bb"), vec![id("cc")]),
            (id("cc"), vec![id("dd")]),
            (id("dd"), vec![]),
        ]);
        let parents = |c: &JjCommitId| graph.get(c).cloned().unwrap_or_default();

        let all = walk_from_heads([id("aa"), id("bb")].into_iter(), 10, parents);
        assert_eq!(all, vec![id("aa"), id("bb"), id("cc"), id("dd")]);

        let limited = walk_from_heads([id("aa"), id("bb")].into_iter(), 2, parents);
        assert_eq!(limited.len(), 2);
    }
}
