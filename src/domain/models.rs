use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CommitId(pub String);

impl CommitId {
    /// First `len` characters, for display.
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Conflicted,
}

impl FileStatus {
    /// Single-letter marker used in file lists.
    #[must_use]
    pub fn marker(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Conflicted => 'C',
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileStatus::Added => "Added",
            FileStatus::Modified => "Modified",
            FileStatus::Deleted => "Deleted",
            FileStatus::Conflicted => "Conflicted",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
}

/// One node of the history DAG as supplied by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Revision {
    pub commit_id: CommitId,
    pub change_id: String,
    pub parents: Vec<CommitId>,
    pub bookmarks: Vec<String>,
    pub is_working_copy: bool,
    pub is_root: bool,

    pub description: String,
    pub author: String,
    pub timestamp: String,
    pub timestamp_secs: i64,
    pub is_immutable: bool,
    pub has_conflict: bool,
    pub is_git_head: bool,
    pub workspaces: Vec<String>,
    pub changed_files: Vec<FileChange>,
}

impl Revision {
    #[must_use]
    pub fn has_bookmark(&self, name: &str) -> bool {
        self.bookmarks.iter().any(|b| b == name)
    }

    #[must_use]
    pub fn change_id_short(&self) -> &str {
        match self.change_id.char_indices().nth(SHORT_ID_LEN) {
            Some((idx, _)) => &self.change_id[..idx],
            None => &self.change_id,
        }
    }

    #[must_use]
    pub fn commit_id_short(&self) -> &str {
        self.commit_id.short(SHORT_ID_LEN)
    }

    #[must_use]
    pub fn summary(&self) -> &str {
        self.description.lines().next().unwrap_or("")
    }
}

/// Identifiers are truncated to this many characters before display and
/// before unique prefixes are computed over them.
pub const SHORT_ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepoSnapshot {
    pub repo_name: String,
    pub operation_id: String,
    pub workspace_id: String,
    pub working_copy_id: CommitId,
    /// Display order, children before parents.
    pub revisions: Vec<Revision>,
}

impl RepoSnapshot {
    #[must_use]
    pub fn position_of(&self, id: &CommitId) -> Option<usize> {
        self.revisions.iter().position(|r| &r.commit_id == id)
    }

    #[must_use]
    pub fn working_copy(&self) -> Option<&Revision> {
        self.revisions.iter().find(|r| r.is_working_copy)
    }

    /// Every bookmark in the snapshot, in snapshot order, without duplicates.
    #[must_use]
    pub fn bookmark_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for rev in &self.revisions {
            for name in &rev.bookmarks {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
        }
        names
    }
}

/// One entry of the operation log, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationEntry {
    /// Leading hex digits of the operation id.
    pub id: String,
    pub description: String,
    pub timestamp: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkspaceEntry {
    pub name: String,
    pub commit_id: CommitId,
    pub change_id: String,
    pub is_current: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_ids_do_not_split_chars() {
        let id = CommitId("abcdef0123456789".to_string());
        assert_eq!(id.short(8), "abcdef01");
        assert_eq!(id.short(64), "abcdef0123456789");

        let rev = Revision {
            change_id: "zzzz".to_string(),
            ..Default::default()
        };
        assert_eq!(rev.change_id_short(), "zzzz");
    }

    #[test]
    fn test_bookmark_names_keep_snapshot_order() {
        let snapshot = RepoSnapshot {
            revisions: vec![
                Revision {
                    bookmarks: vec!["feature".to_string(), "main".to_string()],
                    ..Default::default()
                },
                Revision {
                    bookmarks: vec!["main".to_string(), "release".to_string()],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            snapshot.bookmark_names(),
            vec!["feature", "main", "release"]
        );
    }
}
