use crate::domain::models::CommitId;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadRepo(usize, Option<String>),
    LoadRepoBackground(usize, Option<String>),
    LoadDiff(CommitId),
    Describe(CommitId, String),
    Snapshot,
    Edit(CommitId),
    Squash(CommitId),
    New(CommitId),
    Abandon(CommitId),
    Rebase(CommitId, CommitId),
    RestoreFile(String),
    SetBookmark(CommitId, String),
    DeleteBookmark(String),
    Undo,
    InitRepo,
    LoadOperationLog(usize),
    LoadWorkspaces,
    AddWorkspace(String),
    ForgetWorkspace(String),
}
