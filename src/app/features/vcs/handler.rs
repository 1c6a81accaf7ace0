use crate::app::{action::Action, command::Command};
use crate::domain::vcs::VcsFacade;
use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

pub fn handle_command(
    command: Command,
    adapter: Arc<dyn VcsFacade>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    match command {
        Command::LoadRepoBackground(limit, revset) => {
            tokio::spawn(async move {
                match adapter.load_snapshot(limit, revset).await {
                    Ok(repo) => {
                        log::debug!("background reload: {} revisions", repo.revisions.len());
                        let _ = tx
                            .send(Action::RepoReloadedBackground(Box::new(repo)))
                            .await;
                    }
                    Err(e) => {
                        log::warn!("background reload failed: {e:#}");
                        let _ = tx
                            .send(Action::ErrorOccurred(format!(
                                "Background sync failed: {e}"
                            )))
                            .await;
                    }
                }
            });
        }
        Command::LoadRepo(limit, revset) => {
            tokio::spawn(async move {
                match adapter.load_snapshot(limit, revset).await {
                    Ok(repo) => {
                        log::debug!("loaded snapshot: {} revisions", repo.revisions.len());
                        let _ = tx.send(Action::RepoLoaded(Box::new(repo))).await;
                    }
                    Err(e) => {
                        log::warn!("load failed: {e:#}");
                        let _ = tx
                            .send(Action::ErrorOccurred(format!("Failed to load repo: {e}")))
                            .await;
                    }
                }
            });
        }
        Command::LoadDiff(commit_id) => {
            let commit_id_clone = commit_id.clone();
            tokio::spawn(async move {
                match adapter.get_commit_diff(&commit_id).await {
                    Ok(diff) => {
                        let _ = tx.send(Action::DiffLoaded(commit_id_clone, diff)).await;
                    }
                    Err(e) => {
                        log::warn!("diff for {commit_id_clone} failed: {e:#}");
                        let _ = tx
                            .send(Action::DiffLoaded(commit_id_clone, format!("Error: {e}")))
                            .await;
                    }
                }
            });
        }
        Command::Describe(commit_id, message) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Describing {}...", commit_id.short(8)),
                    "Description updated",
                    move || async move { adapter.describe(&commit_id, &message).await },
                )
                .await;
            });
        }
        Command::Snapshot => {
            tokio::spawn(async move {
                log::info!("snapshotting working copy");
                let _ = tx
                    .send(Action::OperationStarted("Snapshotting...".to_string()))
                    .await;
                match adapter.snapshot().await {
                    Ok(msg) => {
                        let _ = tx.send(Action::OperationCompleted(Ok(msg))).await;
                    }
                    Err(e) => {
                        log::warn!("snapshot failed: {e:#}");
                        let _ = tx
                            .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                            .await;
                    }
                }
            });
        }
        Command::Edit(commit_id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Editing {}...", commit_id.short(8)),
                    "Edit successful",
                    move || async move { adapter.edit(&commit_id).await },
                )
                .await;
            });
        }
        Command::Squash(commit_id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Squashing {}...", commit_id.short(8)),
                    "Squash successful",
                    move || async move { adapter.squash(&commit_id).await },
                )
                .await;
            });
        }
        Command::New(commit_id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Creating child of {}...", commit_id.short(8)),
                    "New revision created",
                    move || async move { adapter.new_child(&commit_id).await },
                )
                .await;
            });
        }
        Command::Abandon(commit_id) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Abandoning {}...", commit_id.short(8)),
                    "Revision abandoned",
                    move || async move { adapter.abandon(&commit_id).await },
                )
                .await;
            });
        }
        Command::Rebase(source, destination) => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!(
                        "Rebasing {} onto {}...",
                        source.short(8),
                        destination.short(8)
                    ),
                    "Rebase successful",
                    move || async move { adapter.rebase(&source, &destination).await },
                )
                .await;
            });
        }
        Command::RestoreFile(path) => {
            let path_clone = path.clone();
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Restoring {path_clone}..."),
                    "File restored",
                    move || async move { adapter.restore_file(&path).await },
                )
                .await;
            });
        }
        Command::SetBookmark(commit_id, name) => {
            let name_clone = name.clone();
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Setting bookmark {name_clone}..."),
                    "Bookmark set",
                    move || async move { adapter.set_bookmark(&commit_id, &name).await },
                )
                .await;
            });
        }
        Command::DeleteBookmark(name) => {
            let name_clone = name.clone();
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Deleting bookmark {name_clone}..."),
                    "Bookmark deleted",
                    move || async move { adapter.delete_bookmark(&name).await },
                )
                .await;
            });
        }
        Command::Undo => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    "Undoing...".to_string(),
                    "Undo successful",
                    move || async move { adapter.undo().await },
                )
                .await;
            });
        }
        Command::LoadOperationLog(limit) => {
            tokio::spawn(async move {
                let result = adapter.operation_log(limit).await.map_err(|e| {
                    log::warn!("operation log failed: {e:#}");
                    format!("Failed to load operation log: {e}")
                });
                let _ = tx.send(Action::OperationLogLoaded(result)).await;
            });
        }
        Command::LoadWorkspaces => {
            tokio::spawn(async move {
                let result = adapter.workspaces().await.map_err(|e| {
                    log::warn!("workspace list failed: {e:#}");
                    format!("Failed to list workspaces: {e}")
                });
                let _ = tx.send(Action::WorkspacesLoaded(result)).await;
            });
        }
        Command::AddWorkspace(name) => {
            tokio::spawn(async move {
                let start_msg = format!("Adding workspace {name}...");
                log::info!("{start_msg}");
                let _ = tx.send(Action::OperationStarted(start_msg)).await;
                let result = match adapter.add_workspace(&name).await {
                    Ok(path) => Ok(format!("Workspace {name} added at {}", path.display())),
                    Err(e) => {
                        log::warn!("workspace add failed: {e:#}");
                        Err(format!("Error: {e}"))
                    }
                };
                let _ = tx.send(Action::OperationCompleted(result)).await;
            });
        }
        Command::ForgetWorkspace(name) => {
            let name_clone = name.clone();
            tokio::spawn(async move {
                run_operation(
                    tx,
                    format!("Forgetting workspace {name_clone}..."),
                    "Workspace forgotten",
                    move || async move { adapter.forget_workspace(&name).await },
                )
                .await;
            });
        }
        Command::InitRepo => {
            tokio::spawn(async move {
                run_operation(
                    tx,
                    "Initializing repository...".to_string(),
                    "Repository initialized",
                    move || async move { adapter.init_repo().await },
                )
                .await;
            });
        }
    }
    Ok(())
}

async fn run_operation<F, Fut>(
    tx: mpsc::Sender<Action>,
    start_msg: String,
    success_msg: &'static str,
    action: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<()>> + Send,
{
    log::info!("{start_msg}");
    let _ = tx.send(Action::OperationStarted(start_msg)).await;
    match action().await {
        Ok(()) => {
            let _ = tx
                .send(Action::OperationCompleted(Ok(success_msg.to_string())))
                .await;
        }
        Err(e) => {
            log::warn!("operation failed: {e:#}");
            let _ = tx
                .send(Action::OperationCompleted(Err(format!("Error: {e}"))))
                .await;
        }
    }
}
