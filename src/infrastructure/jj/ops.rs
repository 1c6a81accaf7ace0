use super::JjAdapter;
use crate::domain::models::CommitId;
use anyhow::{anyhow, Context, Result};
use jj_lib::{
    local_working_copy::LocalWorkingCopyFactory, repo::StoreFactories, settings::UserSettings,
    working_copy::WorkingCopyFactory, workspace::Workspace,
};
use std::collections::HashMap;
use std::path::Path;

/// Runs `jj` in `cwd` and returns stdout. A non-zero exit becomes an error
/// carrying jj's stderr, prefixed with the subcommand name.
pub(super) async fn run_jj(cwd: &Path, args: &[&str]) -> Result<String> {
    let op = args.first().copied().unwrap_or("jj");
    ::log::debug!("jj {}", args.join(" "));
    let output = tokio::process::Command::new("jj")
        .args(["--color", "never", "--no-pager"])
        .args(args)
        .current_dir(cwd)
        .output()
        .await
        .context("Failed to execute 'jj'. Is it installed and on PATH?")?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(anyhow!("jj {op} failed: {}", stderr.trim()))
    }
}

impl JjAdapter {
    async fn run_in_workspace(&self, args: &[&str]) -> Result<String> {
        let handle = self.open_repo().await?;
        run_jj(&handle.root, args).await
    }

    pub(crate) async fn edit_impl(&self, commit_id: &CommitId) -> Result<()> {
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&["edit", &commit_id.0]).await?;
        Ok(())
    }

    pub(crate) async fn rebase_impl(&self, source: &CommitId, destination: &CommitId) -> Result<()> {
        if source == destination {
            return Err(anyhow!("Source and destination cannot be the same"));
        }
        self.validate_commit(source).await?;
        self.validate_commit(destination).await?;
        self.run_in_workspace(&["rebase", "-r", &source.0, "-d", &destination.0])
            .await?;
        Ok(())
    }

    pub(crate) async fn describe_impl(&self, commit_id: &CommitId, message: &str) -> Result<()> {
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&["describe", &commit_id.0, "-m", message])
            .await?;
        Ok(())
    }

    pub(crate) async fn abandon_impl(&self, commit_id: &CommitId) -> Result<()> {
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&["abandon", "-r", &commit_id.0]).await?;
        Ok(())
    }

    pub(crate) async fn squash_impl(&self, commit_id: &CommitId) -> Result<()> {
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&["squash", "-r", &commit_id.0]).await?;
        Ok(())
    }

    pub(crate) async fn new_child_impl(&self, commit_id: &CommitId) -> Result<()> {
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&["new", &commit_id.0]).await?;
        Ok(())
    }

    pub(crate) async fn restore_file_impl(&self, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(anyhow!("No file selected"));
        }
        let fileset = root_file_pattern(path);
        self.run_in_workspace(&["restore", "--", &fileset]).await?;
        Ok(())
    }

    pub(crate) async fn set_bookmark_impl(&self, commit_id: &CommitId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("Bookmark name cannot be empty"));
        }
        self.validate_commit(commit_id).await?;
        self.run_in_workspace(&[
            "bookmark",
            "set",
            name,
            "-r",
            &commit_id.0,
            "--allow-backwards",
        ])
        .await?;
        Ok(())
    }

    pub(crate) async fn delete_bookmark_impl(&self, name: &str) -> Result<()> {
        self.run_in_workspace(&["bookmark", "delete", name]).await?;
        Ok(())
    }

    pub(crate) async fn undo_impl(&self) -> Result<()> {
        self.run_in_workspace(&["undo"]).await?;
        Ok(())
    }

    /// `jj status` snapshots the working copy as a side effect.
    pub(crate) async fn snapshot_impl(&self) -> Result<String> {
        self.run_in_workspace(&["status"]).await?;
        Ok("Snapshot created".to_string())
    }

    pub(crate) async fn init_repo_impl(&self) -> Result<()> {
        run_jj(&self.workspace_root, &["git", "init", "--colocate"]).await?;

        let (config, _) = super::load_config(&self.workspace_root)?;
        let user_settings = UserSettings::from_config(config)?;
        let mut working_copy_factories: HashMap<String, Box<dyn WorkingCopyFactory>> =
            HashMap::new();
        working_copy_factories.insert("local".to_string(), Box::new(LocalWorkingCopyFactory {}));

        let workspace = Workspace::load(
            &user_settings,
            &self.workspace_root,
            &StoreFactories::default(),
            &working_copy_factories,
        )
        .context("Failed to load workspace after init")?;
        *self.workspace.lock().await = Some(workspace);
        ::log::info!("initialized repository at {}", self.workspace_root.display());
        Ok(())
    }
}

/// Exact-path fileset for `path`. A bare path would be parsed as a fileset
/// expression, or as a flag when it starts with `-`.
fn root_file_pattern(path: &str) -> String {
    let escaped = path.replace('\\', "\\\\").replace('"', "\\\"");
    format!("root-file:\"{escaped}\"")
}
