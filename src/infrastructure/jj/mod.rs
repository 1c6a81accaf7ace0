use crate::domain::{
    models::{CommitId, OperationEntry, RepoSnapshot, WorkspaceEntry},
    vcs::VcsFacade,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use jj_lib::{
    config::{ConfigLayer, ConfigSource, StackedConfig},
    local_working_copy::LocalWorkingCopyFactory,
    object_id::ObjectId,
    repo::StoreFactories,
    settings::UserSettings,
    working_copy::WorkingCopyFactory,
    workspace::Workspace,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, Semaphore};

pub mod diff;
pub mod history;
pub mod log;
pub mod ops;
pub mod repo;

pub struct JjAdapter {
    pub(crate) workspace: Arc<Mutex<Option<Workspace>>>,
    pub(crate) workspace_root: PathBuf,
    pub(crate) diff_semaphore: Arc<Semaphore>,
}

pub(crate) const MAX_DIFF_SIZE: u64 = 1024 * 1024;
pub(crate) const MAX_CONCURRENT_DIFFS: usize = 4;

const USER_CONFIG_PATHS: [&str; 3] = [".jjconfig", ".jj/config.toml", ".config/jj/config.toml"];

impl JjAdapter {
    /// Loads the workspace containing `path`. A missing workspace is not an
    /// error; `is_valid` reports it so the caller can offer to create one.
    pub fn for_path(path: PathBuf) -> Result<Self> {
        let (config, found_root) = load_config(&path)?;
        let user_settings = UserSettings::from_config(config)?;

        let mut working_copy_factories: HashMap<String, Box<dyn WorkingCopyFactory>> =
            HashMap::new();
        working_copy_factories.insert("local".to_string(), Box::new(LocalWorkingCopyFactory {}));

        let ws_root = found_root.unwrap_or(path);
        let workspace = match Workspace::load(
            &user_settings,
            &ws_root,
            &StoreFactories::default(),
            &working_copy_factories,
        ) {
            Ok(ws) => Some(ws),
            Err(e) => {
                ::log::info!("no jj workspace at {}: {e}", ws_root.display());
                None
            }
        };

        let workspace_root = workspace
            .as_ref()
            .map_or(ws_root, |ws| ws.workspace_root().to_path_buf());
        ::log::info!("workspace root: {}", workspace_root.display());

        Ok(Self {
            workspace: Arc::new(Mutex::new(workspace)),
            workspace_root,
            diff_semaphore: Arc::new(Semaphore::new(MAX_CONCURRENT_DIFFS)),
        })
    }
}

/// Builds the config stack: built-in fallback, then user files, then the
/// nearest repository config walking up from `start`. Also returns the
/// workspace root that repository config was found in.
fn load_config(start: &Path) -> Result<(StackedConfig, Option<PathBuf>)> {
    let mut config = StackedConfig::with_defaults();
    config.add_layer(
        ConfigLayer::parse(
            ConfigSource::Default,
            crate::infrastructure::defaults::DEFAULT_FALLBACK_CONFIG,
        )
        .context("Failed to parse built-in fallback config")?,
    );

    if let Some(home_dir) = home::home_dir() {
        for rel in USER_CONFIG_PATHS {
            let config_path = home_dir.join(rel);
            if config_path.is_file() {
                config.add_layer(parse_layer(&config_path, ConfigSource::User)?);
            }
        }
    }

    for dir in start.ancestors() {
        let repo_config = dir.join(".jj").join("repo").join("config.toml");
        if repo_config.is_file() {
            config.add_layer(parse_layer(&repo_config, ConfigSource::Repo)?);
            return Ok((config, Some(dir.to_path_buf())));
        }
        if dir.join(".jj").is_dir() {
            return Ok((config, Some(dir.to_path_buf())));
        }
    }
    Ok((config, None))
}

fn parse_layer(path: &Path, source: ConfigSource) -> Result<ConfigLayer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read jj config at {}", path.display()))?;
    ConfigLayer::parse(source, &text)
        .with_context(|| format!("Failed to parse jj config at {}", path.display()))
}

#[async_trait]
impl VcsFacade for JjAdapter {
    async fn load_snapshot(&self, limit: usize, revset: Option<String>) -> Result<RepoSnapshot> {
        self.load_snapshot_impl(limit, revset).await
    }

    async fn get_commit_diff(&self, commit_id: &CommitId) -> Result<String> {
        self.get_commit_diff_impl(commit_id).await
    }

    async fn edit(&self, commit_id: &CommitId) -> Result<()> {
        self.edit_impl(commit_id).await
    }

    async fn rebase(&self, source: &CommitId, destination: &CommitId) -> Result<()> {
        self.rebase_impl(source, destination).await
    }

    async fn describe(&self, commit_id: &CommitId, message: &str) -> Result<()> {
        self.describe_impl(commit_id, message).await
    }

    async fn abandon(&self, commit_id: &CommitId) -> Result<()> {
        self.abandon_impl(commit_id).await
    }

    async fn squash(&self, commit_id: &CommitId) -> Result<()> {
        self.squash_impl(commit_id).await
    }

    async fn new_child(&self, commit_id: &CommitId) -> Result<()> {
        self.new_child_impl(commit_id).await
    }

    async fn restore_file(&self, path: &str) -> Result<()> {
        self.restore_file_impl(path).await
    }

    async fn set_bookmark(&self, commit_id: &CommitId, name: &str) -> Result<()> {
        self.set_bookmark_impl(commit_id, name).await
    }

    async fn delete_bookmark(&self, name: &str) -> Result<()> {
        self.delete_bookmark_impl(name).await
    }

    async fn undo(&self) -> Result<()> {
        self.undo_impl().await
    }

    async fn snapshot(&self) -> Result<String> {
        self.snapshot_impl().await
    }

    async fn operation_log(&self, limit: usize) -> Result<Vec<OperationEntry>> {
        self.operation_log_impl(limit).await
    }

    async fn workspaces(&self) -> Result<Vec<WorkspaceEntry>> {
        self.workspaces_impl().await
    }

    async fn add_workspace(&self, name: &str) -> Result<PathBuf> {
        self.add_workspace_impl(name).await
    }

    async fn forget_workspace(&self, name: &str) -> Result<()> {
        self.forget_workspace_impl(name).await
    }

    async fn init_repo(&self) -> Result<()> {
        self.init_repo_impl().await
    }

    async fn is_valid(&self) -> bool {
        self.is_valid_impl().await
    }

    fn workspace_root(&self) -> PathBuf {
        self.workspace_root.clone()
    }
}

pub(crate) fn is_binary(chunk: &[u8]) -> bool {
    if chunk.is_empty() {
        return false;
    }
    if chunk.contains(&0) {
        return true;
    }
    let control = chunk
        .iter()
        .filter(|&&b| (b < 32 && !b.is_ascii_whitespace()) || b == 127)
        .count();
    control * 100 / chunk.len() > 10
}

/// Change ids in jj's reverse-hex alphabet, `0..f` mapped onto `z..k`.
pub(crate) fn format_change_id(id: &dyn ObjectId) -> String {
    id.hex()
        .chars()
        .map(|c| {
            let v = c.to_digit(16).unwrap_or(0) as u8;
            (b'z' - v) as char
        })
        .collect()
}
