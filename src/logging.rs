use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::ConfigBuilder;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const MAX_LOG_BYTES: u64 = MIB;

/// `~/.local/state/braid/braid.log`
#[must_use]
pub fn default_log_path() -> Option<PathBuf> {
    home::home_dir().map(|home| {
        home.join(".local")
            .join("state")
            .join("braid")
            .join("braid.log")
    })
}

/// Moves an oversized log aside so every run starts below the cap.
fn rotate(path: &Path) {
    if std::fs::metadata(path).is_ok_and(|metadata| metadata.len() > MAX_LOG_BYTES) {
        let _ = std::fs::rename(path, path.with_file_name("braid.old.log"));
    }
}

/// Sends `log` records to a file. The terminal belongs to the UI, so nothing
/// is ever written to stdout or stderr.
pub fn init(path: &Path, level: LevelFilter) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    rotate(path);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    simplelog::WriteLogger::init(level, config, log_file).context("Logger already initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_one_old_log() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("braid.log");

        std::fs::write(&path, "small")?;
        rotate(&path);
        assert!(path.exists());

        std::fs::write(&path, vec![b'x'; (MAX_LOG_BYTES + 1) as usize])?;
        rotate(&path);
        assert!(!path.exists());
        assert!(dir.path().join("braid.old.log").exists());
        Ok(())
    }

    #[test]
    fn test_default_path_is_under_state_dir() {
        if let Some(path) = default_log_path() {
            assert!(path.ends_with(".local/state/braid/braid.log"));
        }
    }
}
