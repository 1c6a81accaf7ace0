use crate::app::keymap::KeyConfig;
use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphStyle {
    #[default]
    Full,
    Simple,
}

impl GraphStyle {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            GraphStyle::Full => GraphStyle::Simple,
            GraphStyle::Simple => GraphStyle::Full,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GraphStyle::Full => "full",
            GraphStyle::Simple => "simple",
        }
    }
}

/// Settings read from `~/.config/braid/config.toml`. Every field is
/// optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: PaletteType,
    pub log_limit: usize,
    pub graph_style: GraphStyle,
    pub trunk_bookmark: String,
    pub keys: KeyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: PaletteType::CatppuccinMocha,
            log_limit: 100,
            graph_style: GraphStyle::Full,
            trunk_bookmark: "main".to_string(),
            keys: KeyConfig::default(),
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("braid");
        path.push("config.toml");
        path
    })
}

impl AppConfig {
    /// Loads the user config, falling back to defaults when the file is
    /// missing or unreadable.
    #[must_use]
    pub fn load() -> Self {
        let Some(path) = get_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default config: {e:#}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        if config.log_limit == 0 {
            config.log_limit = Self::default().log_limit;
        }
        if config.trunk_bookmark.trim().is_empty() {
            config.trunk_bookmark = Self::default().trunk_bookmark;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_gives_defaults() -> Result<()> {
        assert_eq!(AppConfig::parse("")?, AppConfig::default());
        Ok(())
    }

    #[test]
    fn test_full_config() -> Result<()> {
        let config = AppConfig::parse(
            r#"
theme = "gruvbox"
log_limit = 250
graph_style = "simple"
trunk_bookmark = "trunk"

[keys]
profile = "vim"

[keys.custom]
"ctrl+r" = "undo"
"#,
        )?;
        assert_eq!(config.theme, PaletteType::Gruvbox);
        assert_eq!(config.log_limit, 250);
        assert_eq!(config.graph_style, GraphStyle::Simple);
        assert_eq!(config.trunk_bookmark, "trunk");
        let custom = config.keys.custom.unwrap_or_default();
        assert_eq!(custom.get("ctrl+r").map(String::as_str), Some("undo"));
        Ok(())
    }

    #[test]
    fn test_degenerate_values_fall_back() -> Result<()> {
        let config = AppConfig::parse("log_limit = 0\ntrunk_bookmark = \"  \"")?;
        assert_eq!(config.log_limit, 100);
        assert_eq!(config.trunk_bookmark, "main");
        Ok(())
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        assert!(AppConfig::parse("theme = \"solarized\"").is_err());
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path)?;
        writeln!(file, "theme = \"nord\"")?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.theme, PaletteType::Nord);
        assert_eq!(config.log_limit, 100);

        assert!(AppConfig::load_from(&dir.path().join("missing.toml")).is_err());
        Ok(())
    }

    #[test]
    fn test_graph_style_toggle() {
        assert_eq!(GraphStyle::Full.toggled(), GraphStyle::Simple);
        assert_eq!(GraphStyle::Simple.toggled(), GraphStyle::Full);
    }
}
