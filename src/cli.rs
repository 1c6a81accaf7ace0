use crate::app::config::AppConfig;
use crate::theme::PaletteType;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "braid")]
#[command(about = "A terminal log, graph and quick-action front-end for jj", long_about = None)]
pub struct Args {
    /// Workspace to open instead of the current directory
    #[arg(short = 'R', long = "repository", value_name = "PATH")]
    pub repository: Option<PathBuf>,

    /// Pick a revision and edit or rebase it without the full screen UI
    #[arg(short, long)]
    pub interactive: bool,

    /// Number of revisions to load
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Only show revisions matching this revset
    #[arg(short, long, value_name = "REVSET")]
    pub revset: Option<String>,

    /// catppuccinmocha, nord or gruvbox
    #[arg(long, value_name = "NAME", value_parser = parse_theme)]
    pub theme: Option<PaletteType>,

    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("unknown log level '{level}'"))
}

fn parse_theme(name: &str) -> Result<PaletteType, String> {
    PaletteType::from_name(name).ok_or_else(|| format!("unknown theme '{name}'"))
}

impl Args {
    /// Lays command line overrides over the file config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(limit) = self.limit.filter(|n| *n > 0) {
            config.log_limit = limit;
        }
        if let Some(theme) = self.theme {
            config.theme = theme;
        }
    }

    #[must_use]
    pub fn revset(&self) -> Option<String> {
        self.revset
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["braid"]).expect("parse");
        assert!(!args.interactive);
        assert_eq!(args.log_level, LevelFilter::Info);
        assert_eq!(args.revset(), None);

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "braid", "-R", "/tmp/repo", "-i", "-n", "20", "-r", " mine() ", "--theme", "nord",
            "--log-level", "debug",
        ])
        .expect("parse");
        assert_eq!(args.repository, Some(PathBuf::from("/tmp/repo")));
        assert!(args.interactive);
        assert_eq!(args.revset().as_deref(), Some("mine()"));
        assert_eq!(args.log_level, LevelFilter::Debug);

        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config.log_limit, 20);
        assert_eq!(config.theme, PaletteType::Nord);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(Args::try_parse_from(["braid", "--theme", "solarized"]).is_err());
        assert!(Args::try_parse_from(["braid", "-n", "many"]).is_err());
        assert!(Args::try_parse_from(["braid", "--log-level", "loud"]).is_err());
    }
}
