use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

use braid::app::config::AppConfig;
use braid::app::{
    r#loop::run_loop,
    state::{AppMode, AppState},
};
use braid::cli::Args;
use braid::domain::vcs::VcsFacade;
use braid::infrastructure::jj::JjAdapter;
use braid::theme::Theme;
use braid::{interactive, logging};

fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logging is optional; the UI runs without it
    if let Some(path) = args.log_file.clone().or_else(logging::default_log_path) {
        if let Err(e) = logging::init(&path, args.log_level) {
            eprintln!("braid: logging disabled: {e:#}");
        }
    }
    log::info!("braid {} starting", env!("CARGO_PKG_VERSION"));

    setup_panic_hook();

    let mut config = AppConfig::load();
    args.apply(&mut config);

    let root = match &args.repository {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    // Load the workspace before touching the terminal so a bad jj config
    // doesn't leave it in raw mode.
    let adapter = Arc::new(JjAdapter::for_path(root)?);

    if args.interactive {
        if !adapter.is_valid().await {
            anyhow::bail!("no jj repository at {}", adapter.workspace_root().display());
        }
        return interactive::run(
            adapter.as_ref(),
            config.log_limit,
            args.revset(),
            Theme::from_palette_type(config.theme),
        )
        .await;
    }

    let mut app_state = AppState::new(&config);
    app_state.revset = args.revset();
    app_state.mode = if adapter.is_valid().await {
        AppMode::Loading
    } else {
        AppMode::NoRepo
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, app_state, adapter).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:#}");
        println!("{err:?}");
    }

    Ok(())
}
