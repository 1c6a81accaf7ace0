use crate::app::{
    action::Action,
    command::Command,
    input::map_event_to_action,
    reducer,
    state::{AppMode, AppState},
    ui,
};
use crate::domain::vcs::VcsFacade;

use anyhow::Result;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use notify::{RecursiveMode, Watcher};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::interval;

const TICK_RATE: Duration = Duration::from_millis(250);
const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: AppState<'_>,
    adapter: Arc<dyn VcsFacade>,
) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || loop {
        match event::read() {
            Ok(evt) => {
                if event_tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Err(e) => {
                let _ = event_tx.blocking_send(Err(e));
                break;
            }
        }
    });

    run_loop_with_events(terminal, app_state, adapter, event_rx).await
}

pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app_state: AppState<'_>,
    adapter: Arc<dyn VcsFacade>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::channel(100);
    let mut interval = interval(TICK_RATE);

    // Another jj process committing an operation rewrites op_heads
    let (notify_tx, mut notify_rx) = mpsc::channel(1);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if res.is_ok() {
            let _ = notify_tx.try_send(());
        }
    })?;

    let repo_path = adapter.workspace_root();
    let op_heads_path = repo_path.join(".jj").join("repo").join("op_heads");
    if op_heads_path.exists() {
        watcher.watch(&op_heads_path, RecursiveMode::NonRecursive)?;
    }

    let watch_tx = action_tx.clone();
    tokio::spawn(async move {
        let mut pending = false;

        loop {
            if pending {
                tokio::select! {
                    Some(()) = notify_rx.recv() => {}
                    () = tokio::time::sleep(WATCH_DEBOUNCE) => {
                        let _ = watch_tx.send(Action::ExternalChangeDetected).await;
                        pending = false;
                    }
                }
            } else if notify_rx.recv().await.is_some() {
                pending = true;
            } else {
                break;
            }
        }
    });

    if app_state.mode != AppMode::NoRepo {
        log::info!("loading {}", repo_path.display());
        handle_command(
            Command::LoadRepo(app_state.log_limit, app_state.revset.clone()),
            adapter.clone(),
            action_tx.clone(),
        )?;
    }

    loop {
        terminal.draw(|f| {
            ui::draw(f, &mut app_state);
        })?;

        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            res = event_rx.recv() => {
                // The input stream closing ends the session
                let Some(res) = res else {
                    break;
                };
                let event = res?;
                let action = map_event_to_action(event.clone(), &app_state, terminal.size()?);
                if let Event::Mouse(mouse) = event {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        app_state.last_click_time = Some(Instant::now());
                        app_state.last_click_pos = Some((mouse.column, mouse.row));
                    }
                }
                action
            },

            Some(a) = action_rx.recv() => Some(a),
        };

        let Some(action) = action else {
            continue;
        };
        if action == Action::Quit {
            break;
        }

        let command = reducer::update(&mut app_state, action);
        if app_state.should_quit {
            break;
        }
        if let Some(cmd) = command {
            handle_command(cmd, adapter.clone(), action_tx.clone())?;
        }
    }

    log::info!("shutting down");
    Ok(())
}

pub(crate) fn handle_command(
    command: Command,
    adapter: Arc<dyn VcsFacade>,
    tx: mpsc::Sender<Action>,
) -> Result<()> {
    crate::app::features::vcs::handle_command(command, adapter, tx)
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
