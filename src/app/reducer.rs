use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    recovery::get_suggestions,
    state::{AppMode, AppState, ErrorSeverity, ErrorState},
};
use crate::domain::models::{CommitId, RepoSnapshot, Revision};
use crate::domain::prefix::UniquePrefixIndex;
use crate::domain::navigation::find_nearest_bookmark;
use std::time::Instant;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    let feature_updates: [fn(&mut AppState, &Action) -> UpdateResult; 5] = [
        features::navigation::update,
        features::bookmarks::update,
        features::history::update,
        features::vcs::actions::update,
        features::ui::update,
    ];
    for feature in feature_updates {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
            if !state.active_tasks.is_empty() || state.mode == AppMode::Loading {
                let frame = (state.frame_count % SPINNER_FRAMES.len() as u64) as usize;
                state.spinner = SPINNER_FRAMES[frame].to_string();
            }
            if state
                .status_clear_time
                .is_some_and(|t| Instant::now() >= t)
            {
                state.status_message = None;
                state.status_clear_time = None;
            }
        }
        Action::Resize(..) => {}

        // --- Async Results ---
        Action::RepoLoaded(snapshot) => {
            let previous = state.selected_commit_id();
            apply_snapshot(state, *snapshot, previous.as_ref());
            if state.mode == AppMode::Loading {
                state.mode = AppMode::Normal;
            }
            return features::navigation::handle_selection(state);
        }
        Action::RepoReloadedBackground(snapshot) => {
            let previous = state.selected_commit_id();
            apply_snapshot(state, *snapshot, previous.as_ref());
            // Keep the diff panel showing the same revision when it survived
            return features::navigation::handle_selection(state);
        }
        Action::DiffLoaded(commit_id, diff) => {
            state.log.diff_cache.insert(commit_id.clone(), diff.clone());
            if state.selected_commit_id().as_ref() == Some(&commit_id) {
                state.log.current_diff = Some(diff);
                state.log.is_loading_diff = false;
                features::navigation::scroll_to_selected_file(state);
            }
        }
        Action::OperationStarted(msg) => {
            state.active_tasks.push(msg.clone());
            state.status_message = Some(msg);
            state.status_clear_time = None;
        }
        Action::OperationCompleted(result) => {
            if !state.active_tasks.is_empty() {
                state.active_tasks.remove(0);
            }
            match result {
                Ok(msg) => {
                    state.set_status(msg);
                    state.last_error = None;
                }
                Err(err) => {
                    state.status_message = None;
                    state.last_error = Some(error_state(err));
                }
            }
            // Any mutation may rewrite history; reload what is shown
            state.log.invalidate_diffs();
            if state.mode == AppMode::NoRepo {
                if state.last_error.is_some() {
                    return None;
                }
                state.mode = AppMode::Loading;
            }
            return Some(Command::LoadRepo(state.log_limit, state.revset.clone()));
        }
        Action::ErrorOccurred(err) => {
            state.last_error = Some(error_state(err));
            if state.mode == AppMode::Loading {
                state.mode = AppMode::Normal;
            }
        }
        Action::ExternalChangeDetected => {
            if state.mode != AppMode::NoRepo {
                return Some(Command::LoadRepoBackground(
                    state.log_limit,
                    state.revset.clone(),
                ));
            }
        }
        _ => {}
    }
    None
}

fn error_state(message: String) -> ErrorState {
    let severity = if message.starts_with("Background sync failed") {
        ErrorSeverity::Warning
    } else {
        ErrorSeverity::Error
    };
    let suggestions = get_suggestions(&message);
    ErrorState {
        severity,
        suggestions,
        ..ErrorState::new(message)
    }
}

/// Installs a new snapshot and keeps the selection on the same commit when
/// it survived, falling back to the working copy and then the top row.
fn apply_snapshot(state: &mut AppState, snapshot: RepoSnapshot, previous: Option<&CommitId>) {
    let selected = previous
        .and_then(|id| snapshot.position_of(id))
        .or_else(|| snapshot.revisions.iter().position(|r| r.is_working_copy))
        .or(if snapshot.revisions.is_empty() {
            None
        } else {
            Some(0)
        });

    state.header_state.repo_text = format!(" {} ", snapshot.repo_name);
    state.header_state.bookmark_text = format!(
        " {} ",
        find_nearest_bookmark(&snapshot.revisions).unwrap_or("(no bookmark)")
    );
    state.header_state.wc_text = match snapshot.working_copy() {
        Some(wc) => format!(" {}@ {} ", snapshot.workspace_id, wc.change_id_short()),
        None => format!(" {}@ (none) ", snapshot.workspace_id),
    };
    state.header_state.op_text = format!(
        " OP: {} ",
        snapshot.operation_id.chars().take(12).collect::<String>()
    );
    state.log.change_id_prefixes =
        UniquePrefixIndex::build(snapshot.revisions.iter().map(Revision::change_id_short));
    state.log.commit_id_prefixes =
        UniquePrefixIndex::build(snapshot.revisions.iter().map(Revision::commit_id_short));

    if previous.is_some_and(|id| snapshot.position_of(id).is_none()) {
        state.log.invalidate_diffs();
    }
    state.repo = Some(snapshot);
    state.log.list_state.select(selected);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(ids: &[&str], wc: &str) -> RepoSnapshot {
        RepoSnapshot {
            repo_name: "braid".to_string(),
            operation_id: "0123456789abcdef".to_string(),
            workspace_id: "default".to_string(),
            working_copy_id: CommitId(wc.to_string()),
            revisions: ids
                .iter()
                .map(|id| Revision {
                    commit_id: CommitId((*id).to_string()),
                    change_id: format!("{id}zzzzzzzzzz"),
                    is_working_copy: *id == wc,
                    bookmarks: if *id == "b" {
                        vec!["main".to_string()]
                    } else {
                        Vec::new()
                    },
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_scroll_diff() {
        let mut state = AppState::default();
        state.log.current_diff = Some("x\n".repeat(40));
        state.log.diff_scroll = 10;

        update(&mut state, Action::ScrollDiffUp(5));
        assert_eq!(state.log.diff_scroll, 5);

        update(&mut state, Action::ScrollDiffUp(10));
        assert_eq!(state.log.diff_scroll, 0);

        update(&mut state, Action::ScrollDiffDown(15));
        assert_eq!(state.log.diff_scroll, 15);
    }

    #[test]
    fn test_first_load_selects_working_copy() {
        let mut state = AppState::default();
        state.mode = AppMode::Loading;
        let cmd = update(
            &mut state,
            Action::RepoLoaded(Box::new(snapshot(&["a", "b", "c"], "b"))),
        );
        assert_eq!(state.mode, AppMode::Normal);
        assert_eq!(state.log.list_state.selected(), Some(1));
        assert_eq!(cmd, Some(Command::LoadDiff(CommitId("b".to_string()))));
        assert_eq!(state.header_state.bookmark_text, " main ");
        assert_eq!(state.header_state.op_text, " OP: 0123456789ab ");
        assert!(state.header_state.wc_text.starts_with(" default@ "));
    }

    #[test]
    fn test_reload_keeps_selected_commit() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::RepoLoaded(Box::new(snapshot(&["a", "b", "c"], "a"))),
        );
        state.log.list_state.select(Some(2));
        update(
            &mut state,
            Action::RepoReloadedBackground(Box::new(snapshot(&["n", "a", "b", "c"], "n"))),
        );
        assert_eq!(state.selected_commit_id(), Some(CommitId("c".to_string())));

        // Selected commit disappeared: fall back to the working copy
        update(
            &mut state,
            Action::RepoReloadedBackground(Box::new(snapshot(&["x", "n"], "n"))),
        );
        assert_eq!(state.selected_commit_id(), Some(CommitId("n".to_string())));
    }

    #[test]
    fn test_stale_diff_is_ignored() {
        let mut state = AppState::default();
        update(
            &mut state,
            Action::RepoLoaded(Box::new(snapshot(&["a", "b"], "a"))),
        );
        update(
            &mut state,
            Action::DiffLoaded(CommitId("b".to_string()), "diff b".to_string()),
        );
        assert!(state.log.current_diff.is_none());
        assert!(state.log.diff_cache.contains_key(&CommitId("b".to_string())));
    }

    #[test]
    fn test_operation_failure_becomes_error_modal() {
        let mut state = AppState::default();
        state.log_limit = 42;
        update(&mut state, Action::OperationStarted("Editing...".to_string()));
        assert_eq!(state.active_tasks.len(), 1);

        let cmd = update(
            &mut state,
            Action::OperationCompleted(Err(
                "Error: jj edit failed: Commit 1234 is immutable".to_string()
            )),
        );
        assert_eq!(cmd, Some(Command::LoadRepo(42, None)));
        assert!(state.active_tasks.is_empty());
        let error = state.last_error.clone().expect("error state");
        assert_eq!(error.severity, ErrorSeverity::Error);
        assert!(!error.suggestions.is_empty());
    }

    #[test]
    fn test_init_success_leaves_welcome_screen() {
        let mut state = AppState::default();
        state.mode = AppMode::NoRepo;
        let cmd = update(
            &mut state,
            Action::OperationCompleted(Ok("Repository initialized".to_string())),
        );
        assert_eq!(state.mode, AppMode::Loading);
        assert_eq!(cmd, Some(Command::LoadRepo(100, None)));

        assert!(update(&mut state, Action::ExternalChangeDetected).is_some());
    }

    #[test]
    fn test_tick_clears_expired_status() {
        let mut state = AppState::default();
        state.status_message = Some("done".to_string());
        state.status_clear_time = Some(Instant::now());
        update(&mut state, Action::Tick);
        assert!(state.status_message.is_none());
    }
}
