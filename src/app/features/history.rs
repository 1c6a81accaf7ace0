use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    recovery::get_suggestions,
    state::{AppMode, AppState, EntryList, ErrorState, InputState},
};

/// Operations fetched when the log modal opens.
pub const OPERATION_LOG_LIMIT: usize = 50;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::OpenOperationLog => {
            state.operation_log = Some(EntryList::loading());
            state.mode = AppMode::OperationLog;
            UpdateResult::Handled(Some(Command::LoadOperationLog(OPERATION_LOG_LIMIT)))
        }
        Action::OperationLogLoaded(result) => {
            // Closed before the engine answered
            if state.operation_log.is_none() {
                return UpdateResult::Handled(None);
            }
            match result {
                Ok(entries) => {
                    if let Some(list) = &mut state.operation_log {
                        list.set_entries(entries.clone());
                    }
                }
                Err(err) => {
                    close_lists(state);
                    report(state, err);
                }
            }
            UpdateResult::Handled(None)
        }
        Action::OperationLogNext => {
            if let Some(list) = &mut state.operation_log {
                list.next();
            }
            UpdateResult::Handled(None)
        }
        Action::OperationLogPrev => {
            if let Some(list) = &mut state.operation_log {
                list.prev();
            }
            UpdateResult::Handled(None)
        }
        Action::OpenWorkspaces => {
            state.workspace_list = Some(EntryList::loading());
            state.mode = AppMode::Workspaces;
            UpdateResult::Handled(Some(Command::LoadWorkspaces))
        }
        Action::WorkspacesLoaded(result) => {
            if state.workspace_list.is_none() {
                return UpdateResult::Handled(None);
            }
            match result {
                Ok(entries) => {
                    if let Some(list) = &mut state.workspace_list {
                        list.set_entries(entries.clone());
                    }
                }
                Err(err) => {
                    close_lists(state);
                    report(state, err);
                }
            }
            UpdateResult::Handled(None)
        }
        Action::WorkspaceNext => {
            if let Some(list) = &mut state.workspace_list {
                list.next();
            }
            UpdateResult::Handled(None)
        }
        Action::WorkspacePrev => {
            if let Some(list) = &mut state.workspace_list {
                list.prev();
            }
            UpdateResult::Handled(None)
        }
        Action::AddWorkspaceIntent => {
            state.workspace_list = None;
            state.input = Some(InputState::default());
            state.mode = AppMode::WorkspaceInput;
            UpdateResult::Handled(None)
        }
        Action::AddWorkspace(name) => {
            state.mode = AppMode::Normal;
            state.input = None;
            let name = name.trim();
            if name.is_empty() {
                state.set_status("Workspace name cannot be empty");
                return UpdateResult::Handled(None);
            }
            UpdateResult::Handled(Some(Command::AddWorkspace(name.to_string())))
        }
        Action::ForgetWorkspace => {
            let Some((name, is_current)) = state
                .workspace_list
                .as_ref()
                .and_then(EntryList::current)
                .map(|entry| (entry.name.clone(), entry.is_current))
            else {
                return UpdateResult::Handled(None);
            };
            if is_current {
                state.set_status("Cannot forget the current workspace");
                return UpdateResult::Handled(None);
            }
            log::debug!("forgetting workspace {name}");
            close_lists(state);
            UpdateResult::Handled(Some(Command::ForgetWorkspace(name)))
        }
        _ => UpdateResult::NotHandled,
    }
}

fn close_lists(state: &mut AppState) {
    state.operation_log = None;
    state.workspace_list = None;
    if matches!(state.mode, AppMode::OperationLog | AppMode::Workspaces) {
        state.mode = AppMode::Normal;
    }
}

fn report(state: &mut AppState, message: &str) {
    state.last_error = Some(ErrorState {
        suggestions: get_suggestions(message),
        ..ErrorState::new(message)
    });
}
