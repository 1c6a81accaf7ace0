use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, InputState},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SnapshotWorkingCopy => UpdateResult::Handled(Some(Command::Snapshot)),
        Action::EditRevision(commit_id_opt) => {
            let id = commit_id_opt.clone().or_else(|| state.selected_commit_id());
            UpdateResult::Handled(id.map(Command::Edit))
        }
        Action::SquashRevision(commit_id_opt) => {
            let id = commit_id_opt.clone().or_else(|| state.selected_commit_id());
            UpdateResult::Handled(id.map(Command::Squash))
        }
        Action::NewRevision(commit_id_opt) => {
            let id = commit_id_opt.clone().or_else(|| state.selected_commit_id());
            UpdateResult::Handled(id.map(Command::New))
        }
        Action::AbandonRevision(commit_id_opt) => {
            let id = commit_id_opt.clone().or_else(|| state.selected_commit_id());
            UpdateResult::Handled(id.map(Command::Abandon))
        }
        Action::DescribeRevisionIntent => {
            let Some(description) = state.selected_revision().map(|r| r.description.clone())
            else {
                return UpdateResult::Handled(None);
            };
            state.input = Some(InputState::with_text(description.trim_end()));
            state.mode = AppMode::Input;
            UpdateResult::Handled(None)
        }
        Action::DescribeRevision(commit_id, message) => {
            state.mode = AppMode::Normal;
            state.input = None;
            UpdateResult::Handled(Some(Command::Describe(
                commit_id.clone(),
                message.clone(),
            )))
        }
        Action::RebaseRevisionIntent => {
            let Some((source, change_id)) = state
                .selected_revision()
                .map(|r| (r.commit_id.clone(), r.change_id_short().to_string()))
            else {
                return UpdateResult::Handled(None);
            };
            let message = format!("Rebase {change_id}: select a destination and press Enter");
            state.rebase_source = Some(source);
            state.mode = AppMode::RebaseSelect;
            state.set_status(message);
            UpdateResult::Handled(None)
        }
        Action::ConfirmRebase => {
            let Some(source) = state.rebase_source.take() else {
                state.mode = AppMode::Normal;
                return UpdateResult::Handled(None);
            };
            state.mode = AppMode::Normal;
            let Some(destination) = state.selected_commit_id() else {
                return UpdateResult::Handled(None);
            };
            if source == destination {
                state.set_status("Source and destination cannot be the same");
                return UpdateResult::Handled(None);
            }
            UpdateResult::Handled(Some(Command::Rebase(source, destination)))
        }
        Action::RebaseRevision(source, destination) => {
            state.mode = AppMode::Normal;
            state.rebase_source = None;
            UpdateResult::Handled(Some(Command::Rebase(
                source.clone(),
                destination.clone(),
            )))
        }
        Action::SetBookmarkIntent => {
            if state.selected_revision().is_none() {
                return UpdateResult::Handled(None);
            }
            state.mode = AppMode::BookmarkInput;
            state.input = Some(InputState::default());
            UpdateResult::Handled(None)
        }
        Action::SetBookmark(commit_id, name) => {
            state.mode = AppMode::Normal;
            state.input = None;
            let name = name.trim();
            if name.is_empty() {
                state.set_status("Bookmark name cannot be empty");
                return UpdateResult::Handled(None);
            }
            UpdateResult::Handled(Some(Command::SetBookmark(
                commit_id.clone(),
                name.to_string(),
            )))
        }
        Action::DeleteBookmark(name) => {
            state.mode = AppMode::Normal;
            UpdateResult::Handled(Some(Command::DeleteBookmark(name.clone())))
        }
        Action::RestoreSelectedFile => {
            let is_working_copy = state
                .selected_revision()
                .is_some_and(|rev| rev.is_working_copy);
            if !is_working_copy {
                state.set_status("Only working-copy files can be restored");
                return UpdateResult::Handled(None);
            }
            match state.get_selected_file().map(|f| f.path.clone()) {
                Some(path) => UpdateResult::Handled(Some(Command::RestoreFile(path))),
                None => {
                    state.set_status("No file selected");
                    UpdateResult::Handled(None)
                }
            }
        }
        Action::Undo => UpdateResult::Handled(Some(Command::Undo)),
        Action::InitRepo => UpdateResult::Handled(Some(Command::InitRepo)),
        _ => UpdateResult::NotHandled,
    }
}
