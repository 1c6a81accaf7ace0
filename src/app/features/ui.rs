use crate::app::{
    action::{Action, UpdateResult},
    state::{AppMode, AppState, Panel},
};

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::CancelMode => {
            // Nothing to go back to without a repository
            if state.mode != AppMode::NoRepo {
                state.mode = AppMode::Normal;
            }
            state.input = None;
            state.bookmark_picker = None;
            state.rebase_source = None;
            state.operation_log = None;
            state.workspace_list = None;
            state.last_error = None;
            state.focused_panel = Panel::Graph;
            UpdateResult::Handled(None)
        }
        Action::ToggleHelp => {
            state.mode = if state.mode == AppMode::Help {
                AppMode::Normal
            } else {
                AppMode::Help
            };
            UpdateResult::Handled(None)
        }
        Action::ToggleGraphStyle => {
            state.graph_style = state.graph_style.toggled();
            state.set_status(format!("Graph style: {}", state.graph_style.label()));
            UpdateResult::Handled(None)
        }
        Action::TextAreaInput(key) => {
            if let Some(input) = &mut state.input {
                input.handle_key(*key);
            }
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::GraphStyle;
    use crate::app::state::InputState;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cancel_clears_transient_state() {
        let mut state = AppState::default();
        state.mode = AppMode::BookmarkInput;
        state.input = Some(InputState::default());
        update(&mut state, &Action::CancelMode);
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.input.is_none());

        state.mode = AppMode::NoRepo;
        update(&mut state, &Action::CancelMode);
        assert_eq!(state.mode, AppMode::NoRepo);
    }

    #[test]
    fn test_text_input_and_style_toggle() {
        let mut state = AppState::default();
        state.input = Some(InputState::default());
        update(
            &mut state,
            &Action::TextAreaInput(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty())),
        );
        let lines = state
            .input
            .as_ref()
            .map(|i| i.lines().to_vec())
            .unwrap_or_default();
        assert_eq!(lines, vec!["x".to_string()]);

        update(&mut state, &Action::ToggleGraphStyle);
        assert_eq!(state.graph_style, GraphStyle::Simple);
        assert_eq!(state.status_message.as_deref(), Some("Graph style: simple"));
    }
}
