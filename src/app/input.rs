use crate::app::{
    action::Action,
    state::{AppMode, AppState},
    ui::{self, calculate_row_height},
};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Rect, Size};
use std::time::{Duration, Instant};

const DOUBLE_CLICK: Duration = Duration::from_millis(500);

/// Maps a line inside the graph panel to the revision drawn there and, for
/// the expanded revision, the file under the cursor.
pub fn resolve_clicked_row(
    app_state: &AppState<'_>,
    clicked_row: usize,
) -> Option<(usize, Option<usize>)> {
    let offset = app_state.log.list_state.offset();
    let repo = app_state.repo.as_ref()?;

    let mut current_y = 0;
    for (i, rev) in repo.revisions.iter().enumerate().skip(offset) {
        let is_selected = app_state.log.list_state.selected() == Some(i);
        let row_height = calculate_row_height(rev, is_selected, app_state.show_diffs) as usize;

        if clicked_row < current_y + row_height {
            let file_idx = (is_selected && app_state.show_diffs && clicked_row >= current_y + 2)
                .then(|| clicked_row - (current_y + 2));
            return Some((i, file_idx));
        }
        current_y += row_height;
    }
    None
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn inside(area: Rect, column: u16, row: u16) -> bool {
    column > area.x
        && column < (area.x + area.width).saturating_sub(1)
        && row > area.y
        && row < (area.y + area.height).saturating_sub(1)
}

fn in_columns(area: Rect, column: u16) -> bool {
    column >= area.x && column < area.x + area.width
}

fn is_double_click(app_state: &AppState<'_>, mouse: &MouseEvent) -> bool {
    app_state
        .last_click_time
        .is_some_and(|t| Instant::now().duration_since(t) < DOUBLE_CLICK)
        && app_state.last_click_pos == Some((mouse.column, mouse.row))
}

fn input_submit(app_state: &AppState<'_>) -> Option<Action> {
    let input = app_state.input.as_ref()?;
    if app_state.mode == AppMode::WorkspaceInput {
        return Some(Action::AddWorkspace(input.single_line()));
    }
    let commit_id = app_state.selected_commit_id()?;
    if app_state.mode == AppMode::BookmarkInput {
        Some(Action::SetBookmark(
            commit_id,
            input.single_line(),
        ))
    } else {
        Some(Action::DescribeRevision(
            commit_id,
            input.text(),
        ))
    }
}

/// Mouse handling shared by every mode that shows the log.
fn map_mouse(
    mouse: MouseEvent,
    app_state: &AppState<'_>,
    terminal_size: Size,
    allow_toggle: bool,
) -> Option<Action> {
    let area = Rect::new(0, 0, terminal_size.width, terminal_size.height);
    let layout = ui::get_layout(area, app_state);
    let graph_area = layout.body[0];
    let diff_area = layout.body[1];
    let over_diff = app_state.show_diffs && in_columns(diff_area, mouse.column);

    match mouse.kind {
        MouseEventKind::ScrollUp if over_diff => Some(Action::ScrollDiffUp(1)),
        MouseEventKind::ScrollDown if over_diff => Some(Action::ScrollDiffDown(1)),
        MouseEventKind::ScrollUp => Some(Action::SelectPrev),
        MouseEventKind::ScrollDown => Some(Action::SelectNext),
        MouseEventKind::Down(MouseButton::Left) => {
            if allow_toggle && is_double_click(app_state, &mouse) {
                Some(Action::ToggleDiffs)
            } else if inside(graph_area, mouse.column, mouse.row) {
                let clicked_row = (mouse.row - (graph_area.y + 1)) as usize;
                resolve_clicked_row(app_state, clicked_row).map(|(i, file_idx)| match file_idx {
                    Some(idx) => Action::SelectFile(idx),
                    None => Action::SelectIndex(i),
                })
            } else if allow_toggle && over_diff {
                Some(Action::FocusDiff)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    let key = match event {
        Event::Key(key) if key.kind == KeyEventKind::Release => return None,
        Event::Key(key) => Some(key),
        Event::Resize(w, h) => return Some(Action::Resize(w, h)),
        _ => None,
    };

    // An error modal swallows everything but dismissal and quitting
    if app_state.last_error.is_some() {
        return match key {
            Some(k) if is_ctrl_c(&k) => Some(Action::Quit),
            Some(k) if matches!(k.code, KeyCode::Esc | KeyCode::Enter) => {
                Some(Action::CancelMode)
            }
            Some(k) if k.code == KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match app_state.mode {
        AppMode::Input | AppMode::BookmarkInput | AppMode::WorkspaceInput => {
            let key = key?;
            match key.code {
                KeyCode::Esc => Some(Action::CancelMode),
                KeyCode::Enter => input_submit(app_state),
                _ => Some(Action::TextAreaInput(key)),
            }
        }
        AppMode::BookmarkPicker => match key?.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CancelMode),
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Action::BookmarkPickerNext),
            KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
                Some(Action::BookmarkPickerPrev)
            }
            KeyCode::Enter => Some(Action::BookmarkPickerConfirm),
            _ => None,
        },
        AppMode::OperationLog => match key?.code {
            KeyCode::Esc | KeyCode::Char('q' | 'o') => Some(Action::CancelMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::OperationLogNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::OperationLogPrev),
            _ => None,
        },
        AppMode::Workspaces => match key?.code {
            KeyCode::Esc | KeyCode::Char('q' | 'w') => Some(Action::CancelMode),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::WorkspaceNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::WorkspacePrev),
            KeyCode::Char('a') => Some(Action::AddWorkspaceIntent),
            KeyCode::Char('d' | 'x') | KeyCode::Delete => Some(Action::ForgetWorkspace),
            _ => None,
        },
        AppMode::RebaseSelect => match event {
            Event::Key(key) => match key.code {
                KeyCode::Enter => Some(Action::ConfirmRebase),
                KeyCode::Esc => Some(Action::CancelMode),
                _ => app_state
                    .keymap
                    .get_action(key, AppMode::Normal)
                    .filter(|action| {
                        matches!(
                            action,
                            Action::SelectNext
                                | Action::SelectPrev
                                | Action::SelectFirst
                                | Action::SelectLast
                                | Action::PageDown
                                | Action::PageUp
                                | Action::Quit
                        )
                    }),
            },
            Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size, false),
            _ => None,
        },
        AppMode::NoRepo => match key?.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('i') | KeyCode::Enter => Some(Action::InitRepo),
            _ => None,
        },
        AppMode::Loading => {
            let key = key?;
            (is_ctrl_c(&key) || key.code == KeyCode::Char('q')).then_some(Action::Quit)
        }
        AppMode::Help => match key?.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
            _ => None,
        },
        AppMode::Normal | AppMode::Diff => match event {
            Event::Key(key) => app_state.keymap.get_action(key, app_state.mode),
            Event::Mouse(mouse) => map_mouse(mouse, app_state, terminal_size, true),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::InputState;
    use crate::domain::models::{CommitId, RepoSnapshot, Revision};
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.mode = AppMode::Normal;
        state.repo = Some(RepoSnapshot {
            revisions: (0..5)
                .map(|i| Revision {
                    commit_id: CommitId(format!("c{i}")),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        });
        state.log.list_state.select(Some(0));
        state
    }

    const SIZE: Size = Size {
        width: 100,
        height: 40,
    };

    #[test]
    fn test_release_events_are_ignored() {
        let state = state();
        let mut release = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::empty());
        release.kind = KeyEventKind::Release;
        release.state = KeyEventState::NONE;
        assert_eq!(map_event_to_action(Event::Key(release), &state, SIZE), None);
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('j')), &state, SIZE),
            Some(Action::SelectNext)
        );
    }

    #[test]
    fn test_rebase_select_only_moves_and_confirms() {
        let mut state = state();
        state.mode = AppMode::RebaseSelect;
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('e')), &state, SIZE),
            None
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('j')), &state, SIZE),
            Some(Action::SelectNext)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state, SIZE),
            Some(Action::ConfirmRebase)
        );
    }

    #[test]
    fn test_input_enter_submits_for_selection() {
        let mut state = state();
        state.mode = AppMode::BookmarkInput;
        state.input = Some(InputState::with_text("feat"));
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state, SIZE),
            Some(Action::SetBookmark(
                CommitId("c0".to_string()),
                "feat".to_string()
            ))
        );
        assert!(matches!(
            map_event_to_action(key(KeyCode::Char('x')), &state, SIZE),
            Some(Action::TextAreaInput(_))
        ));
    }

    #[test]
    fn test_history_modals_own_their_keys() {
        let mut state = state();
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('o')), &state, SIZE),
            Some(Action::OpenOperationLog)
        );

        state.mode = AppMode::OperationLog;
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('j')), &state, SIZE),
            Some(Action::OperationLogNext)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('e')), &state, SIZE),
            None
        );

        state.mode = AppMode::Workspaces;
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('d')), &state, SIZE),
            Some(Action::ForgetWorkspace)
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('a')), &state, SIZE),
            Some(Action::AddWorkspaceIntent)
        );

        // Naming a workspace needs no selected revision
        state.mode = AppMode::WorkspaceInput;
        state.repo = None;
        state.input = Some(InputState::with_text("review"));
        assert_eq!(
            map_event_to_action(key(KeyCode::Enter), &state, SIZE),
            Some(Action::AddWorkspace("review".to_string()))
        );
    }

    #[test]
    fn test_error_modal_blocks_other_keys() {
        let mut state = state();
        state.last_error = Some(crate::app::state::ErrorState::new("boom"));
        assert_eq!(
            map_event_to_action(key(KeyCode::Char('e')), &state, SIZE),
            None
        );
        assert_eq!(
            map_event_to_action(key(KeyCode::Esc), &state, SIZE),
            Some(Action::CancelMode)
        );
    }

    #[test]
    fn test_click_selects_row_and_scroll_moves() {
        let state = state();
        // Header line, then the panel border: row 2 is the first revision
        let click = |row| {
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 10,
                row,
                modifiers: KeyModifiers::empty(),
            })
        };
        assert_eq!(
            map_event_to_action(click(2), &state, SIZE),
            Some(Action::SelectIndex(0))
        );
        assert_eq!(
            map_event_to_action(click(6), &state, SIZE),
            Some(Action::SelectIndex(2))
        );

        let scroll = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::empty(),
        });
        assert_eq!(
            map_event_to_action(scroll, &state, SIZE),
            Some(Action::SelectNext)
        );
    }
}
