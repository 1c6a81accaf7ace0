use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, Panel},
};
use crate::domain::models::CommitId;

const PAGE_SIZE: isize = 10;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::SelectNext => UpdateResult::Handled(move_selection(state, 1)),
        Action::SelectPrev => UpdateResult::Handled(move_selection(state, -1)),
        Action::PageDown => UpdateResult::Handled(page_selection(state, PAGE_SIZE)),
        Action::PageUp => UpdateResult::Handled(page_selection(state, -PAGE_SIZE)),
        Action::SelectFirst => UpdateResult::Handled(select_clamped(state, 0)),
        Action::SelectLast => UpdateResult::Handled(select_clamped(state, usize::MAX)),
        Action::SelectIndex(idx) => UpdateResult::Handled(select_clamped(state, *idx)),
        Action::SelectFile(idx) => {
            let count = state
                .selected_revision()
                .map_or(0, |rev| rev.changed_files.len());
            if *idx < count {
                state.log.selected_file_index = Some(*idx);
                scroll_to_selected_file(state);
            }
            UpdateResult::Handled(None)
        }
        Action::SelectNextFile => {
            if let Some(count) = state.selected_revision().map(|r| r.changed_files.len()) {
                if count > 0 {
                    let next = match state.log.selected_file_index {
                        Some(i) => (i + 1).min(count - 1),
                        None => 0,
                    };
                    state.log.selected_file_index = Some(next);
                    scroll_to_selected_file(state);
                }
            }
            UpdateResult::Handled(None)
        }
        Action::SelectPrevFile => {
            if let Some(i) = state.log.selected_file_index {
                state.log.selected_file_index = Some(i.saturating_sub(1));
                scroll_to_selected_file(state);
            }
            UpdateResult::Handled(None)
        }
        Action::ScrollDiffUp(n) => {
            state.log.diff_scroll = state.log.diff_scroll.saturating_sub(*n);
            UpdateResult::Handled(None)
        }
        Action::ScrollDiffDown(n) => {
            let max_scroll = state.log.current_diff.as_ref().map_or(0, |diff| {
                u16::try_from(diff.lines().count().saturating_sub(1)).unwrap_or(u16::MAX)
            });
            state.log.diff_scroll = state.log.diff_scroll.saturating_add(*n).min(max_scroll);
            UpdateResult::Handled(None)
        }
        Action::NextHunk => {
            if let Some(diff) = &state.log.current_diff {
                let current = state.log.diff_scroll as usize;
                if let Some(idx) = diff
                    .lines()
                    .enumerate()
                    .skip(current + 1)
                    .find_map(|(idx, line)| line.starts_with("@@").then_some(idx))
                {
                    state.log.diff_scroll = u16::try_from(idx).unwrap_or(u16::MAX);
                    state.hunk_highlight_time = Some(std::time::Instant::now());
                }
            }
            UpdateResult::Handled(None)
        }
        Action::PrevHunk => {
            if let Some(diff) = &state.log.current_diff {
                let current = state.log.diff_scroll as usize;
                let lines: Vec<&str> = diff.lines().take(current).collect();
                if let Some(idx) = lines.iter().rposition(|line| line.starts_with("@@")) {
                    state.log.diff_scroll = u16::try_from(idx).unwrap_or(u16::MAX);
                    state.hunk_highlight_time = Some(std::time::Instant::now());
                }
            }
            UpdateResult::Handled(None)
        }
        Action::ToggleDiffs => {
            state.show_diffs = !state.show_diffs;
            if state.show_diffs {
                state.mode = AppMode::Diff;
                state.focused_panel = Panel::Diff;
                state.diff_ratio = 50;
                select_first_file(state);
            } else {
                state.mode = AppMode::Normal;
                state.focused_panel = Panel::Graph;
            }
            UpdateResult::Handled(None)
        }
        Action::FocusDiff => {
            state.show_diffs = true;
            state.mode = AppMode::Diff;
            state.focused_panel = Panel::Diff;
            select_first_file(state);
            UpdateResult::Handled(None)
        }
        Action::FocusGraph => {
            state.mode = AppMode::Normal;
            state.focused_panel = Panel::Graph;
            UpdateResult::Handled(None)
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Points at the first changed file when nothing is selected yet.
fn select_first_file(state: &mut AppState) {
    let has_files = state
        .selected_revision()
        .is_some_and(|rev| !rev.changed_files.is_empty());
    if has_files && state.log.selected_file_index.is_none() {
        state.log.selected_file_index = Some(0);
        scroll_to_selected_file(state);
    }
}

fn revision_count(state: &AppState) -> usize {
    state.repo.as_ref().map_or(0, |r| r.revisions.len())
}

fn move_selection(state: &mut AppState, delta: isize) -> Option<Command> {
    let len = revision_count(state);
    let current_index = state.log.list_state.selected();
    let new_index = calculate_new_index(current_index, delta, len);

    state.log.list_state.select(Some(new_index));
    handle_selection(state)
}

fn page_selection(state: &mut AppState, delta: isize) -> Option<Command> {
    let current = state.log.list_state.selected().unwrap_or(0);
    let target = current.saturating_add_signed(delta);
    select_clamped(state, target)
}

fn select_clamped(state: &mut AppState, idx: usize) -> Option<Command> {
    let len = revision_count(state);
    if len == 0 {
        return None;
    }
    state.log.list_state.select(Some(idx.min(len - 1)));
    handle_selection(state)
}

fn calculate_new_index(current: Option<usize>, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    match current {
        Some(i) => (i as isize + delta).rem_euclid(len as isize) as usize,
        None => 0,
    }
}

/// Selects the revision with `id`, if it is in the snapshot.
pub fn select_commit(state: &mut AppState, id: &CommitId) -> Option<Option<Command>> {
    let idx = state.repo.as_ref()?.position_of(id)?;
    state.log.list_state.select(Some(idx));
    Some(handle_selection(state))
}

/// Moves the selection to `id` ahead of a mutation. The reload that follows
/// every operation requests its diff, so none is requested here.
pub fn select_commit_for_reload(state: &mut AppState, id: &CommitId) {
    let Some(idx) = state.repo.as_ref().and_then(|repo| repo.position_of(id)) else {
        return;
    };
    state.log.list_state.select(Some(idx));
    state.log.diff_scroll = 0;
    state.log.selected_file_index = None;
    state.log.current_diff = None;
    state.log.is_loading_diff = true;
}

pub fn handle_selection(state: &mut AppState) -> Option<Command> {
    let commit_id = state.selected_commit_id()?;
    state.log.diff_scroll = 0;
    let has_files = state
        .selected_revision()
        .is_some_and(|rev| !rev.changed_files.is_empty());
    state.log.selected_file_index = (state.show_diffs && has_files).then_some(0);
    if let Some(cached_diff) = state.log.diff_cache.get(&commit_id) {
        state.log.current_diff = Some(cached_diff.clone());
        state.log.is_loading_diff = false;
        return None;
    }
    state.log.current_diff = None;
    state.log.is_loading_diff = true;
    Some(Command::LoadDiff(commit_id))
}

pub fn scroll_to_selected_file(state: &mut AppState) {
    let Some(file) = state.get_selected_file() else {
        return;
    };
    let target = format!("File: {}", file.path);
    if let Some(line_idx) = state
        .log
        .current_diff
        .as_ref()
        .and_then(|diff| diff.lines().position(|l| l == target))
    {
        state.log.diff_scroll = u16::try_from(line_idx).unwrap_or(u16::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{FileChange, FileStatus, RepoSnapshot, Revision};

    fn state_with(n: usize) -> AppState<'static> {
        let revisions = (0..n)
            .map(|i| Revision {
                commit_id: CommitId(format!("c{i}")),
                changed_files: vec![
                    FileChange {
                        path: "a.rs".to_string(),
                        status: FileStatus::Modified,
                    },
                    FileChange {
                        path: "b.rs".to_string(),
                        status: FileStatus::Added,
                    },
                ],
                ..Default::default()
            })
            .collect();
        let mut state = AppState::default();
        state.repo = Some(RepoSnapshot {
            revisions,
            ..Default::default()
        });
        state.log.list_state.select(Some(0));
        state
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = state_with(3);
        update(&mut state, &Action::SelectPrev);
        assert_eq!(state.log.list_state.selected(), Some(2));
        update(&mut state, &Action::SelectNext);
        assert_eq!(state.log.list_state.selected(), Some(0));
    }

    #[test]
    fn test_paging_clamps() {
        let mut state = state_with(15);
        update(&mut state, &Action::PageDown);
        assert_eq!(state.log.list_state.selected(), Some(10));
        update(&mut state, &Action::PageDown);
        assert_eq!(state.log.list_state.selected(), Some(14));
        update(&mut state, &Action::PageUp);
        update(&mut state, &Action::PageUp);
        assert_eq!(state.log.list_state.selected(), Some(0));
        update(&mut state, &Action::SelectLast);
        assert_eq!(state.log.list_state.selected(), Some(14));
        update(&mut state, &Action::SelectIndex(99));
        assert_eq!(state.log.list_state.selected(), Some(14));
    }

    #[test]
    fn test_selection_requests_uncached_diff() {
        let mut state = state_with(2);
        let result = update(&mut state, &Action::SelectNext);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::LoadDiff(ref id))) if id.0 == "c1"
        ));
        assert!(state.log.is_loading_diff);

        state
            .log
            .diff_cache
            .insert(CommitId("c0".to_string()), "cached".to_string());
        let result = update(&mut state, &Action::SelectPrev);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert_eq!(state.log.current_diff.as_deref(), Some("cached"));
    }

    #[test]
    fn test_file_jump_scrolls_to_header() {
        let mut state = state_with(1);
        state.show_diffs = true;
        state.log.current_diff = Some(
            "Commit ID: c0\n\nFile: a.rs\nStatus: Modified\n@@ -1 +1 @@\n\nFile: b.rs\n"
                .to_string(),
        );
        update(&mut state, &Action::SelectNextFile);
        assert_eq!(state.log.selected_file_index, Some(0));
        assert_eq!(state.log.diff_scroll, 2);
        update(&mut state, &Action::SelectNextFile);
        assert_eq!(state.log.diff_scroll, 6);
        update(&mut state, &Action::SelectNextFile);
        assert_eq!(state.log.selected_file_index, Some(1));
    }

    #[test]
    fn test_hunk_jumps() {
        let mut state = state_with(1);
        state.log.current_diff =
            Some("header\n@@ -1 +1 @@\n-a\n+b\n@@ -9 +9 @@\n-c\n".to_string());
        update(&mut state, &Action::NextHunk);
        assert_eq!(state.log.diff_scroll, 1);
        update(&mut state, &Action::NextHunk);
        assert_eq!(state.log.diff_scroll, 4);
        update(&mut state, &Action::NextHunk);
        assert_eq!(state.log.diff_scroll, 4);
        update(&mut state, &Action::PrevHunk);
        assert_eq!(state.log.diff_scroll, 1);
    }

    #[test]
    fn test_scroll_diff_is_bounded() {
        let mut state = state_with(1);
        state.log.current_diff = Some("a\nb\nc".to_string());
        update(&mut state, &Action::ScrollDiffDown(10));
        assert_eq!(state.log.diff_scroll, 2);
        update(&mut state, &Action::ScrollDiffUp(5));
        assert_eq!(state.log.diff_scroll, 0);
    }

    #[test]
    fn test_opening_diff_without_files_selects_no_file() {
        let mut state = state_with(1);
        if let Some(repo) = &mut state.repo {
            repo.revisions[0].changed_files.clear();
        }
        update(&mut state, &Action::ToggleDiffs);
        assert_eq!(state.mode, AppMode::Diff);
        assert_eq!(state.log.selected_file_index, None);
        assert!(state.get_selected_file().is_none());

        update(&mut state, &Action::ToggleDiffs);
        update(&mut state, &Action::FocusDiff);
        assert_eq!(state.log.selected_file_index, None);

        let mut state = state_with(1);
        update(&mut state, &Action::FocusDiff);
        assert_eq!(state.log.selected_file_index, Some(0));
    }
}
