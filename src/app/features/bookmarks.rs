use super::navigation::{select_commit, select_commit_for_reload};
use crate::app::{
    action::{Action, UpdateResult},
    command::Command,
    state::{AppMode, AppState, BookmarkPickerState, PickerPurpose},
};
use crate::domain::navigation::Navigation;

pub fn update(state: &mut AppState, action: &Action) -> UpdateResult {
    match action {
        Action::JumpToNearestBookmark => {
            let Some(repo) = &state.repo else {
                return UpdateResult::Handled(None);
            };
            let nearest = Navigation::new(&repo.revisions)
                .find_nearest_bookmark()
                .map(|name| {
                    let holder = repo
                        .revisions
                        .iter()
                        .find(|rev| rev.has_bookmark(name))
                        .map(|rev| rev.commit_id.clone());
                    (name.to_string(), holder)
                });
            log::debug!("nearest bookmark: {nearest:?}");

            let Some((name, target)) = nearest else {
                state.set_status("No bookmark near the working copy");
                return UpdateResult::Handled(None);
            };
            let command = target.and_then(|id| select_commit(state, &id)).flatten();
            state.set_status(format!("Bookmark {name}"));
            UpdateResult::Handled(command)
        }
        Action::OpenBookmarkPicker => {
            let names = state
                .repo
                .as_ref()
                .map(|repo| repo.bookmark_names())
                .unwrap_or_default();
            if names.is_empty() {
                state.set_status("No bookmarks");
            } else {
                state.bookmark_picker = Some(BookmarkPickerState::new(names, PickerPurpose::Edit));
                state.mode = AppMode::BookmarkPicker;
            }
            UpdateResult::Handled(None)
        }
        Action::BookmarkPickerNext => {
            if let Some(picker) = &mut state.bookmark_picker {
                picker.next();
            }
            UpdateResult::Handled(None)
        }
        Action::BookmarkPickerPrev => {
            if let Some(picker) = &mut state.bookmark_picker {
                picker.prev();
            }
            UpdateResult::Handled(None)
        }
        Action::BookmarkPickerConfirm => {
            let Some(picker) = state.bookmark_picker.take() else {
                return UpdateResult::Handled(None);
            };
            state.mode = AppMode::Normal;
            let Some(name) = picker.current().map(str::to_string) else {
                return UpdateResult::Handled(None);
            };
            match picker.purpose {
                PickerPurpose::Edit => UpdateResult::Handled(edit_bookmark_target(state, &name)),
                PickerPurpose::Delete => {
                    UpdateResult::Handled(Some(Command::DeleteBookmark(name)))
                }
            }
        }
        Action::EditBookmarkTarget(name) => {
            UpdateResult::Handled(edit_bookmark_target(state, name))
        }
        Action::EditTrunkTarget => {
            let trunk = state.trunk_bookmark.clone();
            UpdateResult::Handled(edit_bookmark_target(state, &trunk))
        }
        Action::DeleteBookmarkIntent => {
            let Some(bookmarks) = state.selected_revision().map(|rev| rev.bookmarks.clone())
            else {
                return UpdateResult::Handled(None);
            };
            match bookmarks.as_slice() {
                [] => {
                    state.set_status("No bookmark on this revision");
                    UpdateResult::Handled(None)
                }
                [only] => UpdateResult::Handled(Some(Command::DeleteBookmark(only.clone()))),
                _ => {
                    state.bookmark_picker =
                        Some(BookmarkPickerState::new(bookmarks, PickerPurpose::Delete));
                    state.mode = AppMode::BookmarkPicker;
                    UpdateResult::Handled(None)
                }
            }
        }
        _ => UpdateResult::NotHandled,
    }
}

/// Selects the revision `jj edit` should land on for `bookmark` and asks
/// the engine to edit it. Without a target only a status message is shown.
fn edit_bookmark_target(state: &mut AppState, bookmark: &str) -> Option<Command> {
    let target = state.repo.as_ref().and_then(|repo| {
        Navigation::new(&repo.revisions)
            .find_bookmark_edit_target(bookmark)
            .map(|rev| rev.commit_id.clone())
    });
    log::debug!("edit target for {bookmark}: {target:?}");

    let Some(id) = target else {
        state.set_status(format!("No edit target for bookmark {bookmark}"));
        return None;
    };
    select_commit_for_reload(state, &id);
    Some(Command::Edit(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommitId, RepoSnapshot, Revision};

    fn rev(id: &str, parents: &[&str], bookmarks: &[&str], wc: bool) -> Revision {
        Revision {
            commit_id: CommitId(id.to_string()),
            parents: parents.iter().map(|p| CommitId(p.to_string())).collect(),
            bookmarks: bookmarks.iter().map(ToString::to_string).collect(),
            is_working_copy: wc,
            ..Default::default()
        }
    }

    /// c (main child, @) -> b [main] -> a [old, stale]
    fn state() -> AppState<'static> {
        let mut state = AppState::default();
        state.repo = Some(RepoSnapshot {
            revisions: vec![
                rev("c", &["b"], &[], true),
                rev("b", &["a"], &["main"], false),
                rev("a", &[], &["old", "stale"], false),
            ],
            ..Default::default()
        });
        state.log.list_state.select(Some(0));
        state
    }

    #[test]
    fn test_trunk_target_is_child_of_bookmark() {
        let mut state = state();
        let result = update(&mut state, &Action::EditTrunkTarget);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::Edit(ref id))) if id.0 == "c"
        ));
        assert_eq!(state.log.list_state.selected(), Some(0));
    }

    #[test]
    fn test_missing_bookmark_only_sets_status() {
        let mut state = state();
        state.trunk_bookmark = "trunk".to_string();
        let result = update(&mut state, &Action::EditTrunkTarget);
        assert!(matches!(result, UpdateResult::Handled(None)));
        assert_eq!(
            state.status_message.as_deref(),
            Some("No edit target for bookmark trunk")
        );
    }

    #[test]
    fn test_nearest_bookmark_selects_its_revision() {
        let mut state = state();
        update(&mut state, &Action::JumpToNearestBookmark);
        assert_eq!(state.log.list_state.selected(), Some(1));
    }

    #[test]
    fn test_picker_lists_bookmarks_in_snapshot_order() {
        let mut state = state();
        update(&mut state, &Action::OpenBookmarkPicker);
        assert_eq!(state.mode, AppMode::BookmarkPicker);
        let names = state
            .bookmark_picker
            .as_ref()
            .map(|p| p.names.clone())
            .unwrap_or_default();
        assert_eq!(names, vec!["main", "old", "stale"]);

        // "old" stops at its own revision: the child carries "main"
        update(&mut state, &Action::BookmarkPickerNext);
        let result = update(&mut state, &Action::BookmarkPickerConfirm);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::Edit(ref id))) if id.0 == "a"
        ));
        assert_eq!(state.log.list_state.selected(), Some(2));
        assert_eq!(state.mode, AppMode::Normal);
        assert!(state.bookmark_picker.is_none());
    }

    #[test]
    fn test_edit_target_diff_follows_the_reload() {
        let mut state = state();
        state.log.current_diff = Some("diff of c".to_string());
        let result = update(&mut state, &Action::EditBookmarkTarget("old".to_string()));
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::Edit(ref id))) if id.0 == "a"
        ));
        assert_eq!(state.log.list_state.selected(), Some(2));
        assert!(state.log.current_diff.is_none());
        assert!(state.log.is_loading_diff);

        // Edit completes; the reload lands on the target and asks for its diff
        let reload = crate::app::reducer::update(
            &mut state,
            Action::OperationCompleted(Ok("Edit successful".to_string())),
        );
        assert!(matches!(reload, Some(Command::LoadRepo(..))));
        let snapshot = state.repo.clone().unwrap_or_default();
        let loaded = crate::app::reducer::update(&mut state, Action::RepoLoaded(Box::new(snapshot)));
        assert!(matches!(loaded, Some(Command::LoadDiff(ref id)) if id.0 == "a"));
    }

    #[test]
    fn test_delete_bookmark_intent() {
        let mut state = state();
        update(&mut state, &Action::DeleteBookmarkIntent);
        assert_eq!(
            state.status_message.as_deref(),
            Some("No bookmark on this revision")
        );

        state.log.list_state.select(Some(1));
        let result = update(&mut state, &Action::DeleteBookmarkIntent);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::DeleteBookmark(ref name))) if name == "main"
        ));

        state.log.list_state.select(Some(2));
        update(&mut state, &Action::DeleteBookmarkIntent);
        assert_eq!(state.mode, AppMode::BookmarkPicker);
        update(&mut state, &Action::BookmarkPickerPrev);
        let result = update(&mut state, &Action::BookmarkPickerConfirm);
        assert!(matches!(
            result,
            UpdateResult::Handled(Some(Command::DeleteBookmark(ref name))) if name == "stale"
        ));
    }
}
