use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState, Panel};

fn group(name: &'static str, items: Vec<FooterItem>) -> FooterGroup {
    FooterGroup { name, items }
}

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![group("ERROR", vec![FooterItem::new("Esc", "dismiss")])];
    }

    match state.mode {
        AppMode::Normal => {
            let mut nav = vec![
                FooterItem::new("j/k", "move"),
                FooterItem::new("m", "nearest"),
                FooterItem::new("B", "bookmarks"),
                FooterItem::new("t", "trunk"),
            ];
            let mut groups = Vec::new();
            if state.show_diffs {
                nav.push(FooterItem::new("Tab", "focus"));
                groups.push(group("NAV", nav));
                groups.push(group(
                    "DIFF",
                    vec![
                        FooterItem::new("PgUp/Dn", "scroll"),
                        FooterItem::new("[/]", "hunk"),
                    ],
                ));
            } else {
                groups.push(group("NAV", nav));
            }
            groups.push(group(
                "EDIT",
                vec![
                    FooterItem::new("Enter", "diff"),
                    FooterItem::new("e", "edit"),
                    FooterItem::new("d", "describe"),
                    FooterItem::new("n", "new"),
                    FooterItem::new("r", "rebase"),
                    FooterItem::new("s", "squash"),
                    FooterItem::new("a", "abandon"),
                ],
            ));
            groups.push(group(
                "BOOKMARK",
                vec![FooterItem::new("b", "set"), FooterItem::new("D", "delete")],
            ));
            groups.push(group(
                "APP",
                vec![
                    FooterItem::new("u", "undo"),
                    FooterItem::new("o", "ops"),
                    FooterItem::new("w", "workspaces"),
                    FooterItem::new("v", "style"),
                    FooterItem::new("?", "help"),
                    FooterItem::new("q", "quit"),
                ],
            ));
            groups
        }
        AppMode::Diff => {
            let is_working_copy = state
                .selected_revision()
                .is_some_and(|rev| rev.is_working_copy);
            vec![
                group(
                    "FILES",
                    vec![
                        FooterItem::new("j/k", "file"),
                        FooterItem::new("[/]", "hunk"),
                        FooterItem::new("PgUp/Dn", "scroll"),
                    ],
                ),
                group(
                    "FILE",
                    vec![FooterItem::new("x", "restore").highlighted(
                        is_working_copy && state.focused_panel == Panel::Diff,
                    )],
                ),
                group(
                    "FOCUS",
                    vec![
                        FooterItem::new("h/Tab", "graph"),
                        FooterItem::new("Esc", "back"),
                    ],
                ),
            ]
        }
        AppMode::RebaseSelect => vec![group(
            "REBASE",
            vec![
                FooterItem::new("j/k", "destination"),
                FooterItem::new("Enter", "confirm").highlighted(true),
                FooterItem::new("Esc", "cancel"),
            ],
        )],
        AppMode::BookmarkPicker => vec![group(
            "BOOKMARKS",
            vec![
                FooterItem::new("j/k", "select"),
                FooterItem::new("Enter", "confirm"),
                FooterItem::new("Esc", "cancel"),
            ],
        )],
        AppMode::OperationLog => vec![group(
            "OPERATIONS",
            vec![
                FooterItem::new("j/k", "scroll"),
                FooterItem::new("Esc", "close"),
            ],
        )],
        AppMode::Workspaces => {
            let forgettable = state
                .workspace_list
                .as_ref()
                .and_then(|list| list.current())
                .is_some_and(|ws| !ws.is_current);
            vec![group(
                "WORKSPACES",
                vec![
                    FooterItem::new("j/k", "select"),
                    FooterItem::new("a", "add"),
                    FooterItem::new("d", "forget").highlighted(forgettable),
                    FooterItem::new("Esc", "close"),
                ],
            )]
        }
        AppMode::Input | AppMode::BookmarkInput | AppMode::WorkspaceInput => vec![group(
            "INPUT",
            vec![
                FooterItem::new("Enter", "save"),
                FooterItem::new("Esc", "cancel"),
            ],
        )],
        AppMode::Help => vec![group(
            "HELP",
            vec![FooterItem::new("?/Esc", "close")],
        )],
        AppMode::Loading => vec![group("APP", vec![FooterItem::new("q", "quit")])],
        AppMode::NoRepo => vec![
            group("INIT", vec![FooterItem::new("i/Enter", "initialize")]),
            group("APP", vec![FooterItem::new("q/Esc", "quit")]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ErrorState;

    #[test]
    fn test_error_replaces_hints() {
        let mut state = AppState::default();
        state.last_error = Some(ErrorState::new("boom"));
        let groups = get_groups(&state);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "ERROR");
    }

    #[test]
    fn test_diff_group_only_with_open_panel() {
        let mut state = AppState::default();
        let names = |s: &AppState| get_groups(s).iter().map(|g| g.name).collect::<Vec<_>>();
        assert!(!names(&state).contains(&"DIFF"));
        state.show_diffs = true;
        assert!(names(&state).contains(&"DIFF"));

        state.mode = AppMode::RebaseSelect;
        assert_eq!(names(&state), vec!["REBASE"]);
    }
}
