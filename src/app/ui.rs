use crate::app::state::{AppMode, AppState, Panel};
use crate::components::diff_view::DiffView;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::ModalManager;
use crate::components::revision_graph::RevisionGraph;
use crate::components::welcome::Welcome;
use crate::domain::models::Revision;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

const HUNK_FLASH: Duration = Duration::from_millis(400);

/// Lines a revision takes in the graph: metadata, description and, for the
/// selected revision with the diff panel open, one line per changed file.
#[must_use]
pub fn calculate_row_height(rev: &Revision, is_selected: bool, show_diffs: bool) -> u16 {
    let num_files = if is_selected && show_diffs {
        rev.changed_files.len()
    } else {
        0
    };
    2u16.saturating_add(u16::try_from(num_files).unwrap_or(u16::MAX))
}

pub struct AppLayout {
    pub main: Vec<Rect>,
    pub body: Vec<Rect>,
}

pub fn get_layout(area: Rect, state: &AppState) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area)
        .to_vec();

    let ratio = state.diff_ratio.clamp(10, 90);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(if state.show_diffs {
            [
                Constraint::Percentage(100 - ratio),
                Constraint::Percentage(ratio),
            ]
        } else {
            [Constraint::Percentage(100), Constraint::Percentage(0)]
        })
        .split(main[1])
        .to_vec();

    AppLayout { main, body }
}

fn panel_block<'b>(title: &'b str, hint: Line<'b>, focused: bool, state: &AppState) -> Block<'b> {
    let theme = &state.theme;
    let (border, title_style) = if focused {
        (theme.border_focus, theme.header_active)
    } else {
        (theme.border, theme.header_item)
    };
    Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title, title_style),
            Span::raw(" "),
        ]))
        .title_bottom(hint)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

fn hint<'b>(pairs: &[(&'b str, &'b str)], state: &AppState) -> Line<'b> {
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in pairs {
        spans.push(Span::styled(*key, state.theme.footer_segment_key));
        spans.push(Span::raw(format!(": {desc} ")));
    }
    Line::from(spans)
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    if app_state.mode == AppMode::NoRepo {
        f.render_widget(
            Welcome {
                app_state,
                theme: &app_state.theme,
            },
            area,
        );
        if app_state.last_error.is_some() {
            f.render_widget(
                ModalManager {
                    theme: &app_state.theme,
                    app_state,
                },
                area,
            );
        }
        return;
    }

    let layout = get_layout(area, app_state);

    f.render_widget(
        Header {
            state: &app_state.header_state,
            theme: &app_state.theme,
        },
        layout.main[0],
    );

    // Left: revision graph
    let graph_focused = app_state.focused_panel == Panel::Graph
        && matches!(app_state.mode, AppMode::Normal | AppMode::RebaseSelect);
    let graph_block = panel_block(
        "REVISIONS",
        hint(&[("j/k", "move"), ("?", "help")], app_state),
        graph_focused,
        app_state,
    );
    let graph_area = layout.body[0];
    if graph_area.width > 0 && graph_area.height > 0 {
        let inner = graph_block.inner(graph_area);
        if let Some(repo) = &app_state.repo {
            let graph = RevisionGraph {
                revisions: &repo.revisions,
                theme: &app_state.theme,
                show_diffs: app_state.show_diffs,
                selected_file_index: app_state.log.selected_file_index,
                graph_style: app_state.graph_style,
                trunk_bookmark: &app_state.trunk_bookmark,
                change_id_prefixes: &app_state.log.change_id_prefixes,
                commit_id_prefixes: &app_state.log.commit_id_prefixes,
            };
            f.render_stateful_widget(graph, inner, &mut app_state.log.list_state);
        } else {
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(app_state.spinner.clone(), app_state.theme.header_logo),
                Span::raw(" Loading repository... "),
            ]))
            .alignment(Alignment::Center);
            let centered = Rect {
                y: inner.y + inner.height / 2,
                height: inner.height.min(1),
                ..inner
            };
            f.render_widget(loading, centered);
        }
        f.render_widget(graph_block, graph_area);
    }

    // Right: diff
    let diff_area = layout.body[1];
    if app_state.show_diffs && diff_area.width > 0 && diff_area.height > 0 {
        let diff_block = panel_block(
            "DIFF",
            hint(&[("PgUp/PgDn", "scroll"), ("[/]", "hunks")], app_state),
            app_state.focused_panel == Panel::Diff,
            app_state,
        );
        let flash_hunk = app_state
            .hunk_highlight_time
            .is_some_and(|t| t.elapsed() < HUNK_FLASH);
        let diff_view = DiffView {
            diff_content: app_state.log.current_diff.as_deref(),
            is_loading: app_state.log.is_loading_diff,
            scroll_offset: app_state.log.diff_scroll,
            flash_hunk,
            theme: &app_state.theme,
        };
        f.render_widget(diff_view, diff_block.inner(diff_area));
        f.render_widget(diff_block, diff_area);
    }

    f.render_widget(
        Footer {
            state: app_state,
            theme: &app_state.theme,
        },
        layout.main[2],
    );

    f.render_widget(
        ModalManager {
            theme: &app_state.theme,
            app_state,
        },
        area,
    );
}
