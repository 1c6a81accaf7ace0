use crate::app::state::WorkspaceListState;
use crate::domain::models::SHORT_ID_LEN;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget,
        Widget,
    },
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

const MAX_VISIBLE: u16 = 12;

pub struct WorkspacesModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a WorkspaceListState,
}

impl Widget for WorkspacesModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = u16::try_from(self.state.entries.len())
            .unwrap_or(MAX_VISIBLE)
            .clamp(1, MAX_VISIBLE);
        let modal_area = centered_rect_fixed_height(50, rows + 2, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" WORKSPACES ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(Span::styled(
                " a add · d forget · Esc close ",
                self.theme.dimmed,
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        if self.state.loading {
            Paragraph::new(Span::styled("Loading workspaces...", self.theme.dimmed))
                .alignment(Alignment::Center)
                .block(block)
                .render(modal_area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .entries
            .iter()
            .map(|ws| {
                let change: String = ws.change_id.chars().take(SHORT_ID_LEN).collect();
                let mut spans = vec![
                    Span::styled(format!("{}@ ", ws.name), self.theme.bookmark),
                    Span::styled(change, self.theme.change_id_mutable),
                ];
                if ws.is_current {
                    spans.push(Span::styled(" (current)", self.theme.change_id_wc));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.list_selected)
            .highlight_symbol("▸ ");
        let mut list_state = ListState::default().with_selected(Some(self.state.selected));
        StatefulWidget::render(list, modal_area, buf, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{CommitId, WorkspaceEntry};

    #[test]
    fn test_marks_current_workspace() {
        let theme = Theme::default();
        let mut state = WorkspaceListState::loading();
        state.set_entries(vec![
            WorkspaceEntry {
                name: "default".to_string(),
                commit_id: CommitId("c1".to_string()),
                change_id: "qpvuntsmwlqt0000".to_string(),
                is_current: true,
            },
            WorkspaceEntry {
                name: "review".to_string(),
                commit_id: CommitId("c2".to_string()),
                change_id: "zzxyrkkkkkkk".to_string(),
                is_current: false,
            },
        ]);
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        WorkspacesModal {
            theme: &theme,
            state: &state,
        }
        .render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("WORKSPACES"));
        assert!(text.contains("default@ qpvuntsm (current)"));
        assert!(text.contains("review@ zzxyrkkk"));
        assert!(!text.contains("review@ zzxyrkkk (current)"));
    }
}
