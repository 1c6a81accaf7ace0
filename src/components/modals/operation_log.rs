use crate::app::state::OperationLogState;
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

use super::helpers::{centered_rect, draw_drop_shadow};

pub struct OperationLogModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a OperationLogState,
}

impl Widget for OperationLogModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect(80, 80, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" OPERATION LOG ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        if self.state.loading || self.state.entries.is_empty() {
            let text = if self.state.loading {
                "Loading operations..."
            } else {
                "No operations"
            };
            Paragraph::new(Span::styled(text, self.theme.dimmed))
                .alignment(Alignment::Center)
                .render(inner_area, buf);
        } else {
            let items: Vec<ListItem> = self
                .state
                .entries
                .iter()
                .map(|op| {
                    let (marker, id_style) = if op.is_current {
                        ("● ", self.theme.change_id_wc)
                    } else {
                        ("○ ", self.theme.commit_id_dim)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, id_style),
                        Span::styled(op.id.as_str(), id_style),
                        Span::raw("  "),
                        Span::styled(op.timestamp.as_str(), self.theme.timestamp),
                        Span::raw("  "),
                        Span::styled(op.description.as_str(), self.theme.list_item),
                    ]))
                })
                .collect();

            let list = List::new(items).highlight_style(self.theme.list_selected);
            let mut list_state = ListState::default().with_selected(Some(self.state.selected));
            StatefulWidget::render(list, inner_area, buf, &mut list_state);
        }

        let hint_area = Rect::new(
            modal_area.x,
            modal_area.y + modal_area.height - 1,
            modal_area.width,
            1,
        );
        let hint = Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" to close | "),
            Span::styled("j/k", self.theme.footer_segment_key),
            Span::raw(" to scroll "),
        ]);
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}
