use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use tui_textarea::TextArea;

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

/// Prompt box over the log, `rows` lines of text tall.
pub struct TextInputModal<'a> {
    pub theme: &'a Theme,
    pub title: &'a str,
    pub hint: Option<&'a str>,
    pub text_area: &'a TextArea<'a>,
    pub rows: u16,
}

impl Widget for TextInputModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let multi_line = self.rows > 1;
        // Borders, plus a blank line of padding around multi-line text
        let chrome = if multi_line { 4 } else { 2 };
        let modal_area = centered_rect_fixed_height(60, self.rows.max(1) + chrome, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled(self.title.trim(), self.theme.header_active),
            Span::raw(" "),
        ]);
        let block = Block::default()
            .title(title)
            .title_bottom(match self.hint {
                Some(hint) => Line::from(Span::styled(format!(" {hint} "), self.theme.dimmed)),
                None => Line::default(),
            })
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let mut text_area = block.inner(modal_area);
        block.render(modal_area, buf);
        if multi_line {
            text_area = text_area.inner(Margin::new(1, 1));
        }

        if !text_area.is_empty() {
            Widget::render(self.text_area, text_area, buf);
        }
    }
}
