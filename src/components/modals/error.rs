use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect, draw_drop_shadow};

pub struct ErrorModal<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl ErrorModal<'_> {
    fn title(&self) -> (&'static str, Style, &'static str) {
        match self.error.severity {
            ErrorSeverity::Info => (" INFO ", self.theme.header_item, "󰋼"),
            ErrorSeverity::Warning => (" WARNING ", self.theme.status_warn, "󱈸"),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error, "󰅚"),
            ErrorSeverity::Critical => (" CRITICAL ", self.theme.status_error, "󰀦"),
        }
    }
}

impl Widget for ErrorModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = if self.error.suggestions.is_empty() { 25 } else { 35 };
        let modal_area = centered_rect(60, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let (title_text, title_style, icon) = self.title();
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title_text, title_style),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(title_style);

        let mut text_lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{icon} "), title_style),
                Span::styled(self.error.message.as_str(), self.theme.footer_segment_val),
            ]),
            Line::from(Span::styled(
                format!("Occurred at: {}", self.error.timestamp.format("%H:%M:%S")),
                self.theme.list_item,
            )),
            Line::from(""),
        ];

        if !self.error.suggestions.is_empty() {
            text_lines.push(Line::from(Span::styled("Suggestions:", self.theme.header_item)));
            text_lines.extend(self.error.suggestions.iter().map(|suggestion| {
                Line::from(vec![
                    Span::styled("  • ", self.theme.header_item),
                    Span::styled(suggestion.as_str(), self.theme.footer_segment_key),
                ])
            }));
            text_lines.push(Line::from(""));
        }

        text_lines.push(Line::from(vec![
            Span::raw(" Press "),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::raw(" to acknowledge "),
        ]));

        Paragraph::new(text_lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(modal_area, buf);
    }
}
