use crate::app::state::HeaderState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a HeaderState,
    pub theme: &'a Theme,
}

/// Powerline arrow leading from one segment style into the next.
fn separator(from: Style, to: Style) -> Span<'static> {
    Span::styled(
        glyphs::SEP_RIGHT,
        Style::default()
            .fg(from.bg.unwrap_or(Color::Reset))
            .bg(to.bg.unwrap_or(Color::Reset)),
    )
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let segments = [
            (format!(" {} BRAID ", glyphs::REPO), theme.header_logo),
            (self.state.repo_text.clone(), theme.header_repo),
            (
                format!(" {}{}", glyphs::BOOKMARK, self.state.bookmark_text),
                theme.header_branch,
            ),
            (
                format!("{}{}", self.state.wc_text, self.state.op_text),
                theme.header_stats,
            ),
        ];

        let mut spans = Vec::with_capacity(segments.len() * 2);
        for (i, (text, style)) in segments.iter().enumerate() {
            spans.push(Span::styled(text.clone(), *style));
            let next = segments.get(i + 1).map_or(theme.header, |(_, s)| *s);
            spans.push(separator(*style, next));
        }

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
