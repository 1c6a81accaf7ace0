use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct DiffView<'a> {
    pub diff_content: Option<&'a str>,
    pub is_loading: bool,
    pub scroll_offset: u16,
    /// Set right after a hunk jump; the hunk at the top is flashed.
    pub flash_hunk: bool,
    pub theme: &'a Theme,
}

impl DiffView<'_> {
    fn line_style(&self, line: &str) -> Style {
        let theme = self.theme;
        if line.starts_with("Commit ID:")
            || line.starts_with("Change ID:")
            || line.starts_with("Bookmarks:")
            || line.starts_with("Author:")
            || line.starts_with("File:")
        {
            theme.diff_header
        } else if line.starts_with("Status: Conflicted") {
            theme.diff_conflict
        } else if line.starts_with("Status:") {
            theme.diff_modify
        } else if line.starts_with("--- ") || line.starts_with("+++ ") {
            theme.diff_header
        } else if line.starts_with("@@") {
            theme.diff_hunk
        } else if line.starts_with('+') {
            theme.diff_add
        } else if line.starts_with('-') {
            theme.diff_remove
        } else {
            theme.diff_context
        }
    }
}

impl Widget for DiffView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content = match (self.diff_content, self.is_loading) {
            (Some(content), _) => content,
            (None, true) => "Loading diff...",
            (None, false) => "No diff selected",
        };

        let all: Vec<&str> = content.lines().collect();
        let top = self.scroll_offset as usize;
        let flashed = if self.flash_hunk && all.get(top).is_some_and(|l| l.starts_with("@@")) {
            let end = all
                .iter()
                .enumerate()
                .skip(top + 1)
                .find(|(_, l)| l.starts_with("@@") || l.starts_with("File:"))
                .map_or(all.len(), |(idx, _)| idx);
            top..end
        } else {
            0..0
        };

        let lines: Vec<Line> = all
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let mut style = self.line_style(line);
                if flashed.contains(&idx) {
                    style = style.patch(self.theme.diff_hunk_flash);
                }
                Line::from(Span::styled(*line, style))
            })
            .collect();

        Paragraph::new(lines)
            .scroll((self.scroll_offset, 0))
            .render(area, buf);
    }
}
