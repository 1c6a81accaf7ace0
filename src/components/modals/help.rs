use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

/// Default key bindings grouped the way the help overlay shows them.
pub const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / ↓", "Select next revision"),
            ("k / ↑", "Select previous revision"),
            ("g / G", "First / last revision"),
            ("PgUp / PgDn", "Move by 10"),
            ("Enter", "Toggle diff panel"),
            ("Tab / l", "Focus diff panel"),
            ("h", "Focus graph"),
            ("[ / ]", "Previous / next hunk"),
        ],
    ),
    (
        "Bookmarks",
        &[
            ("m", "Jump to nearest bookmark"),
            ("B", "Pick a bookmark and edit its target"),
            ("t", "Edit the trunk bookmark's target"),
            ("b", "Set bookmark on revision"),
            ("D", "Delete a bookmark on revision"),
        ],
    ),
    (
        "Revisions",
        &[
            ("e", "Edit revision"),
            ("d", "Describe revision"),
            ("n", "New child revision"),
            ("r", "Rebase (pick destination, Enter)"),
            ("s", "Squash into parent"),
            ("a", "Abandon revision"),
            ("x", "Restore file (diff focus, @ only)"),
            ("S", "Snapshot working copy"),
            ("u", "Undo last operation"),
        ],
    ),
    (
        "History",
        &[
            ("o", "Operation log"),
            ("w", "Workspaces (a add, d forget)"),
        ],
    ),
    (
        "General",
        &[
            ("v", "Toggle graph style"),
            ("?", "Show this help"),
            ("Esc", "Close modal / clear errors"),
            ("q", "Quit"),
        ],
    ),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYBINDINGS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let mut rows = Vec::new();
        for (i, (category, bindings)) in HELP_SECTIONS.iter().enumerate() {
            if i > 0 {
                rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
            }
            rows.push(Row::new(vec![
                Cell::from(Span::styled(*category, self.theme.header_item)),
                Cell::from(""),
            ]));
            rows.extend(bindings.iter().map(|(key, desc)| {
                Row::new(vec![
                    Cell::from(Span::styled(format!(" {key}"), self.theme.footer_segment_key)),
                    Cell::from(Span::styled(*desc, self.theme.list_item)),
                ])
            }));
        }

        Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .block(block)
            .render(help_area, buf);
    }
}
