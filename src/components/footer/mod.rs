mod groups;
mod types;

use crate::app::state::AppState;
use crate::theme::Theme;
pub use groups::get_groups;
pub use types::{FooterGroup, FooterItem};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let status_span = if let Some(err) = &state.last_error {
            Span::styled(format!("  ERROR: {}  ", err.message), theme.status_error)
        } else if let Some(msg) = &state.status_message {
            Span::styled(format!("  {msg}  "), theme.status_info)
        } else {
            Span::styled("  READY  ", theme.footer_segment_val)
        };

        let mut spans = vec![status_span, Span::raw(" ")];

        if !state.active_tasks.is_empty() {
            spans.push(Span::styled(
                format!(" {} {} ", state.spinner, state.active_tasks.join(", ")),
                theme.status_info,
            ));
            spans.push(Span::raw("  "));
        }

        let available_width = area.width.saturating_sub(4) as usize;
        let mut current_width: usize = spans.iter().map(Span::width).sum();

        for group in get_groups(state) {
            let Some(first) = group.items.first() else {
                continue;
            };
            if current_width + first.width() > available_width {
                break;
            }

            // Group labels only when the terminal is wide
            if area.width > 100 {
                let label = Span::styled(format!("{}: ", group.name), theme.footer_group_name);
                if current_width + label.width() + first.width() < available_width {
                    current_width += label.width();
                    spans.push(label);
                }
            }

            for item in &group.items {
                if current_width + item.width() + 1 > available_width {
                    break;
                }
                let (key_style, val_style) = if item.highlighted {
                    (
                        theme.header_active,
                        theme.header_active.add_modifier(Modifier::DIM),
                    )
                } else {
                    (theme.footer_segment_key, theme.footer_segment_val)
                };
                spans.push(Span::styled(format!(" {} ", item.key), key_style));
                spans.push(Span::styled(format!(" {} ", item.desc), val_style));
                spans.push(Span::raw(" "));
                current_width += item.width() + 1;
            }
            spans.push(Span::raw("  "));
            current_width += 2;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
