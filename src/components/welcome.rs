use crate::app::state::AppState;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Welcome<'a> {
    pub app_state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

const LOGO: [&str; 5] = [
    r" _               _     _ ",
    r"| |__  _ __ __ _(_) __| |",
    r"| '_ \| '__/ _` | |/ _` |",
    r"| |_) | | | (_| | | (_| |",
    r"|_.__/|_|  \__,_|_|\__,_|",
];

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let theme = self.theme;
        let key = |k: &'static str| Span::styled(k, theme.footer_segment_key);

        let mut lines: Vec<Line> = LOGO
            .iter()
            .map(|l| Line::from(Span::styled(*l, theme.header_logo)))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "No jj workspace found here.",
            theme.status_error,
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            key("i"),
            Span::raw(" or "),
            key("Enter"),
            Span::raw(" to create a colocated repository"),
        ]));
        lines.push(Line::from(Span::styled(
            " (jj git init --colocate) ",
            theme.header_item,
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            key("q"),
            Span::raw(" or "),
            key("Esc"),
            Span::raw(" to quit"),
        ]));

        if let Some(err) = &self.app_state.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Error: {}", err.message),
                theme.status_error,
            )));
        }

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let centered_area = Rect {
            x: area.x,
            y: (area.y + area.height / 2).saturating_sub(height / 2),
            width: area.width,
            height: height.min(area.height),
        };

        if centered_area.width > 0 && centered_area.height > 0 {
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .render(centered_area, buf);
        }
    }
}
