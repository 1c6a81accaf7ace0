use crate::app::state::{BookmarkPickerState, PickerPurpose};
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

const MAX_VISIBLE: u16 = 12;

pub struct BookmarkPickerModal<'a> {
    pub theme: &'a Theme,
    pub picker: &'a BookmarkPickerState,
}

impl Widget for BookmarkPickerModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = u16::try_from(self.picker.names.len())
            .unwrap_or(MAX_VISIBLE)
            .min(MAX_VISIBLE);
        let modal_area = centered_rect_fixed_height(40, rows + 2, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let title = match self.picker.purpose {
            PickerPurpose::Edit => " EDIT BOOKMARK TARGET ",
            PickerPurpose::Delete => " DELETE BOOKMARK ",
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(title, self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let items: Vec<ListItem> = self
            .picker
            .names
            .iter()
            .map(|name| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", glyphs::BOOKMARK), self.theme.bookmark),
                    Span::styled(name.as_str(), self.theme.list_item),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.list_selected)
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.picker.selected));
        StatefulWidget::render(list, modal_area, buf, &mut state);
    }
}
