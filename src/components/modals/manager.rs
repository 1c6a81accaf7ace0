use crate::app::state::{AppMode, AppState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::bookmarks::BookmarkPickerModal;
use super::error::ErrorModal;
use super::help::HelpModal;
use super::operation_log::OperationLogModal;
use super::helpers::{centered_rect_fixed_height, dim_area, draw_drop_shadow};
use super::text_input::TextInputModal;
use super::workspaces::WorkspacesModal;

/// Composes every overlay that belongs to the current mode, then the error
/// modal on top of all of them.
pub struct ModalManager<'a> {
    pub theme: &'a Theme,
    pub app_state: &'a AppState<'a>,
}

impl ModalManager<'_> {
    fn render_rebase_banner(&self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(80, 5, area);
        let modal_area = Rect {
            y: area.bottom().saturating_sub(modal_area.height + 1),
            ..modal_area
        };
        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" SELECT REBASE DESTINATION ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let source = self
            .app_state
            .rebase_source
            .as_ref()
            .map(|id| id.short(8).to_string())
            .unwrap_or_default();
        let text = vec![
            Line::from(vec![
                Span::raw("Rebasing "),
                Span::styled(source, self.theme.commit_id_prefix),
                Span::raw(": move to the destination and press Enter."),
            ]),
            Line::from("Or press Esc to cancel."),
        ];
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(block)
            .render(modal_area, buf);
    }
}

impl Widget for ModalManager<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let is_modal_active = !matches!(
            self.app_state.mode,
            AppMode::Normal
                | AppMode::Diff
                | AppMode::NoRepo
                | AppMode::Loading
                | AppMode::RebaseSelect
        ) || self.app_state.last_error.is_some();

        if is_modal_active {
            dim_area(buf, area);
        }

        match self.app_state.mode {
            AppMode::Help => HelpModal { theme: self.theme }.render(area, buf),
            AppMode::Input | AppMode::BookmarkInput | AppMode::WorkspaceInput => {
                if let Some(input) = &self.app_state.input {
                    let (title, hint, rows) = match self.app_state.mode {
                        AppMode::Input => ("DESCRIBE REVISION", "Enter save · Esc cancel", 5),
                        AppMode::WorkspaceInput => ("ADD WORKSPACE", "Enter add · Esc cancel", 1),
                        _ => ("SET BOOKMARK", "Enter set · Esc cancel", 1),
                    };
                    TextInputModal {
                        theme: self.theme,
                        title,
                        hint: Some(hint),
                        text_area: input.text_area(),
                        rows,
                    }
                    .render(area, buf);
                }
            }
            AppMode::RebaseSelect => self.render_rebase_banner(area, buf),
            AppMode::BookmarkPicker => {
                if let Some(picker) = &self.app_state.bookmark_picker {
                    BookmarkPickerModal {
                        theme: self.theme,
                        picker,
                    }
                    .render(area, buf);
                }
            }
            AppMode::OperationLog => {
                if let Some(state) = &self.app_state.operation_log {
                    OperationLogModal {
                        theme: self.theme,
                        state,
                    }
                    .render(area, buf);
                }
            }
            AppMode::Workspaces => {
                if let Some(state) = &self.app_state.workspace_list {
                    WorkspacesModal {
                        theme: self.theme,
                        state,
                    }
                    .render(area, buf);
                }
            }
            _ => {}
        }

        if let Some(error) = &self.app_state.last_error {
            ErrorModal {
                theme: self.theme,
                error,
            }
            .render(area, buf);
        }
    }
}
