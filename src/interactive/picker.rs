use super::{Prompter, QuickAction, RevisionOption};
use crate::theme::Theme;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Terminal, TerminalOptions, Viewport,
};
use std::io;

const MAX_VISIBLE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerOutcome {
    Pending,
    Selected(usize),
    Cancelled,
}

/// Cursor over a fixed number of entries. Movement is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerState {
    pub selected: usize,
    pub len: usize,
}

impl PickerState {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerOutcome {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return PickerOutcome::Cancelled;
        }
        let last = self.len.saturating_sub(1);
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return PickerOutcome::Cancelled,
            KeyCode::Enter if self.len > 0 => return PickerOutcome::Selected(self.selected),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => self.selected = last,
            _ => {}
        }
        PickerOutcome::Pending
    }
}

/// Draws pickers in an inline viewport below the prompt line.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: Theme,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn pick(&self, title: &str, description: Option<&str>, labels: &[String]) -> Result<Option<usize>> {
        let header_lines = 1 + u16::from(description.is_some());
        let rows = u16::try_from(labels.len()).unwrap_or(MAX_VISIBLE).min(MAX_VISIBLE);
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(header_lines + rows),
            },
        )
        .context("Failed to open inline viewport")?;

        enable_raw_mode().context("Failed to enable raw mode")?;
        let result = self.event_loop(&mut terminal, title, description, labels);
        let _ = terminal.clear();
        disable_raw_mode().context("Failed to disable raw mode")?;
        result
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        title: &str,
        description: Option<&str>,
        labels: &[String],
    ) -> Result<Option<usize>> {
        let mut picker = PickerState::new(labels.len());
        let mut list_state = ListState::default();

        loop {
            list_state.select(Some(picker.selected));
            terminal.draw(|f| {
                let area = f.area();
                let mut header = vec![Line::from(Span::styled(title, self.theme.header_active))];
                if let Some(description) = description {
                    header.push(Line::from(Span::styled(description, self.theme.dimmed)));
                }
                let header_height = u16::try_from(header.len()).unwrap_or(1).min(area.height);
                let header_area = ratatui::layout::Rect {
                    height: header_height,
                    ..area
                };
                let list_area = ratatui::layout::Rect {
                    y: area.y + header_height,
                    height: area.height - header_height,
                    ..area
                };

                let items: Vec<ListItem> = labels
                    .iter()
                    .map(|label| ListItem::new(label.as_str()).style(self.theme.list_item))
                    .collect();
                let list = List::new(items)
                    .highlight_style(self.theme.list_selected)
                    .highlight_symbol("> ");

                f.render_widget(Paragraph::new(header), header_area);
                f.render_stateful_widget(list, list_area, &mut list_state);
            })?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match picker.handle_key(key) {
                    PickerOutcome::Pending => {}
                    PickerOutcome::Selected(index) => return Ok(Some(index)),
                    PickerOutcome::Cancelled => return Ok(None),
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select_action(&mut self) -> Result<Option<QuickAction>> {
        let labels: Vec<String> = QuickAction::ALL
            .iter()
            .map(|action| action.label().to_string())
            .collect();
        let choice = self.pick("What do you want to do?", None, &labels)?;
        Ok(choice.and_then(|index| QuickAction::ALL.get(index).copied()))
    }

    fn select_revision(
        &mut self,
        title: &str,
        description: Option<&str>,
        options: &[RevisionOption],
    ) -> Result<Option<usize>> {
        let labels: Vec<String> = options.iter().map(|option| option.label.clone()).collect();
        self.pick(title, description, &labels)
    }
}
