use crossterm::event::KeyEvent;
use tui_textarea::{CursorMove, TextArea};

/// Contents of the description or bookmark prompt.
///
/// State is cloned and compared in tests, so equality goes through the typed
/// lines and cursor rather than the widget's styling.
#[derive(Default)]
pub struct InputState<'a> {
    text_area: TextArea<'a>,
}

impl<'a> InputState<'a> {
    /// Prompt prefilled with `text`, cursor at the end.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut text_area = TextArea::default();
        text_area.insert_str(text);
        Self { text_area }
    }

    #[must_use]
    pub fn text_area(&self) -> &TextArea<'a> {
        &self.text_area
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.text_area.input(key);
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.text_area.lines()
    }

    /// Multi-line text, as a description.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Everything typed with line breaks dropped, as a bookmark name.
    #[must_use]
    pub fn single_line(&self) -> String {
        self.lines().concat().trim().to_string()
    }
}

impl Clone for InputState<'_> {
    fn clone(&self) -> Self {
        let mut text_area = TextArea::new(self.lines().to_vec());
        let (row, col) = self.text_area.cursor();
        text_area.move_cursor(CursorMove::Jump(
            u16::try_from(row).unwrap_or(u16::MAX),
            u16::try_from(col).unwrap_or(u16::MAX),
        ));
        Self { text_area }
    }
}

impl std::fmt::Debug for InputState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputState")
            .field("lines", &self.lines())
            .field("cursor", &self.text_area.cursor())
            .finish()
    }
}

impl PartialEq for InputState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.lines() == other.lines() && self.text_area.cursor() == other.text_area.cursor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_prefill_and_typing() {
        let mut input = InputState::with_text("Fix parser");
        input.handle_key(KeyEvent::new(KeyCode::Char('!'), KeyModifiers::empty()));
        assert_eq!(input.text(), "Fix parser!");

        let copy = input.clone();
        assert_eq!(copy, input);
    }

    #[test]
    fn test_single_line_joins_and_trims() {
        let input = InputState::with_text(" feat\nure ");
        assert_eq!(input.lines().len(), 2);
        assert_eq!(input.single_line(), "feature");
    }
}
