use super::action::Action;
use super::state::AppMode;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KeyConfig {
    pub profile: String,
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "vim".to_string(),
            custom: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    pub global: HashMap<KeyEvent, Action>,
    pub diff_mode: HashMap<KeyEvent, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_config(&KeyConfig::default())
    }
}

impl KeyMap {
    #[must_use]
    pub fn from_config(config: &KeyConfig) -> Self {
        if config.profile != "vim" {
            log::warn!("unknown key profile '{}', using vim", config.profile);
        }
        let mut map = Self::vim();

        if let Some(custom) = &config.custom {
            // Sorted so that conflicting entries resolve the same way every run
            let mut entries: Vec<_> = custom.iter().collect();
            entries.sort();
            for (key_str, action_name) in entries {
                match (parse_key(key_str), Action::from_name(action_name)) {
                    (Some(event), Some(action)) => {
                        map.global.insert(event, action);
                    }
                    (None, _) => log::warn!("ignoring binding for unknown key '{key_str}'"),
                    (_, None) => log::warn!("ignoring binding to unknown action '{action_name}'"),
                }
            }
        }
        map
    }

    fn vim() -> Self {
        let mut global = HashMap::new();
        let mut diff_mode = HashMap::new();

        // --- Global / Normal Mode ---
        global.insert(key('q'), Action::Quit);
        global.insert(ctrl('c'), Action::Quit);
        global.insert(key(KeyCode::Esc), Action::CancelMode);
        global.insert(key('?'), Action::ToggleHelp);

        global.insert(key('j'), Action::SelectNext);
        global.insert(key(KeyCode::Down), Action::SelectNext);
        global.insert(key('k'), Action::SelectPrev);
        global.insert(key(KeyCode::Up), Action::SelectPrev);
        global.insert(key('g'), Action::SelectFirst);
        global.insert(key(KeyCode::Home), Action::SelectFirst);
        global.insert(key('G'), Action::SelectLast);
        global.insert(key(KeyCode::End), Action::SelectLast);
        global.insert(key(KeyCode::PageDown), Action::PageDown);
        global.insert(key(KeyCode::PageUp), Action::PageUp);

        global.insert(key(KeyCode::Enter), Action::ToggleDiffs);
        global.insert(key(KeyCode::Tab), Action::FocusDiff);
        global.insert(key('l'), Action::FocusDiff);
        global.insert(key('h'), Action::FocusGraph);
        global.insert(key('['), Action::PrevHunk);
        global.insert(key(']'), Action::NextHunk);
        global.insert(key('v'), Action::ToggleGraphStyle);

        global.insert(key('m'), Action::JumpToNearestBookmark);
        global.insert(key('B'), Action::OpenBookmarkPicker);
        global.insert(key('t'), Action::EditTrunkTarget);

        global.insert(key('e'), Action::EditRevision(None));
        global.insert(key('r'), Action::RebaseRevisionIntent);
        global.insert(key('d'), Action::DescribeRevisionIntent);
        global.insert(key('a'), Action::AbandonRevision(None));
        global.insert(key('s'), Action::SquashRevision(None));
        global.insert(key('n'), Action::NewRevision(None));
        global.insert(key('b'), Action::SetBookmarkIntent);
        global.insert(key('D'), Action::DeleteBookmarkIntent);
        global.insert(key('u'), Action::Undo);
        global.insert(key('S'), Action::SnapshotWorkingCopy);
        global.insert(key('o'), Action::OpenOperationLog);
        global.insert(key('w'), Action::OpenWorkspaces);

        // --- Diff Mode Overrides ---
        diff_mode.insert(key('h'), Action::FocusGraph);
        diff_mode.insert(key(KeyCode::Tab), Action::FocusGraph);
        diff_mode.insert(key(KeyCode::BackTab), Action::FocusGraph);
        diff_mode.insert(key('j'), Action::SelectNextFile);
        diff_mode.insert(key(KeyCode::Down), Action::SelectNextFile);
        diff_mode.insert(key('k'), Action::SelectPrevFile);
        diff_mode.insert(key(KeyCode::Up), Action::SelectPrevFile);
        diff_mode.insert(key(KeyCode::PageDown), Action::ScrollDiffDown(10));
        diff_mode.insert(key(KeyCode::PageUp), Action::ScrollDiffUp(10));
        diff_mode.insert(key('x'), Action::RestoreSelectedFile);

        Self { global, diff_mode }
    }

    #[must_use]
    pub fn get_action(&self, event: KeyEvent, mode: AppMode) -> Option<Action> {
        let event = normalize(event);
        if mode == AppMode::Diff {
            if let Some(action) = self.diff_mode.get(&event) {
                return Some(action.clone());
            }
        }
        self.global.get(&event).cloned()
    }
}

fn key(code: impl Into<KeyCode>) -> KeyEvent {
    KeyEvent::new(code.into(), KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Drops kind/state and the shift modifier on keys whose code already
/// encodes it, so lookups match regardless of terminal quirks.
fn normalize(event: KeyEvent) -> KeyEvent {
    let mut modifiers =
        event.modifiers & (KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT);
    if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    KeyEvent::new(event.code, modifiers)
}

/// Parses key strings like `"x"`, `"G"`, `"ctrl+r"`, `"shift+tab"` or
/// `"pgdn"` into the normalized event the keymap is keyed by.
#[must_use]
pub fn parse_key(s: &str) -> Option<KeyEvent> {
    let mut modifiers = KeyModifiers::empty();
    let mut parts: Vec<&str> = s.split('+').collect();
    // "+" itself, or a binding ending in "++"
    if s.ends_with("++") || s == "+" {
        parts.retain(|p| !p.is_empty());
        parts.push("+");
    }
    let (key_part, mod_parts) = parts.split_last()?;

    for m in mod_parts {
        match m.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.insert(KeyModifiers::CONTROL),
            "alt" | "meta" => modifiers.insert(KeyModifiers::ALT),
            "shift" => modifiers.insert(KeyModifiers::SHIFT),
            _ => return None,
        }
    }

    let mut chars = key_part.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                KeyCode::Char(c.to_ascii_uppercase())
            } else {
                KeyCode::Char(c)
            }
        }
        _ => match key_part.to_ascii_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdn" | "pagedown" => KeyCode::PageDown,
            other => {
                let n: u8 = other.strip_prefix('f')?.parse().ok()?;
                if !(1..=12).contains(&n) {
                    return None;
                }
                KeyCode::F(n)
            }
        },
    };
    Some(normalize(KeyEvent::new(code, modifiers)))
}
