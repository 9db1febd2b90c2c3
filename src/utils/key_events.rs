use std::{borrow::Cow, ops::Deref};

use crossterm::event::{KeyCode, KeyEvent as CrosstermKeyEvent, KeyModifiers};

/// Human readable form of a key press, e.g. `ctrl-c`, `enter`, `shift-left`.
pub fn key_event_to_string(key_event: &CrosstermKeyEvent) -> String {
    let code: Cow<'static, str> = match key_event.code {
        KeyCode::Backspace => "backspace".into(),
        KeyCode::Enter => "enter".into(),
        KeyCode::Left => "left".into(),
        KeyCode::Right => "right".into(),
        KeyCode::Up => "up".into(),
        KeyCode::Down => "down".into(),
        KeyCode::Home => "home".into(),
        KeyCode::End => "end".into(),
        KeyCode::PageUp => "pageup".into(),
        KeyCode::PageDown => "pagedown".into(),
        KeyCode::Tab => "tab".into(),
        KeyCode::BackTab => "backtab".into(),
        KeyCode::Delete => "delete".into(),
        KeyCode::Insert => "insert".into(),
        KeyCode::Esc => "esc".into(),
        KeyCode::F(n) => format!("f{n}").into(),
        KeyCode::Char(' ') => "space".into(),
        KeyCode::Char(c) => c.to_string().into(),
        _ => "".into(),
    };

    let mut parts: Vec<&str> = [
        (KeyModifiers::CONTROL, "ctrl"),
        (KeyModifiers::SHIFT, "shift"),
        (KeyModifiers::ALT, "alt"),
    ]
    .into_iter()
    .filter(|(modifier, _)| key_event.modifiers.intersects(*modifier))
    .map(|(_, name)| name)
    .collect();
    parts.push(&code);
    parts.join("-")
}

/// A key press that can be compared against control keys and shown in help.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent(pub CrosstermKeyEvent);

impl KeyEvent {
    pub fn ctrl(c: char) -> Self {
        Self(CrosstermKeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        ))
    }

    /// Same key, ignoring the `kind` and `state` fields that terminals fill differently.
    pub fn is(&self, other: &CrosstermKeyEvent) -> bool {
        self.0.code == other.code && self.0.modifiers == other.modifiers
    }
}

impl From<CrosstermKeyEvent> for KeyEvent {
    fn from(key_event: CrosstermKeyEvent) -> Self {
        Self(key_event)
    }
}
impl From<KeyCode> for KeyEvent {
    fn from(key_code: KeyCode) -> Self {
        Self(CrosstermKeyEvent::new(key_code, KeyModifiers::NONE))
    }
}
impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self(CrosstermKeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }
}
impl From<KeyEvent> for CrosstermKeyEvent {
    fn from(val: KeyEvent) -> Self {
        val.0
    }
}
impl Deref for KeyEvent {
    type Target = CrosstermKeyEvent;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl std::fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&key_event_to_string(self))
    }
}

#[cfg(test)]
pub mod test_utils {
    use crate::tui::Event;

    use super::*;

    pub fn get_key_evt(key: KeyCode) -> Event {
        Event::Key(CrosstermKeyEvent::new(key, KeyModifiers::NONE))
    }
    pub fn get_char_evt(key: char) -> Event {
        get_key_evt(KeyCode::Char(key))
    }
    pub fn get_ctrl_evt(key: char) -> Event {
        Event::Key(KeyEvent::ctrl(key).0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_strings() {
        assert_eq!(KeyEvent::from('q').to_string(), "q");
        assert_eq!(KeyEvent::from(' ').to_string(), "space");
        assert_eq!(KeyEvent::from(KeyCode::Esc).to_string(), "esc");
        assert_eq!(KeyEvent::from(KeyCode::F(5)).to_string(), "f5");
        assert_eq!(KeyEvent::ctrl('c').to_string(), "ctrl-c");
        assert_eq!(
            KeyEvent(CrosstermKeyEvent::new(
                KeyCode::Left,
                KeyModifiers::SHIFT | KeyModifiers::ALT
            ))
            .to_string(),
            "shift-alt-left"
        );
    }

    #[test]
    fn is_ignores_kind() {
        let mut pressed = CrosstermKeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        pressed.kind = crossterm::event::KeyEventKind::Repeat;
        assert!(KeyEvent::from(KeyCode::Enter).is(&pressed));
        assert!(!KeyEvent::ctrl('c').is(&pressed));
    }
}
