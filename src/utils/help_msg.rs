use std::ops::Deref;

use ratatui::{
    Frame,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
};

use super::key_events::KeyEvent;

#[derive(Debug, Clone, PartialEq)]
enum HelpKey {
    Key(KeyEvent),
    Plain(String),
}

/// One key hint, shown as `desc: key`.
#[derive(Debug, Clone, PartialEq)]
pub struct HelpEntry {
    key: HelpKey,
    desc: String,
}

impl HelpEntry {
    pub fn new<T: Into<String>, K: Into<KeyEvent>>(event: K, desc: T) -> Self {
        Self {
            key: HelpKey::Key(event.into()),
            desc: desc.into(),
        }
    }

    /// An entry whose key is free text, for ranges like `1-9`.
    pub fn new_plain<K: Into<String>, T: Into<String>>(keys: K, desc: T) -> Self {
        Self {
            key: HelpKey::Plain(keys.into()),
            desc: desc.into(),
        }
    }

    pub fn key(&self) -> String {
        match &self.key {
            HelpKey::Key(key) => key.to_string(),
            HelpKey::Plain(key) => key.clone(),
        }
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }
}

impl std::fmt::Display for HelpEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.desc(), self.key())
    }
}

/// The key hints of a layer, rendered as a one line bar.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct HelpMsg {
    entries: Vec<HelpEntry>,
}

impl From<Vec<HelpEntry>> for HelpMsg {
    fn from(entries: Vec<HelpEntry>) -> Self {
        Self { entries }
    }
}

impl HelpMsg {
    pub fn push(&mut self, entry: HelpEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, other: &HelpMsg) {
        self.entries.extend(other.entries.iter().cloned());
    }

    pub fn extend_ret(mut self, other: &HelpMsg) -> Self {
        self.extend(other);
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.to_string())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(paragraph, area);
    }
}

impl Deref for HelpMsg {
    type Target = [HelpEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl std::fmt::Display for HelpMsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join(" | "))
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::KeyCode;

    use super::*;

    #[test]
    fn test_help_entry_key() {
        let entry = HelpEntry::new('p', "Page size");
        assert_eq!(entry.key(), "p");
        assert_eq!(entry.desc(), "Page size");
        assert_eq!(entry.to_string(), "Page size: p");
    }

    #[test]
    fn test_help_entry_plain() {
        let entry = HelpEntry::new_plain("1-9", "Sort by column");
        assert_eq!(entry.key(), "1-9");
        assert_eq!(entry.to_string(), "Sort by column: 1-9");
    }

    #[test]
    fn test_help_msg_join() {
        let msg: HelpMsg = vec![HelpEntry::new('/', "Search")].into();
        let msg = msg.extend_ret(&vec![HelpEntry::new(KeyCode::Esc, "Close")].into());
        assert_eq!(msg.len(), 2);
        insta::assert_snapshot!(msg.to_string(), @"Search: / | Close: esc");
        assert_eq!(HelpMsg::default().to_string(), "");
    }
}
