use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{page::WidgetExt, tui::Event, utils::key_events::KeyEvent};

/// A labelled button, optionally pressed with a hotkey.
///
/// Disabled buttons are drawn dimmed and never report a press.
#[derive(Clone, Debug)]
pub struct Button {
    label: String,
    hotkey: Option<KeyEvent>,
    disabled: bool,
}

impl Button {
    pub fn new<T: Into<String>>(label: T) -> Self {
        Self {
            label: label.into(),
            hotkey: None,
            disabled: false,
        }
    }

    pub fn hotkey<K: Into<KeyEvent>>(mut self, key: K) -> Self {
        self.hotkey = Some(key.into());
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_pressed(&self, event: &Event) -> bool {
        match (&self.hotkey, event) {
            (Some(hotkey), Event::Key(key)) => !self.disabled && hotkey.is(key),
            _ => false,
        }
    }

    pub fn text(&self) -> String {
        match &self.hotkey {
            Some(key) => format!("{} ({})", self.label, key),
            None => self.label.clone(),
        }
    }
}

impl WidgetExt for Button {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Cyan).bold()
        };
        let button = Paragraph::new(self.text())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        frame.render_widget(button, area);
    }
}
