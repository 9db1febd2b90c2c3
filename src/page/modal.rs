//! A centered popup over the current page.
//!
//! Closing it pops the layer, so the page below gets its keys back. The `?`
//! help popup is the same layer filled with the help entries of the page below.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, palette::tailwind},
    text::{Line, Text},
    widgets::{Block, BorderType, Borders, Clear, HighlightSpacing, List, ListItem, ListState, Padding},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    actions::{Action, ActionSender, LayerManageAction},
    app::layer_manager::EventHandlingStatus,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

/// What a modal shows: a title and one list item per line.
#[derive(Clone, Debug, PartialEq)]
pub struct ModalContent {
    pub title: String,
    pub body: Vec<String>,
}

impl ModalContent {
    pub fn new<T: Into<String>>(title: T, body: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body,
        }
    }
}

pub struct Modal {
    content: ModalContent,
    list_state: ListState,
    tx: ActionSender,
}

#[derive(Clone, Debug)]
pub enum ModalAction {
    Up,
    Down,
    Start,
    End,
}
impl From<ModalAction> for Action {
    fn from(value: ModalAction) -> Self {
        Action::Modal(value)
    }
}

impl Modal {
    pub fn new(tx: ActionSender, content: ModalContent) -> Self {
        Self {
            content,
            list_state: ListState::default(),
            tx,
        }
    }

    /// The help popup for `msg`, or `None` when there is nothing to show.
    pub fn help(tx: ActionSender, msg: &HelpMsg) -> Option<Self> {
        if msg.is_empty() {
            return None;
        }
        Some(Self::new(tx, ModalContent::new("Help", msg.lines())))
    }

    pub fn get_self_help_msg() -> HelpMsg {
        vec![
            HelpEntry::new('j', "Go Down"),
            HelpEntry::new('k', "Go Up"),
            HelpEntry::new('g', "Go to Top"),
            HelpEntry::new('G', "Go to Bottom"),
            HelpEntry::new(KeyCode::Esc, "Close"),
        ]
        .into()
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let longest = self
            .content
            .body
            .iter()
            .map(|line| UnicodeWidthStr::width(line.as_str()))
            .chain(std::iter::once(UnicodeWidthStr::width(self.content.title.as_str())))
            .max()
            .unwrap_or_default();
        // border, padding and the highlight symbol
        let width = (longest as u16).saturating_add(10).max(30);
        let height = (self.content.body.len() as u16).saturating_add(4);

        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        area
    }
}

impl EventLoopParticipant for Modal {
    /// Every key stays in the modal, so `q` closes it instead of quitting.
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        let Event::Key(key) = event else {
            return EventHandlingStatus::ShouldPropagate;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.tx.send(LayerManageAction::Pop),
            KeyCode::Char('j') | KeyCode::Down => self.tx.send(ModalAction::Down),
            KeyCode::Char('k') | KeyCode::Up => self.tx.send(ModalAction::Up),
            KeyCode::Char('g') | KeyCode::Home => self.tx.send(ModalAction::Start),
            KeyCode::Char('G') | KeyCode::End => self.tx.send(ModalAction::End),
            _ => {}
        }
        EventHandlingStatus::Consumed
    }

    fn update(&mut self, action: Action) {
        let Action::Modal(action) = action else {
            return;
        };
        match action {
            ModalAction::Up => self.list_state.select_previous(),
            ModalAction::Down => self.list_state.select_next(),
            ModalAction::Start => self.list_state.select_first(),
            ModalAction::End => self.list_state.select_last(),
        }
    }
}

impl Layer for Modal {
    fn get_name(&self) -> &'static str {
        "Modal"
    }

    fn get_help_msg(&self) -> HelpMsg {
        Self::get_self_help_msg()
    }
}

impl WidgetExt for Modal {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [_, bottom_help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
        frame.render_widget(Clear, bottom_help_area);
        Self::get_self_help_msg().render(frame, bottom_help_area);

        let show_area = self.popup_area(area);
        frame.render_widget(Clear, show_area);

        let block = Block::new()
            .title(Line::raw(self.content.title.as_str()).centered())
            .border_type(BorderType::Rounded)
            .borders(Borders::ALL)
            .padding(Padding::new(1, 1, 1, 1));

        let items: Vec<ListItem> = self
            .content
            .body
            .iter()
            .map(|line| ListItem::from(Text::raw(format!(" {line} "))))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::REVERSED)
                    .fg(tailwind::INDIGO.c400),
            )
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(list, show_area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::unbounded_channel;

    use crate::component::test_utils::{buffer_lines, draw};

    use super::*;

    fn content() -> ModalContent {
        ModalContent::new(
            "Greetings",
            vec!["first".into(), "second".into(), "third".into()],
        )
    }

    #[test]
    fn test_help_modal() {
        let (tx, _) = unbounded_channel();
        assert!(Modal::help(tx.clone().into(), &HelpMsg::default()).is_none());

        let modal = Modal::help(tx.into(), &vec![HelpEntry::new('a', "test")].into()).unwrap();
        assert_eq!(modal.content.title, "Help");
        assert_eq!(modal.content.body, vec!["test: a".to_string()]);
        assert_eq!(modal.list_state.selected(), None);
    }

    #[test]
    fn test_navigation() {
        let (tx, mut rx) = unbounded_channel();
        let mut modal = Modal::new(tx.into(), content());
        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();

        let mut test_loop = |key: char, expected: Option<usize>| {
            let _ = modal.event_loop_once(&mut rx, key.into());
            draw(&mut terminal, &mut modal);
            assert_eq!(modal.list_state.selected(), expected);
        };

        test_loop('j', Some(0));
        test_loop('k', Some(0));
        test_loop('G', Some(2));
        test_loop('k', Some(1));
        test_loop('j', Some(2));
        test_loop('g', Some(0));
    }

    #[test]
    fn test_close_keys() {
        let (tx, mut rx) = unbounded_channel();
        let modal = Modal::new(tx.into(), content());

        for key in [Event::from(KeyCode::Esc), Event::from('q')] {
            assert_eq!(modal.handle_events(&key), EventHandlingStatus::Consumed);
            assert!(matches!(
                rx.try_recv(),
                Ok(Action::Layer(LayerManageAction::Pop))
            ));
        }

        // unbound keys are swallowed too
        assert_eq!(
            modal.handle_events(&Event::from('x')),
            EventHandlingStatus::Consumed
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(
            modal.handle_events(&Event::Tick),
            EventHandlingStatus::ShouldPropagate
        );
    }

    #[test]
    fn test_render() {
        let (tx, _rx) = unbounded_channel();
        let mut modal = Modal::new(tx.into(), content());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        draw(&mut terminal, &mut modal);

        let lines = buffer_lines(terminal.backend());
        let title = lines.iter().position(|l| l.contains("Greetings")).unwrap();
        let first = lines.iter().position(|l| l.contains("first")).unwrap();
        let third = lines.iter().position(|l| l.contains("third")).unwrap();
        assert!(title < first && first < third);
        assert!(lines[19].starts_with('╰'));
        assert!(lines[18].contains("Go Down: j"));
    }
}
