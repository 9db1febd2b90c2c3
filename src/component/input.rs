use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

use crate::{
    actions::{Action, ActionSender, CompAction},
    app::layer_manager::EventHandlingStatus,
    page::WidgetExt,
    tui::Event,
    utils::{
        help_msg::{HelpEntry, HelpMsg},
        key_events::KeyEvent,
    },
};

/// A single line text input.
///
/// Focus it by sending [`InputComp::get_switch_mode_action`]; once focused, one
/// of its enter keys starts editing. Read the value back by passing every action
/// through [`InputComp::parse_submit_action`].
#[derive(Clone, Debug)]
pub struct InputComp {
    id: u64,
    input: Input,
    mode: InputMode,

    title: String,

    /// Submit on every edit instead of only on a submit key.
    auto_submit: bool,
    control_keys: InputCompCtrlKeys,

    tx: ActionSender,
}

#[derive(Default, Clone, Debug, PartialEq)]
pub enum InputMode {
    #[default]
    Idle,
    /// Highlighted; an enter key starts editing.
    Focused,
    /// Editing. Takes every key until submit or exit.
    Inputting,
}

#[derive(Clone, Debug)]
pub struct InputCompCtrlKeys {
    enter_keys: Vec<KeyEvent>,
    submit_keys: Vec<KeyEvent>,
    exit_keys: Vec<KeyEvent>,
}

impl Default for InputCompCtrlKeys {
    fn default() -> Self {
        Self {
            enter_keys: vec![KeyCode::Enter.into()],
            submit_keys: vec![KeyCode::Enter.into()],
            exit_keys: vec![KeyCode::Esc.into()],
        }
    }
}

impl InputCompCtrlKeys {
    pub fn with_enter_keys(mut self, enter_keys: Vec<KeyEvent>) -> Self {
        self.enter_keys = enter_keys;
        self
    }
    pub fn with_submit_keys(mut self, submit_keys: Vec<KeyEvent>) -> Self {
        self.submit_keys = submit_keys;
        self
    }
    pub fn with_exit_keys(mut self, exit_keys: Vec<KeyEvent>) -> Self {
        self.exit_keys = exit_keys;
        self
    }

    fn matches(keys: &[KeyEvent], key: &crossterm::event::KeyEvent) -> bool {
        keys.iter().any(|k| k.is(key))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
    SwitchMode(InputMode),
    HandleKey(KeyEvent),
    HandlePaste(String),
    /// Leave editing without submitting; the value is cleared.
    DirectExit,
    SubmitExit(String),
    Exit,

    /// The value the owner should pick up.
    Submit(String),
}

impl InputComp {
    pub fn new<T: Into<String>, K: Into<String>>(
        id: u64,
        from: Option<T>,
        title: K,
        ctrl_keys: InputCompCtrlKeys,
        tx: ActionSender,
    ) -> Self {
        Self {
            id,
            input: from.map(|s| Input::new(s.into())).unwrap_or_default(),
            mode: InputMode::default(),
            title: title.into(),
            auto_submit: false,
            control_keys: ctrl_keys,
            tx,
        }
    }

    pub fn set_auto_submit(self, b: bool) -> Self {
        Self {
            auto_submit: b,
            ..self
        }
    }

    /// Start in `mode` instead of [`InputMode::Idle`].
    pub fn with_mode(self, mode: InputMode) -> Self {
        Self { mode, ..self }
    }

    pub fn get_switch_mode_action(&self, mode: InputMode) -> Action {
        self.get_action(InputAction::SwitchMode(mode))
    }

    pub fn parse_submit_action(&self, action: &Action) -> Option<String> {
        match self.unwrap_action(action) {
            Some(InputAction::Submit(s)) => Some(s),
            _ => None,
        }
    }

    pub fn mode(&self) -> &InputMode {
        &self.mode
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    fn get_action(&self, action: InputAction) -> Action {
        Action::Comp((CompAction::Input(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<InputAction> {
        match action {
            Action::Comp((CompAction::Input(action), id)) if *id == self.id => Some(action.clone()),
            _ => None,
        }
    }

    fn send(&self, action: InputAction) {
        self.tx.send(self.get_action(action));
    }

    fn submit_if_auto(&self) {
        if self.auto_submit {
            self.send(InputAction::Submit(self.input.value().to_string()));
        }
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let keys = &self.control_keys;
        let entry = |keys: &Vec<KeyEvent>, desc: &str| {
            keys.first().map(|key| HelpEntry::new(key.clone(), desc))
        };
        let entries = match self.mode {
            InputMode::Idle => vec![],
            InputMode::Focused => vec![entry(&keys.enter_keys, "Start input")],
            InputMode::Inputting if self.auto_submit => vec![
                entry(&keys.submit_keys, "quit input"),
                entry(&keys.exit_keys, "clear input"),
            ],
            InputMode::Inputting => vec![
                entry(&keys.exit_keys, "quit input"),
                entry(&keys.submit_keys, "submit input"),
            ],
        };
        entries.into_iter().flatten().collect::<Vec<_>>().into()
    }
}

impl super::Component for InputComp {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        let keys = &self.control_keys;
        match (&self.mode, event) {
            (InputMode::Idle, _) => EventHandlingStatus::ShouldPropagate,
            (InputMode::Focused, Event::Key(key))
                if InputCompCtrlKeys::matches(&keys.enter_keys, key) =>
            {
                self.send(InputAction::SwitchMode(InputMode::Inputting));
                EventHandlingStatus::Consumed
            }
            (InputMode::Focused, _) => EventHandlingStatus::ShouldPropagate,
            (InputMode::Inputting, Event::Key(key)) => {
                if InputCompCtrlKeys::matches(&keys.submit_keys, key) {
                    self.send(InputAction::SubmitExit(self.input.value().to_string()));
                } else if InputCompCtrlKeys::matches(&keys.exit_keys, key) {
                    self.send(InputAction::DirectExit);
                } else {
                    self.send(InputAction::HandleKey((*key).into()));
                }
                EventHandlingStatus::Consumed
            }
            (InputMode::Inputting, Event::Paste(s)) => {
                self.send(InputAction::HandlePaste(s.clone()));
                EventHandlingStatus::Consumed
            }
            (InputMode::Inputting, _) => EventHandlingStatus::ShouldPropagate,
        }
    }

    fn update(&mut self, action: &Action) {
        let Some(action) = self.unwrap_action(action) else {
            return;
        };

        match action {
            InputAction::SwitchMode(mode) => {
                let was_inputting = self.mode == InputMode::Inputting;
                let is_inputting = mode == InputMode::Inputting;
                self.mode = mode;
                if was_inputting != is_inputting {
                    self.tx.send(Action::SwitchInputMode(is_inputting));
                }
            }
            InputAction::HandleKey(key_event) => {
                self.input
                    .handle_event(&crossterm::event::Event::Key(key_event.into()));
                self.submit_if_auto();
            }
            InputAction::HandlePaste(string) => {
                string.chars().for_each(|c| {
                    self.input.handle(InputRequest::InsertChar(c));
                });
                self.submit_if_auto();
            }
            InputAction::SubmitExit(string) => {
                self.send(InputAction::Submit(string));
                self.send(InputAction::Exit);
            }
            InputAction::DirectExit => {
                self.input.reset();
                self.submit_if_auto();
                self.send(InputAction::Exit);
            }
            InputAction::Exit => {
                if self.mode == InputMode::Inputting {
                    self.mode = InputMode::Focused;
                    self.tx.send(Action::SwitchInputMode(false));
                }
            }
            InputAction::Submit(_) => {}
        }
    }
}

impl WidgetExt for InputComp {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = area.width.max(3) - 3;
        let scroll = self.input.visual_scroll(width as usize);
        let style = match self.mode {
            InputMode::Inputting => Color::Yellow.into(),
            InputMode::Focused => Color::Cyan.into(),
            InputMode::Idle => Style::default(),
        };

        let input_widget = Paragraph::new(self.input.value())
            .style(style)
            .scroll((0, scroll as u16))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(self.title.as_str()),
            );
        frame.render_widget(input_widget, area);

        if self.mode == InputMode::Inputting {
            // past the end of the text, one line below the top border
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((area.x + x as u16, area.y + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use crate::{
        component::{
            Component,
            test_utils::{buffer_lines, draw, event_loop_once},
        },
        utils::key_events::test_utils::{get_char_evt, get_key_evt},
    };

    use super::*;

    fn get_input(auto_submit: bool) -> (InputComp, UnboundedReceiver<Action>) {
        let (tx, rx) = unbounded_channel();
        let input = InputComp::new(1, None::<&str>, "Input Test", Default::default(), tx.into())
            .set_auto_submit(auto_submit)
            .with_mode(InputMode::Focused);
        (input, rx)
    }

    /// Run `events` through the input, returning the last submitted value.
    fn feed(
        input: &mut InputComp,
        rx: &mut UnboundedReceiver<Action>,
        events: impl IntoIterator<Item = Event>,
    ) -> Option<String> {
        let mut submitted = None;
        for event in events {
            let (_, actions) = event_loop_once(input, rx, event);
            for action in actions {
                if let Some(s) = input.parse_submit_action(&action) {
                    submitted = Some(s);
                }
            }
        }
        submitted
    }

    #[test]
    fn test_input() {
        let (mut input, mut rx) = get_input(false);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_char_evt('b'),
            get_key_evt(KeyCode::Enter),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("ab".into()));
        assert_eq!(input.mode(), &InputMode::Focused);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_key_evt(KeyCode::Left),
            get_char_evt('c'),
            get_key_evt(KeyCode::Enter),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("acb".into()));
    }

    #[test]
    fn test_input_auto_submit() {
        let (mut input, mut rx) = get_input(true);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_char_evt('b'),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("ab".into()));

        let seq = [get_key_evt(KeyCode::Left), get_char_evt('c')];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("acb".into()));
        assert_eq!(input.mode(), &InputMode::Inputting);
    }

    #[test]
    fn test_input_paste() {
        let (mut input, mut rx) = get_input(false);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_char_evt('b'),
            get_key_evt(KeyCode::Left),
            Event::Paste("ccc".into()),
            get_key_evt(KeyCode::Enter),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("acccb".into()));
    }

    #[test]
    fn test_input_quit() {
        let (mut input, mut rx) = get_input(false);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_char_evt('b'),
            get_key_evt(KeyCode::Esc),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), None);
        assert_eq!(input.value(), "");
        assert_eq!(input.mode(), &InputMode::Focused);
    }

    #[test]
    fn test_input_quit_auto_submit_clears() {
        let (mut input, mut rx) = get_input(true);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_key_evt(KeyCode::Esc),
        ];
        assert_eq!(feed(&mut input, &mut rx, seq), Some("".into()));
    }

    #[test]
    fn test_input_mode_is_announced() {
        let (mut input, mut rx) = get_input(false);

        let (status, actions) = event_loop_once(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert_eq!(status, EventHandlingStatus::Consumed);
        assert!(
            actions
                .iter()
                .any(|a| matches!(a, Action::SwitchInputMode(true)))
        );

        let (_, actions) = event_loop_once(&mut input, &mut rx, get_key_evt(KeyCode::Esc));
        assert!(
            actions
                .iter()
                .any(|a| matches!(a, Action::SwitchInputMode(false)))
        );
    }

    #[test]
    fn test_idle_ignores_keys() {
        let (tx, mut rx) = unbounded_channel();
        let mut input = InputComp::new(1, Some("x"), "Idle", Default::default(), tx.into());
        let (status, actions) = event_loop_once(&mut input, &mut rx, get_key_evt(KeyCode::Enter));
        assert_eq!(status, EventHandlingStatus::ShouldPropagate);
        assert!(actions.is_empty());
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn test_actions_for_other_ids_are_ignored() {
        let (mut input, _rx) = get_input(false);
        input.update(&Action::Comp((
            CompAction::Input(InputAction::SwitchMode(InputMode::Idle)),
            2,
        )));
        assert_eq!(input.mode(), &InputMode::Focused);
    }

    fn get_buffer_color(t: &Terminal<TestBackend>) -> Color {
        let cell = t
            .backend()
            .buffer()
            .content()
            .iter()
            .find(|&c| c.symbol() == "I")
            .unwrap();

        cell.fg
    }

    #[test]
    fn test_render() {
        let (mut input, mut rx) = get_input(false);
        input.update(&input.get_switch_mode_action(InputMode::Idle));
        let mut terminal = Terminal::new(TestBackend::new(40, 3)).unwrap();
        draw(&mut terminal, &mut input);
        assert_eq!(get_buffer_color(&terminal), Color::Reset);

        input.update(&input.get_switch_mode_action(InputMode::Focused));
        draw(&mut terminal, &mut input);
        assert_eq!(get_buffer_color(&terminal), Color::Cyan);

        let seq = [
            get_key_evt(KeyCode::Enter),
            get_char_evt('a'),
            get_char_evt('b'),
        ];
        feed(&mut input, &mut rx, seq);
        draw(&mut terminal, &mut input);
        assert_eq!(get_buffer_color(&terminal), Color::Yellow);
        let lines = buffer_lines(terminal.backend());
        assert!(lines[1].starts_with("│ab "));

        feed(&mut input, &mut rx, [get_key_evt(KeyCode::Enter)]);
        draw(&mut terminal, &mut input);
        assert_eq!(get_buffer_color(&terminal), Color::Cyan);
    }

    #[test]
    fn test_help_msg() {
        let (mut input, mut rx) = get_input(false);
        assert_eq!(input.get_help_msg().to_string(), "Start input: enter");
        feed(&mut input, &mut rx, [get_key_evt(KeyCode::Enter)]);
        assert_eq!(
            input.get_help_msg().to_string(),
            "quit input: esc | submit input: enter"
        );
        input.update(&input.get_switch_mode_action(InputMode::Idle));
        assert_eq!(input.get_help_msg().to_string(), "");
    }

    #[test]
    fn test_help_msg_auto_submit() {
        let (mut input, mut rx) = get_input(true);
        feed(&mut input, &mut rx, [get_key_evt(KeyCode::Enter)]);
        assert_eq!(
            input.get_help_msg().to_string(),
            "quit input: enter | clear input: esc"
        );
    }
}
