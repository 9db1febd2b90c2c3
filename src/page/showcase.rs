use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::{
    actions::{Action, ActionSender, LayerManageAction, Layers, TargetLayer},
    app::layer_manager::EventHandlingStatus,
    component::{
        Component,
        button::Button,
        input::{InputComp, InputMode},
        table::TableComp,
    },
    config::TableConfig,
    libs::dataset::Dataset,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt, modal::ModalContent};

const INPUT_ID: u64 = 1;
const TABLE_ID: u64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
enum Focus {
    #[default]
    Input,
    Table,
}

/// Every component on one page: a button opening a modal, a free text input
/// and the people table.
pub struct Showcase {
    focus: Focus,
    open_modal: Button,
    input: InputComp,
    table: TableComp,
    /// The last value submitted from the input.
    submitted: Option<String>,

    tx: ActionSender,
}

#[derive(Clone, Debug)]
pub enum ShowcaseAction {
    CycleFocus,
}
impl From<ShowcaseAction> for Action {
    fn from(value: ShowcaseAction) -> Self {
        Action::Showcase(value)
    }
}

impl Showcase {
    pub fn new(tx: ActionSender, table_config: &TableConfig) -> Self {
        Self {
            focus: Focus::default(),
            open_modal: Button::new("Open Modal").hotkey('o'),
            input: InputComp::new(
                INPUT_ID,
                None::<&str>,
                "Input",
                Default::default(),
                tx.clone(),
            ),
            table: TableComp::from_dataset(TABLE_ID, tx.clone(), Dataset::people())
                .title("People")
                .with_config(table_config),
            submitted: None,
            tx,
        }
    }

    fn modal_content() -> ModalContent {
        ModalContent::new("Modal", vec!["Modal text".into()])
    }

    fn send_focus(&self) {
        let (input_mode, table_focused) = match self.focus {
            Focus::Input => (InputMode::Focused, false),
            Focus::Table => (InputMode::Idle, true),
        };
        self.tx.send(self.input.get_switch_mode_action(input_mode));
        self.tx.send(self.table.get_focus_action(table_focused));
    }

    fn focused_help_msg(&self) -> HelpMsg {
        match self.focus {
            Focus::Input => self.input.get_help_msg(),
            Focus::Table => self.table.get_help_msg(),
        }
    }
}

impl Layer for Showcase {
    fn init(&mut self) {
        self.send_focus();
    }

    fn get_name(&self) -> &'static str {
        "Showcase"
    }

    fn get_help_msg(&self) -> HelpMsg {
        let mut msg = self.focused_help_msg();
        if *self.input.mode() == InputMode::Inputting || self.table.is_searching() {
            return msg;
        }
        msg.extend(
            &vec![
                HelpEntry::new(KeyCode::Tab, "Next focus"),
                HelpEntry::new('o', "Open modal"),
                HelpEntry::new('B', "Browser"),
                HelpEntry::new('?', "Help"),
                HelpEntry::new('q', "Quit"),
            ]
            .into(),
        );
        msg
    }
}

impl EventLoopParticipant for Showcase {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        let status = match self.focus {
            Focus::Input => self.input.handle_events(event),
            Focus::Table => self.table.handle_events(event),
        };
        if status == EventHandlingStatus::Consumed {
            return status;
        }

        if self.open_modal.is_pressed(event) {
            self.tx.send(LayerManageAction::Push(TargetLayer::popup(
                Layers::Modal(Self::modal_content()),
            )));
            return EventHandlingStatus::Consumed;
        }
        match event {
            Event::Key(key) if key.code == KeyCode::Tab => {
                self.tx.send(ShowcaseAction::CycleFocus);
                EventHandlingStatus::Consumed
            }
            _ => EventHandlingStatus::ShouldPropagate,
        }
    }

    fn update(&mut self, action: Action) {
        if let Action::Showcase(ShowcaseAction::CycleFocus) = action {
            self.focus = match self.focus {
                Focus::Input => Focus::Table,
                Focus::Table => Focus::Input,
            };
            self.send_focus();
            return;
        }
        if let Some(text) = self.input.parse_submit_action(&action) {
            self.submitted = Some(text);
        }
        self.input.update(&action);
        self.table.update(&action);
    }
}

impl WidgetExt for Showcase {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [heading_area, controls_area, status_area, table_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .areas(area);

        let heading = Paragraph::new("Hello World")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Cyan))
            .bold()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );
        frame.render_widget(heading, heading_area);

        let [button_area, input_area] =
            Layout::horizontal([Constraint::Length(20), Constraint::Fill(1)]).areas(controls_area);
        self.open_modal.render(frame, button_area);
        self.input.render(frame, input_area);

        let status = match &self.submitted {
            Some(text) => format!(" Submitted: {text}"),
            None => " Nothing submitted yet".to_string(),
        };
        frame.render_widget(Paragraph::new(status).dim(), status_area);

        self.table.render(frame, table_area);
        self.get_help_msg().render(frame, help_area);
    }
}
