use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
};

use crate::{
    actions::{Action, ActionSender},
    app::layer_manager::EventHandlingStatus,
    component::{Component, table::TableComp},
    config::TableConfig,
    libs::dataset::Dataset,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

const TABLE_ID: u64 = 1;

/// A full screen table over the dataset given on the command line.
pub struct Browser {
    table: TableComp,
}

impl Browser {
    pub fn new(tx: ActionSender, dataset: Dataset, table_config: &TableConfig) -> Self {
        Self {
            table: TableComp::from_dataset(TABLE_ID, tx, dataset)
                .title("Dataset")
                .with_config(table_config),
        }
    }
}

impl Layer for Browser {
    fn get_name(&self) -> &'static str {
        "Browser"
    }

    fn get_help_msg(&self) -> HelpMsg {
        let msg = self.table.get_help_msg();
        if self.table.is_searching() {
            return msg;
        }
        msg.extend_ret(
            &vec![
                HelpEntry::new('S', "Showcase"),
                HelpEntry::new('?', "Help"),
                HelpEntry::new('q', "Quit"),
            ]
            .into(),
        )
    }
}

impl EventLoopParticipant for Browser {
    fn handle_events(&self, event: &Event) -> EventHandlingStatus {
        self.table.handle_events(event)
    }

    fn update(&mut self, action: Action) {
        self.table.update(&action);
    }
}

impl WidgetExt for Browser {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [table_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(3)]).areas(area);
        self.table.render(frame, table_area);
        self.get_help_msg().render(frame, help_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::unbounded_channel;

    use crate::{
        component::test_utils::{buffer_lines, draw},
        utils::key_events::test_utils::{get_char_evt, get_key_evt},
    };

    use super::*;

    #[test]
    fn pages_through_generated_rows() {
        let (tx, mut rx) = unbounded_channel();
        let mut browser = Browser::new(
            tx.into(),
            Dataset::generated(40, 7),
            &TableConfig {
                items_per_page_options: vec![10, 20],
                default_items_per_page: 20,
            },
        );
        assert_eq!(browser.table.view().total_pages, 2);

        let _ = browser.event_loop_once(&mut rx, get_key_evt(KeyCode::Right));
        assert_eq!(browser.table.state().current_page, 2);

        let status = browser.event_loop_once(&mut rx, get_char_evt('x'));
        assert_eq!(status, EventHandlingStatus::ShouldPropagate);
    }

    #[test]
    fn help_hides_globals_while_searching() {
        let (tx, mut rx) = unbounded_channel();
        let mut browser = Browser::new(tx.into(), Dataset::people(), &TableConfig::default());
        assert!(browser.get_help_msg().to_string().ends_with("Quit: q"));

        let _ = browser.event_loop_once(&mut rx, get_char_evt('/'));
        assert_eq!(
            browser.get_help_msg().to_string(),
            "quit input: enter | clear input: esc"
        );
    }

    #[test]
    fn render() {
        let (tx, _rx) = unbounded_channel();
        let mut browser = Browser::new(tx.into(), Dataset::generated(12, 3), &TableConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        draw(&mut terminal, &mut browser);
        let screen = buffer_lines(terminal.backend()).join("\n");
        assert!(screen.contains("Dataset (12 rows)"));
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("Showcase: S"));
    }
}
