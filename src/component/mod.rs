//! Reusable widgets.
//!
//! [`button::Button`] is purely presentational. Stateful components implement
//! [`Component`]: they are addressed by id through [`Action::Comp`], so several
//! instances can live on the same page.

pub mod button;
pub mod input;
pub mod table;

use crate::{actions::Action, app::layer_manager::EventHandlingStatus, page::WidgetExt, tui::Event};

pub trait Component: WidgetExt {
    fn get_id(&self) -> u64;

    /// Turn an event into actions for this component.
    #[must_use]
    fn handle_events(&self, event: &Event) -> EventHandlingStatus;

    /// Apply an action; actions addressed to other components are ignored.
    fn update(&mut self, action: &Action);
}

#[cfg(test)]
pub(crate) mod test_utils {
    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc::UnboundedReceiver;

    use super::*;

    /// Feed one event to `comp` and apply every action that follows from it.
    ///
    /// Returns the status of the event and the actions that were applied.
    pub fn event_loop_once<C: Component>(
        comp: &mut C,
        rx: &mut UnboundedReceiver<Action>,
        event: Event,
    ) -> (EventHandlingStatus, Vec<Action>) {
        let status = comp.handle_events(&event);
        let mut seen = Vec::new();
        while let Ok(action) = rx.try_recv() {
            comp.update(&action);
            seen.push(action);
        }
        (status, seen)
    }

    pub fn draw<W: WidgetExt>(terminal: &mut Terminal<TestBackend>, widget: &mut W) {
        terminal
            .draw(|frame| {
                let area = frame.area();
                widget.render(frame, area);
            })
            .unwrap();
    }

    /// The test terminal's content, one string per line.
    pub fn buffer_lines(backend: &TestBackend) -> Vec<String> {
        let buffer = backend.buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|cells| cells.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }
}
