//! Layers: full pages and popups stacked by the app.
//!
//! A layer draws itself ([`WidgetExt`]), turns events into actions and applies
//! actions ([`EventLoopParticipant`]). Only the top layer receives events and
//! actions; layers below it may still be drawn.

use ratatui::{Frame, layout::Rect};

use crate::{
    actions::Action, app::layer_manager::EventHandlingStatus, tui::Event,
    utils::help_msg::HelpMsg,
};

pub mod browser;
pub mod modal;
pub mod showcase;

pub trait Layer: WidgetExt + EventLoopParticipant {
    /// Called once after the layer is built, before its first event.
    fn init(&mut self) {}

    fn get_name(&self) -> &'static str;

    /// Key hints for the help bar and the `?` popup.
    fn get_help_msg(&self) -> HelpMsg {
        HelpMsg::default()
    }
}

/// Something that can draw itself into an area of the frame.
pub trait WidgetExt {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

pub trait EventLoopParticipant {
    /// Translate an event into actions sent on the action channel.
    ///
    /// Must not change state; that happens in [`EventLoopParticipant::update`].
    #[must_use]
    fn handle_events(&self, event: &Event) -> EventHandlingStatus;

    fn update(&mut self, action: Action);

    /// Handle one event, then apply every action it produced.
    #[cfg(test)]
    fn event_loop_once(
        &mut self,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>,
        event: Event,
    ) -> EventHandlingStatus {
        let status = self.handle_events(&event);
        while let Ok(action) = rx.try_recv() {
            self.update(action);
        }
        status
    }
}
