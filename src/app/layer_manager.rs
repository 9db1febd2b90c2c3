use color_eyre::{
    Result,
    eyre::{OptionExt, eyre},
};
use ratatui::Frame;
use tracing::info;

use crate::{
    actions::{Action, LayerManageAction, Layers},
    page::{
        EventLoopParticipant, Layer, WidgetExt, browser::Browser, modal::Modal,
        showcase::Showcase,
    },
    tui::Event,
};

use super::RootState;

/// Whether a handler used the event or left it for the next one in line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventHandlingStatus {
    Consumed,
    ShouldPropagate,
}

pub(super) struct LayerConfig {
    layer: Box<dyn Layer>,
    render: bool,
}

impl LayerConfig {
    fn new(layer: Box<dyn Layer>) -> Self {
        Self {
            layer,
            render: true,
        }
    }
}

/// The stack of layers. The top one gets events and actions; every layer marked
/// `render` is drawn, bottom first.
pub(super) struct LayerManager {
    layers: Vec<LayerConfig>,
}

impl LayerManager {
    pub(super) fn new(layer: &Layers, state: &RootState) -> Result<Self> {
        Ok(Self {
            layers: vec![LayerConfig::new(Self::get_layer(layer, state)?)],
        })
    }

    pub(super) fn len(&self) -> usize {
        self.layers.len()
    }

    pub(super) fn top(&self) -> Result<&dyn Layer> {
        self.layers
            .last()
            .map(|config| config.layer.as_ref())
            .ok_or_eyre("No layer in stack")
    }

    fn top_mut(&mut self) -> Result<&mut LayerConfig> {
        self.layers.last_mut().ok_or_eyre("No layer in stack")
    }

    pub(super) fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.layers
            .iter_mut()
            .filter(|config| config.render)
            .for_each(|config| config.layer.render(f, area));
    }

    pub(super) fn handle_event(&self, event: &Event) -> Result<EventHandlingStatus> {
        Ok(self.top()?.handle_events(event))
    }

    /// Update the stack for a [`LayerManageAction`].
    pub(super) fn handle_layer_action(
        &mut self,
        action: &LayerManageAction,
        state: &RootState,
    ) -> Result<()> {
        match action {
            LayerManageAction::Swap(target) => {
                let layer = Self::get_layer(target, state)?;
                self.layers.pop();
                self.layers.push(LayerConfig::new(layer));
                info!(
                    "Swapping layer to {}, current layer stack length {}",
                    target,
                    self.layers.len()
                );
            }
            LayerManageAction::Push(target) => {
                let layer = Self::get_layer(&target.layer, state)?;
                self.top_mut()?.render = target.render_self;
                self.layers.push(LayerConfig::new(layer));
                info!(
                    "Pushing a {} layer, current layer will {} render, new layer stack length {}",
                    target.layer,
                    if target.render_self { "still" } else { "not" },
                    self.layers.len()
                );
            }
            LayerManageAction::Pop => {
                if self.layers.len() <= 1 {
                    info!("Ignoring pop of the bottom layer");
                    return Ok(());
                }
                self.layers.pop();
                self.top_mut()?.render = true;
                info!(
                    "Popping layer, current layer stack length {}",
                    self.layers.len()
                );
            }
        }
        Ok(())
    }

    /// Pass the action to the top layer.
    pub(super) fn handle_action(&mut self, action: Action) -> Result<()> {
        self.top_mut()?.layer.update(action);
        Ok(())
    }

    fn get_layer(layer: &Layers, state: &RootState) -> Result<Box<dyn Layer>> {
        let tx = state.action_tx.clone().into();
        let mut layer = match layer {
            Layers::Showcase => Box::new(Showcase::new(tx, &state.config.table)) as Box<dyn Layer>,
            Layers::Browser => Box::new(Browser::new(
                tx,
                state.dataset.clone(),
                &state.config.table,
            )),
            Layers::Modal(content) => Box::new(Modal::new(tx, content.clone())),
            Layers::Help(help_msg) => Box::new(
                Modal::help(tx, help_msg).ok_or_else(|| eyre!("Help message is empty"))?,
            ),
        };
        layer.init();
        Ok(layer)
    }
}
