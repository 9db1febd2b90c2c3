use crate::{
    component::{input::InputAction, table::TableAction},
    page::{modal::ModalAction, modal::ModalContent, showcase::ShowcaseAction},
    utils::help_msg::HelpMsg,
};

/// Everything that changes state goes through the action channel as one of these.
#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,
    Suspend,
    SwitchInputMode(bool),

    Layer(LayerManageAction),

    /// An action addressed to the component with the given id.
    Comp((CompAction, u64)),

    Modal(ModalAction),
    Showcase(ShowcaseAction),
}

#[derive(Clone, Debug)]
pub enum CompAction {
    Input(InputAction),
    Table(TableAction),
}

/// The layers the app knows how to build.
#[derive(Clone, Debug, strum::Display)]
pub enum Layers {
    Showcase,
    Browser,
    Modal(ModalContent),
    Help(HelpMsg),
}

#[derive(Clone, Debug)]
pub struct TargetLayer {
    pub layer: Layers,
    /// Keep drawing the layer below, e.g. under a popup.
    pub render_self: bool,
}

impl TargetLayer {
    pub fn popup(layer: Layers) -> Self {
        Self {
            layer,
            render_self: true,
        }
    }
}

#[derive(Clone, Debug)]
pub enum LayerManageAction {
    /// Replace the top layer.
    Swap(Layers),
    Push(TargetLayer),
    Pop,
}

impl From<LayerManageAction> for Action {
    fn from(value: LayerManageAction) -> Self {
        Action::Layer(value)
    }
}

/// Cloneable handle for sending actions from components and layers.
#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    /// Sending only fails after the app loop has dropped its receiver, when
    /// nobody is left to act on it.
    pub fn send<T: Into<Action>>(&self, action: T) {
        if self.0.send(action.into()).is_err() {
            tracing::warn!("Action receiver is closed, dropping action");
        }
    }
}

impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}
