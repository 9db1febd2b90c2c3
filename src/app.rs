pub mod layer_manager;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use layer_manager::{EventHandlingStatus, LayerManager};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{info, warn};

use crate::{
    actions::{Action, ActionSender, LayerManageAction, Layers, TargetLayer},
    config::Config,
    libs::dataset::Dataset,
    page::Layer,
    tui::{Event, TuiEnum},
};

pub struct RootState {
    pub should_quit: bool,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    /// A text input is taking keys, so single letter shortcuts are off.
    pub input_mode: bool,

    pub config: Config,
    /// Rows shown by the browser page.
    pub dataset: Dataset,
}

impl RootState {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        let (action_tx, action_rx) = unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            input_mode: false,
            config,
            dataset,
        }
    }

    pub fn sender(&self) -> ActionSender {
        self.action_tx.clone().into()
    }
}

pub struct App {
    layers: LayerManager,
    state: RootState,
    tui: TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: TuiEnum, first_layer: Layers) -> Result<Self> {
        Ok(Self {
            layers: LayerManager::new(&first_layer, &state)?,
            state,
            tui,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let event = self.tui.next().await?;
            self.handle_event(event)?;
            self.drain_actions()?;

            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn drain_actions(&mut self) -> Result<()> {
        while let Ok(action) = self.state.action_rx.try_recv() {
            self.perform_action(action)?;
        }
        Ok(())
    }

    /// Turn a terminal event into actions.
    ///
    /// Ctrl-c and Ctrl-z always work. Other keys go to the top layer first;
    /// the single letter shortcuts only apply to keys it leaves alone, and
    /// never while a text input is active.
    fn handle_event(&self, event: Event) -> Result<()> {
        let tx = self.state.sender();
        match &event {
            Event::Tick => tx.send(Action::Tick),
            Event::Render | Event::Resize(_, _) => tx.send(Action::Render),
            Event::Error => {
                warn!("Terminal event stream failed, quitting");
                tx.send(Action::Quit);
            }
            Event::Init | Event::FocusGained | Event::FocusLost => {}
            Event::Key(key) if key.modifiers == KeyModifiers::CONTROL => match key.code {
                KeyCode::Char('c') => tx.send(Action::Quit),
                KeyCode::Char('z') => tx.send(Action::Suspend),
                _ => {
                    let _ = self.layers.handle_event(&event)?;
                }
            },
            Event::Key(key) => {
                if self.layers.handle_event(&event)? == EventHandlingStatus::Consumed
                    || self.state.input_mode
                {
                    return Ok(());
                }
                self.handle_global_key(key.code)?;
            }
            Event::Paste(_) => {
                let _ = self.layers.handle_event(&event)?;
            }
        }
        Ok(())
    }

    fn handle_global_key(&self, code: KeyCode) -> Result<()> {
        let tx = self.state.sender();
        let top = self.layers.top()?;
        match code {
            KeyCode::Char('q') => tx.send(Action::Quit),
            KeyCode::Char('?') => {
                let help = top.get_help_msg();
                if help.is_empty() {
                    info!("No help for layer {}", top.get_name());
                } else {
                    tx.send(LayerManageAction::Push(TargetLayer::popup(Layers::Help(
                        help,
                    ))));
                }
            }
            KeyCode::Char('B') if top.get_name() == "Showcase" => {
                tx.send(LayerManageAction::Swap(Layers::Browser))
            }
            KeyCode::Char('S') if top.get_name() == "Browser" => {
                tx.send(LayerManageAction::Swap(Layers::Showcase))
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply an action. The only place where app state changes.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::Tick => {}
            Action::Suspend => {
                self.tui.suspend()?;
                self.tui.resume()?;
            }
            Action::Render => {
                let layers = &mut self.layers;
                self.tui.draw(|f| layers.render(f))?;
            }
            Action::SwitchInputMode(mode) => self.state.input_mode = mode,
            Action::Layer(action) => {
                // a popped or swapped layer may have been in the middle of input
                self.state.input_mode = false;
                self.layers.handle_layer_action(&action, &self.state)?;
            }
            action => self.layers.handle_action(action)?,
        }
        Ok(())
    }
}
