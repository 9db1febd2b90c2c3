//! Terminal handling.
//!
//! [`Tui`] owns the crossterm terminal and a background task that turns terminal
//! input plus two timers (tick and render) into a stream of [`Event`]s. [`TuiEnum`]
//! lets the app run the same loop against an in-memory [`TestTui`].

use std::{
    io::{Stderr, stderr},
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::{Result, eyre};
use crossterm::event::{KeyCode, KeyModifiers};
use futures::{FutureExt, StreamExt};
use ratatui::{
    Frame,
    backend::{CrosstermBackend, TestBackend},
    crossterm::{
        cursor,
        event::{
            DisableBracketedPaste, EnableBracketedPaste, Event as CrosstermEvent, KeyEvent,
            KeyEventKind,
        },
        terminal::{EnterAlternateScreen, LeaveAlternateScreen},
    },
};
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub enum Event {
    /// Sent once when the event task starts.
    Init,
    /// The terminal event stream failed.
    Error,
    Tick,
    Render,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Resize(u16, u16),
}

impl From<KeyCode> for Event {
    fn from(value: KeyCode) -> Self {
        Event::Key(KeyEvent::new(value, KeyModifiers::NONE))
    }
}
impl From<char> for Event {
    fn from(value: char) -> Self {
        Event::Key(KeyEvent::new(KeyCode::Char(value), KeyModifiers::NONE))
    }
}

/// Either a real terminal or a test one.
pub enum TuiEnum {
    Crossterm(Tui),
    Test(TestTui),
}

impl From<Tui> for TuiEnum {
    fn from(tui: Tui) -> Self {
        TuiEnum::Crossterm(tui)
    }
}
impl From<TestTui> for TuiEnum {
    fn from(tui: TestTui) -> Self {
        TuiEnum::Test(tui)
    }
}
impl TuiEnum {
    pub fn enter(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.enter(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub fn exit(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.exit(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub fn suspend(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.suspend(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    pub fn resume(&mut self) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.resume(),
            TuiEnum::Test(_) => Ok(()),
        }
    }

    /// The test terminal has no input, it only ticks.
    pub async fn next(&mut self) -> Result<Event> {
        match self {
            TuiEnum::Crossterm(tui) => tui.next().await,
            TuiEnum::Test(_) => Ok(Event::Tick),
        }
    }

    pub fn draw(&mut self, f: impl FnOnce(&mut Frame)) -> Result<()> {
        match self {
            TuiEnum::Crossterm(tui) => tui.draw(f).map(|_| ()).map_err(Into::into),
            TuiEnum::Test(tui) => tui.draw(f).map(|_| ()).map_err(Into::into),
        }
    }
}

pub struct Tui {
    pub terminal: ratatui::Terminal<CrosstermBackend<Stderr>>,
    pub task: JoinHandle<()>,
    pub cancellation_token: CancellationToken,
    pub event_rx: UnboundedReceiver<Event>,
    pub event_tx: UnboundedSender<Event>,
    pub frame_rate: f64,
    pub tick_rate: f64,
    pub paste: bool,
}

impl Tui {
    /// Must be called inside a tokio runtime.
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(CrosstermBackend::new(stderr()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 60.0,
            tick_rate: 4.0,
            paste: true,
        })
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn paste(mut self, paste: bool) -> Self {
        self.paste = paste;
        self
    }

    /// Spawn the task forwarding terminal input and timer ticks as [`Event`]s.
    pub fn start(&mut self) {
        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate);
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate);
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let cancellation_token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();
        self.task = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            // the receiver only goes away when the app is shutting down
            let send = |event: Event| {
                let _ = event_tx.send(event);
            };
            send(Event::Init);
            loop {
                let tick = tick_interval.tick();
                let render = render_interval.tick();
                let crossterm_event = reader.next().fuse();
                tokio::select! {
                    _ = cancellation_token.cancelled() => break,
                    maybe_event = crossterm_event => match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            send(Event::Key(key))
                        }
                        Some(Ok(CrosstermEvent::Resize(x, y))) => send(Event::Resize(x, y)),
                        Some(Ok(CrosstermEvent::FocusLost)) => send(Event::FocusLost),
                        Some(Ok(CrosstermEvent::FocusGained)) => send(Event::FocusGained),
                        Some(Ok(CrosstermEvent::Paste(s))) => send(Event::Paste(s)),
                        Some(Ok(_)) => {}
                        Some(Err(_)) => send(Event::Error),
                        None => {}
                    },
                    _ = tick => send(Event::Tick),
                    _ = render => send(Event::Render),
                }
            }
        });
    }

    /// Cancel the event task and wait briefly for it to finish.
    pub fn stop(&self) -> Result<()> {
        self.cancel();
        let mut counter = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            counter += 1;
            if counter > 50 {
                self.task.abort();
            }
            if counter > 100 {
                tracing::error!("Failed to abort task in 100 milliseconds for unknown reason");
                break;
            }
        }
        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(stderr(), EnterAlternateScreen, cursor::Hide)?;
        if self.paste {
            crossterm::execute!(stderr(), EnableBracketedPaste)?;
        }
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.flush()?;
            if self.paste {
                crossterm::execute!(stderr(), DisableBracketedPaste)?;
            }
            restore()?;
        }
        Ok(())
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Leave the terminal and stop the process with SIGTSTP (Unix only).
    ///
    /// Returns once the shell resumes the process.
    pub fn suspend(&mut self) -> Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::signal::SIGTSTP)?;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.enter()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub async fn next(&mut self) -> Result<Event> {
        self.event_rx
            .recv()
            .await
            .ok_or(eyre!("Unable to get event"))
    }
}

/// Put the terminal back in cooked mode on the main screen.
///
/// Safe to call when the terminal was never entered; used by the panic hook.
pub fn restore() -> Result<()> {
    if crossterm::terminal::is_raw_mode_enabled()? {
        crossterm::execute!(stderr(), LeaveAlternateScreen, cursor::Show)?;
        crossterm::terminal::disable_raw_mode()?;
    }
    Ok(())
}

impl Deref for Tui {
    type Target = ratatui::Terminal<CrosstermBackend<Stderr>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::error!("Unable to exit terminal: {:?}", e);
        }
    }
}

/// In-memory terminal for tests.
pub struct TestTui {
    pub terminal: ratatui::Terminal<TestBackend>,
}

impl TestTui {
    pub fn new(width: u16, height: u16) -> Result<Self> {
        Ok(Self {
            terminal: ratatui::Terminal::new(TestBackend::new(width, height))?,
        })
    }
}

impl Deref for TestTui {
    type Target = ratatui::Terminal<TestBackend>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for TestTui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl TuiEnum {
    /// The test backend, to inspect what was drawn.
    pub fn test_backend(&self) -> Option<&TestBackend> {
        match self {
            TuiEnum::Crossterm(_) => None,
            TuiEnum::Test(tui) => Some(tui.backend()),
        }
    }
}
