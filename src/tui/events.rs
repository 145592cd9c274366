use crate::memo::{Memo, PriorityStats};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyEvent, MouseEvent};
use std::time::Duration;
use tokio::sync::mpsc;

/// Application events
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),

    /// Mouse input event
    Mouse(MouseEvent),

    /// Terminal resize event
    Resize(u16, u16),

    /// Periodic tick event
    Tick,

    /// The memo list finished loading
    MemosLoaded(Vec<Memo>),

    /// Priority statistics finished loading
    StatsLoaded(PriorityStats),

    /// A memo was deleted on the backend
    MemoDeleted(i64),

    /// One or more memos were updated on the backend
    MemosUpdated(Vec<Memo>),

    /// A backend call failed
    ServiceError(String),
}

/// Event handler bridging crossterm input and internal app events
pub struct EventHandler {
    receiver: mpsc::UnboundedReceiver<Event>,
    sender: mpsc::UnboundedSender<Event>,
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            receiver,
            sender,
            tick_rate,
        }
    }

    /// Get the next event, falling back to a tick when input is idle.
    pub async fn next(&mut self) -> Option<Event> {
        // Internal events first so service results are never starved by input
        if let Ok(event) = self.receiver.try_recv() {
            return Some(event);
        }

        let tick_rate = self.tick_rate;
        let input = tokio::task::spawn_blocking(move || -> Result<Option<CrosstermEvent>> {
            if crossterm::event::poll(tick_rate)? {
                Ok(Some(crossterm::event::read()?))
            } else {
                Ok(None)
            }
        })
        .await;

        match input {
            Ok(Ok(Some(event))) => Some(Self::convert(event)),
            _ => Some(Event::Tick),
        }
    }

    fn convert(event: CrosstermEvent) -> Event {
        match event {
            CrosstermEvent::Key(key) => Event::Key(key),
            CrosstermEvent::Mouse(mouse) => Event::Mouse(mouse),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => Event::Tick,
        }
    }

    /// Get a clone of the sender for background tasks
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }
}
