use std::collections::HashMap;
use std::io;
use std::time::Duration;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::session::Command;

/// Maps one terminal event to a game command. Anything unrecognized is ignored.
pub fn command_for(event: &Event) -> Option<Command> {
    match event {
        Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) => match code {
            KeyCode::Char(' ') | KeyCode::Up => Some(Command::Flap),
            KeyCode::Enter => Some(Command::Reset),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}

/// Drains every event already queued by the terminal without blocking.
pub fn drain_events() -> io::Result<Vec<Event>> {
    let mut events = Vec::new();
    while event::poll(Duration::ZERO)? {
        events.push(event::read()?);
    }
    Ok(events)
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>) -> Self {
        SimulatedInput { events }
    }

    /// A short scripted run: a few flaps, a reset in case the bird died, and
    /// a final quit.
    pub fn demo_script() -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        for frame in (1..240).step_by(22) {
            events.entry(frame).or_default().push(Event::Key(KeyCode::Char(' ').into()));
        }
        events.entry(300).or_default().push(Event::Key(KeyCode::Enter.into()));
        events.entry(301).or_default().push(Event::Key(KeyCode::Up.into()));
        events.entry(360).or_default().push(Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events)
    }

    /// Everything scheduled for `frame`, in scheduling order.
    pub fn drain(&mut self, frame: u64) -> Vec<Event> {
        self.events.remove(&frame).unwrap_or_default()
    }
}
