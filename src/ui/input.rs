/// Input state tracker.
///
/// The agent plays by itself; the only keys that matter are the ones
/// that end the session (Esc, Q, Ctrl+C). Raw mode swallows SIGINT, so
/// Ctrl+C has to be read from the event stream like any other key.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const KEYS_QUIT: &[KeyCode] = &[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('Q')];

pub struct InputState {
    /// Raw key presses collected during the latest drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call this once per frame.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();
        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.raw_events.iter().any(|k| is_quit(k))
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'));
    ctrl_c || KEYS_QUIT.contains(&key.code)
}
