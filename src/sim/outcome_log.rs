/// Outcome log: append-only, human-readable record of every move and
/// every finished game.
///
/// ## File format:
///   ```
///   Position: (1,0), Energy: 49, Move: Right
///   Position: (2,0), Energy: 48, Move: Right
///   Congratulations, you won! Game over. Remaining energy: 48, Total attempts: 1
///   =====================================
///   You lost. Game over. Total attempts: 2
///   =====================================
///   ```
///
/// The file is opened in append mode and never truncated, so results
/// accumulate across runs. Writes are flushed once per tick.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::grid::Position;
use crate::domain::rules::MoveDir;
use crate::error::LogWriteError;
use super::event::{GameEvent, Outcome};

const SEPARATOR: &str = "=====================================";

pub struct OutcomeLog<W: Write> {
    out: W,
}

impl OutcomeLog<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> Result<Self, LogWriteError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(OutcomeLog::new(BufWriter::new(file)))
    }
}

impl<W: Write> OutcomeLog<W> {
    pub fn new(out: W) -> Self {
        OutcomeLog { out }
    }

    /// Write the records for one tick's events and flush.
    pub fn record_all(&mut self, events: &[GameEvent]) -> Result<(), LogWriteError> {
        for event in events {
            self.record(event)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn record(&mut self, event: &GameEvent) -> Result<(), LogWriteError> {
        match *event {
            GameEvent::Moved { to, dir, energy } => {
                writeln!(self.out, "{}", move_line(to, energy, dir))?;
            }
            GameEvent::GameOver { outcome, energy, attempt } => {
                writeln!(self.out, "{}", game_over_line(outcome, energy, attempt))?;
                writeln!(self.out, "{SEPARATOR}")?;
            }
            GameEvent::Restarted => {}
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

// ══════════════════════════════════════════════════════════════
// Record shapes
// ══════════════════════════════════════════════════════════════

fn move_line(pos: Position, energy: i32, dir: MoveDir) -> String {
    format!("Position: ({},{}), Energy: {}, Move: {}", pos.x, pos.y, energy, dir.label())
}

fn game_over_line(outcome: Outcome, energy: i32, attempt: u32) -> String {
    if outcome.is_win() {
        format!("Congratulations, you won! Game over. Remaining energy: {energy}, Total attempts: {attempt}")
    } else {
        format!("You lost. Game over. Total attempts: {attempt}")
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
