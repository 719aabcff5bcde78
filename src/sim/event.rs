/// Events emitted during a simulation step.
/// The outcome log consumes these; the step itself performs no I/O.

use crate::domain::grid::Position;
use crate::domain::rules::MoveDir;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LossReason {
    EnergyDepleted,
    NoPath,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Won,
    Lost(LossReason),
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Won)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The agent advanced one cell. `energy` is after the cell's effect.
    Moved {
        to: Position,
        dir: MoveDir,
        energy: i32,
    },
    /// A game ended. `energy` and `attempt` are the values at the end.
    GameOver {
        outcome: Outcome,
        energy: i32,
        attempt: u32,
    },
    /// The agent was reset to the start for a new attempt.
    Restarted,
}
