/// WorldState: the complete state of a running maze session.
///
/// ## Ownership
///
///   - `grid`:  loaded once at startup. **Never mutated**; shared read-only
///               with the path engine and the renderer.
///   - `agent`: owned by the tick step. Reset (not replaced) on restart:
///               position, energy, trail and visited set go back to their
///               initial values, the attempt counter keeps counting.
///
/// The renderer only ever sees a `Snapshot`.

use std::collections::HashSet;

use crate::domain::grid::{Grid, Position};

/// Tick state machine. `Won` and `Lost` are terminal for a single game and
/// are immediately followed by a restart back to `Running`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Won,
    Lost,
}

#[derive(Clone, Debug)]
pub struct AgentState {
    pub position: Position,
    /// May go to zero or below after a move; the loss is detected next tick.
    pub energy: i32,
    /// Every position occupied this game, in order, starting at the start cell.
    pub trail: Vec<Position>,
    pub visited: HashSet<Position>,
    /// 1 for the first game, +1 on every restart.
    pub attempt: u32,
}

impl AgentState {
    pub fn new(start: Position, energy: i32) -> Self {
        let mut agent = AgentState {
            position: start,
            energy,
            trail: Vec::new(),
            visited: HashSet::new(),
            attempt: 1,
        };
        agent.enter(start);
        agent
    }

    /// Back to the start for a new attempt.
    pub fn reset(&mut self, start: Position, energy: i32) {
        self.position = start;
        self.energy = energy;
        self.trail.clear();
        self.visited.clear();
        self.attempt += 1;
        self.enter(start);
    }

    /// Record `pos` as the current position.
    pub fn enter(&mut self, pos: Position) {
        self.position = pos;
        self.trail.push(pos);
        self.visited.insert(pos);
    }
}

/// Read-only view handed to the presentation layer each frame.
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub position: Position,
    pub trail: &'a [Position],
    pub visited: &'a HashSet<Position>,
    pub planned: &'a [Position],
    pub energy: i32,
    pub initial_energy: i32,
    pub attempt: u32,
    pub tick: u64,
    pub message: &'a str,
}

pub struct WorldState {
    pub grid: Grid,
    pub agent: AgentState,
    pub initial_energy: i32,

    /// Route computed on the most recent tick (empty after a restart).
    pub planned: Vec<Position>,
    pub tick: u64,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    pub fn new(grid: Grid, initial_energy: i32) -> Self {
        let agent = AgentState::new(grid.start(), initial_energy);
        WorldState {
            grid,
            agent,
            initial_energy,
            planned: Vec::new(),
            tick: 0,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// Which state the current agent is in, checked at the start of a tick.
    /// Energy is checked before the exit.
    pub fn phase(&self) -> Phase {
        if self.agent.energy <= 0 {
            Phase::Lost
        } else if self.agent.position == self.grid.exit() {
            Phase::Won
        } else {
            Phase::Running
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            position: self.agent.position,
            trail: &self.agent.trail,
            visited: &self.agent.visited,
            planned: &self.planned,
            energy: self.agent.energy,
            initial_energy: self.initial_energy,
            attempt: self.agent.attempt,
            tick: self.tick,
            message: &self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::tests::grid_from;

    #[test]
    fn new_agent_starts_on_start_cell() {
        let agent = AgentState::new(Position::new(1, 2), 50);
        assert_eq!(agent.position, Position::new(1, 2));
        assert_eq!(agent.energy, 50);
        assert_eq!(agent.trail, vec![Position::new(1, 2)]);
        assert!(agent.visited.contains(&Position::new(1, 2)));
        assert_eq!(agent.attempt, 1);
    }

    #[test]
    fn reset_clears_history_and_counts_attempt() {
        let mut agent = AgentState::new(Position::new(0, 0), 50);
        agent.enter(Position::new(1, 0));
        agent.enter(Position::new(2, 0));
        agent.energy = 3;

        agent.reset(Position::new(0, 0), 50);
        assert_eq!(agent.position, Position::new(0, 0));
        assert_eq!(agent.energy, 50);
        assert_eq!(agent.trail, vec![Position::new(0, 0)]);
        assert_eq!(agent.visited.len(), 1);
        assert_eq!(agent.attempt, 2);
    }

    #[test]
    fn phase_checks_energy_before_exit() {
        let mut w = WorldState::new(grid_from(&["S.E"]), 10);
        assert_eq!(w.phase(), Phase::Running);

        w.agent.position = w.grid.exit();
        assert_eq!(w.phase(), Phase::Won);

        w.agent.energy = 0;
        assert_eq!(w.phase(), Phase::Lost);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let w = WorldState::new(grid_from(&["S.E"]), 7);
        let s = w.snapshot();
        assert_eq!(s.position, Position::new(0, 0));
        assert_eq!(s.energy, 7);
        assert_eq!(s.initial_energy, 7);
        assert_eq!(s.attempt, 1);
        assert_eq!(s.trail.len(), 1);
        assert!(s.planned.is_empty());
    }
}
