/// Energy and cost rules.
///
/// Two separate sets of numbers live here and are not meant to agree:
///   - **Planning cost**: edge weights the path engine uses when it
///     estimates a route (bonus −5, penalty +10 on top of base 1).
///   - **Gameplay effect**: what actually happens to the agent's energy
///     when it steps onto a cell (−1 per move, bonus +15, penalty −10).

use super::cell::CellKind;
use super::grid::Position;

/// Base cost of entering any passable cell.
pub const BASE_EDGE_COST: i64 = 1;
/// Planning adjustment for entering a Bonus cell.
pub const BONUS_COST_DELTA: i64 = -5;
/// Planning adjustment for entering a Penalty cell.
pub const PENALTY_COST_DELTA: i64 = 10;

/// Energy spent on every move.
pub const MOVE_ENERGY_COST: i32 = 1;
/// Energy gained on stepping onto a Bonus cell.
pub const BONUS_ENERGY: i32 = 15;
/// Energy lost on stepping onto a Penalty cell.
pub const PENALTY_ENERGY: i32 = 10;

/// Default starting energy for every (re)start.
pub const DEFAULT_INITIAL_ENERGY: i32 = 50;

/// Planning weight of the edge into a cell of this kind.
/// Walls never reach here: they are not graph nodes.
pub fn edge_cost(kind: CellKind) -> i64 {
    match kind {
        CellKind::Bonus => BASE_EDGE_COST + BONUS_COST_DELTA,
        CellKind::Penalty => BASE_EDGE_COST + PENALTY_COST_DELTA,
        _ => BASE_EDGE_COST,
    }
}

/// Energy change applied on entering a cell, after the move cost.
pub fn entry_effect(kind: CellKind) -> i32 {
    match kind {
        CellKind::Bonus => BONUS_ENERGY,
        CellKind::Penalty => -PENALTY_ENERGY,
        _ => 0,
    }
}

/// Energy after moving onto a cell of `kind` with `energy` in hand.
pub fn energy_after_move(energy: i32, kind: CellKind) -> i32 {
    energy - MOVE_ENERGY_COST + entry_effect(kind)
}

/// Direction of a single axis-aligned move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveDir {
    Right,
    Left,
    Down,
    Up,
}

impl MoveDir {
    /// Direction from `from` to `to`. Horizontal difference wins,
    /// then vertical; None when the positions are equal.
    pub fn between(from: Position, to: Position) -> Option<MoveDir> {
        if to.x > from.x {
            Some(MoveDir::Right)
        } else if to.x < from.x {
            Some(MoveDir::Left)
        } else if to.y > from.y {
            Some(MoveDir::Down)
        } else if to.y < from.y {
            Some(MoveDir::Up)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveDir::Right => "Right",
            MoveDir::Left => "Left",
            MoveDir::Down => "Down",
            MoveDir::Up => "Up",
        }
    }
}
