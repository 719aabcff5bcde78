/// The step function: advances the world by one tick.
///
/// Processing order:
///   1. Termination check (energy first, then exit)
///   2. Route planning from the current position
///   3. One-cell advance along the route
///   4. Cell entry effect (bonus / penalty)
///
/// A tick produces at most one advance. A finished game (won, lost, or
/// no route) is reported as `GameOver` and followed in the same tick by a
/// restart. All results are returned as events; logging to disk is the
/// caller's job.

use log::{debug, info};

use crate::domain::grid::Position;
use crate::domain::path;
use crate::domain::rules::{self, MoveDir};
use super::event::{GameEvent, LossReason, Outcome};
use super::world::{Phase, WorldState};

/// How long the end-of-game message stays visible, in ticks.
const RESULT_MESSAGE_TICKS: u32 = 10;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step(world: &mut WorldState) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 { world.message.clear(); }
    }

    match world.phase() {
        Phase::Lost => {
            finish_game(world, Outcome::Lost(LossReason::EnergyDepleted), &mut events);
            return events;
        }
        Phase::Won => {
            finish_game(world, Outcome::Won, &mut events);
            return events;
        }
        Phase::Running => {}
    }

    let from = world.agent.position;
    let route = path::shortest_path(&world.grid, from, world.grid.exit());
    if route.len() < 2 {
        finish_game(world, Outcome::Lost(LossReason::NoPath), &mut events);
        return events;
    }

    debug!(
        "tick {}: route of {} cells, planning cost {}",
        world.tick, route.len(), path::path_cost(&world.grid, &route),
    );
    advance(world, route[1], &mut events);
    world.planned = route;
    events
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

/// `to` is the second cell of a route starting at the agent's position.
/// Routes never repeat a cell, so `to` is always an orthogonal neighbor.
fn advance(world: &mut WorldState, to: Position, events: &mut Vec<GameEvent>) {
    let from = world.agent.position;
    debug_assert_eq!(
        from.x.abs_diff(to.x) + from.y.abs_diff(to.y), 1,
        "route step ({},{}) -> ({},{}) is not adjacent", from.x, from.y, to.x, to.y,
    );
    let Some(dir) = MoveDir::between(from, to) else {
        return;
    };
    let cell = world.grid.cell_kind(to);

    world.agent.energy = rules::energy_after_move(world.agent.energy, cell);
    world.agent.enter(to);

    debug!(
        "tick {}: ({},{}) -> ({},{}) {} on {:?}, energy {}",
        world.tick, from.x, from.y, to.x, to.y, dir.label(), cell, world.agent.energy,
    );
    events.push(GameEvent::Moved { to, dir, energy: world.agent.energy });
}

// ══════════════════════════════════════════════════════════════
// Game end / restart
// ══════════════════════════════════════════════════════════════

fn finish_game(world: &mut WorldState, outcome: Outcome, events: &mut Vec<GameEvent>) {
    let energy = world.agent.energy;
    let attempt = world.agent.attempt;

    match outcome {
        Outcome::Won => {
            info!("attempt {attempt}: reached the exit with {energy} energy left");
            world.set_message(&format!("Exit reached! Energy left: {energy}"), RESULT_MESSAGE_TICKS);
        }
        Outcome::Lost(LossReason::EnergyDepleted) => {
            info!("attempt {attempt}: out of energy");
            world.set_message("Out of energy", RESULT_MESSAGE_TICKS);
        }
        Outcome::Lost(LossReason::NoPath) => {
            info!("attempt {attempt}: no route to the exit");
            world.set_message("No route to the exit", RESULT_MESSAGE_TICKS);
        }
    }
    events.push(GameEvent::GameOver { outcome, energy, attempt });

    restart(world);
    events.push(GameEvent::Restarted);
}

fn restart(world: &mut WorldState) {
    world.agent.reset(world.grid.start(), world.initial_energy);
    world.planned.clear();
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
