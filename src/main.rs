/// Entry point and tick driver.
///
/// One `step` per `tick_rate_ms`, on a single thread: steps never overlap.
/// Each tick's events go to the outcome log before the frame is drawn.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::process::ExitCode;
use std::time::{Duration, Instant};

use log::info;

use config::GameConfig;
use sim::maze::load_maze;
use sim::outcome_log::OutcomeLog;
use sim::step;
use sim::world::WorldState;
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::load();

    let grid = match load_maze(&config.maze_path) {
        Ok(g) => g,
        Err(e) => {
            let kind = if e.is_marker_error() { "Invalid maze" } else { "Maze load failed" };
            eprintln!("{kind}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut log = match OutcomeLog::open(&config.log_path) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Cannot open {}: {e}", config.log_path.display());
            return ExitCode::FAILURE;
        }
    };

    let mut world = WorldState::new(grid, config.game.initial_energy);
    info!(
        "starting: energy {}, tick {}ms, log {}",
        config.game.initial_energy, config.speed.tick_rate_ms, config.log_path.display(),
    );

    let result = if config.render {
        run_rendered(&mut world, &mut log, &config)
    } else {
        run_headless(&mut world, &mut log, &config)
    };

    if let Err(e) = result {
        eprintln!("Game error: {e}");
        return ExitCode::FAILURE;
    }

    println!();
    println!("Thanks for playing Maze Runner!");
    println!("Attempts: {}  Ticks: {}", world.agent.attempt, world.tick);
    ExitCode::SUCCESS
}

fn run_rendered<W: std::io::Write>(
    world: &mut WorldState,
    log: &mut OutcomeLog<W>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        // Leave raw mode if init got halfway.
        let _ = renderer.cleanup();
        return Err(format!("terminal init failed: {e}").into());
    }

    let result = game_loop(world, log, &mut renderer, config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result
}

fn game_loop<W: std::io::Write>(
    world: &mut WorldState,
    log: &mut OutcomeLog<W>,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);
    let mut last_tick = Instant::now();

    renderer.render(&world.snapshot())?;

    loop {
        kb.drain_events();
        if kb.quit_requested() {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            let events = step::step(world);
            log.record_all(&events)?;
            renderer.render(&world.snapshot())?;
            last_tick = Instant::now();

            if tick_limit_reached(world, config) {
                break;
            }
        }

        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn run_headless<W: std::io::Write>(
    world: &mut WorldState,
    log: &mut OutcomeLog<W>,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);
    loop {
        let started = Instant::now();
        let events = step::step(world);
        log.record_all(&events)?;

        if tick_limit_reached(world, config) {
            return Ok(());
        }
        if let Some(rest) = tick_rate.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
}

fn tick_limit_reached(world: &WorldState, config: &GameConfig) -> bool {
    config.max_ticks > 0 && world.tick >= config.max_ticks
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::{RulesConfig, SpeedConfig};
    use crate::domain::grid::Position;
    use crate::domain::grid::tests::grid_from;

    fn headless_config(max_ticks: u64) -> GameConfig {
        GameConfig {
            speed: SpeedConfig { tick_rate_ms: 1 },
            game: RulesConfig { initial_energy: 50 },
            maze_path: PathBuf::from("maze.txt"),
            log_path: PathBuf::from("results.txt"),
            render: false,
            max_ticks,
        }
    }

    #[test]
    fn headless_run_stops_at_tick_limit() {
        let config = headless_config(3);
        let mut world = WorldState::new(grid_from(&["S...E"]), 50);
        let mut buf: Vec<u8> = Vec::new();
        {
            let mut log = OutcomeLog::new(&mut buf);
            run_headless(&mut world, &mut log, &config).unwrap();
        }

        assert_eq!(world.tick, 3);
        assert_eq!(world.agent.position, Position::new(3, 0));
        let text = String::from_utf8(buf).unwrap();
        let moves: Vec<&str> = text.lines().filter(|l| l.starts_with("Position:")).collect();
        assert_eq!(moves, vec![
            "Position: (1,0), Energy: 49, Move: Right",
            "Position: (2,0), Energy: 48, Move: Right",
            "Position: (3,0), Energy: 47, Move: Right",
        ]);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn zero_tick_limit_never_stops() {
        let config = headless_config(0);
        let mut world = WorldState::new(grid_from(&["S.E"]), 50);
        for tick in [0, 1, 3, 1_000_000] {
            world.tick = tick;
            assert!(!tick_limit_reached(&world, &config));
        }
    }

    #[test]
    fn tick_limit_reached_at_exact_count() {
        let config = headless_config(3);
        let mut world = WorldState::new(grid_from(&["S.E"]), 50);
        world.tick = 2;
        assert!(!tick_limit_reached(&world, &config));
        world.tick = 3;
        assert!(tick_limit_reached(&world, &config));
    }
}
