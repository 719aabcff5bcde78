/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
///
/// ```toml
/// [speed]
/// tick_rate_ms = 200
///
/// [game]
/// initial_energy = 50
///
/// [general]
/// maze_file = "maze.txt"
/// log_file = "results.txt"
/// render = true
/// max_ticks = 0        # 0 = run until quit
/// ```

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::rules::DEFAULT_INITIAL_ENERGY;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub game: RulesConfig,
    pub maze_path: PathBuf,
    pub log_path: PathBuf,
    pub render: bool,
    pub max_ticks: u64,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub initial_energy: i32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_initial_energy")]
    initial_energy: i32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_maze_file")]
    maze_file: String,
    #[serde(default = "default_log_file")]
    log_file: String,
    #[serde(default = "default_render")]
    render: bool,
    #[serde(default)]
    max_ticks: u64,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 200 }
fn default_initial_energy() -> i32 { DEFAULT_INITIAL_ENERGY }
fn default_maze_file() -> String { "maze.txt".into() }
fn default_log_file() -> String { "results.txt".into() }
fn default_render() -> bool { true }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame { initial_energy: default_initial_energy() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            maze_file: default_maze_file(),
            log_file: default_log_file(),
            render: default_render(),
            max_ticks: 0,
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        Self::resolve(toml_cfg, &search_dirs)
    }

    fn resolve(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let mut initial_energy = toml_cfg.game.initial_energy;
        if initial_energy <= 0 {
            warn!("initial_energy must be positive, got {initial_energy}; using {DEFAULT_INITIAL_ENERGY}");
            initial_energy = DEFAULT_INITIAL_ENERGY;
        }

        let mut tick_rate_ms = toml_cfg.speed.tick_rate_ms;
        if tick_rate_ms == 0 {
            warn!("tick_rate_ms must be positive; using {}", default_tick_rate());
            tick_rate_ms = default_tick_rate();
        }

        GameConfig {
            speed: SpeedConfig { tick_rate_ms },
            game: RulesConfig { initial_energy },
            maze_path: find_existing(&toml_cfg.general.maze_file, search_dirs),
            // The log is created on demand: relative paths stay relative to CWD.
            log_path: PathBuf::from(&toml_cfg.general.log_file),
            render: toml_cfg.general.render,
            max_ticks: toml_cfg.general.max_ticks,
        }
    }
}

/// Resolve a data file: absolute paths as-is, otherwise the first candidate
/// directory that contains it, falling back to the CWD-relative path.
fn find_existing(name: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    search_dirs.iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Candidate directories to search: exe dir + CWD + system paths (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/mazerunner)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/mazerunner");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    // 4. System data directory (/usr/share/mazerunner)
    let sys = PathBuf::from("/usr/share/mazerunner");
    if sys.is_dir() && !dirs.iter().any(|d| d == &sys) {
        dirs.push(sys);
    }

    // 5. Fallback
    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return parse_toml(&text),
                Err(e) => warn!("could not read {}: {e}", path.display()),
            }
        }
    }
    TomlConfig::default()
}

fn parse_toml(text: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config.toml parse error: {e}; using default settings");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> GameConfig {
        GameConfig::resolve(parse_toml(text), &[])
    }

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = resolve("");
        assert_eq!(cfg.speed.tick_rate_ms, 200);
        assert_eq!(cfg.game.initial_energy, 50);
        assert_eq!(cfg.maze_path, PathBuf::from("maze.txt"));
        assert_eq!(cfg.log_path, PathBuf::from("results.txt"));
        assert!(cfg.render);
        assert_eq!(cfg.max_ticks, 0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = resolve("[game]\ninitial_energy = 80\n[general]\nrender = false\n");
        assert_eq!(cfg.game.initial_energy, 80);
        assert!(!cfg.render);
        assert_eq!(cfg.speed.tick_rate_ms, 200);
        assert_eq!(cfg.log_path, PathBuf::from("results.txt"));
    }

    #[test]
    fn invalid_toml_falls_back() {
        let cfg = resolve("[speed\ntick_rate_ms = ");
        assert_eq!(cfg.speed.tick_rate_ms, 200);
    }

    #[test]
    fn nonpositive_values_rejected() {
        let cfg = resolve("[speed]\ntick_rate_ms = 0\n[game]\ninitial_energy = -3\n");
        assert_eq!(cfg.speed.tick_rate_ms, 200);
        assert_eq!(cfg.game.initial_energy, 50);
    }

    #[test]
    fn absolute_maze_path_kept() {
        let cfg = resolve("[general]\nmaze_file = \"/tmp/some/maze.txt\"\n");
        assert_eq!(cfg.maze_path, PathBuf::from("/tmp/some/maze.txt"));
    }
}
