/// Error taxonomy.
///
/// Startup errors (`MazeError`) are fatal: the maze cannot be played.
/// `LogWriteError` is fatal mid-session; the outcome file is assumed writable.
/// "No path" is not an error: it ends the current game as a loss.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::grid::Position;

#[derive(Debug, Error)]
pub enum MazeError {
    // ── Grid load ──
    #[error("could not read maze file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("maze is empty")]
    Empty,
    #[error("row {row}, column {col}: invalid cell code {value:?} (expected 0-5)")]
    InvalidCode { row: usize, col: usize, value: String },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    // ── Markers ──
    #[error("maze has no start cell (code 2)")]
    MissingStart,
    #[error("maze has no exit cell (code 3)")]
    MissingExit,
    #[error("maze has more than one start cell: ({},{}) and ({},{})", .first.x, .first.y, .second.x, .second.y)]
    DuplicateStart { first: Position, second: Position },
}

impl MazeError {
    /// Missing or duplicated Start/Exit marker, as opposed to a malformed file.
    pub fn is_marker_error(&self) -> bool {
        matches!(
            self,
            MazeError::MissingStart | MazeError::MissingExit | MazeError::DuplicateStart { .. }
        )
    }
}

#[derive(Debug, Error)]
#[error("could not write outcome log: {0}")]
pub struct LogWriteError(#[from] pub io::Error);
