/// Maze file loader.
///
/// ## Format
///   One grid row per line, comma-separated integer cell codes:
///   ```
///   2,1,1
///   0,0,1
///   0,0,3
///   ```
///
/// ## Cell codes:
///   `0` = Wall     `1` = Open     `2` = Start
///   `3` = Exit     `4` = Bonus    `5` = Penalty
///
/// Whitespace around codes is ignored, as are blank lines (so a trailing
/// newline or CRLF endings are fine). Every row must have the same number
/// of cells; the maze needs exactly one Start and at least one Exit.
/// Any violation is a load error: there is no fallback maze.

use std::path::Path;

use log::info;

use crate::domain::cell::CellKind;
use crate::domain::grid::Grid;
use crate::error::MazeError;

/// Read and validate a maze file.
pub fn load_maze(path: &Path) -> Result<Grid, MazeError> {
    let text = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_maze(&text)?;
    info!(
        "loaded maze {} ({}x{}), start ({},{}), exit ({},{})",
        path.display(), grid.width(), grid.height(),
        grid.start().x, grid.start().y, grid.exit().x, grid.exit().y,
    );
    Ok(grid)
}

/// Parse maze text.
pub fn parse_maze(text: &str) -> Result<Grid, MazeError> {
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(row, line)| parse_row(row, line))
        .collect::<Result<Vec<_>, _>>()?;
    Grid::new(rows)
}

fn parse_row(row: usize, line: &str) -> Result<Vec<CellKind>, MazeError> {
    line.split(',')
        .enumerate()
        .map(|(col, raw)| {
            let value = raw.trim();
            value
                .parse::<u8>()
                .ok()
                .and_then(CellKind::from_code)
                .ok_or_else(|| MazeError::InvalidCode { row, col, value: value.to_string() })
        })
        .collect()
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Position;

    #[test]
    fn parses_three_by_three() {
        let g = parse_maze("2,1,1\n0,0,1\n0,0,3\n").unwrap();
        assert_eq!((g.width(), g.height()), (3, 3));
        assert_eq!(g.start(), Position::new(0, 0));
        assert_eq!(g.exit(), Position::new(2, 2));
        assert_eq!(g.cell_kind(Position::new(0, 1)), CellKind::Wall);
        assert_eq!(g.cell_kind(Position::new(1, 0)), CellKind::Open);
    }

    #[test]
    fn all_codes_recognised() {
        let g = parse_maze("2,1,4,5,3,0").unwrap();
        let kinds: Vec<_> = (0..6).map(|x| g.cell_kind(Position::new(x, 0))).collect();
        assert_eq!(kinds, vec![
            CellKind::Start, CellKind::Open, CellKind::Bonus,
            CellKind::Penalty, CellKind::Exit, CellKind::Wall,
        ]);
    }

    #[test]
    fn tolerates_spaces_crlf_and_blank_lines() {
        let g = parse_maze("2, 1 ,1\r\n\r\n0,0,3\r\n\n").unwrap();
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(g.exit(), Position::new(2, 1));
    }

    #[test]
    fn rejects_unknown_code() {
        let err = parse_maze("2,1\n1,9\n3,1").unwrap_err();
        match err {
            MazeError::InvalidCode { row, col, value } => {
                assert_eq!((row, col), (1, 1));
                assert_eq!(value, "9");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(parse_maze("2,x,3"), Err(MazeError::InvalidCode { .. })));
        assert!(matches!(parse_maze("2,,3"), Err(MazeError::InvalidCode { col: 1, .. })));
        assert!(matches!(parse_maze("2,-1,3"), Err(MazeError::InvalidCode { .. })));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_maze("2,1,1\n1,3").unwrap_err();
        assert!(matches!(err, MazeError::RaggedRow { row: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(parse_maze(""), Err(MazeError::Empty)));
        assert!(matches!(parse_maze("\n  \n"), Err(MazeError::Empty)));
    }

    #[test]
    fn rejects_missing_markers() {
        assert!(matches!(parse_maze("1,1,3"), Err(MazeError::MissingStart)));
        assert!(matches!(parse_maze("2,1,1"), Err(MazeError::MissingExit)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_maze(Path::new("/nonexistent/dir/maze.txt")).unwrap_err();
        assert!(matches!(err, MazeError::Io { .. }));
        assert!(err.to_string().contains("maze.txt"));
    }
}
