/// The maze grid: an implicit graph over a rectangular array of cells.
///
/// Cells are stored row-major (`cells[y][x]`) and never mutated after
/// construction. Neighbors are generated on the fly: up to four
/// axis-aligned positions, filtered by bounds and passability.
///
/// Construction validates the shape (non-empty, rectangular) and the
/// markers (exactly one Start, at least one Exit), so every `Grid` in
/// existence is playable in principle.

use super::cell::CellKind;
use crate::error::MazeError;

/// Up, right, down, left. Neighbor order is part of the path engine's
/// tie-breaking, so keep it stable.
const DIRS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A cell coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Position { x, y }
    }

    /// Offset by `(dx, dy)`. None if the result would be negative.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Position> {
        let nx = self.x as i64 + dx as i64;
        let ny = self.y as i64 + dy as i64;
        if nx < 0 || ny < 0 {
            return None;
        }
        Some(Position::new(nx as usize, ny as usize))
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Vec<CellKind>>,
    width: usize,
    height: usize,
    start: Position,
    exit: Position,
}

impl Grid {
    /// Build a grid from rows of cells, validating shape and markers.
    pub fn new(cells: Vec<Vec<CellKind>>) -> Result<Self, MazeError> {
        let height = cells.len();
        let width = cells.first().map_or(0, |r| r.len());
        if height == 0 || width == 0 {
            return Err(MazeError::Empty);
        }
        for (y, row) in cells.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::RaggedRow { row: y, expected: width, found: row.len() });
            }
        }

        let start = find_start(&cells)?;
        let exit = find_exit(&cells)?;

        Ok(Grid { cells, width, height, start, exit })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Cell kind at `pos`. Out of bounds reads as a wall.
    #[inline]
    pub fn cell_kind(&self, pos: Position) -> CellKind {
        if self.in_bounds(pos) {
            self.cells[pos.y][pos.x]
        } else {
            CellKind::Wall
        }
    }

    #[inline]
    pub fn is_passable(&self, pos: Position) -> bool {
        self.cell_kind(pos).is_passable()
    }

    /// The unique Start cell.
    pub fn start(&self) -> Position {
        self.start
    }

    /// The first Exit cell in row-major order.
    pub fn exit(&self) -> Position {
        self.exit
    }

    /// Passable 4-neighbors of `pos`, in up/right/down/left order.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        DIRS.iter()
            .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |&n| self.is_passable(n))
    }

    /// All passable positions in row-major order.
    pub fn passable_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, kind)| kind.is_passable())
                .map(move |(x, _)| Position::new(x, y))
        })
    }
}

// ── Marker scan ──

fn find_start(cells: &[Vec<CellKind>]) -> Result<Position, MazeError> {
    let mut starts = scan(cells, CellKind::Start);
    let first = starts.next().ok_or(MazeError::MissingStart)?;
    if let Some(second) = starts.next() {
        return Err(MazeError::DuplicateStart { first, second });
    }
    Ok(first)
}

fn find_exit(cells: &[Vec<CellKind>]) -> Result<Position, MazeError> {
    scan(cells, CellKind::Exit).next().ok_or(MazeError::MissingExit)
}

fn scan(cells: &[Vec<CellKind>], wanted: CellKind) -> impl Iterator<Item = Position> + '_ {
    cells.iter().enumerate().flat_map(move |(y, row)| {
        row.iter()
            .enumerate()
            .filter(move |(_, kind)| **kind == wanted)
            .map(move |(x, _)| Position::new(x, y))
    })
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build cells from a diagram.
    /// Legend: '#'=Wall  '.'=Open  'S'=Start  'E'=Exit  '+'=Bonus  '-'=Penalty
    pub(crate) fn cells_from(rows: &[&str]) -> Vec<Vec<CellKind>> {
        rows.iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => CellKind::Wall,
                        'S' => CellKind::Start,
                        'E' => CellKind::Exit,
                        '+' => CellKind::Bonus,
                        '-' => CellKind::Penalty,
                        _ => CellKind::Open,
                    })
                    .collect()
            })
            .collect()
    }

    pub(crate) fn grid_from(rows: &[&str]) -> Grid {
        Grid::new(cells_from(rows)).expect("test maze must be valid")
    }

    #[test]
    fn finds_markers() {
        let g = grid_from(&[
            "S..",
            "##.",
            "##E",
        ]);
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 3);
        assert_eq!(g.start(), Position::new(0, 0));
        assert_eq!(g.exit(), Position::new(2, 2));
    }

    #[test]
    fn first_exit_in_scan_order_wins() {
        let g = grid_from(&[
            "S.E",
            "E..",
        ]);
        assert_eq!(g.exit(), Position::new(2, 0));
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let g = grid_from(&["SE"]);
        assert_eq!(g.cell_kind(Position::new(2, 0)), CellKind::Wall);
        assert_eq!(g.cell_kind(Position::new(0, 1)), CellKind::Wall);
        assert!(!g.is_passable(Position::new(5, 5)));
    }

    #[test]
    fn passable_excludes_walls() {
        let g = grid_from(&["S#E"]);
        assert!(g.is_passable(Position::new(0, 0)));
        assert!(!g.is_passable(Position::new(1, 0)));
        assert!(g.is_passable(Position::new(2, 0)));
    }

    #[test]
    fn neighbors_are_axis_aligned_and_filtered() {
        let g = grid_from(&[
            "S.#",
            ".#.",
            "..E",
        ]);
        let n: Vec<_> = g.neighbors(Position::new(0, 0)).collect();
        assert_eq!(n, vec![Position::new(1, 0), Position::new(0, 1)]);

        // (1,0): up is out of bounds, right is wall, down is wall
        let n: Vec<_> = g.neighbors(Position::new(1, 0)).collect();
        assert_eq!(n, vec![Position::new(0, 0)]);

        // no diagonals: (2,1) only sees (2,2)
        let n: Vec<_> = g.neighbors(Position::new(2, 1)).collect();
        assert_eq!(n, vec![Position::new(2, 2)]);
    }

    #[test]
    fn passable_positions_row_major() {
        let g = grid_from(&[
            "S#",
            ".E",
        ]);
        let p: Vec<_> = g.passable_positions().collect();
        assert_eq!(p, vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]);
    }

    #[test]
    fn missing_start_rejected() {
        let err = Grid::new(cells_from(&["..E"])).unwrap_err();
        assert!(matches!(err, MazeError::MissingStart));
        assert!(err.is_marker_error());
    }

    #[test]
    fn missing_exit_rejected() {
        let err = Grid::new(cells_from(&["S.."])).unwrap_err();
        assert!(matches!(err, MazeError::MissingExit));
    }

    #[test]
    fn duplicate_start_rejected() {
        let err = Grid::new(cells_from(&["S.S", "..E"])).unwrap_err();
        match err {
            MazeError::DuplicateStart { first, second } => {
                assert_eq!(first, Position::new(0, 0));
                assert_eq!(second, Position::new(2, 0));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_and_empty_rejected() {
        assert!(matches!(Grid::new(vec![]), Err(MazeError::Empty)));
        let err = Grid::new(cells_from(&["S..", ".E"])).unwrap_err();
        assert!(matches!(err, MazeError::RaggedRow { row: 1, expected: 3, found: 2 }));
        assert!(!err.is_marker_error());
    }
}
