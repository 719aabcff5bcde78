/// Agent route planning: shortest path over the grid graph.
///
/// Nodes are the passable cells; edges join 4-neighbors. The weight of an
/// edge is the planning cost of the cell it enters (see `rules::edge_cost`),
/// which is negative for Bonus cells.
///
/// The search is a plain "pop the unvisited node with the smallest
/// tentative distance" relaxation:
///   - a node, once popped, is final and is never relaxed again;
///   - the search stops as soon as the target is popped;
///   - ties go to the first node in row-major order.
///
/// With negative Bonus weights the popped-is-final rule does not always
/// produce the cheapest route. That is the intended planning behavior,
/// not something to correct here.
///
/// Nothing is cached between calls: the route is recomputed from the
/// agent's current position every tick, so Bonus cells the agent already
/// consumed still look attractive to the planner.

use super::grid::{Grid, Position};
use super::rules;

/// Route from `from` to `to`, both endpoints included.
///
/// Returns an empty vec when `to` cannot be reached, and `[from]` when
/// `from == to`. Callers treat anything shorter than two cells as
/// "no path".
pub fn shortest_path(grid: &Grid, from: Position, to: Position) -> Vec<Position> {
    if !grid.is_passable(from) || !grid.is_passable(to) {
        return vec![];
    }

    let (w, h) = (grid.width(), grid.height());
    let mut dist: Vec<Vec<Option<i64>>> = vec![vec![None; w]; h];
    let mut prev: Vec<Vec<Option<Position>>> = vec![vec![None; w]; h];
    let mut visited = vec![vec![false; w]; h];
    let mut unvisited: Vec<Position> = grid.passable_positions().collect();

    dist[from.y][from.x] = Some(0);

    loop {
        // Smallest finite tentative distance; min_by_key keeps the first on ties.
        let next = unvisited
            .iter()
            .enumerate()
            .filter_map(|(i, p)| dist[p.y][p.x].map(|d| (i, d)))
            .min_by_key(|&(_, d)| d);

        // Only unreachable nodes left.
        let (idx, current_dist) = match next {
            Some(n) => n,
            None => break,
        };

        let current = unvisited.remove(idx);
        visited[current.y][current.x] = true;

        if current == to {
            break;
        }

        for n in grid.neighbors(current) {
            if visited[n.y][n.x] {
                continue;
            }
            let candidate = current_dist + rules::edge_cost(grid.cell_kind(n));
            let improves = dist[n.y][n.x].map_or(true, |old| candidate < old);
            if improves {
                dist[n.y][n.x] = Some(candidate);
                prev[n.y][n.x] = Some(current);
            }
        }
    }

    if dist[to.y][to.x].is_none() {
        return vec![];
    }

    // Predecessors always point at nodes popped earlier, so this terminates at `from`.
    let mut path = vec![to];
    let mut at = to;
    while let Some(p) = prev[at.y][at.x] {
        path.push(p);
        at = p;
    }
    path.reverse();
    path
}

/// Planning cost of a route: sum of edge costs of every cell after the first.
pub fn path_cost(grid: &Grid, path: &[Position]) -> i64 {
    path.iter()
        .skip(1)
        .map(|&p| rules::edge_cost(grid.cell_kind(p)))
        .sum()
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
