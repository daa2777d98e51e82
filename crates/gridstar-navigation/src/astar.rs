/*

A* = f(n) = g(n) + h(n)

Where:
    n = a cell in the grid
    g(n) = cost from the start cell to n
    h(n) = octile distance from n to the goal
    f(n) = total estimated cost of the path through n

Initialize:
    - frontier holding only the start cell, f(start) = 0
    - every cell unvisited, no parents

Loop:
    - pop the cell with lowest f(n) (earliest insertion wins ties)
    - mark it visited; if it is the goal, walk the parents back to the start
    - for each of the 8 neighbors that is not a wall and not visited:
        - cost = base + step, where base is f(current) under the
          accumulated model and g(current) under the standard model
        - total = cost + h(neighbor)
        - if the neighbor is not queued yet, or total beats its f:
            record total, parent = current, and queue it

Visited cells are never reopened.

*/

//! A* search over a [`Grid`] with octile step costs.

mod frontier;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, NavigationError};
use crate::map::{Cell, Grid, GridCoord};
use frontier::Frontier;

/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_COST: u64 = 10;
/// Cost of a diagonal step: `10·√2` truncated.
pub const DIAGONAL_COST: u64 = 14;

/// How the tentative cost of a neighbor is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CostModel {
    /// The neighbor's cost-so-far is the current cell's total score plus the
    /// step cost, so heuristic terms pile up along the path. Deterministic
    /// but not always optimal.
    #[default]
    Accumulated,
    /// Textbook A*: `g(neighbor) = g(current) + step`, `f = g + h`.
    Standard,
}

impl fmt::Display for CostModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostModel::Accumulated => write!(f, "accumulated"),
            CostModel::Standard => write!(f, "standard"),
        }
    }
}

impl FromStr for CostModel {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accumulated" => Ok(CostModel::Accumulated),
            "standard" => Ok(CostModel::Standard),
            _ => Err(NavigationError::UnknownCostModel(s.to_string())),
        }
    }
}

/// Tunables for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AStarConfig {
    /// Cost accumulation rule.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_model: CostModel,
}

/// Represents the result of an A* pathfinding operation with metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathResult {
    /// The computed path from start to goal inclusive, if one was found.
    pub path: Option<Vec<GridCoord>>,
    /// Sum of the step costs along the path.
    pub total_cost: Option<u64>,
    /// The score the goal cell was finalized with.
    pub goal_score: Option<u64>,
    /// The number of cells expanded during the search.
    pub nodes_explored: usize,
    /// The length of the path (number of waypoints).
    pub path_length: usize,
}

impl PathResult {
    /// Creates a new PathResult for a successful path.
    pub fn success(path: Vec<GridCoord>, goal_score: u64, nodes_explored: usize) -> Self {
        let path_length = path.len();
        let total_cost = path_cost(&path);
        Self {
            path: Some(path),
            total_cost: Some(total_cost),
            goal_score: Some(goal_score),
            nodes_explored,
            path_length,
        }
    }

    /// Creates a new PathResult for a failed path search.
    pub fn failure(nodes_explored: usize) -> Self {
        Self {
            path: None,
            total_cost: None,
            goal_score: None,
            nodes_explored,
            path_length: 0,
        }
    }

    /// Returns true if a path was found.
    pub fn is_success(&self) -> bool {
        self.path.is_some()
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> usize {
        self.path_length.saturating_sub(1)
    }

    /// Returns the path if one was found.
    pub fn into_path(self) -> Option<Vec<GridCoord>> {
        self.path
    }
}

impl fmt::Display for PathResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(_) => write!(
                f,
                "PathResult {{ success: true, path_length: {}, total_cost: {}, nodes_explored: {} }}",
                self.path_length,
                self.total_cost.unwrap_or(0),
                self.nodes_explored
            ),
            None => write!(
                f,
                "PathResult {{ success: false, nodes_explored: {} }}",
                self.nodes_explored
            ),
        }
    }
}

/// Calculates the octile distance between two cells in step-cost units.
pub fn octile_distance(a: GridCoord, b: GridCoord) -> u64 {
    let dx = a.row.abs_diff(b.row) as u64;
    let dy = a.col.abs_diff(b.col) as u64;
    DIAGONAL_COST * dx.min(dy) + ORTHOGONAL_COST * dx.abs_diff(dy)
}

/// Cost of moving between two adjacent cells.
pub fn step_cost(from: GridCoord, to: GridCoord) -> u64 {
    match (from.row != to.row, from.col != to.col) {
        (true, true) => DIAGONAL_COST,
        (false, false) => 0,
        _ => ORTHOGONAL_COST,
    }
}

/// Sums the step costs along a path.
pub fn path_cost(path: &[GridCoord]) -> u64 {
    path.windows(2).map(|w| step_cost(w[0], w[1])).sum()
}

/// In-bounds neighbors of `p` with their step costs, in expansion order.
///
/// The row below comes first, then the row above, each as its orthogonal
/// cell followed by the left and right diagonals; then the left and right
/// cells of the same row.
fn neighbors(p: GridCoord, rows: usize, cols: usize) -> Vec<(GridCoord, u64)> {
    let GridCoord { row, col } = p;
    let has_left = col > 0;
    let has_right = col + 1 < cols;
    let mut neighbors_vec = Vec::with_capacity(8);

    let mut push_row = |r: usize| {
        neighbors_vec.push((GridCoord::new(r, col), ORTHOGONAL_COST));
        if has_left {
            neighbors_vec.push((GridCoord::new(r, col - 1), DIAGONAL_COST));
        }
        if has_right {
            neighbors_vec.push((GridCoord::new(r, col + 1), DIAGONAL_COST));
        }
    };
    if row + 1 < rows {
        push_row(row + 1);
    }
    if row > 0 {
        push_row(row - 1);
    }

    if has_left {
        neighbors_vec.push((GridCoord::new(row, col - 1), ORTHOGONAL_COST));
    }
    if has_right {
        neighbors_vec.push((GridCoord::new(row, col + 1), ORTHOGONAL_COST));
    }

    neighbors_vec
}

/// Reconstructs the path ending at `goal` from the parent links stored in
/// the grid.
///
/// Returns `[goal]` if the goal has no parent (it is the start, or was never
/// reached).
pub fn reconstruct_path(grid: &Grid, goal: GridCoord) -> Vec<GridCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(previous) = grid.cell(current).ok().flatten().and_then(Cell::parent) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    path
}

/// Search context for one A* run.
///
/// Holds the only mutable borrow of the grid for the duration of the run and
/// owns the frontier.
pub struct AStar<'g> {
    grid: &'g mut Grid,
    start: GridCoord,
    goal: GridCoord,
    config: AStarConfig,
    frontier: Frontier,
    nodes_explored: usize,
}

impl<'g> AStar<'g> {
    /// Prepares a search from `start` to `goal`.
    ///
    /// # Errors
    /// * `OutOfBounds` if either endpoint lies outside the grid.
    /// * `BlockedEndpoint` if either endpoint is a wall.
    /// * `StaleSearchState` if the grid was searched and not reset since.
    pub fn new(
        grid: &'g mut Grid,
        start: GridCoord,
        goal: GridCoord,
        config: AStarConfig,
    ) -> Result<Self, NavigationError> {
        validate_endpoint(grid, start, Endpoint::Start)?;
        validate_endpoint(grid, goal, Endpoint::Goal)?;
        if grid.has_search_state() {
            return Err(NavigationError::StaleSearchState);
        }

        Ok(AStar {
            grid,
            start,
            goal,
            config,
            frontier: Frontier::new(),
            nodes_explored: 0,
        })
    }

    /// Runs the search to completion.
    pub fn run(mut self) -> PathResult {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let goal = self.goal;

        debug!(
            start = %self.start,
            goal = %goal,
            cost_model = %self.config.cost_model,
            rows,
            cols,
            "Starting A* search"
        );

        self.grid.mark_searched();
        let start_index = self.grid.index(self.start);
        if let Some(cell) = self.grid.cell_at_mut(start_index) {
            cell.seed(octile_distance(self.start, goal));
        }
        self.frontier.push(start_index, 0);

        while let Some(entry) = self.frontier.pop() {
            let Some(cell) = self.grid.cell_at_mut(entry.index) else {
                continue;
            };
            if cell.is_visited() || cell.f_score() != entry.f_score {
                trace!(%entry, "Discarding superseded frontier entry");
                continue;
            }

            cell.finalize();
            let current = cell.coord();
            let current_f = cell.f_score();
            let current_g = cell.g_score();
            self.nodes_explored += 1;
            trace!(cell = %current, f_score = current_f, "Expanding cell");

            if current == goal {
                return self.finish(current_f);
            }

            for (neighbor, step) in neighbors(current, rows, cols) {
                self.relax(current, current_f, current_g, neighbor, step);
            }
        }

        debug!(
            nodes_explored = self.nodes_explored,
            "Frontier exhausted, no path found"
        );
        PathResult::failure(self.nodes_explored)
    }

    /// Updates `neighbor` if reaching it through `current` improves on what
    /// is known, or if it has not been discovered yet.
    fn relax(
        &mut self,
        current: GridCoord,
        current_f: u64,
        current_g: u64,
        neighbor: GridCoord,
        step: u64,
    ) {
        let goal = self.goal;
        let cost_model = self.config.cost_model;
        let index = self.grid.index(neighbor);

        // Walls have no cell
        let Some(cell) = self.grid.cell_at_mut(index) else {
            return;
        };
        if cell.is_visited() {
            return;
        }

        let h = cell.heuristic_or_insert_with(|coord| octile_distance(coord, goal));
        let cost = match cost_model {
            CostModel::Accumulated => current_f.saturating_add(step),
            CostModel::Standard => current_g.saturating_add(step),
        };
        let total = cost.saturating_add(h);

        if total < cell.f_score() || !cell.in_frontier() {
            cell.update(total, cost, current);
            trace!(cell = %neighbor, parent = %current, f_score = total, "Relaxed neighbor");
            self.frontier.push(index, total);
        }
    }

    fn finish(self, goal_score: u64) -> PathResult {
        let path = reconstruct_path(self.grid, self.goal);
        let result = PathResult::success(path, goal_score, self.nodes_explored);
        debug!(
            path_length = result.path_length,
            total_cost = ?result.total_cost,
            nodes_explored = result.nodes_explored,
            frontier_remaining = self.frontier.len(),
            "Path found"
        );
        result
    }
}

fn validate_endpoint(
    grid: &Grid,
    coord: GridCoord,
    endpoint: Endpoint,
) -> Result<(), NavigationError> {
    match grid.cell(coord)? {
        Some(_) => Ok(()),
        None => Err(NavigationError::BlockedEndpoint { endpoint, coord }),
    }
}

/// Finds a path from `start` to `goal` with the default configuration.
///
/// # Returns
/// * `Ok(Some(path))` - The path from start to goal inclusive.
/// * `Ok(None)` - The goal is unreachable.
/// * `Err(_)` - The request was invalid.
pub fn astar_search(
    grid: &mut Grid,
    start: GridCoord,
    goal: GridCoord,
) -> Result<Option<Vec<GridCoord>>, NavigationError> {
    let result = astar_search_detailed(grid, start, goal, AStarConfig::default())?;
    Ok(result.into_path())
}

/// Finds a path from `start` to `goal` and reports search metadata.
pub fn astar_search_detailed(
    grid: &mut Grid,
    start: GridCoord,
    goal: GridCoord,
    config: AStarConfig,
) -> Result<PathResult, NavigationError> {
    Ok(AStar::new(grid, start, goal, config)?.run())
}
