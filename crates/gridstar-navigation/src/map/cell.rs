//! Grid coordinates and walkable cells.
//!
//! A [`Cell`] only exists for walkable positions; a wall is the absence of a
//! cell at a coordinate. Each cell carries the search state written by
//! [`AStar`](crate::astar::AStar) during a single run.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `(row, col)` position on the grid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridCoord {
    /// Row index, in `[0, rows)`.
    pub row: usize,
    /// Column index, in `[0, cols)`.
    pub col: usize,
}

impl GridCoord {
    /// Construct a new coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        GridCoord { row, col }
    }
}

impl From<(usize, usize)> for GridCoord {
    fn from((row, col): (usize, usize)) -> Self {
        GridCoord { row, col }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A walkable grid cell and its search state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    coord: GridCoord,
    /// Octile distance to the goal of the current run, filled in lazily.
    heuristic: Option<u64>,
    /// Total score `f`; only meaningful once the cell has been enqueued.
    f_score: u64,
    /// Cost-so-far along the parent chain, used by the standard cost model.
    g_score: u64,
    visited: bool,
    in_frontier: bool,
    parent: Option<GridCoord>,
}

impl Cell {
    /// Creates a fresh cell with no search state.
    pub fn new(coord: GridCoord) -> Self {
        Cell {
            coord,
            heuristic: None,
            f_score: 0,
            g_score: 0,
            visited: false,
            in_frontier: false,
            parent: None,
        }
    }

    /// Position of this cell.
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Cached distance-to-goal estimate, if the last run computed one.
    pub fn heuristic(&self) -> Option<u64> {
        self.heuristic
    }

    /// Total score assigned by the last run.
    pub fn f_score(&self) -> u64 {
        self.f_score
    }

    /// Cost-so-far assigned by the last run.
    pub fn g_score(&self) -> u64 {
        self.g_score
    }

    /// Whether the cell has been expanded (finalized).
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the cell currently sits in the frontier.
    pub fn in_frontier(&self) -> bool {
        self.in_frontier
    }

    /// Predecessor on the best known path, `None` for the start cell and
    /// for cells never reached.
    pub fn parent(&self) -> Option<GridCoord> {
        self.parent
    }

    /// Returns whether any search has written to this cell.
    pub fn has_search_state(&self) -> bool {
        self.visited || self.in_frontier || self.parent.is_some() || self.heuristic.is_some()
    }

    /// Clears all search state.
    pub fn reset(&mut self) {
        *self = Cell::new(self.coord);
    }

    pub(crate) fn heuristic_or_insert_with(&mut self, f: impl FnOnce(GridCoord) -> u64) -> u64 {
        let coord = self.coord;
        *self.heuristic.get_or_insert_with(|| f(coord))
    }

    pub(crate) fn seed(&mut self, heuristic: u64) {
        self.heuristic = Some(heuristic);
        self.f_score = 0;
        self.g_score = 0;
        self.parent = None;
        self.in_frontier = true;
    }

    pub(crate) fn update(&mut self, f_score: u64, g_score: u64, parent: GridCoord) {
        debug_assert!(!self.visited, "finalized cells are never relaxed");
        self.f_score = f_score;
        self.g_score = g_score;
        self.parent = Some(parent);
        self.in_frontier = true;
    }

    pub(crate) fn finalize(&mut self) {
        self.visited = true;
        self.in_frontier = false;
    }
}
