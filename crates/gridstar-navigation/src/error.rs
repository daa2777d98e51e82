//! This module defines the error types used by the `gridstar-navigation` crate.

use crate::map::GridCoord;
use core::fmt;

/// Which end of a search request a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The cell the search starts from.
    Start,
    /// The cell the search is trying to reach.
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "Start"),
            Endpoint::Goal => write!(f, "Goal"),
        }
    }
}

/// Error type for navigation operations.
///
/// This enum covers invalid grid construction and malformed search requests.
/// An unreachable goal is not an error: it is reported through
/// [`PathResult::failure`](crate::astar::PathResult::failure).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavigationError {
    /// Returned when a grid has a zero dimension or too many cells to allocate.
    #[error("Invalid grid dimensions: {0}")]
    InvalidDimensions(&'static str),
    /// Returned when a coordinate lies outside the grid.
    #[error("Cell {coord} is out of bounds for a {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: GridCoord,
        /// Number of rows in the grid.
        rows: usize,
        /// Number of columns in the grid.
        cols: usize,
    },
    /// Returned when the start or goal of a search is a wall.
    #[error("{endpoint} cell {coord} is blocked")]
    BlockedEndpoint {
        /// Which endpoint is blocked.
        endpoint: Endpoint,
        /// Its coordinate.
        coord: GridCoord,
    },
    /// Returned when a search is started on a grid that still holds the
    /// state of a previous run.
    #[error("Grid holds state from a previous search; call reset_search_state first")]
    StaleSearchState,
    /// Returned when a random wall probability is outside `[0, 1]`.
    #[error("Invalid wall probability {0}: must be within [0, 1]")]
    InvalidWallProbability(f64),
    /// Returned when a textual grid layout cannot be parsed.
    #[error("Invalid grid layout: {0}")]
    InvalidLayout(String),
    /// Returned when a cost model name is not recognised.
    #[error("Unknown cost model '{0}', expected 'accumulated' or 'standard'")]
    UnknownCostModel(String),
}
