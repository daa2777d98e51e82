//! Grid-related functionality for navigation.
//!
//! This module provides the occupancy grid searched by [`crate::astar`]
//! and the per-cell search state it carries.

pub mod cell;
pub mod grid;

pub use cell::{Cell, GridCoord};
pub use grid::Grid;
