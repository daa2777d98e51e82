//! Occupancy grid implementation for path planning.
//!
//! The grid is a row-major arena of `Option<Cell>`: `Some` for walkable
//! positions, `None` for walls. Cells hold the per-run search state, so a grid
//! must be reset before it is searched again.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use tracing::debug;

use super::cell::{Cell, GridCoord};
use crate::error::NavigationError;

/// Text used for walkable cells in [`Grid`]'s textual layout.
pub const OPEN_CHAR: char = '.';
/// Text used for walls in [`Grid`]'s textual layout.
pub const WALL_CHAR: char = '#';

/// A 2-D field of walkable cells and walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Cell>>,
    /// Set once a search has been started on this grid.
    searched: bool,
}

impl Grid {
    /// Creates a grid where every cell is walkable.
    ///
    /// # Errors
    /// * `InvalidDimensions` if either dimension is zero or the cell count overflows.
    pub fn new(rows: usize, cols: usize) -> Result<Self, NavigationError> {
        if rows == 0 || cols == 0 {
            return Err(NavigationError::InvalidDimensions(
                "All dimensions must be non-zero",
            ));
        }

        let total_cells = rows
            .checked_mul(cols)
            .ok_or(NavigationError::InvalidDimensions(
                "Grid dimensions too large, would cause overflow",
            ))?;

        let cells = (0..total_cells)
            .map(|i| Some(Cell::new(GridCoord::new(i / cols, i % cols))))
            .collect();

        Ok(Grid {
            rows,
            cols,
            cells,
            searched: false,
        })
    }

    /// Creates a grid with walls at the given coordinates.
    pub fn from_walls<I>(rows: usize, cols: usize, walls: I) -> Result<Self, NavigationError>
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut grid = Grid::new(rows, cols)?;
        for wall in walls {
            grid.set_wall(wall)?;
        }
        Ok(grid)
    }

    /// Creates a grid where each cell independently becomes a wall with
    /// probability `wall_probability`.
    ///
    /// Cells in `keep_open` (typically the start and goal) are always walkable.
    pub fn with_random_walls<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        wall_probability: f64,
        rng: &mut R,
        keep_open: &[GridCoord],
    ) -> Result<Self, NavigationError> {
        if !(0.0..=1.0).contains(&wall_probability) {
            return Err(NavigationError::InvalidWallProbability(wall_probability));
        }

        let mut grid = Grid::new(rows, cols)?;
        for &coord in keep_open {
            grid.check_bounds(coord)?;
        }

        for index in 0..grid.cells.len() {
            if rng.random_bool(wall_probability) {
                grid.cells[index] = None;
            }
        }
        for &coord in keep_open {
            grid.clear_wall(coord)?;
        }

        debug!(
            rows,
            cols,
            wall_probability,
            walls = grid.wall_count(),
            "Generated random grid"
        );
        Ok(grid)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if `coord` lies inside the grid.
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Looks up a cell: `Some` for a walkable cell, `None` for a wall.
    ///
    /// # Errors
    /// * `OutOfBounds` if `coord` is outside the grid.
    pub fn cell(&self, coord: GridCoord) -> Result<Option<&Cell>, NavigationError> {
        self.check_bounds(coord)?;
        Ok(self.cells[self.index(coord)].as_ref())
    }

    /// Returns true if `coord` is inside the grid and not a wall.
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.contains(coord) && self.cells[self.index(coord)].is_some()
    }

    /// Turns a cell into a wall.
    pub fn set_wall(&mut self, coord: GridCoord) -> Result<(), NavigationError> {
        self.check_bounds(coord)?;
        let index = self.index(coord);
        self.cells[index] = None;
        Ok(())
    }

    /// Turns a cell into a fresh walkable cell.
    pub fn clear_wall(&mut self, coord: GridCoord) -> Result<(), NavigationError> {
        self.check_bounds(coord)?;
        let index = self.index(coord);
        if self.cells[index].is_none() {
            self.cells[index] = Some(Cell::new(coord));
        }
        Ok(())
    }

    /// Number of walls in the grid.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Iterates over all walkable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Returns true if a search has run since the last reset.
    pub fn has_search_state(&self) -> bool {
        self.searched
    }

    /// Clears every cell's search state so the grid can be searched again.
    pub fn reset_search_state(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.reset();
        }
        self.searched = false;
    }

    pub(crate) fn mark_searched(&mut self) {
        self.searched = true;
    }

    /// Calculates the linear index of a coordinate. Callers check bounds.
    pub(crate) fn index(&self, coord: GridCoord) -> usize {
        coord.row * self.cols + coord.col
    }

    pub(crate) fn cell_at_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    fn check_bounds(&self, coord: GridCoord) -> Result<(), NavigationError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(NavigationError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl FromStr for Grid {
    type Err = NavigationError;

    /// Parses a layout with one line per row, `.` for walkable cells and `#`
    /// for walls. Blank lines and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        if rows == 0 || cols == 0 {
            return Err(NavigationError::InvalidLayout("layout is empty".into()));
        }

        let mut grid = Grid::new(rows, cols)?;
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(NavigationError::InvalidLayout(format!(
                    "row {row} has {width} cells, expected {cols}"
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    OPEN_CHAR => {}
                    WALL_CHAR => grid.set_wall(GridCoord::new(row, col))?,
                    other => {
                        return Err(NavigationError::InvalidLayout(format!(
                            "unexpected character '{other}' at ({row}, {col})"
                        )));
                    }
                }
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let ch = if self.is_walkable(GridCoord::new(row, col)) {
                    OPEN_CHAR
                } else {
                    WALL_CHAR
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
