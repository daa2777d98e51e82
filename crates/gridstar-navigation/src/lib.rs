#![warn(missing_docs)]
#![doc = "A* shortest-path search over 8-connected occupancy grids."]
#![doc = ""]
#![doc = "Cells are walkable or walls. Moves cost 10 orthogonally and 14 diagonally,"]
#![doc = "and the octile distance to the goal serves as the heuristic."]

pub mod astar;
pub mod error;
pub mod map;

pub use astar::{AStar, AStarConfig, CostModel, PathResult, astar_search, astar_search_detailed};
pub use error::{Endpoint, NavigationError};
pub use map::{Cell, Grid, GridCoord};
