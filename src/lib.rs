//! **mazepath** grows perfect mazes on a square tile grid and finds the route through them with
//! A*, handing the route out one waypoint at a time to whatever is walking it.
//!
//! ```no_run
//! use mazepath::{maze::Maze, units::{GridSize, DEFAULT_GRID_SIZE}};
//!
//! # fn main() -> mazepath::errors::Result<()> {
//! let mut maze = Maze::new(GridSize(DEFAULT_GRID_SIZE))?;
//! maze.generate_maze()?;
//! maze.solve()?;
//! while let Some(waypoint) = maze.pop_next_waypoint() {
//!     println!("{:?}", waypoint);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod grid_traits;
pub mod maze;
pub mod pathing;
pub mod units;
pub mod validation;
pub mod waypoints;
mod utils;
