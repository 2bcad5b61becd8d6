use error_chain::bail;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;
use tracing::{debug, warn};

use crate::cells::{GridCoordinate, Tile};
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::grid_traits::GridDisplay;
use crate::pathing;
use crate::units::{GridSize, RowIndex};
use crate::waypoints::Waypoints;

/// How many times generation restarts from a fresh start row before giving up on a maze that
/// never reached the exit column.
pub const MAX_GENERATION_ATTEMPTS: usize = 32;

/// A maze grid, the randomness that grows it, and the route through it once solved.
///
/// Owned by whoever drives the generate, solve and drain cycle and lent to anything that needs
/// to look at the tiles.
#[derive(Debug)]
pub struct Maze<R: Rng = StdRng> {
    grid: Grid,
    rng: R,
    waypoints: Option<Waypoints>,
}

impl Maze<StdRng> {
    /// A maze seeded from the operating system's entropy source.
    pub fn new(size: GridSize) -> Result<Maze<StdRng>> {
        Maze::with_rng(size, StdRng::from_entropy())
    }

    /// A maze that generates the same sequence of mazes for the same seed.
    pub fn with_seed(size: GridSize, seed: u64) -> Result<Maze<StdRng>> {
        Maze::with_rng(size, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Maze<R> {
    /// An all wall grid with nothing generated or solved yet.
    pub fn with_rng(size: GridSize, rng: R) -> Result<Maze<R>> {
        Ok(Maze {
            grid: Grid::new(size)?,
            rng,
            waypoints: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Attach or clear the text rendering overlay. Tiles can only change through
    /// `generate_maze`.
    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid.set_grid_display(grid_display);
    }

    #[inline]
    pub fn tile(&self, coord: GridCoordinate) -> Option<Tile> {
        self.grid.tile(coord)
    }

    #[inline]
    pub fn start_row(&self) -> Option<RowIndex> {
        self.grid.start_row()
    }

    #[inline]
    pub fn goal_row(&self) -> Option<RowIndex> {
        self.grid.goal_row()
    }

    /// Grow a new maze over the whole grid, discarding the old maze and any unconsumed route.
    ///
    /// The start row is random. Should growth run dry before a corridor reaches the last column
    /// it is retried from a new start row, up to `MAX_GENERATION_ATTEMPTS` times, after which
    /// `NoExitReached` is returned and the grid is left all wall.
    pub fn generate_maze(&mut self) -> Result<()> {
        self.generate_within(MAX_GENERATION_ATTEMPTS)
    }

    fn generate_within(&mut self, max_attempts: usize) -> Result<()> {
        self.waypoints = None;
        let GridSize(n) = self.grid.dimension();

        for attempt in 1..=max_attempts {
            let start_row = RowIndex(self.rng.gen_range(0..n));
            let summary = generators::path_growing(&mut self.grid, &mut self.rng, start_row);

            if let Some(goal_row) = summary.goal_row {
                debug!(attempt,
                       start_row = start_row.0,
                       goal_row = goal_row.0,
                       path_cells = summary.path_cells,
                       iterations = summary.iterations(),
                       "maze generated");
                return Ok(());
            }
            warn!(attempt,
                  start_row = start_row.0,
                  path_cells = summary.path_cells,
                  "maze growth never reached the exit column");
        }

        // Drop the half grown maze so nothing can be solved from it.
        self.grid.fill_walls();
        bail!(ErrorKind::NoExitReached(max_attempts))
    }

    /// Find the shortest route through the current maze and queue it up as waypoints.
    ///
    /// On failure the maze is left unsolved and `pop_next_waypoint` yields nothing.
    pub fn solve(&mut self) -> Result<()> {
        self.waypoints = None;

        let route = pathing::shortest_path(&self.grid)?;
        let (start_row, goal_row) = match (self.grid.start_row(), self.grid.goal_row()) {
            (Some(start_row), Some(goal_row)) => (start_row, goal_row),
            _ => bail!(ErrorKind::Unsolved),
        };
        self.waypoints = Some(Waypoints::from_route(&route,
                                                    self.grid.dimension(),
                                                    start_row,
                                                    goal_row));
        Ok(())
    }

    #[inline]
    pub fn is_solved(&self) -> bool {
        self.waypoints.is_some()
    }

    /// The waypoints not yet popped, if solved.
    #[inline]
    pub fn waypoints(&self) -> Option<&Waypoints> {
        self.waypoints.as_ref()
    }

    /// The next cell of the route. None if the maze was never solved or the route is used up.
    #[inline]
    pub fn pop_next_waypoint(&mut self) -> Option<GridCoordinate> {
        self.waypoints.as_mut().and_then(Waypoints::pop_next)
    }
}
