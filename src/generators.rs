use rand::Rng;
use tracing::trace;

use crate::cells::{CompassPrimary, GridCoordinate, Tile};
use crate::grid::Grid;
use crate::units::{ColumnIndex, RowIndex};

/// What a single run of the path growing generator produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthSummary {
    pub start_row: RowIndex,
    /// None when growth ran out of room before any corridor reached the last column.
    pub goal_row: Option<RowIndex>,
    /// Non-wall cells, the start included.
    pub path_cells: usize,
    /// Loop iterations that carved a new cell.
    pub cells_grown: usize,
    /// Loop iterations that retired a frontier cell with no legal extension.
    pub frontier_exhausted: usize,
}

impl GrowthSummary {
    #[inline]
    pub fn iterations(&self) -> usize {
        self.cells_grown + self.frontier_exhausted
    }

    #[inline]
    pub fn reached_exit(&self) -> bool {
        self.goal_row.is_some()
    }
}

/// Apply the path growing maze generation algorithm to a grid.
///
/// The grid is reset to walls, the start is placed in column 0 of `start_row`, and corridors are
/// grown one cell at a time from a randomly picked frontier cell. Each pick tries the four
/// directions clockwise from a random one and carves the first cell `can_place_path` accepts;
/// a frontier cell with no legal direction is retired for good.
///
/// The first carved cell to land in the last column becomes the goal. Growth carries on after
/// that until the frontier is empty so the maze fills the grid rather than leaving large voids
/// of wall.
///
/// Every carved cell touches exactly one existing corridor cell, so the corridors form a tree
/// rooted at the start: a perfect maze.
pub(crate) fn path_growing<R: Rng>(grid: &mut Grid, rng: &mut R, start_row: RowIndex) -> GrowthSummary {

    grid.fill_walls();

    let start = GridCoordinate::from_row_column_indices(ColumnIndex(0), start_row);
    grid.set_tile(start, Tile::Start);
    grid.set_start_row(start_row);

    let ColumnIndex(last_column) = grid.last_column();
    let mut goal_row = None;
    let mut cells_grown = 0;
    let mut frontier_exhausted = 0;
    let mut frontier = vec![start];

    while !frontier.is_empty() {

        let frontier_index = rng.gen_range(0..frontier.len());
        let current = frontier[frontier_index];
        let first_direction = CompassPrimary::from_index(rng.gen_range(0..4));

        let extension = CompassPrimary::clockwise_from(first_direction)
            .map(|dir| current.offset(dir))
            .find(|candidate| can_place_path(grid, *candidate));

        match extension {
            None => {
                // Nothing can ever grow from here again, neighbours only ever fill up.
                frontier.swap_remove(frontier_index);
                frontier_exhausted += 1;
            }
            Some(carved) => {
                let reached_exit = carved.x as usize == last_column && goal_row.is_none();
                if reached_exit {
                    let row = RowIndex(carved.y as usize);
                    grid.set_tile(carved, Tile::Goal);
                    grid.set_goal_row(row);
                    goal_row = Some(row);
                    trace!(goal_row = row.0, cells_grown, "exit column reached");
                } else {
                    grid.set_tile(carved, Tile::Path);
                }
                frontier.push(carved);
                cells_grown += 1;
            }
        }
    }

    GrowthSummary {
        start_row,
        goal_row,
        path_cells: cells_grown + 1,
        cells_grown,
        frontier_exhausted,
    }
}

/// Can a wall cell become a corridor without breaking the perfect maze?
///
/// - it must be inside the grid and currently a wall
/// - at most one of its cardinal neighbours may already be open, two would join separate
///   branches and close a loop
/// - an open diagonal neighbour is only allowed if one of the two cardinal cells between the
///   candidate and that diagonal is open, otherwise corridors would pinch together at a corner
pub fn can_place_path(grid: &Grid, candidate: GridCoordinate) -> bool {

    if grid.tile(candidate) != Some(Tile::Wall) {
        return false;
    }

    let is_open = |dir: CompassPrimary| grid.is_traversable(candidate.offset(dir));
    let up = is_open(CompassPrimary::North);
    let right = is_open(CompassPrimary::East);
    let down = is_open(CompassPrimary::South);
    let left = is_open(CompassPrimary::West);

    let open_sides = [up, right, down, left].iter().filter(|open| **open).count();
    if open_sides >= 2 {
        return false;
    }

    let diagonals = [(CompassPrimary::North, CompassPrimary::West, up || left),
                     (CompassPrimary::North, CompassPrimary::East, up || right),
                     (CompassPrimary::South, CompassPrimary::East, down || right),
                     (CompassPrimary::South, CompassPrimary::West, down || left)];

    diagonals.iter().all(|&(vertical, horizontal, supported)| {
        let diagonal = candidate.offset(vertical).offset(horizontal);
        supported || !grid.is_traversable(diagonal)
    })
}


#[cfg(test)]
mod tests {

    use quickcheck::{QuickCheck, TestResult};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::units::GridSize;

    fn grow(n: usize, seed: u64, start_row: usize) -> (Grid, GrowthSummary) {
        let mut grid = Grid::new(GridSize(n)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let summary = path_growing(&mut grid, &mut rng, RowIndex(start_row));
        (grid, summary)
    }

    fn has_open_square(grid: &Grid) -> bool {
        grid.iter().any(|c| {
            grid.is_traversable(c) &&
            grid.is_traversable(c.offset(CompassPrimary::East)) &&
            grid.is_traversable(c.offset(CompassPrimary::South)) &&
            grid.is_traversable(c.offset(CompassPrimary::East).offset(CompassPrimary::South))
        })
    }

    #[test]
    fn placement_refuses_out_of_bounds_and_open_cells() {
        let g = Grid::from_rows(&["S..",
                                  "###",
                                  "###"]);
        let gc = |x, y| GridCoordinate::new(x, y);
        assert!(!can_place_path(&g, gc(-1, 0)));
        assert!(!can_place_path(&g, gc(0, 3)));
        assert!(!can_place_path(&g, gc(1, 0)));
        assert!(!can_place_path(&g, gc(0, 0)));
    }

    #[test]
    fn placement_allows_a_single_open_neighbour() {
        let g = Grid::from_rows(&["S..",
                                  "###",
                                  "###"]);
        // directly below the corridor end, the open diagonal (1, 0) is supported by (2, 0)
        assert!(can_place_path(&g, GridCoordinate::new(2, 1)));
    }

    #[test]
    fn placement_refuses_joining_two_corridors() {
        let g = Grid::from_rows(&["S.#",
                                  "#.#",
                                  "..."]);
        // (0, 1) touches the start above and corridors to the east and below
        assert!(!can_place_path(&g, GridCoordinate::new(0, 1)));
    }

    #[test]
    fn placement_refuses_unsupported_diagonals() {
        let g = Grid::from_rows(&["S.#",
                                  "###",
                                  "###"]);
        // (2, 1) touches (1, 0) only through a corner
        assert!(!can_place_path(&g, GridCoordinate::new(2, 1)));
        // (0, 1) is below the start so the open corner (1, 0) is supported by the start
        assert!(can_place_path(&g, GridCoordinate::new(0, 1)));
    }

    #[test]
    fn placement_refuses_a_lone_diagonal_even_with_no_open_sides() {
        let g = Grid::from_rows(&["S##",
                                  "###",
                                  "###"]);
        assert!(!can_place_path(&g, GridCoordinate::new(1, 1)));
        assert!(can_place_path(&g, GridCoordinate::new(2, 2)));
    }

    #[test]
    fn start_is_in_column_zero_of_requested_row() {
        let (grid, summary) = grow(5, 7, 2);
        assert_eq!(summary.start_row, RowIndex(2));
        assert_eq!(grid.start_row(), Some(RowIndex(2)));
        assert_eq!(grid.tile(GridCoordinate::new(0, 2)), Some(Tile::Start));
        assert_eq!(grid.count_tiles(Tile::Start), 1);
    }

    #[test]
    fn small_grid_growth_is_bounded() {
        for seed in 0..64 {
            let n = 5;
            let (grid, summary) = grow(n, seed, 2);
            assert!(summary.cells_grown <= n * n);
            assert_eq!(summary.frontier_exhausted, summary.path_cells);
            assert_eq!(summary.iterations(), 2 * summary.path_cells - 1);
            assert!(summary.iterations() <= 2 * n * n);
            assert_eq!(summary.path_cells, grid.size() - grid.count_tiles(Tile::Wall));
        }
    }

    #[test]
    fn first_arrival_in_last_column_is_the_only_goal() {
        for seed in 0..32 {
            let (grid, summary) = grow(12, seed, 5);
            if let Some(goal_row) = summary.goal_row {
                assert_eq!(grid.goal_row(), Some(goal_row));
                assert_eq!(grid.count_tiles(Tile::Goal), 1);
                let goal = GridCoordinate::from_row_column_indices(ColumnIndex(11), goal_row);
                assert_eq!(grid.tile(goal), Some(Tile::Goal));
            } else {
                assert_eq!(grid.count_tiles(Tile::Goal), 0);
            }
        }
    }

    #[test]
    fn two_by_two_grid_always_reaches_exit() {
        for start in 0..2 {
            let (grid, summary) = grow(2, 3, start);
            assert!(summary.reached_exit());
            assert_eq!(grid.count_tiles(Tile::Goal), 1);
        }
    }

    #[test]
    fn regrowing_leaves_nothing_behind() {
        let mut grid = Grid::new(GridSize(10)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let _ = path_growing(&mut grid, &mut rng, RowIndex(0));
        let second = path_growing(&mut grid, &mut rng, RowIndex(9));
        assert_eq!(grid.count_tiles(Tile::Start), 1);
        assert_eq!(grid.start_row(), Some(RowIndex(9)));
        assert!(grid.count_tiles(Tile::Goal) <= 1);
        assert_eq!(second.path_cells, grid.size() - grid.count_tiles(Tile::Wall));
    }

    #[test]
    fn no_open_squares_quickcheck() {
        fn prop(seed: u64, size: u8, start: u8) -> TestResult {
            let n = (size % 30) as usize + 2;
            let (grid, summary) = grow(n, seed, start as usize % n);
            TestResult::from_bool(!has_open_square(&grid) &&
                                  summary.path_cells ==
                                  grid.size() - grid.count_tiles(Tile::Wall))
        }
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop as fn(u64, u8, u8) -> TestResult);
    }
}
