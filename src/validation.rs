use bit_set::BitSet;
use error_chain::bail;

use crate::cells::{CompassPrimary, GridCoordinate, Tile};
use crate::errors::*;
use crate::grid::Grid;
use crate::units::{ColumnIndex, RowIndex};

/// Shape of a maze that passed `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeSummary {
    pub start_row: RowIndex,
    pub goal_row: RowIndex,
    /// Non-wall cells.
    pub path_cells: usize,
    /// Pairs of cardinally adjacent non-wall cells.
    pub links: usize,
}

/// Check that a grid holds a perfect maze with one entry and one exit.
///
/// - exactly one Start, in column 0 of the recorded start row
/// - exactly one Goal, in the last column of the recorded goal row
/// - every open cell can be walked to from the Start
/// - the open cells form a tree: one fewer link than cells, so no loops
/// - no 2 * 2 block is entirely open
pub fn validate(grid: &Grid) -> Result<MazeSummary> {

    let start_row = check_endpoint(grid, Tile::Start, grid.start_row(), ColumnIndex(0))?;
    let goal_row = check_endpoint(grid, Tile::Goal, grid.goal_row(), grid.last_column())?;

    let path_cells = grid.iter().filter(|c| grid.is_traversable(*c)).count();
    let links = grid.iter()
        .filter(|c| grid.is_traversable(*c))
        .map(|c| {
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter(|dir| grid.is_traversable(c.offset(**dir)))
                .count()
        })
        .sum::<usize>();

    if let Some(corner) = grid.iter().find(|c| is_open_square(grid, *c)) {
        bail!(ErrorKind::MalformedMaze(format!("open 2x2 block at {:?}", corner)));
    }

    let start = GridCoordinate::from_row_column_indices(ColumnIndex(0), start_row);
    let reachable = reachable_count(grid, start);
    if reachable != path_cells {
        bail!(ErrorKind::MalformedMaze(format!("{} of {} open cells reachable from the start",
                                               reachable,
                                               path_cells)));
    }

    if links + 1 != path_cells {
        bail!(ErrorKind::MalformedMaze(format!("{} links between {} open cells form a loop",
                                               links,
                                               path_cells)));
    }

    Ok(MazeSummary {
        start_row,
        goal_row,
        path_cells,
        links,
    })
}

fn check_endpoint(grid: &Grid,
                  tile: Tile,
                  recorded_row: Option<RowIndex>,
                  column: ColumnIndex)
                  -> Result<RowIndex> {
    let row = match recorded_row {
        Some(row) => row,
        None => bail!(ErrorKind::MalformedMaze(format!("no {:?} row recorded", tile))),
    };
    let count = grid.count_tiles(tile);
    if count != 1 {
        bail!(ErrorKind::MalformedMaze(format!("{} {:?} tiles", count, tile)));
    }
    let coord = GridCoordinate::from_row_column_indices(column, row);
    if grid.tile(coord) != Some(tile) {
        bail!(ErrorKind::MalformedMaze(format!("{:?} is not at {:?}", tile, coord)));
    }
    Ok(row)
}

fn is_open_square(grid: &Grid, top_left: GridCoordinate) -> bool {
    let right = top_left.offset(CompassPrimary::East);
    let below = top_left.offset(CompassPrimary::South);
    let diagonal = right.offset(CompassPrimary::South);
    [top_left, right, below, diagonal].iter().all(|c| grid.is_traversable(*c))
}

fn reachable_count(grid: &Grid, start: GridCoordinate) -> usize {
    let mut visited = BitSet::with_capacity(grid.size());
    let mut stack = vec![start];
    while let Some(coord) = stack.pop() {
        let index = match grid.grid_coordinate_to_index(coord) {
            Some(index) => index,
            None => continue,
        };
        if !visited.insert(index) {
            continue;
        }
        stack.extend(grid.traversable_neighbours(coord).iter().cloned());
    }
    visited.len()
}

#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::generators;
    use crate::units::GridSize;

    fn expect_malformed(grid: &Grid) -> String {
        match validate(grid) {
            Err(Error(ErrorKind::MalformedMaze(reason), _)) => reason,
            other => panic!("expected a malformed maze, got {:?}", other),
        }
    }

    #[test]
    fn simple_perfect_maze() {
        let g = Grid::from_rows(&["S.#",
                                  "#..",
                                  "##E"]);
        let summary = validate(&g).unwrap();
        assert_eq!(summary,
                   MazeSummary {
                       start_row: RowIndex(0),
                       goal_row: RowIndex(2),
                       path_cells: 5,
                       links: 4,
                   });
    }

    #[test]
    fn loops_are_rejected() {
        let g = Grid::from_rows(&["S...",
                                  ".##.",
                                  "....",
                                  "###E"]);
        assert!(expect_malformed(&g).contains("loop"));
    }

    #[test]
    fn open_squares_are_rejected() {
        let g = Grid::from_rows(&["S.#",
                                  "...",
                                  "##E"]);
        assert!(expect_malformed(&g).contains("2x2"));
    }

    #[test]
    fn islands_are_rejected() {
        let g = Grid::from_rows(&["S.#.",
                                  "#..#",
                                  "##..",
                                  "#.#E"]);
        assert!(expect_malformed(&g).contains("reachable"));
    }

    #[test]
    fn missing_goal_is_rejected() {
        let g = Grid::from_rows(&["S..",
                                  "###",
                                  "###"]);
        assert!(expect_malformed(&g).contains("Goal"));
    }

    #[test]
    fn generated_mazes_validate() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut grid = Grid::new(GridSize(40)).unwrap();
        for start in 0..40 {
            let summary = generators::path_growing(&mut grid, &mut rng, RowIndex(start));
            if summary.reached_exit() {
                let checked = validate(&grid).unwrap();
                assert_eq!(checked.path_cells, summary.path_cells);
                assert_eq!(checked.start_row, RowIndex(start));
            }
        }
    }
}
