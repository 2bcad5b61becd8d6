use error_chain::bail;
use std::fmt;
use std::rc::Rc;

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate, Tile};
use crate::errors::*;
use crate::grid_iterators::{BatchIter, CellIter};
use crate::grid_traits::GridDisplay;
use crate::units::{ColumnIndex, GridSize, RowIndex, MIN_GRID_SIZE};


/// An N * N tile matrix plus the rows where the maze is entered and left.
///
/// Adjacency is never stored: two cells are connected when they are cardinal neighbours and
/// neither is a wall.
pub struct Grid {
    tiles: Vec<Tile>,
    dimension: usize,
    start_row: Option<RowIndex>,
    goal_row: Option<RowIndex>,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: dimension: {:?}, start_row: {:?}, goal_row: {:?}",
               self.dimension, self.start_row, self.goal_row)
    }
}

impl Clone for Grid {
    fn clone(&self) -> Grid {
        Grid {
            tiles: self.tiles.clone(),
            dimension: self.dimension,
            start_row: self.start_row,
            goal_row: self.goal_row,
            grid_display: self.grid_display.clone(),
        }
    }
}

impl Grid {
    /// An all wall grid. Fails for sizes that cannot fit distinct entry and exit columns.
    pub fn new(size: GridSize) -> Result<Grid> {
        let GridSize(dimension) = size;
        if dimension < MIN_GRID_SIZE {
            bail!(ErrorKind::InvalidGridSize(dimension));
        }

        Ok(Grid {
            tiles: vec![Tile::Wall; dimension * dimension],
            dimension,
            start_row: None,
            goal_row: None,
            grid_display: None,
        })
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    /// Number of cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    /// Side length N.
    #[inline]
    pub fn dimension(&self) -> GridSize {
        GridSize(self.dimension)
    }

    #[inline]
    pub fn last_column(&self) -> ColumnIndex {
        ColumnIndex(self.dimension - 1)
    }

    #[inline]
    pub fn start_row(&self) -> Option<RowIndex> {
        self.start_row
    }

    #[inline]
    pub fn goal_row(&self) -> Option<RowIndex> {
        self.goal_row
    }

    pub fn start_coordinate(&self) -> Option<GridCoordinate> {
        self.start_row
            .map(|row| GridCoordinate::from_row_column_indices(ColumnIndex(0), row))
    }

    pub fn goal_coordinate(&self) -> Option<GridCoordinate> {
        self.goal_row
            .map(|row| GridCoordinate::from_row_column_indices(self.last_column(), row))
    }

    /// The tile at a coordinate, or None outside the grid.
    #[inline]
    pub fn tile(&self, coord: GridCoordinate) -> Option<Tile> {
        self.grid_coordinate_to_index(coord).map(|index| self.tiles[index])
    }

    /// In bounds and not a wall.
    #[inline]
    pub fn is_traversable(&self, coord: GridCoordinate) -> bool {
        self.tile(coord).map_or(false, Tile::is_traversable)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        let n = self.dimension as isize;
        coord.x >= 0 && coord.x < n && coord.y >= 0 && coord.y < n
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.dimension + coord.x as usize)
        } else {
            None
        }
    }

    /// Cells to the North, East, South or West of a cell that lie inside the grid, whatever
    /// their tile.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::all()
            .iter()
            .map(|dir| coord.offset(*dir))
            .filter(|adjacent| self.is_valid_coordinate(*adjacent))
            .collect()
    }

    /// Cardinal neighbours that can be walked onto.
    pub fn traversable_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::all()
            .iter()
            .map(|dir| coord.offset(*dir))
            .filter(|adjacent| self.is_traversable(*adjacent))
            .collect()
    }

    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.dimension())
    }

    #[inline]
    pub fn iter_row(&self) -> BatchIter {
        BatchIter::new(self.dimension())
    }

    /// Walls everywhere and no recorded entry or exit.
    pub(crate) fn fill_walls(&mut self) {
        for tile in self.tiles.iter_mut() {
            *tile = Tile::Wall;
        }
        self.start_row = None;
        self.goal_row = None;
    }

    /// Returns false if the coordinate is outside the grid.
    pub(crate) fn set_tile(&mut self, coord: GridCoordinate, tile: Tile) -> bool {
        if let Some(index) = self.grid_coordinate_to_index(coord) {
            self.tiles[index] = tile;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_start_row(&mut self, row: RowIndex) {
        self.start_row = Some(row);
    }

    pub(crate) fn set_goal_row(&mut self, row: RowIndex) {
        self.goal_row = Some(row);
    }
}

#[cfg(test)]
impl Grid {
    /// Builds a grid from text rows: `#` wall, `.` path, `S` start, `E` goal.
    /// Start and goal rows are read off the `S` and `E` positions.
    pub(crate) fn from_rows(rows: &[&str]) -> Grid {
        let mut grid = Grid::new(GridSize(rows.len())).expect("grid too small");
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.chars().count(), rows.len(), "grid rows must be square");
            for (x, c) in row.chars().enumerate() {
                let coord = GridCoordinate::new(x as isize, y as isize);
                let tile = match c {
                    '#' => Tile::Wall,
                    '.' => Tile::Path,
                    'S' => {
                        grid.set_start_row(RowIndex(y));
                        Tile::Start
                    }
                    'E' => {
                        grid.set_goal_row(RowIndex(y));
                        Tile::Goal
                    }
                    other => panic!("unknown tile character {:?}", other),
                };
                grid.set_tile(coord, tile);
            }
        }
        grid
    }
}
