use smallvec::SmallVec;
use std::convert::From;

use crate::units::{ColumnIndex, RowIndex};

/// A cell position on (or just outside) a grid.
///
/// Signed so that the virtual cells either side of the grid, column -1 before the Start and
/// column N after the Goal, can be handed out as waypoints.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: isize,
    pub y: isize,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

impl GridCoordinate {
    pub fn new(x: isize, y: isize) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> GridCoordinate {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as isize, row as isize)
    }

    /// The coordinate one cell away in the given direction. No bounds are applied.
    #[inline]
    pub fn offset(self, dir: CompassPrimary) -> GridCoordinate {
        let (dx, dy) = dir.delta();
        GridCoordinate::new(self.x + dx, self.y + dy)
    }

    /// Steps needed to walk from `self` to `other` on a 4-connected grid ignoring walls.
    #[inline]
    pub fn manhattan_distance(self, other: GridCoordinate) -> usize {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as usize
    }

    /// Is `other` exactly one unit away along exactly one axis?
    pub fn is_cardinal_step_to(self, other: GridCoordinate) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(isize, isize)> for GridCoordinate {
    fn from(x_y_pair: (isize, isize)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

/// The four cardinal directions, declared in clockwise order.
/// North is towards row 0.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

const CLOCKWISE: [CompassPrimary; 4] = [CompassPrimary::North,
                                        CompassPrimary::East,
                                        CompassPrimary::South,
                                        CompassPrimary::West];

impl CompassPrimary {
    #[inline]
    pub fn all() -> [CompassPrimary; 4] {
        CLOCKWISE
    }

    /// Direction at `index` modulo 4 in clockwise order starting from North.
    #[inline]
    pub fn from_index(index: usize) -> CompassPrimary {
        CLOCKWISE[index % CLOCKWISE.len()]
    }

    #[inline]
    pub fn clockwise(self) -> CompassPrimary {
        CompassPrimary::from_index(self as usize + 1)
    }

    /// All four directions, starting at `first` and turning clockwise.
    pub fn clockwise_from(first: CompassPrimary) -> impl Iterator<Item = CompassPrimary> {
        (0..CLOCKWISE.len()).map(move |turns| CompassPrimary::from_index(first as usize + turns))
    }

    fn delta(self) -> (isize, isize) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::South => (0, 1),
            CompassPrimary::West => (-1, 0),
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Tile {
    Wall,
    Path,
    Start,
    Goal,
}

impl Tile {
    /// Every tile other than a wall can be walked on.
    #[inline]
    pub fn is_traversable(self) -> bool {
        self != Tile::Wall
    }
}

impl Default for Tile {
    fn default() -> Tile {
        Tile::Wall
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn offsets() {
        let c = GridCoordinate::new(3, 3);
        assert_eq!(c.offset(CompassPrimary::North), GridCoordinate::new(3, 2));
        assert_eq!(c.offset(CompassPrimary::East), GridCoordinate::new(4, 3));
        assert_eq!(c.offset(CompassPrimary::South), GridCoordinate::new(3, 4));
        assert_eq!(c.offset(CompassPrimary::West), GridCoordinate::new(2, 3));

        // no bounds, the virtual entry cell lives at x = -1
        let edge = GridCoordinate::new(0, 0);
        assert_eq!(edge.offset(CompassPrimary::West), GridCoordinate::new(-1, 0));
    }

    #[test]
    fn clockwise_rotation_wraps() {
        let dirs = CompassPrimary::clockwise_from(CompassPrimary::South).collect::<Vec<_>>();
        assert_eq!(dirs,
                   vec![CompassPrimary::South,
                        CompassPrimary::West,
                        CompassPrimary::North,
                        CompassPrimary::East]);
        assert_eq!(CompassPrimary::West.clockwise(), CompassPrimary::North);
    }

    #[test]
    fn every_rotation_visits_each_direction_once() {
        for first in CompassPrimary::all().iter() {
            let dirs = CompassPrimary::clockwise_from(*first).collect::<Vec<_>>();
            assert_eq!(dirs.len(), 4);
            for dir in CompassPrimary::all().iter() {
                assert_eq!(dirs.iter().filter(|d| *d == dir).count(), 1);
            }
        }
    }

    #[test]
    fn cardinal_steps() {
        let gc = |x, y| GridCoordinate::new(x, y);
        assert!(gc(-1, 2).is_cardinal_step_to(gc(0, 2)));
        assert!(!gc(0, 0).is_cardinal_step_to(gc(1, 1)));
        assert!(!gc(0, 0).is_cardinal_step_to(gc(0, 0)));
        assert_eq!(gc(0, 4).manhattan_distance(gc(4, 1)), 7);
    }

    #[test]
    fn only_walls_block() {
        assert!(!Tile::Wall.is_traversable());
        assert!(Tile::Path.is_traversable());
        assert!(Tile::Start.is_traversable());
        assert!(Tile::Goal.is_traversable());
        assert_eq!(Tile::default(), Tile::Wall);
    }
}
