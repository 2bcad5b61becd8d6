use std::fmt;

use crate::cells::GridCoordinate;
use crate::units::GridSize;

/// Visits every cell of an N * N grid in row-major order.
#[derive(Clone)]
pub struct CellIter {
    dimension: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(GridSize(dimension): GridSize) -> CellIter {
        CellIter {
            dimension,
            current_cell_number: 0,
            cells_count: dimension * dimension,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.dimension;
            let y = self.current_cell_number / self.dimension;
            self.current_cell_number += 1;
            Some(GridCoordinate::new(x as isize, y as isize))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Visits the grid one row at a time, north to south.
#[derive(Debug, Clone)]
pub struct BatchIter {
    dimension: usize,
    current_row: usize,
}

impl BatchIter {
    pub fn new(GridSize(dimension): GridSize) -> BatchIter {
        BatchIter {
            dimension,
            current_row: 0,
        }
    }
}

impl ExactSizeIterator for BatchIter {}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.dimension {
            let y = self.current_row as isize;
            let row = (0..self.dimension)
                .map(|x| GridCoordinate::new(x as isize, y))
                .collect();
            self.current_row += 1;
            Some(row)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dimension - self.current_row;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn cell_iter() {
        let gc = |x, y| GridCoordinate::new(x, y);
        assert_eq!(CellIter::new(GridSize(2)).collect::<Vec<GridCoordinate>>(),
                   &[gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn cell_iter_size_hint() {
        let mut iter = CellIter::new(GridSize(3));
        assert_eq!(iter.len(), 9);
        let _ = iter.next();
        assert_eq!(iter.len(), 8);
    }

    #[test]
    fn row_iter() {
        let gc = |x, y| GridCoordinate::new(x, y);
        assert_eq!(BatchIter::new(GridSize(2)).collect::<Vec<Vec<GridCoordinate>>>(),
                   &[&[gc(0, 0), gc(1, 0)], &[gc(0, 1), gc(1, 1)]]);
    }
}
