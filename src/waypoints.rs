use std::collections::vec_deque::{self, VecDeque};

use crate::cells::GridCoordinate;
use crate::units::{GridSize, RowIndex};

/// The solved route as an ordered queue of cells for a path follower to consume.
///
/// Begins one cell west of the start (column -1) and ends one cell east of the goal (column N)
/// so a follower can walk in from outside the grid and leave it again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Waypoints {
    queue: VecDeque<GridCoordinate>,
}

impl Waypoints {
    /// Wraps a Start to Goal route with the virtual entry and exit cells.
    pub fn from_route(route: &[GridCoordinate],
                      size: GridSize,
                      start_row: RowIndex,
                      goal_row: RowIndex)
                      -> Waypoints {
        let GridSize(n) = size;
        let mut queue = VecDeque::with_capacity(route.len() + 2);
        queue.push_back(GridCoordinate::new(-1, start_row.0 as isize));
        queue.extend(route.iter().cloned());
        queue.push_back(GridCoordinate::new(n as isize, goal_row.0 as isize));
        Waypoints { queue }
    }

    /// Takes the next waypoint off the front of the queue. None once the queue is drained.
    #[inline]
    pub fn pop_next(&mut self) -> Option<GridCoordinate> {
        self.queue.pop_front()
    }

    #[inline]
    pub fn peek_next(&self) -> Option<GridCoordinate> {
        self.queue.front().cloned()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> vec_deque::Iter<GridCoordinate> {
        self.queue.iter()
    }
}

impl IntoIterator for Waypoints {
    type Item = GridCoordinate;
    type IntoIter = vec_deque::IntoIter<GridCoordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.queue.into_iter()
    }
}
