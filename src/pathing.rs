use error_chain::bail;
use itertools::Itertools;
use smallvec::SmallVec;
use tracing::debug;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::utils;
use crate::utils::FnvHashMap;


/// Manhattan distance from a cell to the exit. Never overestimates on a 4-connected grid with
/// unit step costs, so A* ordered by it finds shortest routes.
#[inline]
pub fn heuristic(coord: GridCoordinate, goal: GridCoordinate) -> u32 {
    coord.manhattan_distance(goal) as u32
}

type NodeHandle = usize;

#[derive(Debug, Clone, Copy)]
struct SearchNode {
    coord: GridCoordinate,
    predecessor: Option<NodeHandle>,
    path_cost: u32,
    total_cost: u32,
    settled: bool,
}

/// Search scratch space for one A* run.
///
/// Nodes live in an arena and are referred to by handle. `cell_nodes` maps a grid cell index to
/// the handle of the only node that cell will ever have, so finding whether a cell was seen
/// before is a table lookup rather than a scan of the open or closed sets.
struct SearchArena {
    nodes: Vec<SearchNode>,
    cell_nodes: Vec<Option<NodeHandle>>,
    frontier: Vec<NodeHandle>,
}

impl SearchArena {
    fn new(cells_count: usize) -> SearchArena {
        SearchArena {
            nodes: Vec::with_capacity(cells_count),
            cell_nodes: vec![None; cells_count],
            frontier: Vec::new(),
        }
    }

    fn insert(&mut self, cell_index: usize, node: SearchNode) -> NodeHandle {
        let handle = self.nodes.len();
        self.nodes.push(node);
        self.cell_nodes[cell_index] = Some(handle);
        self.frontier.push(handle);
        handle
    }

    /// Position in the frontier of the cheapest node by estimated total cost.
    /// Ties go to whichever was added to the frontier first.
    fn cheapest_frontier_position(&self) -> Option<usize> {
        let nodes = &self.nodes;
        self.frontier
            .iter()
            .position_min_by_key(|handle| nodes[**handle].total_cost)
    }

    fn route_to(&self, end: NodeHandle) -> Vec<GridCoordinate> {
        let mut route = vec![];
        let mut current = Some(end);
        while let Some(handle) = current {
            let node = &self.nodes[handle];
            route.push(node.coord);
            current = node.predecessor;
        }
        route.reverse();
        route
    }
}

/// Find the shortest route from the grid's Start to its Goal with A*.
///
/// The route holds every cell from Start to Goal inclusive. Walls block, every other tile costs
/// one step to enter, and only cardinal moves are allowed.
///
/// Errors with `Unsolved` when the grid has no recorded start or goal, or when the search runs
/// out of frontier without reaching the goal.
pub fn shortest_path(grid: &Grid) -> Result<Vec<GridCoordinate>> {

    let (start, goal) = match (grid.start_coordinate(), grid.goal_coordinate()) {
        (Some(start), Some(goal)) => (start, goal),
        _ => bail!(ErrorKind::Unsolved),
    };
    let start_index = grid.grid_coordinate_to_index(start)
        .ok_or(ErrorKind::Unsolved)?;

    let mut arena = SearchArena::new(grid.size());
    let _ = arena.insert(start_index,
                         SearchNode {
                             coord: start,
                             predecessor: None,
                             path_cost: 0,
                             total_cost: heuristic(start, goal),
                             settled: false,
                         });
    let mut expanded = 0;

    while let Some(frontier_position) = arena.cheapest_frontier_position() {

        let current = arena.frontier[frontier_position];
        let SearchNode { coord, path_cost, .. } = arena.nodes[current];

        if coord == goal {
            let route = arena.route_to(current);
            debug!(expanded, nodes = arena.nodes.len(), route_cells = route.len(), "solved");
            return Ok(route);
        }

        // `remove` keeps insertion order so equal cost ties resolve the same way every run
        let _ = arena.frontier.remove(frontier_position);
        arena.nodes[current].settled = true;
        expanded += 1;

        let candidate_cost = path_cost + 1;
        for dir in CompassPrimary::all().iter() {

            let neighbour = coord.offset(*dir);
            if !grid.is_traversable(neighbour) {
                continue;
            }
            let cell_index = match grid.grid_coordinate_to_index(neighbour) {
                Some(index) => index,
                None => continue,
            };

            let seen = arena.cell_nodes[cell_index];
            match seen {
                Some(existing) if arena.nodes[existing].path_cost <= candidate_cost => {
                    // already reached at least as cheaply
                }
                Some(existing) => {
                    let node = &mut arena.nodes[existing];
                    node.predecessor = Some(current);
                    node.path_cost = candidate_cost;
                    node.total_cost = candidate_cost + heuristic(neighbour, goal);
                    if node.settled {
                        node.settled = false;
                        arena.frontier.push(existing);
                    }
                }
                None => {
                    let _ = arena.insert(cell_index,
                                         SearchNode {
                                             coord: neighbour,
                                             predecessor: Some(current),
                                             path_cost: candidate_cost,
                                             total_cost: candidate_cost +
                                                         heuristic(neighbour, goal),
                                             settled: false,
                                         });
                }
            }
        }
    }

    debug!(expanded, nodes = arena.nodes.len(), "frontier exhausted without reaching the goal");
    bail!(ErrorKind::Unsolved)
}


/// Breadth first flood fill of step counts from a start cell to every reachable open cell.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// None if the start is outside the grid or is a wall.
    pub fn new(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_traversable(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start_coordinate, 0);

        // Every step costs one, so the first time a cell is reached is the shortest way there and
        // the distances map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for neighbour in grid.traversable_neighbours(*cell_coord).iter() {
                    if !distances.contains_key(neighbour) {
                        distances.insert(*neighbour, distance_to_cell + 1);
                        new_frontier.push(*neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Open cells reachable from the start, the start included.
    #[inline]
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let furthest_distance = self.max();
        self.distances
            .iter()
            .filter(|(_, distance)| **distance == furthest_distance)
            .map(|(coord, _)| *coord)
            .sorted()
            .collect()
    }
}
