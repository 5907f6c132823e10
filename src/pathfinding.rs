//! Shortest route search module.
//!
//! This module contains the A* search the pursuer uses to find its way through a carved maze. The
//! search only ever follows open walls, costs every step the same and estimates the remaining
//! distance with the Manhattan metric, which keeps the returned routes optimal.

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashMap, HashSet},
};

use tracing::{debug, trace};

use crate::labyrinth::{MazeError, MazeGraph, Position};

/// A* search over the open passages of a maze.
///
/// The path finder borrows the graph and keeps no state between queries, so any number of them
/// may query the same frozen maze.
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'maze> {
    /// Maze whose open walls define the adjacency.
    ///
    /// This field holds a shared borrow, so the maze cannot change while the path finder exists.
    graph: &'maze MazeGraph,
}

impl<'maze> PathFinder<'maze> {
    /// Creates a path finder over `graph`.
    ///
    /// This function is free; all the work happens in [`PathFinder::find_path`].
    #[must_use]
    pub const fn new(graph: &'maze MazeGraph) -> Self {
        Self { graph }
    }

    /// Finds a shortest route from `start` to `goal`.
    ///
    /// The route lists every cell from `start` to `goal`, both included, and each consecutive pair
    /// is joined by an open wall. `Ok(None)` means the two cells are not connected, which is an
    /// ordinary answer rather than a failure.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidArgument`] when either end is not on the grid.
    pub fn find_path(
        &self,
        start: Position,
        goal: Position,
    ) -> Result<Option<Vec<Position>>, MazeError> {
        for (role, position) in [("start", start), ("goal", goal)] {
            if !self.graph.contains(position) {
                return Err(MazeError::InvalidArgument(format!(
                    "{role} {position} is not on the {}x{} grid",
                    self.graph.width(),
                    self.graph.height()
                )));
            }
        }

        let mut query = PathQuery::new(start, goal);

        while let Some(current) = query.pop_best() {
            trace!(%current, "expanding");

            if current == goal {
                let route = query.reconstruct(goal);
                debug!(
                    %start,
                    %goal,
                    steps = route.len().saturating_sub(1),
                    expanded = query.closed.len(),
                    "route found"
                );
                return Ok(Some(route));
            }

            for next in self.graph.neighbors_open(current) {
                query.relax(current, next);
            }
        }

        debug!(%start, %goal, expanded = query.closed.len(), "no route");
        Ok(None)
    }
}

/// Bookkeeping for a single search.
///
/// Everything here lives for one call to [`PathFinder::find_path`] and is dropped on return.
struct PathQuery {
    /// Cell being searched for.
    goal: Position,
    /// Frontier ordered by estimated total cost, then by insertion order.
    open: BinaryHeap<Reverse<(u32, u64, Position)>>,
    /// Cells whose cost is final.
    closed: HashSet<Position>,
    /// Predecessor of each reached cell on its best known route.
    came_from: HashMap<Position, Position>,
    /// Best known cost from the start.
    cost: HashMap<Position, u32>,
    /// Best known cost plus the heuristic; frontier entries that disagree are stale.
    estimate: HashMap<Position, u32>,
    /// Number of frontier insertions so far, used to break ties first-come first-served.
    inserted: u64,
}

impl PathQuery {
    /// Seeds a query with the start cell on the frontier.
    fn new(start: Position, goal: Position) -> Self {
        let mut query = Self {
            goal,
            open: BinaryHeap::new(),
            closed: HashSet::new(),
            came_from: HashMap::new(),
            cost: HashMap::new(),
            estimate: HashMap::new(),
            inserted: 0,
        };
        query.admit(start, 0);
        query
    }

    /// Records `cost` as the best known cost of `position` and queues it.
    fn admit(&mut self, position: Position, cost: u32) {
        let estimate = cost.saturating_add(position.manhattan(self.goal));

        let _ = self.cost.insert(position, cost);
        let _ = self.estimate.insert(position, estimate);
        self.open.push(Reverse((estimate, self.inserted, position)));
        self.inserted += 1;
    }

    /// Removes the frontier cell with the lowest estimate and closes it.
    ///
    /// Entries left behind by later improvements are skipped.
    fn pop_best(&mut self) -> Option<Position> {
        while let Some(Reverse((estimate, _, position))) = self.open.pop() {
            if self.estimate.get(&position) != Some(&estimate) {
                continue;
            }
            if self.closed.insert(position) {
                return Some(position);
            }
        }

        None
    }

    /// Offers the step from `current` to `next` as a route to `next`.
    fn relax(&mut self, current: Position, next: Position) {
        if self.closed.contains(&next) {
            return;
        }

        let Some(tentative) = self
            .cost
            .get(&current)
            .map(|cost| cost.saturating_add(1))
        else {
            return;
        };

        if self.cost.get(&next).is_none_or(|known| tentative < *known) {
            let _ = self.came_from.insert(next, current);
            self.admit(next, tentative);
        }
    }

    /// Walks the predecessors back from `goal` and returns the route in travel order.
    fn reconstruct(&self, goal: Position) -> Vec<Position> {
        let mut route = vec![goal];
        let mut current = goal;

        while let Some(previous) = self.came_from.get(&current) {
            route.push(*previous);
            current = *previous;
        }

        route.reverse();
        route
    }
}
