//! Pursuer steering module.
//!
//! This module contains the [`Pursuer`], the cat that chases the mouse. It re-plans its route with
//! [`PathFinder`] every few ticks and walks the most recent route one cell per tick in between.

use tracing::{debug, warn};

use crate::{
    labyrinth::{MazeError, MazeGraph, Position},
    pathfinding::PathFinder,
};

/// A chaser that follows periodically refreshed shortest routes.
///
/// A refresh that finds no route leaves the previous route in place, so the pursuer keeps going
/// where it was heading, or stands still once that route is used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pursuer {
    /// Cell the pursuer occupies.
    position: Position,
    /// Latest route found, starting at the cell it was planned from.
    route: Vec<Position>,
    /// Index into `route` of the next cell to move to.
    waypoint: usize,
    /// Number of ticks between two refreshes.
    refresh_every: u32,
    /// Ticks elapsed since the last refresh.
    since_refresh: u32,
}

impl Pursuer {
    /// Places a pursuer on `position` that re-plans every `refresh_every` ticks.
    ///
    /// A period of zero is treated as one, i.e. re-planning on every tick.
    #[must_use]
    pub fn new(position: Position, refresh_every: u32) -> Self {
        Self {
            position,
            route: Vec::new(),
            waypoint: 0,
            refresh_every: refresh_every.max(1),
            since_refresh: 0,
        }
    }

    /// Returns the cell the pursuer occupies.
    ///
    /// This function gives back the position after the last tick.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the whole route the pursuer is following.
    ///
    /// This function includes the cell the route was planned from, so walked cells are part of it.
    #[must_use]
    pub fn route(&self) -> &[Position] {
        &self.route
    }

    /// Returns the part of the route not walked yet.
    ///
    /// This function is what the interface draws as the cat's route.
    #[must_use]
    pub fn remaining(&self) -> &[Position] {
        self.route.get(self.waypoint..).unwrap_or_default()
    }

    /// Advances the pursuer by one tick towards `target`.
    ///
    /// On refresh ticks a new route is requested first. Afterwards the pursuer moves to the next
    /// cell of its route, if there is one, and its new position is returned.
    ///
    /// # Errors
    ///
    /// Propagates [`MazeError::InvalidArgument`] from the path finder when either the pursuer or
    /// the target is off the grid.
    pub fn tick(&mut self, graph: &MazeGraph, target: Position) -> Result<Position, MazeError> {
        if self.since_refresh == 0 {
            let _ = self.refresh(graph, target)?;
        }
        self.since_refresh = (self.since_refresh + 1) % self.refresh_every;

        if let Some(next) = self.route.get(self.waypoint).copied() {
            self.position = next;
            self.waypoint += 1;
        }

        Ok(self.position)
    }

    /// Plans a new route from the current position to `target`.
    ///
    /// Returns `true` when a route was found and adopted. The newest route always replaces the
    /// previous one, and walking restarts at its second cell since the first is where the
    /// pursuer already stands.
    ///
    /// # Errors
    ///
    /// Propagates [`MazeError::InvalidArgument`] from the path finder.
    pub fn refresh(&mut self, graph: &MazeGraph, target: Position) -> Result<bool, MazeError> {
        let Some(route) = PathFinder::new(graph).find_path(self.position, target)? else {
            warn!(from = %self.position, %target, "pursuer found no route, keeping the old one");
            return Ok(false);
        };

        debug!(
            from = %self.position,
            %target,
            steps = route.len().saturating_sub(1),
            "pursuer re-planned"
        );
        self.route = route;
        self.waypoint = 1;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labyrinth::Direction;

    /// Builds a 5x1 corridor with every internal wall open.
    fn corridor() -> MazeGraph {
        let mut maze = MazeGraph::new(5, 1).expect("test dimensions should be valid");
        for x in 0..4 {
            let _ = maze
                .remove_wall(Position::new(x, 0), Direction::East)
                .expect("internal wall should open");
        }
        maze
    }

    #[test]
    fn test_tick_moves_one_cell_along_the_route() {
        let maze = corridor();
        let mut cat = Pursuer::new(Position::new(0, 0), 10);

        let position = cat
            .tick(&maze, Position::new(4, 0))
            .expect("both ends are on the grid");

        assert_eq!(position, Position::new(1, 0));
        assert_eq!(cat.route().len(), 5);
        assert_eq!(
            cat.remaining(),
            &[Position::new(2, 0), Position::new(3, 0), Position::new(4, 0)]
        );
    }

    #[test]
    fn test_pursuer_stops_at_the_end_of_its_route() {
        let maze = corridor();
        let mut cat = Pursuer::new(Position::new(2, 0), 100);

        for _ in 0..5 {
            let _ = cat
                .tick(&maze, Position::new(3, 0))
                .expect("both ends are on the grid");
        }

        assert_eq!(cat.position(), Position::new(3, 0));
        assert!(cat.remaining().is_empty());
    }

    #[test]
    fn test_refresh_happens_only_on_schedule() {
        let maze = corridor();
        let mut cat = Pursuer::new(Position::new(0, 0), 3);

        let _ = cat
            .tick(&maze, Position::new(4, 0))
            .expect("both ends are on the grid");
        // The target moved behind the cat, but the old route is kept until the next refresh.
        let _ = cat
            .tick(&maze, Position::new(0, 0))
            .expect("both ends are on the grid");
        let _ = cat
            .tick(&maze, Position::new(0, 0))
            .expect("both ends are on the grid");
        assert_eq!(cat.position(), Position::new(3, 0));

        let _ = cat
            .tick(&maze, Position::new(0, 0))
            .expect("both ends are on the grid");
        assert_eq!(cat.position(), Position::new(2, 0));
        assert_eq!(cat.route().first(), Some(&Position::new(3, 0)));
    }

    #[test]
    fn test_missing_route_keeps_the_previous_one() {
        let mut maze = MazeGraph::new(3, 2).expect("test dimensions should be valid");
        let _ = maze
            .remove_wall(Position::new(0, 0), Direction::East)
            .expect("internal wall should open");
        let _ = maze
            .remove_wall(Position::new(1, 0), Direction::East)
            .expect("internal wall should open");
        let mut cat = Pursuer::new(Position::new(0, 0), 1);

        let _ = cat
            .tick(&maze, Position::new(2, 0))
            .expect("both ends are on the grid");
        let before = cat.route().to_vec();
        let moved = cat
            .tick(&maze, Position::new(1, 1))
            .expect("both ends are on the grid");

        assert_eq!(cat.route(), before.as_slice());
        assert_eq!(moved, Position::new(2, 0));
    }

    #[test]
    fn test_unreachable_target_leaves_the_pursuer_still() {
        let maze = MazeGraph::new(2, 2).expect("test dimensions should be valid");
        let mut cat = Pursuer::new(Position::new(0, 0), 1);

        let position = cat
            .tick(&maze, Position::new(1, 1))
            .expect("both ends are on the grid");

        assert_eq!(position, Position::new(0, 0));
        assert!(cat.route().is_empty());
    }

    #[test]
    fn test_target_off_the_grid_is_an_error() {
        let maze = corridor();
        let mut cat = Pursuer::new(Position::new(0, 0), 1);

        assert!(cat.tick(&maze, Position::new(9, 9)).is_err());
        assert_eq!(cat.position(), Position::new(0, 0));
    }
}
