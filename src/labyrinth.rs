//! Maze grid and wall graph module.
//!
//! This module contains the [`MazeGraph`] structure and the small value types it is built from:
//! cardinal [`Direction`]s, grid [`Position`]s, individual [`Cell`]s and the optional entrance and
//! exit [`Gates`]. The wall flags stored here are the single source of truth for which cells are
//! connected.

use std::fmt;

use thiserror::Error;
use tracing::{trace, warn};

/// Errors raised by the maze core.
///
/// Absence of a route is not represented here; path queries report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    /// The grid was requested with a zero-length side.
    #[error("invalid maze dimensions {width}x{height}: both sides need at least one cell")]
    InvalidDimension {
        /// Requested number of cells along the x axis.
        width: u16,
        /// Requested number of cells along the y axis.
        height: u16,
    },
    /// An argument does not describe anything on the grid.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A position lies outside the grid.
    #[error("position {position} lies outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Width of the grid that was queried.
        width: u16,
        /// Height of the grid that was queried.
        height: u16,
    },
    /// An outer wall that is not a designated gate was asked to open.
    #[error("the {direction} wall of cell {position} is part of the outer boundary")]
    BoundaryViolation {
        /// Cell owning the wall.
        position: Position,
        /// Side of the cell the wall sits on.
        direction: Direction,
    },
}

/// Cardinal direction of a wall or a step between cells.
///
/// North increases `y` and east increases `x`, so the origin sits in the bottom left corner of the
/// grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Towards larger `y`.
    North,
    /// Towards larger `x`.
    East,
    /// Towards smaller `y`.
    South,
    /// Towards smaller `x`.
    West,
}

impl Direction {
    /// Every direction, in the order walls are stored and neighbors are listed.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the slot this direction occupies in a cell's wall array.
    const fn slot(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        formatter.write_str(name)
    }
}

/// Grid coordinate of a cell.
///
/// This structure holds the column and row of a cell. It is a plain value, and checking that it
/// lies on a particular grid is left to [`MazeGraph::contains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    /// Column, counted from the west edge.
    ///
    /// This field holds the horizontal coordinate, growing towards the east.
    pub x: u16,
    /// Row, counted from the south edge.
    ///
    /// This field holds the vertical coordinate, growing towards the north.
    pub y: u16,
}

impl Position {
    /// Builds a position from its two coordinates.
    ///
    /// This function performs no bounds checks, so it can also describe cells off any grid.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the adjacent position in `direction`.
    ///
    /// Only underflow is caught here; whether the result lies on a particular grid is for the
    /// grid to decide.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            Direction::East => self.x.checked_add(1).map(|x| Self::new(x, self.y)),
            Direction::South => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::West => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
        }
    }

    /// Returns the Manhattan distance to `other`.
    ///
    /// This function provides the heuristic of the A* search, which never overestimates on a
    /// four-connected grid.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }

    /// Returns the world-space placement of this cell for rooms of the given size.
    ///
    /// The placement is the cell's south-west corner, `(x * width, y * height)`. Any unit system
    /// works as long as the caller uses the same one for both dimensions.
    #[must_use]
    pub fn placement(self, width: f64, height: f64) -> (f64, f64) {
        (f64::from(self.x) * width, f64::from(self.y) * height)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// One room of the maze.
///
/// A cell starts with all four walls standing and unvisited. The open neighbor list mirrors the
/// wall flags in the order the passages were carved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Where the cell sits on the grid.
    position: Position,
    /// Wall flags indexed by [`Direction::slot`]; `true` means the wall is standing.
    walls: [bool; 4],
    /// Generation marker.
    visited: bool,
    /// Cells reachable through a removed wall, in carving order.
    open: Vec<Position>,
}

impl Cell {
    /// Builds a closed, unvisited cell.
    const fn new(position: Position) -> Self {
        Self {
            position,
            walls: [true; 4],
            visited: false,
            open: Vec::new(),
        }
    }

    /// Returns the cell's grid position.
    ///
    /// This function gives back the coordinate the cell was allocated at, which never changes.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Tells whether the wall on the given side is standing.
    ///
    /// This function reads the flag straight from the cell; off-grid sides are the graph's concern.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction slots are 0 through 3 and the wall array has exactly four entries."
    )]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls[direction.slot()]
    }

    /// Tells whether the generator has reached this cell.
    ///
    /// This function reads the marker the carver sets, which is only meaningful during and right
    /// after a run.
    #[must_use]
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    /// Returns the cells reachable through an open wall, in carving order.
    ///
    /// This function exposes the cached neighbor list. It always agrees with the wall flags, see
    /// [`MazeGraph::neighbors_open`] for the wall-derived view.
    #[must_use]
    pub fn open_neighbors(&self) -> &[Position] {
        &self.open
    }

    /// Closes every wall and forgets both the visit and the open neighbors.
    fn close(&mut self) {
        self.walls = [true; 4];
        self.visited = false;
        self.open.clear();
    }

    /// Removes the wall facing `direction` and records `other` as reachable through it.
    ///
    /// Returns `true` when the wall was standing before the call.
    #[expect(
        clippy::indexing_slicing,
        reason = "Direction slots are 0 through 3 and the wall array has exactly four entries."
    )]
    fn open_toward(&mut self, direction: Direction, other: Option<Position>) -> bool {
        let was_standing = self.walls[direction.slot()];
        self.walls[direction.slot()] = false;

        if let Some(other) = other {
            if !self.open.contains(&other) {
                self.open.push(other);
            }
        }

        was_standing
    }
}

/// A boundary wall that may be opened despite facing out of the grid.
///
/// This structure names a wall by the cell owning it and the side it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gate {
    /// Boundary cell owning the wall.
    ///
    /// This field holds the cell on the edge of the grid whose outer wall is the gate.
    pub position: Position,
    /// Outward-facing side of that cell.
    ///
    /// This field holds the side of the cell that faces out of the grid.
    pub direction: Direction,
}

impl Gate {
    /// Builds a gate on the given side of a cell.
    ///
    /// This function does not check the wall is on the boundary; [`MazeGraph::with_gates`] does.
    #[must_use]
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Entrance and exit override for the boundary rule.
///
/// This structure holds the only two outer walls carving is allowed to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gates {
    /// Wall through which the maze is entered.
    ///
    /// This field holds the gate the mouse comes in through.
    pub entrance: Gate,
    /// Wall through which the maze is left.
    ///
    /// This field holds the gate on the far side of the maze.
    pub exit: Gate,
}

impl Gates {
    /// Places the entrance on the south side of the origin and the exit on the east side of the
    /// opposite corner of a `width` by `height` grid.
    #[must_use]
    pub const fn corners(width: u16, height: u16) -> Self {
        Self {
            entrance: Gate::new(Position::new(0, 0), Direction::South),
            exit: Gate::new(
                Position::new(width.saturating_sub(1), height.saturating_sub(1)),
                Direction::East,
            ),
        }
    }

    /// Tells whether `gate` is one of the two designated walls.
    fn admits(&self, gate: Gate) -> bool {
        self.entrance == gate || self.exit == gate
    }
}

/// Fixed-size grid of cells joined by removable walls.
///
/// Cells are stored row-major and never added or removed after construction. Every internal wall
/// is shared by two cells and is always opened on both sides at once, so the flags on either side
/// of an edge agree at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGraph {
    /// Number of cells along the x axis.
    ///
    /// This field holds the width of the grid, fixed at construction and never zero.
    width: u16,
    /// Number of cells along the y axis.
    ///
    /// This field holds the height of the grid, fixed at construction and never zero.
    height: u16,
    /// Row-major cell storage.
    ///
    /// This field holds every cell, the one at `(x, y)` sitting at index `y * width + x`.
    cells: Vec<Cell>,
    /// Boundary walls allowed to open, if any.
    ///
    /// This field holds the gates installed with [`MazeGraph::with_gates`]. Without them every
    /// outer wall stays closed.
    gates: Option<Gates>,
}

impl MazeGraph {
    /// Allocates a `width` by `height` grid with every wall standing.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimension`] when either side is zero.
    pub fn new(width: u16, height: u16) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimension { width, height });
        }

        let cells = (0..height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();

        Ok(Self {
            width,
            height,
            cells,
            gates: None,
        })
    }

    /// Installs an entrance and exit that may be opened through the boundary.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidArgument`] when either gate is not an outward-facing wall of a
    /// cell on this grid.
    pub fn with_gates(mut self, gates: Gates) -> Result<Self, MazeError> {
        for gate in [gates.entrance, gates.exit] {
            if !self.contains(gate.position) || !self.is_boundary_wall(gate.position, gate.direction)
            {
                return Err(MazeError::InvalidArgument(format!(
                    "gate on the {} side of {} is not an outer wall of the {}x{} grid",
                    gate.direction, gate.position, self.width, self.height
                )));
            }
        }

        self.gates = Some(gates);
        Ok(self)
    }

    /// Returns the number of cells along the x axis.
    ///
    /// This function gives back the width the graph was created with.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the number of cells along the y axis.
    ///
    /// This function gives back the height the graph was created with.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns the installed gates.
    ///
    /// This function returns `None` unless gates were installed with [`MazeGraph::with_gates`].
    #[must_use]
    pub const fn gates(&self) -> Option<Gates> {
        self.gates
    }

    /// Tells whether `position` lies on the grid.
    ///
    /// This function is the bounds check every other query relies on.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Returns the cell at `position`.
    ///
    /// This function returns `None` for positions off the grid instead of failing.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|index| self.cells.get(index))
    }

    /// Iterates over every cell, row by row from the south edge.
    ///
    /// This function walks the storage in order, so the origin comes first and the far corner last.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Returns the on-grid position next to `position` in `direction`.
    ///
    /// This function returns `None` when the step would leave the grid, which is how out-of-bounds
    /// neighbors are reported.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|next| self.contains(*next))
    }

    /// Tells whether the wall on the given side of `position` is standing.
    ///
    /// Positions off the grid are reported as walled in.
    #[must_use]
    pub fn has_wall(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_none_or(|cell| cell.has_wall(direction))
    }

    /// Tells whether the wall on the given side of `position` faces out of the grid.
    ///
    /// This function is `false` for positions off the grid.
    #[must_use]
    pub fn is_boundary_wall(&self, position: Position, direction: Direction) -> bool {
        self.contains(position) && self.neighbor(position, direction).is_none()
    }

    /// Closes every wall, clears every visit and drops all open neighbor lists.
    ///
    /// This function runs before every generation so that carving the same graph twice starts from
    /// the same state.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.close();
        }
    }

    /// Marks the cell at `position` as reached by the generator.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfBounds`] when `position` is not on the grid.
    pub fn mark_visited(&mut self, position: Position) -> Result<(), MazeError> {
        self.cell_mut(position)?.visited = true;
        Ok(())
    }

    /// Removes the wall on the given side of `position`, together with its mirror on the
    /// neighboring cell.
    ///
    /// Returns `true` when the call opened something and `false` when the passage was already
    /// open. A wall facing out of the grid only opens when it is one of the installed gates, and
    /// then only on its own cell.
    ///
    /// # Errors
    ///
    /// - [`MazeError::OutOfBounds`] when `position` is not on the grid.
    /// - [`MazeError::BoundaryViolation`] when the wall is an outer wall that is not a gate.
    pub fn remove_wall(
        &mut self,
        position: Position,
        direction: Direction,
    ) -> Result<bool, MazeError> {
        if !self.contains(position) {
            return Err(self.out_of_bounds(position));
        }

        let Some(neighbor) = self.neighbor(position, direction) else {
            return self.open_gate(Gate::new(position, direction));
        };

        let forward = self.cell_mut(position)?.open_toward(direction, Some(neighbor));
        let backward = self
            .cell_mut(neighbor)?
            .open_toward(direction.opposite(), Some(position));

        if forward || backward {
            trace!(%position, %neighbor, %direction, "opened passage");
        }

        Ok(forward || backward)
    }

    /// Opens both gate walls, if gates are installed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`MazeGraph::remove_wall`], which cannot occur for gates accepted by
    /// [`MazeGraph::with_gates`].
    pub fn open_gates(&mut self) -> Result<(), MazeError> {
        if let Some(gates) = self.gates {
            for gate in [gates.entrance, gates.exit] {
                let _ = self.remove_wall(gate.position, gate.direction)?;
            }
        }

        Ok(())
    }

    /// Iterates over the cells reachable from `position` through an open wall.
    ///
    /// The answer is derived from the wall flags, in [`Direction::ALL`] order. Open gates lead off
    /// the grid and are therefore not listed.
    pub fn neighbors_open(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        let cell = self.cell(position);

        Direction::ALL.into_iter().filter_map(move |direction| {
            cell.filter(|current| !current.has_wall(direction))
                .and_then(|_| self.neighbor(position, direction))
        })
    }

    /// Lists the on-grid cells adjacent to `position`, walls notwithstanding, that the generator
    /// has not reached yet, each paired with the direction leading to it.
    #[must_use]
    pub fn neighbors_unvisited(&self, position: Position) -> Vec<(Direction, Position)> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                self.neighbor(position, direction)
                    .map(|next| (direction, next))
            })
            .filter(|(_, next)| self.cell(*next).is_some_and(|cell| !cell.is_visited()))
            .collect()
    }

    /// Counts the open passages between pairs of cells on the grid.
    #[must_use]
    pub fn open_edge_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                [Direction::North, Direction::East]
                    .into_iter()
                    .filter(|direction| {
                        !cell.has_wall(*direction)
                            && self.neighbor(cell.position(), *direction).is_some()
                    })
                    .count()
            })
            .sum()
    }

    /// Returns the storage index of `position`.
    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position).then(|| {
            usize::from(position.y) * usize::from(self.width) + usize::from(position.x)
        })
    }

    /// Returns the cell at `position` for mutation.
    fn cell_mut(&mut self, position: Position) -> Result<&mut Cell, MazeError> {
        let error = self.out_of_bounds(position);

        self.index(position)
            .and_then(|index| self.cells.get_mut(index))
            .ok_or(error)
    }

    /// Builds the out-of-bounds error for `position` on this grid.
    const fn out_of_bounds(&self, position: Position) -> MazeError {
        MazeError::OutOfBounds {
            position,
            width: self.width,
            height: self.height,
        }
    }

    /// Opens a boundary wall if it is a designated gate and refuses otherwise.
    fn open_gate(&mut self, gate: Gate) -> Result<bool, MazeError> {
        if !self.gates.is_some_and(|gates| gates.admits(gate)) {
            warn!(
                position = %gate.position,
                direction = %gate.direction,
                "refused to open an outer wall that is not a gate"
            );
            return Err(MazeError::BoundaryViolation {
                position: gate.position,
                direction: gate.direction,
            });
        }

        let opened = self.cell_mut(gate.position)?.open_toward(gate.direction, None);
        trace!(position = %gate.position, direction = %gate.direction, opened, "opened gate");

        Ok(opened)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a grid of the given size, failing the test on bad dimensions.
    fn grid(width: u16, height: u16) -> MazeGraph {
        MazeGraph::new(width, height).expect("test dimensions should be valid")
    }

    #[test]
    fn test_new_rejects_zero_sides() {
        assert_eq!(
            MazeGraph::new(0, 4),
            Err(MazeError::InvalidDimension {
                width: 0,
                height: 4
            })
        );
        assert!(MazeGraph::new(3, 0).is_err());
        assert!(MazeGraph::new(0, 0).is_err());
    }

    #[test]
    fn test_new_starts_closed_and_unvisited() {
        let maze = grid(3, 2);

        assert_eq!(maze.cells().count(), 6);
        for cell in maze.cells() {
            assert!(!cell.is_visited());
            assert!(cell.open_neighbors().is_empty());
            for direction in Direction::ALL {
                assert!(cell.has_wall(direction), "{direction} wall should stand");
            }
        }
        assert_eq!(maze.open_edge_count(), 0);
    }

    #[test]
    fn test_cells_are_stored_at_their_positions() {
        let maze = grid(4, 3);

        for y in 0..3 {
            for x in 0..4 {
                let position = Position::new(x, y);
                let cell = maze.cell(position).expect("cell should exist");
                assert_eq!(cell.position(), position);
            }
        }
        assert!(maze.cell(Position::new(4, 0)).is_none());
        assert!(maze.cell(Position::new(0, 3)).is_none());
    }

    #[test]
    fn test_opposite_direction() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
        assert_eq!(Direction::South.opposite(), Direction::North);
        assert_eq!(Direction::West.opposite(), Direction::East);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_remove_wall_opens_both_sides() {
        let mut maze = grid(3, 3);
        let origin = Position::new(1, 1);
        let east = Position::new(2, 1);

        let opened = maze
            .remove_wall(origin, Direction::East)
            .expect("internal wall should open");

        assert!(opened);
        assert!(!maze.has_wall(origin, Direction::East));
        assert!(!maze.has_wall(east, Direction::West));
        assert_eq!(
            maze.cell(origin).expect("cell should exist").open_neighbors(),
            &[east]
        );
        assert_eq!(
            maze.cell(east).expect("cell should exist").open_neighbors(),
            &[origin]
        );
        assert_eq!(maze.open_edge_count(), 1);
    }

    #[test]
    fn test_remove_wall_is_idempotent() {
        let mut maze = grid(2, 2);
        let origin = Position::new(0, 0);

        assert_eq!(maze.remove_wall(origin, Direction::North), Ok(true));
        let snapshot = maze.clone();
        assert_eq!(maze.remove_wall(origin, Direction::North), Ok(false));
        assert_eq!(
            maze.remove_wall(Position::new(0, 1), Direction::South),
            Ok(false)
        );

        assert_eq!(maze, snapshot);
        assert_eq!(maze.open_edge_count(), 1);
    }

    #[test]
    fn test_remove_wall_refuses_boundary_without_gates() {
        let mut maze = grid(2, 2);

        for (position, direction) in [
            (Position::new(0, 0), Direction::South),
            (Position::new(0, 0), Direction::West),
            (Position::new(1, 1), Direction::North),
            (Position::new(1, 1), Direction::East),
        ] {
            assert_eq!(
                maze.remove_wall(position, direction),
                Err(MazeError::BoundaryViolation {
                    position,
                    direction
                })
            );
            assert!(maze.has_wall(position, direction));
        }
        assert_eq!(maze, grid(2, 2));
    }

    #[test]
    fn test_remove_wall_rejects_positions_off_the_grid() {
        let mut maze = grid(2, 2);

        assert!(matches!(
            maze.remove_wall(Position::new(5, 0), Direction::West),
            Err(MazeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_gates_open_only_designated_walls() {
        let mut maze = grid(3, 3)
            .with_gates(Gates::corners(3, 3))
            .expect("corner gates should be valid");

        maze.open_gates().expect("gates should open");

        assert!(!maze.has_wall(Position::new(0, 0), Direction::South));
        assert!(!maze.has_wall(Position::new(2, 2), Direction::East));
        assert!(maze.has_wall(Position::new(0, 0), Direction::West));
        assert!(maze.has_wall(Position::new(2, 2), Direction::North));
        assert!(matches!(
            maze.remove_wall(Position::new(1, 0), Direction::South),
            Err(MazeError::BoundaryViolation { .. })
        ));
        assert_eq!(maze.open_edge_count(), 0);
        assert_eq!(maze.neighbors_open(Position::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_with_gates_rejects_inner_walls() {
        let gates = Gates {
            entrance: Gate::new(Position::new(1, 1), Direction::North),
            exit: Gate::new(Position::new(2, 2), Direction::East),
        };

        assert!(matches!(
            grid(3, 3).with_gates(gates),
            Err(MazeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reset_closes_everything() {
        let mut maze = grid(3, 3);
        let _ = maze
            .remove_wall(Position::new(0, 0), Direction::East)
            .expect("internal wall should open");
        maze.mark_visited(Position::new(2, 2))
            .expect("position should be on the grid");

        maze.reset();

        assert_eq!(maze, grid(3, 3));
    }

    #[test]
    fn test_neighbors_open_follows_walls() {
        let mut maze = grid(3, 3);
        let center = Position::new(1, 1);
        let _ = maze
            .remove_wall(center, Direction::West)
            .expect("internal wall should open");
        let _ = maze
            .remove_wall(center, Direction::North)
            .expect("internal wall should open");

        let open: Vec<Position> = maze.neighbors_open(center).collect();

        assert_eq!(open, vec![Position::new(1, 2), Position::new(0, 1)]);
        assert_eq!(
            maze.cell(center).expect("cell should exist").open_neighbors(),
            &[Position::new(0, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_neighbors_unvisited_ignores_walls_and_visits() {
        let mut maze = grid(3, 3);
        maze.mark_visited(Position::new(1, 2))
            .expect("position should be on the grid");

        let corner = maze.neighbors_unvisited(Position::new(0, 0));
        let center = maze.neighbors_unvisited(Position::new(1, 1));

        assert_eq!(
            corner,
            vec![
                (Direction::North, Position::new(0, 1)),
                (Direction::East, Position::new(1, 0))
            ]
        );
        assert_eq!(center.len(), 3);
        assert!(!center.contains(&(Direction::North, Position::new(1, 2))));
    }

    #[test]
    fn test_position_helpers() {
        let position = Position::new(2, 3);

        assert_eq!(position.manhattan(Position::new(5, 1)), 5);
        assert_eq!(Position::new(0, 0).step(Direction::West), None);
        assert_eq!(
            position.step(Direction::North),
            Some(Position::new(2, 4))
        );
        assert_eq!(position.placement(2.0, 0.5), (4.0, 1.5));
        assert_eq!(position.to_string(), "(2, 3)");
    }
}
